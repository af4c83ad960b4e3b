use axum::{Router, middleware};
use axum_helpers::jwt_auth_middleware;
use domain_users::{PgUserRepository, UserService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::new(repository);

    // Only the report subtree requires a verified token; CRUD stays open
    let report = handlers::report_router(service.clone()).route_layer(
        middleware::from_fn_with_state(state.jwt_auth.clone(), jwt_auth_middleware),
    );

    handlers::router(service).merge(report)
}
