use axum::Router;
use domain_roles::{PgRoleRepository, RoleService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgRoleRepository::new(state.db.clone());
    let service = RoleService::new(repository);
    handlers::router(service)
}
