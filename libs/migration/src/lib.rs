pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_roles;
mod m20250801_000002_create_users;
mod m20250801_000003_create_risk_zones;
mod m20250801_000004_seed_initial_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_roles::Migration),
            Box::new(m20250801_000002_create_users::Migration),
            Box::new(m20250801_000003_create_risk_zones::Migration),
            Box::new(m20250801_000004_seed_initial_data::Migration),
        ]
    }
}
