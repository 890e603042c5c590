pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_accounts;
mod m20240301_000002_create_catalog;
mod m20240415_000001_create_tournaments;
mod m20240601_000001_create_plans;
mod m20250120_000001_add_manager_contacts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_accounts::Migration),
            Box::new(m20240301_000002_create_catalog::Migration),
            Box::new(m20240415_000001_create_tournaments::Migration),
            Box::new(m20240601_000001_create_plans::Migration),
            Box::new(m20250120_000001_add_manager_contacts::Migration),
        ]
    }
}
