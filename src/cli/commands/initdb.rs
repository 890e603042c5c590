use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, error, info, trace};

use crate::config::seed_roles;

/// Apply migrations and seed the reference roles.
///
/// `serve` falls back to in-memory storage when the schema is stale, so a
/// relational deployment runs this once before first start and after every
/// upgrade.
pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");
    debug!("Database URL: {}", database_url);

    let db: DatabaseConnection = match Database::connect(database_url).await {
        Ok(connection) => {
            info!("Successfully connected to database");
            connection
        }
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    info!("Running database migrations");
    match Migrator::up(&db, None).await {
        Ok(_) => {
            info!("Database migrations completed successfully");
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    info!("Seeding reference roles");
    match seed_roles(&db).await {
        Ok(_) => {
            debug!("Reference roles are present");
        }
        Err(e) => {
            error!("Failed to seed reference roles: {}", e);
            return Err(e);
        }
    }

    info!("Database initialization completed successfully!");
    Ok(())
}
