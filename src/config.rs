use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use model::entities::role;
use moka::future::Cache;
use sea_orm::{ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::auth::session::SESSION_TTL_SECS;
use crate::clients::{assistant::AssistantClient, google::GoogleOAuth, mailer::Mailer};
use crate::schemas::{AppState, StorageMode};

/// OAuth state nonces only need to survive one consent round trip.
const OAUTH_STATE_TTL_SECS: u64 = 600;

/// Initialize application state against a specific database URL.
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    info!("Connecting to database: {}", database_url);
    let (db, storage_mode) = connect_storage(database_url).await?;
    info!("Storage mode: {}", storage_mode.as_str());

    let sessions = Cache::builder()
        .max_capacity(100_000)
        .time_to_live(Duration::from_secs(SESSION_TTL_SECS))
        .build();

    let oauth_states = Cache::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(OAUTH_STATE_TTL_SECS))
        .build();

    let app_base_url =
        std::env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    Ok(AppState {
        db,
        storage_mode,
        sessions,
        oauth_states,
        assistant: AssistantClient::from_env(),
        mailer: Mailer::from_env(),
        google: GoogleOAuth::from_env(),
        app_base_url,
    })
}

/// Connect to the configured store.
///
/// The configured database is authoritative only when it is reachable and
/// fully migrated. Otherwise the service boots on a fresh in-memory database
/// instead of crashing; contracts are identical either way.
async fn connect_storage(database_url: &str) -> Result<(DatabaseConnection, StorageMode)> {
    match Database::connect(database_url).await {
        Ok(db) => match Migrator::get_pending_migrations(&db).await {
            Ok(pending) if pending.is_empty() => {
                debug!("Database schema is up to date");
                Ok((db, StorageMode::Relational))
            }
            Ok(pending) => {
                warn!(
                    "Database at {} has {} pending migrations, falling back to in-memory storage",
                    database_url,
                    pending.len()
                );
                Ok((memory_storage().await?, StorageMode::InMemory))
            }
            Err(e) => {
                warn!(
                    "Could not inspect schema of {}: {}, falling back to in-memory storage",
                    database_url, e
                );
                Ok((memory_storage().await?, StorageMode::InMemory))
            }
        },
        Err(e) => {
            warn!(
                "Database connection to {} failed: {}, falling back to in-memory storage",
                database_url, e
            );
            Ok((memory_storage().await?, StorageMode::InMemory))
        }
    }
}

async fn memory_storage() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    seed_roles(&db).await?;
    Ok(db)
}

/// Insert the reference roles the service expects, skipping any that exist.
pub async fn seed_roles(db: &DatabaseConnection) -> Result<()> {
    for (name, description) in [
        (role::ADMIN, "Full administrative access"),
        (role::USER, "Standard shopper account"),
        (role::CELEBRITY, "Owns a linked celebrity profile"),
    ] {
        let existing = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(db)
            .await?;
        if existing.is_none() {
            role::ActiveModel {
                name: Set(name.to_string()),
                description: Set(Some(description.to_string())),
                ..Default::default()
            }
            .insert(db)
            .await?;
            debug!("Seeded role '{}'", name);
        }
    }
    Ok(())
}
