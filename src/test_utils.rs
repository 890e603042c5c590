#[cfg(test)]
pub mod test_utils {
    use crate::auth::password::hash_password;
    use crate::clients::assistant::AssistantClient;
    use crate::clients::mailer::Mailer;
    use crate::config::seed_roles;
    use crate::handlers::roles::grant_role_by_name;
    use crate::router::create_router;
    use crate::schemas::{AppState, StorageMode};
    use axum::Router;
    use migration::{Migrator, MigratorTrait};
    use model::entities::user;
    use moka::future::Cache;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use std::time::Duration;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing.
    ///
    /// Seeds the reference roles and one approved administrator
    /// (admin@celecart.com / admin-password) so gated endpoints can be
    /// exercised without going through signup.
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;

        seed_roles(&db).await.expect("Failed to seed roles");

        let admin = user::ActiveModel {
            username: Set("admin".to_string()),
            email: Set("admin@celecart.com".to_string()),
            password_hash: Set(Some(
                hash_password("admin-password").expect("Failed to hash admin password"),
            )),
            account_status: Set(user::AccountStatus::Approved),
            source: Set(user::SignupSource::Local),
            ..Default::default()
        };
        let admin = admin.insert(&db).await.expect("Failed to create admin user");
        grant_role_by_name(&db, admin.id, model::entities::role::ADMIN)
            .await
            .expect("Failed to grant admin role");

        let sessions = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(3600))
            .build();
        let oauth_states = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(600))
            .build();

        AppState {
            db,
            storage_mode: StorageMode::InMemory,
            sessions,
            oauth_states,
            assistant: AssistantClient::unconfigured(),
            mailer: Mailer::unconfigured(),
            google: None,
            app_base_url: "http://localhost:3000".to_string(),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// This function sets up a tracing subscriber that outputs logs to STDERR,
    /// which is useful for debugging tests. The log level is determined by the
    /// RUST_LOG environment variable, defaulting to WARN if not set.
    ///
    /// # Returns
    ///
    /// A guard that will clean up the subscriber when dropped.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        // Get log level from environment variable or default to WARN
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        // Initialize tracing for tests
        let _ = init_test_tracing();

        let state = setup_test_app_state().await;
        println!("Test database setup complete");
        let router = create_router(state);
        println!("Test router created");
        router
    }
}
