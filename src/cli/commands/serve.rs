use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace, warn};

use crate::config::initialize_app_state_with_url;
use crate::router::create_router;
use crate::schemas::StorageMode;

pub async fn serve(database_url: &str, bind_address: &str) -> Result<()> {
    trace!("Entering serve function");
    info!("CeleCart application starting up");
    debug!("Database URL: {}", database_url);
    debug!("Bind address: {}", bind_address);

    // Initialize application state
    let state = match initialize_app_state_with_url(database_url).await {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {}", e);
            return Err(e);
        }
    };

    if state.storage_mode == StorageMode::InMemory {
        warn!("Running on in-memory storage, all data is lost on shutdown");
    }
    info!(
        "Google OAuth {}",
        if state.google.is_some() {
            "configured"
        } else {
            "not configured, social login disabled"
        }
    );
    info!(
        "Style assistant {}",
        if state.assistant.is_configured() {
            "configured"
        } else {
            "not configured, chat returns 502"
        }
    );
    info!(
        "Mailer {}",
        if state.mailer.is_configured() {
            "configured"
        } else {
            "not configured, reset links are returned in responses"
        }
    );

    // Create router
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("CeleCart API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
