use crate::handlers::{
    assistant::chat,
    auth::{
        current_user, forgot_password, google_callback, google_login, login, logout,
        reset_password, signup,
    },
    brands::{create_brand, get_brand, get_brands, update_brand},
    categories::{create_category, get_categories},
    celebrities::{
        create_celebrity, get_celebrities, get_celebrities_by_category, get_celebrity,
        link_celebrity_profile, update_celebrity,
    },
    celebrity_brands::{create_celebrity_brand, delete_celebrity_brand, get_celebrity_brands},
    health::health_check,
    outfits::{create_tournament_outfit, get_celebrity_outfits, get_tournament_outfits},
    plans::get_plans,
    products::{create_celebrity_product, get_celebrity_products},
    roles::{get_roles, get_user_roles, grant_role, revoke_role},
    tournaments::{create_tournament, get_tournament, get_tournaments},
    users::{delete_user, get_user, get_users, update_user, update_user_status},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Auth routes
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/auth/user", get(current_user))
        .route("/api/v1/auth/forgot-password", post(forgot_password))
        .route("/api/v1/auth/reset-password", post(reset_password))
        .route("/api/v1/auth/google", get(google_login))
        .route("/api/v1/auth/google/callback", get(google_callback))
        // User administration routes
        .route("/api/v1/users", get(get_users))
        .route("/api/v1/users/:user_id", get(get_user))
        .route("/api/v1/users/:user_id", put(update_user))
        .route("/api/v1/users/:user_id", delete(delete_user))
        .route("/api/v1/users/:user_id/status", put(update_user_status))
        // Role routes
        .route("/api/v1/roles", get(get_roles))
        .route("/api/v1/users/:user_id/roles", get(get_user_roles))
        .route("/api/v1/users/:user_id/roles/:role_name", post(grant_role))
        .route(
            "/api/v1/users/:user_id/roles/:role_name",
            delete(revoke_role),
        )
        .route(
            "/api/v1/users/:user_id/celebrity-profile",
            post(link_celebrity_profile),
        )
        // Celebrity routes
        .route("/api/v1/celebrities", get(get_celebrities))
        .route("/api/v1/celebrities", post(create_celebrity))
        .route(
            "/api/v1/celebrities/category/:category",
            get(get_celebrities_by_category),
        )
        .route("/api/v1/celebrities/:celebrity_id", get(get_celebrity))
        .route("/api/v1/celebrities/:celebrity_id", put(update_celebrity))
        // Endorsement routes
        .route(
            "/api/v1/celebrities/:celebrity_id/brands",
            get(get_celebrity_brands),
        )
        .route("/api/v1/celebrity-brands", post(create_celebrity_brand))
        .route(
            "/api/v1/celebrity-brands/:endorsement_id",
            delete(delete_celebrity_brand),
        )
        // Product routes
        .route(
            "/api/v1/celebrities/:celebrity_id/products",
            get(get_celebrity_products),
        )
        .route(
            "/api/v1/celebrities/:celebrity_id/products",
            post(create_celebrity_product),
        )
        // Brand routes
        .route("/api/v1/brands", get(get_brands))
        .route("/api/v1/brands", post(create_brand))
        .route("/api/v1/brands/:brand_id", get(get_brand))
        .route("/api/v1/brands/:brand_id", put(update_brand))
        // Category routes
        .route("/api/v1/categories", get(get_categories))
        .route("/api/v1/categories", post(create_category))
        // Tournament routes
        .route("/api/v1/tournaments", get(get_tournaments))
        .route("/api/v1/tournaments", post(create_tournament))
        .route("/api/v1/tournaments/:tournament_id", get(get_tournament))
        // Outfit routes
        .route(
            "/api/v1/celebrities/:celebrity_id/outfits",
            get(get_celebrity_outfits),
        )
        .route(
            "/api/v1/tournaments/:tournament_id/outfits",
            get(get_tournament_outfits),
        )
        .route("/api/v1/outfits", post(create_tournament_outfit))
        // Plan routes
        .route("/api/v1/plans", get(get_plans))
        // Assistant routes
        .route("/api/v1/assistant/chat", post(chat))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
