use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::auth::session::Session;
use crate::clients::{assistant::AssistantClient, google::GoogleOAuth, mailer::Mailer};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection (configured store or in-memory fallback)
    pub db: DatabaseConnection,
    /// Which storage mode the service ended up in at boot
    pub storage_mode: StorageMode,
    /// Server-side session store keyed by the opaque cookie id
    pub sessions: Cache<String, Session>,
    /// One-time OAuth state nonces awaiting the Google callback
    pub oauth_states: Cache<String, ()>,
    /// Style assistant client
    pub assistant: AssistantClient,
    /// Outbound mail client
    pub mailer: Mailer,
    /// Google OAuth client, when configured
    pub google: Option<GoogleOAuth>,
    /// Base URL used when building links handed to users
    pub app_base_url: String,
}

/// Which kind of store backs the running service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageMode {
    /// The configured database answered and its schema is current.
    Relational,
    /// Fresh `sqlite::memory:` stand-in; contents vanish on shutdown.
    InMemory,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Relational => "relational",
            StorageMode::InMemory => "in-memory",
        }
    }
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
    /// Storage mode the service booted into
    pub storage_mode: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::signup,
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
        crate::handlers::auth::current_user,
        crate::handlers::auth::forgot_password,
        crate::handlers::auth::reset_password,
        crate::handlers::auth::google_login,
        crate::handlers::auth::google_callback,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::update_user_status,
        crate::handlers::users::delete_user,
        crate::handlers::roles::get_roles,
        crate::handlers::roles::get_user_roles,
        crate::handlers::roles::grant_role,
        crate::handlers::roles::revoke_role,
        crate::handlers::celebrities::get_celebrities,
        crate::handlers::celebrities::get_celebrity,
        crate::handlers::celebrities::get_celebrities_by_category,
        crate::handlers::celebrities::create_celebrity,
        crate::handlers::celebrities::update_celebrity,
        crate::handlers::celebrities::link_celebrity_profile,
        crate::handlers::brands::get_brands,
        crate::handlers::brands::get_brand,
        crate::handlers::brands::create_brand,
        crate::handlers::brands::update_brand,
        crate::handlers::celebrity_brands::get_celebrity_brands,
        crate::handlers::celebrity_brands::create_celebrity_brand,
        crate::handlers::celebrity_brands::delete_celebrity_brand,
        crate::handlers::products::get_celebrity_products,
        crate::handlers::products::create_celebrity_product,
        crate::handlers::categories::get_categories,
        crate::handlers::categories::create_category,
        crate::handlers::tournaments::get_tournaments,
        crate::handlers::tournaments::get_tournament,
        crate::handlers::tournaments::create_tournament,
        crate::handlers::outfits::get_celebrity_outfits,
        crate::handlers::outfits::get_tournament_outfits,
        crate::handlers::outfits::create_tournament_outfit,
        crate::handlers::plans::get_plans,
        crate::handlers::assistant::chat,
    ),
    components(
        schemas(
            ApiResponse<crate::handlers::auth::AuthUserResponse>,
            ApiResponse<crate::handlers::auth::ForgotPasswordResponse>,
            ApiResponse<crate::handlers::users::UserResponse>,
            ApiResponse<Vec<crate::handlers::users::UserResponse>>,
            ApiResponse<Vec<crate::handlers::roles::RoleResponse>>,
            ApiResponse<Vec<String>>,
            ApiResponse<crate::handlers::celebrities::CelebrityResponse>,
            ApiResponse<Vec<crate::handlers::celebrities::CelebrityResponse>>,
            ApiResponse<crate::handlers::brands::BrandResponse>,
            ApiResponse<Vec<crate::handlers::brands::BrandResponse>>,
            ApiResponse<crate::handlers::celebrity_brands::EndorsementResponse>,
            ApiResponse<Vec<crate::handlers::celebrity_brands::EndorsementResponse>>,
            ApiResponse<crate::handlers::products::ProductResponse>,
            ApiResponse<Vec<crate::handlers::products::ProductResponse>>,
            ApiResponse<crate::handlers::categories::CategoryResponse>,
            ApiResponse<Vec<crate::handlers::categories::CategoryResponse>>,
            ApiResponse<crate::handlers::tournaments::TournamentResponse>,
            ApiResponse<Vec<crate::handlers::tournaments::TournamentResponse>>,
            ApiResponse<crate::handlers::outfits::OutfitResponse>,
            ApiResponse<Vec<crate::handlers::outfits::CelebrityOutfitResponse>>,
            ApiResponse<Vec<crate::handlers::outfits::TournamentOutfitResponse>>,
            ApiResponse<Vec<crate::handlers::plans::PlanResponse>>,
            ApiResponse<crate::handlers::assistant::ChatReply>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            crate::handlers::auth::SignupRequest,
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::AuthUserResponse,
            crate::handlers::auth::ForgotPasswordRequest,
            crate::handlers::auth::ForgotPasswordResponse,
            crate::handlers::auth::ResetPasswordRequest,
            crate::handlers::users::UserResponse,
            crate::handlers::users::UpdateUserRequest,
            crate::handlers::users::UpdateUserStatusRequest,
            crate::handlers::roles::RoleResponse,
            crate::handlers::celebrities::CelebrityResponse,
            crate::handlers::celebrities::CreateCelebrityRequest,
            crate::handlers::celebrities::UpdateCelebrityRequest,
            crate::handlers::celebrities::LinkCelebrityProfileRequest,
            crate::handlers::brands::BrandResponse,
            crate::handlers::brands::CreateBrandRequest,
            crate::handlers::brands::UpdateBrandRequest,
            crate::handlers::celebrity_brands::EndorsementResponse,
            crate::handlers::celebrity_brands::CreateEndorsementRequest,
            crate::handlers::products::ProductResponse,
            crate::handlers::products::CreateProductRequest,
            crate::handlers::categories::CategoryResponse,
            crate::handlers::categories::CreateCategoryRequest,
            crate::handlers::tournaments::TournamentResponse,
            crate::handlers::tournaments::CreateTournamentRequest,
            crate::handlers::outfits::OutfitResponse,
            crate::handlers::outfits::CelebrityOutfitResponse,
            crate::handlers::outfits::TournamentOutfitResponse,
            crate::handlers::outfits::CreateOutfitRequest,
            crate::handlers::plans::PlanResponse,
            crate::handlers::assistant::ChatRequest,
            crate::handlers::assistant::ChatMessage,
            crate::handlers::assistant::ChatReply,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Signup, login, sessions and password reset"),
        (name = "users", description = "Account administration endpoints"),
        (name = "roles", description = "Role grants and revocations"),
        (name = "celebrities", description = "Celebrity profile endpoints"),
        (name = "brands", description = "Brand catalog endpoints"),
        (name = "endorsements", description = "Celebrity and brand endorsement links"),
        (name = "products", description = "Celebrity product endpoints"),
        (name = "categories", description = "Fashion category endpoints"),
        (name = "tournaments", description = "Tournament endpoints"),
        (name = "outfits", description = "Tournament outfit galleries"),
        (name = "plans", description = "Subscription plan endpoints"),
        (name = "assistant", description = "Style assistant chat proxy"),
    ),
    info(
        title = "CeleCart API",
        description = "Celebrity Fashion Backend - catalog, accounts and style assistant for the CeleCart storefront",
        version = "0.1.0",
        contact(
            name = "CeleCart Team",
            email = "contact@celecart.com"
        ),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
