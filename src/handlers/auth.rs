use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, Json, Redirect},
};
use chrono::{Duration, Utc};
use model::entities::{celebrity, role, user};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, QueryFilter,
    Set,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{
    close_session, logout_headers, open_session, require_user, role_names, session_headers,
};
use crate::clients::google::GoogleProfile;
use crate::errors::{duplicate_on_unique, AppError};
use crate::handlers::roles::grant_role_by_name;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Page served at the end of the OAuth popup flow. It notifies the window
/// that opened the popup and then closes itself; the session cookie rides
/// on the response headers.
const GOOGLE_POPUP_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Signing you in</title></head>
<body>
<script>
  if (window.opener) {
    window.opener.postMessage({ type: 'google-auth-success' }, '*');
  }
  window.close();
</script>
</body>
</html>"#;

/// Request body for creating an account
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct SignupRequest {
    /// Unique handle for the account
    #[validate(length(min = 3, max = 64, message = "Username must be 3 to 64 characters"))]
    pub username: String,
    /// Unique email address
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    /// Plaintext password, stored only as a hash
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Requested role: "user" (default) or "celebrity"
    pub role: Option<String>,
    /// Profession shown on the celebrity profile (celebrity signups only)
    pub profession: Option<String>,
    /// Catalog category of the celebrity profile (celebrity signups only)
    pub category: Option<String>,
}

/// Request body for password login
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct LoginRequest {
    /// Email address of the account
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    /// Account password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for requesting a password reset link
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct ForgotPasswordRequest {
    /// Email address of the account
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
}

/// Response body for a password reset request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ForgotPasswordResponse {
    /// Reset link, returned directly only when no mailer is configured
    pub reset_url: Option<String>,
}

/// Request body for completing a password reset
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct ResetPasswordRequest {
    /// One-time token from the reset link
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    /// Replacement password
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

/// Authenticated account as returned by the auth endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub profile_picture: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub account_status: String,
    pub source: String,
    /// Names of all roles granted to the account
    pub roles: Vec<String>,
    /// Id of the owned celebrity profile, if any
    pub celebrity_id: Option<i32>,
}

impl AuthUserResponse {
    fn new(model: user::Model, roles: Vec<String>, celebrity_id: Option<i32>) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            display_name: model.display_name,
            profile_picture: model.profile_picture,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            account_status: model.account_status.to_value(),
            source: model.source.to_value(),
            roles,
            celebrity_id,
        }
    }
}

/// Query parameters Google appends to the OAuth callback
#[derive(Debug, Deserialize, IntoParams)]
pub struct GoogleCallbackQuery {
    /// Authorization code to exchange for tokens
    pub code: String,
    /// Nonce issued when the flow started
    pub state: String,
}

/// Build the full auth response for a user, including roles and the owned
/// celebrity profile.
async fn auth_user_response(
    db: &DatabaseConnection,
    user_model: user::Model,
) -> Result<AuthUserResponse, AppError> {
    let roles = role_names(db, &user_model).await?;
    let celebrity_id = user_model
        .find_related(celebrity::Entity)
        .one(db)
        .await?
        .map(|c| c.id);
    Ok(AuthUserResponse::new(user_model, roles, celebrity_id))
}

fn refuse_blocked_account(user_model: &user::Model) -> Result<(), AppError> {
    match user_model.account_status {
        user::AccountStatus::Rejected => Err(AppError::Forbidden(
            "Your account has been rejected".to_string(),
        )),
        user::AccountStatus::Deactivated => Err(AppError::Forbidden(
            "Your account has been deactivated".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Create a new account and open a session for it
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created successfully", body = ApiResponse<AuthUserResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, HeaderMap, Json<ApiResponse<AuthUserResponse>>), AppError> {
    trace!("Entering signup function");
    request.validate()?;

    let requested_role = request.role.as_deref().unwrap_or(role::USER);
    if requested_role != role::USER && requested_role != role::CELEBRITY {
        warn!("Signup requested unsupported role: {}", requested_role);
        return Err(AppError::Validation(
            "Role must be 'user' or 'celebrity'".to_string(),
        ));
    }

    debug!(
        "Creating {} account for username: {}",
        requested_role, request.username
    );

    let existing = user::Entity::find()
        .filter(
            Condition::any()
                .add(user::Column::Email.eq(request.email.as_str()))
                .add(user::Column::Username.eq(request.username.as_str())),
        )
        .one(&state.db)
        .await?;
    if let Some(existing) = existing {
        let message = if existing.email == request.email {
            format!("Email '{}' is already registered", request.email)
        } else {
            format!("Username '{}' is already taken", request.username)
        };
        warn!("Signup rejected: {}", message);
        return Err(AppError::Duplicate(message));
    }

    // Celebrity accounts await admin approval; shopper accounts are live
    // immediately.
    let account_status = if requested_role == role::CELEBRITY {
        user::AccountStatus::Pending
    } else {
        user::AccountStatus::Approved
    };

    let password_hash = hash_password(&request.password)?;
    let new_user = user::ActiveModel {
        username: Set(request.username.clone()),
        email: Set(request.email.clone()),
        password_hash: Set(Some(password_hash)),
        account_status: Set(account_status),
        source: Set(user::SignupSource::Local),
        ..Default::default()
    };

    let user_model = new_user.insert(&state.db).await.map_err(|e| {
        duplicate_on_unique(
            e,
            "An account with this username or email already exists".to_string(),
        )
    })?;

    grant_role_by_name(&state.db, user_model.id, requested_role).await?;

    let mut celebrity_id = None;
    if requested_role == role::CELEBRITY {
        let profile = celebrity::ActiveModel {
            name: Set(request.username.clone()),
            profession: Set(request
                .profession
                .clone()
                .unwrap_or_else(|| "Celebrity".to_string())),
            image_url: Set(String::new()),
            category: Set(request
                .category
                .clone()
                .unwrap_or_else(|| "General".to_string())),
            user_id: Set(Some(user_model.id)),
            ..Default::default()
        };
        let profile = profile.insert(&state.db).await?;
        debug!(
            "Created celebrity profile {} for user {}",
            profile.id, user_model.id
        );
        celebrity_id = Some(profile.id);
    }

    let session_id = open_session(&state, user_model.id).await;
    let headers = session_headers(&session_id)?;

    info!("Successfully created user with id: {}", user_model.id);
    let response = ApiResponse {
        data: AuthUserResponse::new(user_model, vec![requested_role.to_string()], celebrity_id),
        message: "Account created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, headers, Json(response)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthUserResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 403, description = "Account rejected or deactivated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, HeaderMap, Json<ApiResponse<AuthUserResponse>>), AppError> {
    trace!("Entering login function");
    request.validate()?;
    debug!("Login attempt for email: {}", request.email);

    let found = user::Entity::find()
        .filter(user::Column::Email.eq(request.email.as_str()))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    // Accounts created through OAuth carry no password hash and cannot use
    // password login.
    let password_hash = found
        .password_hash
        .as_deref()
        .ok_or(AppError::InvalidCredentials)?;
    if !verify_password(&request.password, password_hash) {
        warn!("Failed login attempt for user {}", found.id);
        return Err(AppError::InvalidCredentials);
    }

    refuse_blocked_account(&found)?;

    let session_id = open_session(&state, found.id).await;
    let headers = session_headers(&session_id)?;

    info!("User {} logged in", found.id);
    let response = ApiResponse {
        data: auth_user_response(&state.db, found).await?,
        message: "Login successful".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, headers, Json(response)))
}

/// Close the current session
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out successfully", body = ApiResponse<String>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, HeaderMap, Json<ApiResponse<String>>), AppError> {
    trace!("Entering logout function");

    close_session(&state, &headers).await;
    let response_headers = logout_headers()?;

    info!("Session closed");
    let response = ApiResponse {
        data: "Session closed".to_string(),
        message: "Logged out successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, response_headers, Json(response)))
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/auth/user",
    tag = "auth",
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<AuthUserResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<AuthUserResponse>>), AppError> {
    trace!("Entering current_user function");

    let user_model = require_user(&state, &headers).await?;
    debug!("Resolved session to user {}", user_model.id);

    let response = ApiResponse {
        data: auth_user_response(&state.db, user_model).await?,
        message: "User retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Request a password reset link
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    tag = "auth",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset link issued if the email exists", body = ApiResponse<ForgotPasswordResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ForgotPasswordResponse>>), AppError> {
    trace!("Entering forgot_password function");
    request.validate()?;

    // The response never reveals whether the email exists.
    let generic = |reset_url: Option<String>| ApiResponse {
        data: ForgotPasswordResponse { reset_url },
        message: "If the email exists, a password reset link has been sent".to_string(),
        success: true,
    };

    let Some(found) = user::Entity::find()
        .filter(user::Column::Email.eq(request.email.as_str()))
        .one(&state.db)
        .await?
    else {
        info!("Password reset requested for unknown email");
        return Ok((StatusCode::OK, Json(generic(None))));
    };

    let token = Uuid::new_v4().to_string();
    let expires = Utc::now() + Duration::hours(1);
    let mut active: user::ActiveModel = found.clone().into();
    active.reset_token = Set(Some(token.clone()));
    active.reset_token_expires = Set(Some(expires));
    active.update(&state.db).await?;
    debug!("Issued reset token for user {}", found.id);

    let reset_url = format!("{}/reset-password?token={}", state.app_base_url, token);

    if state.mailer.is_configured() {
        if let Err(e) = state.mailer.send_password_reset(&found.email, &reset_url).await {
            // The token stays valid; the user can retry once mail delivery
            // recovers.
            warn!("Failed to send password reset email: {}", e);
        } else {
            info!("Password reset email sent for user {}", found.id);
        }
        Ok((StatusCode::OK, Json(generic(None))))
    } else {
        info!("Mailer not configured, returning reset link in response");
        Ok((StatusCode::OK, Json(generic(Some(reset_url)))))
    }
}

/// Complete a password reset with a one-time token
#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    tag = "auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated successfully", body = ApiResponse<String>),
        (status = 400, description = "Invalid or expired token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<String>>), AppError> {
    trace!("Entering reset_password function");
    request.validate()?;

    let found = user::Entity::find()
        .filter(user::Column::ResetToken.eq(request.token.as_str()))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidResetToken)?;

    if !found.reset_token_matches(&request.token, Utc::now()) {
        warn!("Rejected expired reset token for user {}", found.id);
        return Err(AppError::InvalidResetToken);
    }

    // Re-hash and clear the token in one update so it cannot be replayed.
    let password_hash = hash_password(&request.new_password)?;
    let user_id = found.id;
    let mut active: user::ActiveModel = found.into();
    active.password_hash = Set(Some(password_hash));
    active.reset_token = Set(None);
    active.reset_token_expires = Set(None);
    active.update(&state.db).await?;

    info!("Password updated for user {}", user_id);
    let response = ApiResponse {
        data: "Password updated".to_string(),
        message: "Password updated successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Start the Google OAuth flow
#[utoipa::path(
    get,
    path = "/api/v1/auth/google",
    tag = "auth",
    responses(
        (status = 307, description = "Redirect to Google's consent screen"),
        (status = 502, description = "Google OAuth is not configured", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn google_login(State(state): State<AppState>) -> Result<Redirect, AppError> {
    trace!("Entering google_login function");

    let oauth = state
        .google
        .as_ref()
        .ok_or_else(|| AppError::Upstream("Google OAuth is not configured".to_string()))?;

    let nonce = Uuid::new_v4().to_string();
    state.oauth_states.insert(nonce.clone(), ()).await;
    let url = oauth.authorize_url(&nonce)?;

    debug!("Redirecting to Google consent screen");
    Ok(Redirect::temporary(&url))
}

/// Complete the Google OAuth flow
#[utoipa::path(
    get,
    path = "/api/v1/auth/google/callback",
    tag = "auth",
    params(GoogleCallbackQuery),
    responses(
        (status = 200, description = "HTML page that notifies the opener window and closes itself", body = String, content_type = "text/html"),
        (status = 401, description = "Unknown or reused state parameter", body = ErrorResponse),
        (status = 403, description = "Account rejected or deactivated", body = ErrorResponse),
        (status = 502, description = "Token exchange with Google failed", body = ErrorResponse)
    )
)]
#[instrument(skip(query))]
pub async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<GoogleCallbackQuery>,
) -> Result<(HeaderMap, Html<&'static str>), AppError> {
    trace!("Entering google_callback function");

    let oauth = state
        .google
        .as_ref()
        .ok_or_else(|| AppError::Upstream("Google OAuth is not configured".to_string()))?;

    // The state parameter must match a nonce we issued; each nonce is
    // consumed on first use.
    if state.oauth_states.get(&query.state).await.is_none() {
        warn!("Rejected Google callback with unknown state parameter");
        return Err(AppError::AuthRequired);
    }
    state.oauth_states.invalidate(&query.state).await;

    let profile = oauth.exchange_code(&query.code).await?;
    debug!("Exchanged Google code for profile {}", profile.id);

    let user_model = resolve_google_user(&state, profile).await?;
    refuse_blocked_account(&user_model)?;

    let session_id = open_session(&state, user_model.id).await;
    let headers = session_headers(&session_id)?;

    info!("User {} signed in via Google", user_model.id);
    Ok((headers, Html(GOOGLE_POPUP_PAGE)))
}

fn google_signup_model(profile: &GoogleProfile, email: &str, username: String) -> user::ActiveModel {
    user::ActiveModel {
        username: Set(username),
        email: Set(email.to_string()),
        password_hash: Set(None),
        google_id: Set(Some(profile.id.clone())),
        display_name: Set(profile.name.clone()),
        profile_picture: Set(profile.picture.clone()),
        first_name: Set(profile.given_name.clone()),
        last_name: Set(profile.family_name.clone()),
        account_status: Set(user::AccountStatus::Approved),
        source: Set(user::SignupSource::Google),
        ..Default::default()
    }
}

/// Find or create the account behind a Google profile.
///
/// Resolution order: an account already linked to the Google id, then an
/// account with the same email (which gets linked), then a fresh account.
async fn resolve_google_user(
    state: &AppState,
    profile: GoogleProfile,
) -> Result<user::Model, AppError> {
    if let Some(found) = user::Entity::find()
        .filter(user::Column::GoogleId.eq(profile.id.as_str()))
        .one(&state.db)
        .await?
    {
        trace!("Google id already linked to user {}", found.id);
        return Ok(found);
    }

    let email = profile.email.clone().ok_or_else(|| {
        AppError::Upstream("Google profile did not include an email address".to_string())
    })?;

    if let Some(found) = user::Entity::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?
    {
        debug!("Linking Google account to existing user {}", found.id);
        let mut active: user::ActiveModel = found.into();
        active.google_id = Set(Some(profile.id.clone()));
        if let Some(name) = profile.name.clone() {
            active.display_name = Set(Some(name));
        }
        if let Some(picture) = profile.picture.clone() {
            active.profile_picture = Set(Some(picture));
        }
        active.source = Set(user::SignupSource::Google);
        return Ok(active.update(&state.db).await?);
    }

    // First sign-in through Google: create the account. Display names are
    // not unique, so fall back to a derived username on collision.
    let username = profile
        .name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| email.clone());
    let created = match google_signup_model(&profile, &email, username)
        .insert(&state.db)
        .await
    {
        Ok(created) => created,
        Err(db_error) => match duplicate_on_unique(db_error, "Username is already taken") {
            AppError::Duplicate(_) => {
                debug!("Google display name collides with an existing username");
                google_signup_model(&profile, &email, format!("user_{}", profile.id))
                    .insert(&state.db)
                    .await?
            }
            other => return Err(other),
        },
    };
    grant_role_by_name(&state.db, created.id, role::USER).await?;

    info!("Created user {} from Google profile", created.id);
    Ok(created)
}
