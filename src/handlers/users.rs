use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use model::entities::{celebrity, role, user};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::auth::session::{has_role, require_admin, require_user};
use crate::errors::AppError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// User response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
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
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
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
        }
    }
}

/// Request body for updating profile fields
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    /// Public display name
    pub display_name: Option<String>,
    /// Profile picture URL
    pub profile_picture: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// Request body for changing an account's lifecycle status
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserStatusRequest {
    /// One of "Pending", "Approved", "Rejected" or "Deactivated"
    pub status: String,
}

fn parse_account_status(value: &str) -> Result<user::AccountStatus, AppError> {
    match value {
        "Pending" => Ok(user::AccountStatus::Pending),
        "Approved" => Ok(user::AccountStatus::Approved),
        "Rejected" => Ok(user::AccountStatus::Rejected),
        "Deactivated" => Ok(user::AccountStatus::Deactivated),
        _ => Err(AppError::Validation(format!(
            "Invalid account status: {}",
            value
        ))),
    }
}

async fn require_admin_or_self(
    state: &AppState,
    headers: &HeaderMap,
    user_id: i32,
) -> Result<(), AppError> {
    let actor = require_user(state, headers).await?;
    if actor.id != user_id && !has_role(&state.db, &actor, role::ADMIN).await? {
        return Err(AppError::Forbidden(
            "Administrator access required".to_string(),
        ));
    }
    Ok(())
}

async fn find_user(state: &AppState, user_id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} does not exist", user_id)))
}

/// Get all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserResponse>>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<Vec<UserResponse>>>), AppError> {
    trace!("Entering get_users function");
    require_admin(&state, &headers).await?;

    let users = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(&state.db)
        .await?;

    info!("Successfully retrieved {} users", users.len());
    let response = ApiResponse {
        data: users.into_iter().map(UserResponse::from).collect(),
        message: "Users retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the user and not an administrator", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn get_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    trace!("Entering get_user function");
    require_admin_or_self(&state, &headers, user_id).await?;
    debug!("Fetching user with ID: {}", user_id);

    let found = find_user(&state, user_id).await?;

    info!("Successfully retrieved user: {}", found.username);
    let response = ApiResponse {
        data: UserResponse::from(found),
        message: "User retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Update a user's profile fields
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<UserResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the user and not an administrator", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn update_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    trace!("Entering update_user function");
    require_admin_or_self(&state, &headers, user_id).await?;
    debug!("Updating user with ID: {}", user_id);

    let found = find_user(&state, user_id).await?;
    let mut active: user::ActiveModel = found.into();

    if let Some(display_name) = request.display_name {
        active.display_name = Set(Some(display_name));
    }
    if let Some(profile_picture) = request.profile_picture {
        active.profile_picture = Set(Some(profile_picture));
    }
    if let Some(first_name) = request.first_name {
        active.first_name = Set(Some(first_name));
    }
    if let Some(last_name) = request.last_name {
        active.last_name = Set(Some(last_name));
    }
    if let Some(phone) = request.phone {
        active.phone = Set(Some(phone));
    }

    let updated = active.update(&state.db).await?;

    info!("Successfully updated user with ID: {}", user_id);
    let response = ApiResponse {
        data: UserResponse::from(updated),
        message: "User updated successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Change a user's account status
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}/status",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserStatusRequest,
    responses(
        (status = 200, description = "Account status updated successfully", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid account status", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn update_user_status(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateUserStatusRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    trace!("Entering update_user_status function");
    require_admin(&state, &headers).await?;

    let status = parse_account_status(&request.status)?;
    debug!("Setting status of user {} to {}", user_id, request.status);

    let found = find_user(&state, user_id).await?;
    let mut active: user::ActiveModel = found.into();
    active.account_status = Set(status);
    let updated = active.update(&state.db).await?;

    // Sessions of rejected or deactivated users are dropped on their next
    // authenticated request.
    info!("Account status of user {} set to {}", user_id, request.status);
    let response = ApiResponse {
        data: UserResponse::from(updated),
        message: "Account status updated successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Deactivate a user account
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deactivated successfully", body = ApiResponse<String>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn delete_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<String>>), AppError> {
    trace!("Entering delete_user function");
    require_admin(&state, &headers).await?;
    debug!("Deactivating user with ID: {}", user_id);

    let found = find_user(&state, user_id).await?;

    // Accounts are never hard-deleted. The owned celebrity profile, if any,
    // is detached and lives on as editorial content.
    if let Some(profile) = celebrity::Entity::find()
        .filter(celebrity::Column::UserId.eq(user_id))
        .one(&state.db)
        .await?
    {
        warn!(
            "Detaching celebrity profile {} from deactivated user {}",
            profile.id, user_id
        );
        let mut profile_active: celebrity::ActiveModel = profile.into();
        profile_active.user_id = Set(None);
        profile_active.update(&state.db).await?;
    }

    let mut active: user::ActiveModel = found.into();
    active.account_status = Set(user::AccountStatus::Deactivated);
    active.update(&state.db).await?;

    info!("Successfully deactivated user with ID: {}", user_id);
    let response = ApiResponse {
        data: format!("User {} deactivated", user_id),
        message: "User deactivated successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}
