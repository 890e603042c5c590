use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use model::entities::{role, user, user_role};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

use crate::auth::session::{has_role, require_admin, require_user, role_names};
use crate::errors::{duplicate_on_unique, AppError};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Role response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<role::Model> for RoleResponse {
    fn from(model: role::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
        }
    }
}

/// Grant a role to a user by role name.
///
/// Returns true when the grant was newly created and false when the user
/// already held the role. Unknown role names are an error.
pub async fn grant_role_by_name(
    db: &DatabaseConnection,
    user_id: i32,
    role_name: &str,
) -> Result<bool, AppError> {
    let role_model = role::Entity::find()
        .filter(role::Column::Name.eq(role_name))
        .one(db)
        .await?
        .ok_or_else(|| AppError::UnknownRole(role_name.to_string()))?;

    let existing = user_role::Entity::find_by_id((user_id, role_model.id))
        .one(db)
        .await?;
    if existing.is_some() {
        trace!("User {} already holds role {}", user_id, role_name);
        return Ok(false);
    }

    let grant = user_role::ActiveModel {
        user_id: Set(user_id),
        role_id: Set(role_model.id),
    };
    match grant.insert(db).await {
        Ok(_) => Ok(true),
        // A concurrent grant of the same pair is not an error.
        Err(db_error) => match duplicate_on_unique(db_error, "Role already granted") {
            AppError::Duplicate(_) => Ok(false),
            other => Err(other),
        },
    }
}

async fn find_target_user(db: &DatabaseConnection, user_id: i32) -> Result<user::Model, AppError> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} does not exist", user_id)))
}

/// Get all roles
#[utoipa::path(
    get,
    path = "/api/v1/roles",
    tag = "roles",
    responses(
        (status = 200, description = "Roles retrieved successfully", body = ApiResponse<Vec<RoleResponse>>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn get_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<Vec<RoleResponse>>>), AppError> {
    trace!("Entering get_roles function");
    require_admin(&state, &headers).await?;

    let roles = role::Entity::find()
        .order_by_asc(role::Column::Id)
        .all(&state.db)
        .await?;

    info!("Successfully retrieved {} roles", roles.len());
    let response = ApiResponse {
        data: roles.into_iter().map(RoleResponse::from).collect(),
        message: "Roles retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Get the role names granted to a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/roles",
    tag = "roles",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Roles retrieved successfully", body = ApiResponse<Vec<String>>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the user and not an administrator", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn get_user_roles(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<Vec<String>>>), AppError> {
    trace!("Entering get_user_roles function");

    let actor = require_user(&state, &headers).await?;
    if actor.id != user_id && !has_role(&state.db, &actor, role::ADMIN).await? {
        return Err(AppError::Forbidden(
            "Administrator access required".to_string(),
        ));
    }

    let target = find_target_user(&state.db, user_id).await?;
    let names = role_names(&state.db, &target).await?;

    info!("Retrieved {} roles for user {}", names.len(), user_id);
    let response = ApiResponse {
        data: names,
        message: "Roles retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Grant a role to a user
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/roles/{role_name}",
    tag = "roles",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("role_name" = String, Path, description = "Role name")
    ),
    responses(
        (status = 200, description = "Role granted successfully", body = ApiResponse<Vec<String>>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "User or role not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn grant_role(
    Path((user_id, role_name)): Path<(i32, String)>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<Vec<String>>>), AppError> {
    trace!("Entering grant_role function");
    require_admin(&state, &headers).await?;
    debug!("Granting role {} to user {}", role_name, user_id);

    let target = find_target_user(&state.db, user_id).await?;
    let newly_granted = grant_role_by_name(&state.db, user_id, &role_name).await?;
    let names = role_names(&state.db, &target).await?;

    let message = if newly_granted {
        info!("Granted role {} to user {}", role_name, user_id);
        "Role granted successfully".to_string()
    } else {
        debug!("User {} already held role {}", user_id, role_name);
        "Role was already granted".to_string()
    };
    let response = ApiResponse {
        data: names,
        message,
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Revoke a role from a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/roles/{role_name}",
    tag = "roles",
    params(
        ("user_id" = i32, Path, description = "User ID"),
        ("role_name" = String, Path, description = "Role name")
    ),
    responses(
        (status = 200, description = "Role revoked successfully", body = ApiResponse<Vec<String>>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "User or role not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn revoke_role(
    Path((user_id, role_name)): Path<(i32, String)>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<Vec<String>>>), AppError> {
    trace!("Entering revoke_role function");
    require_admin(&state, &headers).await?;
    debug!("Revoking role {} from user {}", role_name, user_id);

    let target = find_target_user(&state.db, user_id).await?;
    let role_model = role::Entity::find()
        .filter(role::Column::Name.eq(role_name.as_str()))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::UnknownRole(role_name.clone()))?;

    let result = user_role::Entity::delete_many()
        .filter(user_role::Column::UserId.eq(user_id))
        .filter(user_role::Column::RoleId.eq(role_model.id))
        .exec(&state.db)
        .await?;

    let message = if result.rows_affected > 0 {
        info!("Revoked role {} from user {}", role_name, user_id);
        "Role revoked successfully".to_string()
    } else {
        debug!("User {} did not hold role {}", user_id, role_name);
        "Role was not granted".to_string()
    };

    let names = role_names(&state.db, &target).await?;
    let response = ApiResponse {
        data: names,
        message,
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}
