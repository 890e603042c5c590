use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use model::entities::{celebrity, role, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

use crate::auth::session::{has_role, require_admin, require_user};
use crate::errors::{duplicate_on_unique, AppError};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Celebrity response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CelebrityResponse {
    pub id: i32,
    pub name: String,
    pub profession: String,
    pub image_url: String,
    pub description: Option<String>,
    pub category: String,
    /// Owning user account, if the profile is linked
    pub user_id: Option<i32>,
    pub is_active: bool,
    pub is_elite: bool,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
    pub booking_inquiries: Option<String>,
}

impl From<celebrity::Model> for CelebrityResponse {
    fn from(model: celebrity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            profession: model.profession,
            image_url: model.image_url,
            description: model.description,
            category: model.category,
            user_id: model.user_id,
            is_active: model.is_active,
            is_elite: model.is_elite,
            manager_name: model.manager_name,
            manager_email: model.manager_email,
            booking_inquiries: model.booking_inquiries,
        }
    }
}

/// Request body for creating a celebrity profile
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCelebrityRequest {
    pub name: String,
    pub profession: String,
    pub image_url: String,
    pub description: Option<String>,
    /// Editorial grouping, e.g. "Red Carpet" or "Street Style"
    pub category: String,
    pub is_elite: Option<bool>,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
    pub booking_inquiries: Option<String>,
}

/// Request body for updating a celebrity profile
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCelebrityRequest {
    pub name: Option<String>,
    pub profession: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
    pub is_elite: Option<bool>,
    pub manager_name: Option<String>,
    pub manager_email: Option<String>,
    pub booking_inquiries: Option<String>,
}

/// Request body for linking a celebrity profile to a user
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LinkCelebrityProfileRequest {
    /// Celebrity profile to hand to the user
    pub celebrity_id: i32,
}

/// Query parameters for listing celebrities
#[derive(Debug, Deserialize, IntoParams)]
pub struct CelebrityListQuery {
    /// Include deactivated profiles (administrators only)
    pub include_inactive: Option<bool>,
}

async fn find_celebrity(state: &AppState, celebrity_id: i32) -> Result<celebrity::Model, AppError> {
    celebrity::Entity::find_by_id(celebrity_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Celebrity with id {} does not exist", celebrity_id))
        })
}

/// Get all celebrities
#[utoipa::path(
    get,
    path = "/api/v1/celebrities",
    tag = "celebrities",
    params(CelebrityListQuery),
    responses(
        (status = 200, description = "Celebrities retrieved successfully", body = ApiResponse<Vec<CelebrityResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn get_celebrities(
    Query(query): Query<CelebrityListQuery>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<Vec<CelebrityResponse>>>), AppError> {
    trace!("Entering get_celebrities function");

    // Deactivated profiles are visible only to administrators who ask for
    // them; everyone else silently gets the active catalog.
    let mut show_inactive = false;
    if query.include_inactive.unwrap_or(false) {
        show_inactive = match require_user(&state, &headers).await {
            Ok(actor) => has_role(&state.db, &actor, role::ADMIN).await?,
            Err(_) => false,
        };
        if !show_inactive {
            debug!("Ignoring include_inactive for non-admin caller");
        }
    }

    let mut query_builder = celebrity::Entity::find();
    if !show_inactive {
        query_builder = query_builder.filter(celebrity::Column::IsActive.eq(true));
    }

    let celebrities = query_builder
        .order_by_asc(celebrity::Column::Id)
        .all(&state.db)
        .await?;

    info!("Successfully retrieved {} celebrities", celebrities.len());
    let response = ApiResponse {
        data: celebrities.into_iter().map(CelebrityResponse::from).collect(),
        message: "Celebrities retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Get a specific celebrity by ID
#[utoipa::path(
    get,
    path = "/api/v1/celebrities/{celebrity_id}",
    tag = "celebrities",
    params(
        ("celebrity_id" = i32, Path, description = "Celebrity ID")
    ),
    responses(
        (status = 200, description = "Celebrity retrieved successfully", body = ApiResponse<CelebrityResponse>),
        (status = 404, description = "Celebrity not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_celebrity(
    Path(celebrity_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<CelebrityResponse>>), AppError> {
    trace!("Entering get_celebrity function");
    debug!("Fetching celebrity with ID: {}", celebrity_id);

    let found = find_celebrity(&state, celebrity_id).await?;

    info!("Successfully retrieved celebrity: {}", found.name);
    let response = ApiResponse {
        data: CelebrityResponse::from(found),
        message: "Celebrity retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Get active celebrities in a category
#[utoipa::path(
    get,
    path = "/api/v1/celebrities/category/{category}",
    tag = "celebrities",
    params(
        ("category" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Celebrities retrieved successfully", body = ApiResponse<Vec<CelebrityResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_celebrities_by_category(
    Path(category): Path<String>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<CelebrityResponse>>>), AppError> {
    trace!("Entering get_celebrities_by_category function");
    debug!("Fetching celebrities in category: {}", category);

    let celebrities = celebrity::Entity::find()
        .filter(celebrity::Column::Category.eq(category.as_str()))
        .filter(celebrity::Column::IsActive.eq(true))
        .order_by_asc(celebrity::Column::Id)
        .all(&state.db)
        .await?;

    info!(
        "Successfully retrieved {} celebrities in category {}",
        celebrities.len(),
        category
    );
    let response = ApiResponse {
        data: celebrities.into_iter().map(CelebrityResponse::from).collect(),
        message: "Celebrities retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Create a new celebrity profile
#[utoipa::path(
    post,
    path = "/api/v1/celebrities",
    tag = "celebrities",
    request_body = CreateCelebrityRequest,
    responses(
        (status = 201, description = "Celebrity created successfully", body = ApiResponse<CelebrityResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn create_celebrity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateCelebrityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CelebrityResponse>>), AppError> {
    trace!("Entering create_celebrity function");
    require_admin(&state, &headers).await?;
    debug!("Creating celebrity: {}", request.name);

    let new_celebrity = celebrity::ActiveModel {
        name: Set(request.name),
        profession: Set(request.profession),
        image_url: Set(request.image_url),
        description: Set(request.description),
        category: Set(request.category),
        is_elite: Set(request.is_elite.unwrap_or(false)),
        manager_name: Set(request.manager_name),
        manager_email: Set(request.manager_email),
        booking_inquiries: Set(request.booking_inquiries),
        ..Default::default()
    };

    let created = new_celebrity.insert(&state.db).await?;

    info!("Successfully created celebrity with ID: {}", created.id);
    let response = ApiResponse {
        data: CelebrityResponse::from(created),
        message: "Celebrity created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Update a celebrity profile
#[utoipa::path(
    put,
    path = "/api/v1/celebrities/{celebrity_id}",
    tag = "celebrities",
    params(
        ("celebrity_id" = i32, Path, description = "Celebrity ID")
    ),
    request_body = UpdateCelebrityRequest,
    responses(
        (status = 200, description = "Celebrity updated successfully", body = ApiResponse<CelebrityResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the owner and not an administrator", body = ErrorResponse),
        (status = 404, description = "Celebrity not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn update_celebrity(
    Path(celebrity_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateCelebrityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CelebrityResponse>>), AppError> {
    trace!("Entering update_celebrity function");

    let found = find_celebrity(&state, celebrity_id).await?;

    let actor = require_user(&state, &headers).await?;
    let owns_profile = found.user_id == Some(actor.id);
    if !owns_profile && !has_role(&state.db, &actor, role::ADMIN).await? {
        warn!(
            "User {} tried to update celebrity {} without ownership",
            actor.id, celebrity_id
        );
        return Err(AppError::Forbidden(
            "You do not own this celebrity profile".to_string(),
        ));
    }
    debug!("Updating celebrity with ID: {}", celebrity_id);

    let mut active: celebrity::ActiveModel = found.into();
    if let Some(name) = request.name {
        active.name = Set(name);
    }
    if let Some(profession) = request.profession {
        active.profession = Set(profession);
    }
    if let Some(image_url) = request.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(description) = request.description {
        active.description = Set(Some(description));
    }
    if let Some(category) = request.category {
        active.category = Set(category);
    }
    if let Some(is_active) = request.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(is_elite) = request.is_elite {
        active.is_elite = Set(is_elite);
    }
    if let Some(manager_name) = request.manager_name {
        active.manager_name = Set(Some(manager_name));
    }
    if let Some(manager_email) = request.manager_email {
        active.manager_email = Set(Some(manager_email));
    }
    if let Some(booking_inquiries) = request.booking_inquiries {
        active.booking_inquiries = Set(Some(booking_inquiries));
    }

    let updated = active.update(&state.db).await?;

    info!("Successfully updated celebrity with ID: {}", celebrity_id);
    let response = ApiResponse {
        data: CelebrityResponse::from(updated),
        message: "Celebrity updated successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Link a celebrity profile to a user account
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/celebrity-profile",
    tag = "celebrities",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = LinkCelebrityProfileRequest,
    responses(
        (status = 200, description = "Celebrity profile linked successfully", body = ApiResponse<CelebrityResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "User or celebrity not found", body = ErrorResponse),
        (status = 409, description = "User or celebrity is already linked", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn link_celebrity_profile(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LinkCelebrityProfileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CelebrityResponse>>), AppError> {
    trace!("Entering link_celebrity_profile function");
    require_admin(&state, &headers).await?;
    debug!(
        "Linking celebrity {} to user {}",
        request.celebrity_id, user_id
    );

    user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} does not exist", user_id)))?;

    let found = find_celebrity(&state, request.celebrity_id).await?;

    // Linking the same pair again is a no-op success.
    if found.user_id == Some(user_id) {
        debug!(
            "Celebrity {} already linked to user {}",
            found.id, user_id
        );
        let response = ApiResponse {
            data: CelebrityResponse::from(found),
            message: "Celebrity profile already linked to this user".to_string(),
            success: true,
        };
        return Ok((StatusCode::OK, Json(response)));
    }

    if found.user_id.is_some() {
        warn!(
            "Celebrity {} already owned by user {:?}",
            found.id, found.user_id
        );
        return Err(AppError::AlreadyLinked(
            "Celebrity profile is already owned by another user".to_string(),
        ));
    }

    let existing_profile = celebrity::Entity::find()
        .filter(celebrity::Column::UserId.eq(user_id))
        .one(&state.db)
        .await?;
    if existing_profile.is_some() {
        warn!("User {} already owns a celebrity profile", user_id);
        return Err(AppError::AlreadyLinked(
            "User already owns a celebrity profile".to_string(),
        ));
    }

    let celebrity_id = found.id;
    let mut active: celebrity::ActiveModel = found.into();
    active.user_id = Set(Some(user_id));
    // The unique index on user_id backstops a concurrent link of the same
    // user to another profile.
    let updated = match active.update(&state.db).await {
        Ok(updated) => updated,
        Err(db_error) => {
            return Err(
                match duplicate_on_unique(db_error, "User already owns a celebrity profile") {
                    AppError::Duplicate(message) => AppError::AlreadyLinked(message),
                    other => other,
                },
            )
        }
    };

    info!(
        "Successfully linked celebrity {} to user {}",
        celebrity_id, user_id
    );
    let response = ApiResponse {
        data: CelebrityResponse::from(updated),
        message: "Celebrity profile linked successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}
