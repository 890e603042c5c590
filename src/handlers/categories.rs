use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use model::entities::category;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

use crate::auth::session::require_admin;
use crate::errors::{duplicate_on_unique, AppError};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Category response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl From<category::Model> for CategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            image_url: model.image_url,
        }
    }
}

/// Request body for creating a category
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateCategoryRequest {
    /// Category name (must be unique)
    pub name: String,
    pub description: String,
    pub image_url: String,
}

/// Get all categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "categories",
    responses(
        (status = 200, description = "Categories retrieved successfully", body = ApiResponse<Vec<CategoryResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<CategoryResponse>>>), AppError> {
    trace!("Entering get_categories function");

    let categories = category::Entity::find()
        .order_by_asc(category::Column::Id)
        .all(&state.db)
        .await?;

    info!("Successfully retrieved {} categories", categories.len());
    let response = ApiResponse {
        data: categories.into_iter().map(CategoryResponse::from).collect(),
        message: "Categories retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<CategoryResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 409, description = "Category name already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn create_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponse>>), AppError> {
    trace!("Entering create_category function");
    require_admin(&state, &headers).await?;
    debug!("Creating category: {}", request.name);

    let name = request.name.clone();
    let new_category = category::ActiveModel {
        name: Set(request.name),
        description: Set(request.description),
        image_url: Set(request.image_url),
        ..Default::default()
    };

    let created = new_category
        .insert(&state.db)
        .await
        .map_err(|e| duplicate_on_unique(e, format!("Category '{}' already exists", name)))?;

    info!("Successfully created category with ID: {}", created.id);
    let response = ApiResponse {
        data: CategoryResponse::from(created),
        message: "Category created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}
