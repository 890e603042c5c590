use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use model::entities::brand;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::auth::session::require_admin;
use crate::errors::{duplicate_on_unique, AppError};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Brand response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BrandResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: String,
}

impl From<brand::Model> for BrandResponse {
    fn from(model: brand::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            image_url: model.image_url,
        }
    }
}

/// Request body for creating a brand
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateBrandRequest {
    /// Brand name (must be unique)
    pub name: String,
    pub description: Option<String>,
    pub image_url: String,
}

/// Request body for updating a brand
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateBrandRequest {
    /// Brand name (must be unique)
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Get all brands
#[utoipa::path(
    get,
    path = "/api/v1/brands",
    tag = "brands",
    responses(
        (status = 200, description = "Brands retrieved successfully", body = ApiResponse<Vec<BrandResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_brands(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<BrandResponse>>>), AppError> {
    trace!("Entering get_brands function");

    let brands = brand::Entity::find()
        .order_by_asc(brand::Column::Id)
        .all(&state.db)
        .await?;

    info!("Successfully retrieved {} brands", brands.len());
    let response = ApiResponse {
        data: brands.into_iter().map(BrandResponse::from).collect(),
        message: "Brands retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Get a specific brand by ID
#[utoipa::path(
    get,
    path = "/api/v1/brands/{brand_id}",
    tag = "brands",
    params(
        ("brand_id" = i32, Path, description = "Brand ID")
    ),
    responses(
        (status = 200, description = "Brand retrieved successfully", body = ApiResponse<BrandResponse>),
        (status = 404, description = "Brand not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_brand(
    Path(brand_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<BrandResponse>>), AppError> {
    trace!("Entering get_brand function");
    debug!("Fetching brand with ID: {}", brand_id);

    let found = brand::Entity::find_by_id(brand_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Brand with id {} does not exist", brand_id)))?;

    info!("Successfully retrieved brand: {}", found.name);
    let response = ApiResponse {
        data: BrandResponse::from(found),
        message: "Brand retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Create a new brand
#[utoipa::path(
    post,
    path = "/api/v1/brands",
    tag = "brands",
    request_body = CreateBrandRequest,
    responses(
        (status = 201, description = "Brand created successfully", body = ApiResponse<BrandResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 409, description = "Brand name already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn create_brand(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateBrandRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BrandResponse>>), AppError> {
    trace!("Entering create_brand function");
    require_admin(&state, &headers).await?;
    debug!("Creating brand: {}", request.name);

    let name = request.name.clone();
    let new_brand = brand::ActiveModel {
        name: Set(request.name),
        description: Set(request.description),
        image_url: Set(request.image_url),
        ..Default::default()
    };

    let created = new_brand.insert(&state.db).await.map_err(|e| {
        warn!("Failed to create brand {}", name);
        duplicate_on_unique(e, format!("Brand '{}' already exists", name))
    })?;

    info!("Successfully created brand with ID: {}", created.id);
    let response = ApiResponse {
        data: BrandResponse::from(created),
        message: "Brand created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Update a brand
#[utoipa::path(
    put,
    path = "/api/v1/brands/{brand_id}",
    tag = "brands",
    params(
        ("brand_id" = i32, Path, description = "Brand ID")
    ),
    request_body = UpdateBrandRequest,
    responses(
        (status = 200, description = "Brand updated successfully", body = ApiResponse<BrandResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "Brand not found", body = ErrorResponse),
        (status = 409, description = "Brand name already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn update_brand(
    Path(brand_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<UpdateBrandRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BrandResponse>>), AppError> {
    trace!("Entering update_brand function");
    require_admin(&state, &headers).await?;
    debug!("Updating brand with ID: {}", brand_id);

    let found = brand::Entity::find_by_id(brand_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Brand with id {} does not exist", brand_id)))?;

    let mut active: brand::ActiveModel = found.into();
    let mut renamed_to = None;
    if let Some(name) = request.name {
        renamed_to = Some(name.clone());
        active.name = Set(name);
    }
    if let Some(description) = request.description {
        active.description = Set(Some(description));
    }
    if let Some(image_url) = request.image_url {
        active.image_url = Set(image_url);
    }

    let updated = active.update(&state.db).await.map_err(|e| {
        let name = renamed_to.unwrap_or_default();
        duplicate_on_unique(e, format!("Brand '{}' already exists", name))
    })?;

    info!("Successfully updated brand with ID: {}", brand_id);
    let response = ApiResponse {
        data: BrandResponse::from(updated),
        message: "Brand updated successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}
