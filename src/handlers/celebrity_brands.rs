use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use model::entities::{brand, celebrity, celebrity_brand};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::auth::session::require_admin;
use crate::errors::AppError;
use crate::handlers::brands::BrandResponse;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Endorsement response model, enriched with the brand record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EndorsementResponse {
    pub id: i32,
    pub celebrity_id: i32,
    pub brand_id: i32,
    pub description: Option<String>,
    /// What the endorsement covers, e.g. "Racquet" or "Shoes"
    pub item_type: Option<String>,
    pub category_id: Option<i32>,
    pub price: Option<Decimal>,
    pub purchase_link: Option<String>,
    pub relationship_start_year: Option<i32>,
    /// The endorsed brand
    pub brand: BrandResponse,
}

impl From<(celebrity_brand::Model, brand::Model)> for EndorsementResponse {
    fn from((link, brand_model): (celebrity_brand::Model, brand::Model)) -> Self {
        Self {
            id: link.id,
            celebrity_id: link.celebrity_id,
            brand_id: link.brand_id,
            description: link.description,
            item_type: link.item_type,
            category_id: link.category_id,
            price: link.price,
            purchase_link: link.purchase_link,
            relationship_start_year: link.relationship_start_year,
            brand: BrandResponse::from(brand_model),
        }
    }
}

/// Request body for creating an endorsement
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateEndorsementRequest {
    pub celebrity_id: i32,
    pub brand_id: i32,
    pub description: Option<String>,
    /// What the endorsement covers, e.g. "Racquet" or "Shoes"
    pub item_type: Option<String>,
    pub category_id: Option<i32>,
    pub price: Option<Decimal>,
    pub purchase_link: Option<String>,
    pub relationship_start_year: Option<i32>,
}

/// Get a celebrity's brand endorsements
#[utoipa::path(
    get,
    path = "/api/v1/celebrities/{celebrity_id}/brands",
    tag = "endorsements",
    params(
        ("celebrity_id" = i32, Path, description = "Celebrity ID")
    ),
    responses(
        (status = 200, description = "Endorsements retrieved successfully", body = ApiResponse<Vec<EndorsementResponse>>),
        (status = 404, description = "Celebrity not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_celebrity_brands(
    Path(celebrity_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<EndorsementResponse>>>), AppError> {
    trace!("Entering get_celebrity_brands function");
    debug!("Fetching endorsements for celebrity {}", celebrity_id);

    celebrity::Entity::find_by_id(celebrity_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Celebrity with id {} does not exist", celebrity_id))
        })?;

    let rows = celebrity_brand::Entity::find()
        .filter(celebrity_brand::Column::CelebrityId.eq(celebrity_id))
        .order_by_asc(celebrity_brand::Column::Id)
        .find_also_related(brand::Entity)
        .all(&state.db)
        .await?;

    // Endorsements whose brand row is gone are dropped from the view rather
    // than surfaced half-empty.
    let data: Vec<EndorsementResponse> = rows
        .into_iter()
        .filter_map(|(link, brand_model)| brand_model.map(|b| EndorsementResponse::from((link, b))))
        .collect();

    info!(
        "Successfully retrieved {} endorsements for celebrity {}",
        data.len(),
        celebrity_id
    );
    let response = ApiResponse {
        data,
        message: "Endorsements retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Create a new endorsement
#[utoipa::path(
    post,
    path = "/api/v1/celebrity-brands",
    tag = "endorsements",
    request_body = CreateEndorsementRequest,
    responses(
        (status = 201, description = "Endorsement created successfully", body = ApiResponse<EndorsementResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "Celebrity or brand not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn create_celebrity_brand(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateEndorsementRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EndorsementResponse>>), AppError> {
    trace!("Entering create_celebrity_brand function");
    require_admin(&state, &headers).await?;
    debug!(
        "Creating endorsement of brand {} by celebrity {}",
        request.brand_id, request.celebrity_id
    );

    celebrity::Entity::find_by_id(request.celebrity_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Celebrity with id {} does not exist",
                request.celebrity_id
            ))
        })?;
    let brand_model = brand::Entity::find_by_id(request.brand_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Brand with id {} does not exist", request.brand_id))
        })?;

    let new_link = celebrity_brand::ActiveModel {
        celebrity_id: Set(request.celebrity_id),
        brand_id: Set(request.brand_id),
        description: Set(request.description),
        item_type: Set(request.item_type),
        category_id: Set(request.category_id),
        price: Set(request.price),
        purchase_link: Set(request.purchase_link),
        relationship_start_year: Set(request.relationship_start_year),
        ..Default::default()
    };

    let created = new_link.insert(&state.db).await?;

    info!("Successfully created endorsement with ID: {}", created.id);
    let response = ApiResponse {
        data: EndorsementResponse::from((created, brand_model)),
        message: "Endorsement created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Delete an endorsement
#[utoipa::path(
    delete,
    path = "/api/v1/celebrity-brands/{endorsement_id}",
    tag = "endorsements",
    params(
        ("endorsement_id" = i32, Path, description = "Endorsement ID")
    ),
    responses(
        (status = 200, description = "Endorsement deleted successfully", body = ApiResponse<String>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "Endorsement not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn delete_celebrity_brand(
    Path(endorsement_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<String>>), AppError> {
    trace!("Entering delete_celebrity_brand function");
    require_admin(&state, &headers).await?;
    debug!("Deleting endorsement with ID: {}", endorsement_id);

    let found = celebrity_brand::Entity::find_by_id(endorsement_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            warn!("Endorsement with ID {} not found", endorsement_id);
            AppError::NotFound(format!(
                "Endorsement with id {} does not exist",
                endorsement_id
            ))
        })?;

    found.delete(&state.db).await?;

    info!("Successfully deleted endorsement with ID: {}", endorsement_id);
    let response = ApiResponse {
        data: format!("Endorsement {} deleted", endorsement_id),
        message: "Endorsement deleted successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}
