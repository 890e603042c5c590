use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use model::entities::{celebrity, celebrity_product, role};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::session::{has_role, require_user};
use crate::errors::AppError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Product response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub celebrity_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub image_url: String,
    pub price: Option<Decimal>,
    pub purchase_link: Option<String>,
    /// 1 to 5, editorial rating
    pub rating: Option<i32>,
    pub is_active: bool,
    pub is_featured: bool,
}

impl From<celebrity_product::Model> for ProductResponse {
    fn from(model: celebrity_product::Model) -> Self {
        Self {
            id: model.id,
            celebrity_id: model.celebrity_id,
            name: model.name,
            description: model.description,
            category: model.category,
            image_url: model.image_url,
            price: model.price,
            purchase_link: model.purchase_link,
            rating: model.rating,
            is_active: model.is_active,
            is_featured: model.is_featured,
        }
    }
}

/// Request body for creating a product
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub image_url: String,
    pub price: Option<Decimal>,
    pub purchase_link: Option<String>,
    /// 1 to 5, editorial rating
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,
    pub is_featured: Option<bool>,
}

/// Get a celebrity's active products
#[utoipa::path(
    get,
    path = "/api/v1/celebrities/{celebrity_id}/products",
    tag = "products",
    params(
        ("celebrity_id" = i32, Path, description = "Celebrity ID")
    ),
    responses(
        (status = 200, description = "Products retrieved successfully", body = ApiResponse<Vec<ProductResponse>>),
        (status = 404, description = "Celebrity not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_celebrity_products(
    Path(celebrity_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<ProductResponse>>>), AppError> {
    trace!("Entering get_celebrity_products function");
    debug!("Fetching products for celebrity {}", celebrity_id);

    celebrity::Entity::find_by_id(celebrity_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Celebrity with id {} does not exist", celebrity_id))
        })?;

    let products = celebrity_product::Entity::find()
        .filter(celebrity_product::Column::CelebrityId.eq(celebrity_id))
        .filter(celebrity_product::Column::IsActive.eq(true))
        .order_by_asc(celebrity_product::Column::Id)
        .all(&state.db)
        .await?;

    info!(
        "Successfully retrieved {} products for celebrity {}",
        products.len(),
        celebrity_id
    );
    let response = ApiResponse {
        data: products.into_iter().map(ProductResponse::from).collect(),
        message: "Products retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Create a product for a celebrity
#[utoipa::path(
    post,
    path = "/api/v1/celebrities/{celebrity_id}/products",
    tag = "products",
    params(
        ("celebrity_id" = i32, Path, description = "Celebrity ID")
    ),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the owner and not an administrator", body = ErrorResponse),
        (status = 404, description = "Celebrity not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn create_celebrity_product(
    Path(celebrity_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponse>>), AppError> {
    trace!("Entering create_celebrity_product function");
    request.validate()?;

    let profile = celebrity::Entity::find_by_id(celebrity_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Celebrity with id {} does not exist", celebrity_id))
        })?;

    let actor = require_user(&state, &headers).await?;
    let owns_profile = profile.user_id == Some(actor.id);
    if !owns_profile && !has_role(&state.db, &actor, role::ADMIN).await? {
        warn!(
            "User {} tried to add a product to celebrity {} without ownership",
            actor.id, celebrity_id
        );
        return Err(AppError::Forbidden(
            "You do not own this celebrity profile".to_string(),
        ));
    }
    debug!("Creating product {} for celebrity {}", request.name, celebrity_id);

    let new_product = celebrity_product::ActiveModel {
        celebrity_id: Set(celebrity_id),
        name: Set(request.name),
        description: Set(request.description),
        category: Set(request.category),
        image_url: Set(request.image_url),
        price: Set(request.price),
        purchase_link: Set(request.purchase_link),
        rating: Set(request.rating),
        is_featured: Set(request.is_featured.unwrap_or(false)),
        ..Default::default()
    };

    let created = new_product.insert(&state.db).await?;

    info!("Successfully created product with ID: {}", created.id);
    let response = ApiResponse {
        data: ProductResponse::from(created),
        message: "Product created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}
