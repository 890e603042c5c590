use axum::{extract::State, http::StatusCode, response::Json};
use model::entities::plan;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace};
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Plan response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlanResponse {
    pub id: i32,
    pub name: String,
    pub image_url: String,
    pub price: Decimal,
    /// Promo text, e.g. "20% off first year"
    pub discount: Option<String>,
    pub description: Option<String>,
}

impl From<plan::Model> for PlanResponse {
    fn from(model: plan::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            image_url: model.image_url,
            price: model.price,
            discount: model.discount,
            description: model.description,
        }
    }
}

/// Get all active plans
#[utoipa::path(
    get,
    path = "/api/v1/plans",
    tag = "plans",
    responses(
        (status = 200, description = "Plans retrieved successfully", body = ApiResponse<Vec<PlanResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_plans(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<PlanResponse>>>), AppError> {
    trace!("Entering get_plans function");

    let plans = plan::Entity::find()
        .filter(plan::Column::IsActive.eq(true))
        .order_by_asc(plan::Column::Price)
        .all(&state.db)
        .await?;

    info!("Successfully retrieved {} plans", plans.len());
    let response = ApiResponse {
        data: plans.into_iter().map(PlanResponse::from).collect(),
        message: "Plans retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}
