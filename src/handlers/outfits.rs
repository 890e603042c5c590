use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use axum_valid::Valid;
use model::entities::{celebrity, tournament, tournament_outfit};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::auth::session::require_admin;
use crate::errors::AppError;
use crate::handlers::celebrities::CelebrityResponse;
use crate::handlers::tournaments::TournamentResponse;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Outfit response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OutfitResponse {
    pub id: i32,
    pub celebrity_id: i32,
    pub tournament_id: i32,
    /// Tournament edition year
    pub year: i32,
    pub description: Option<String>,
    pub image_url: String,
    /// Tournament result, e.g. "Winner" or "Runner-up"
    pub result: Option<String>,
    pub main_color: String,
    pub accent_color: Option<String>,
    pub special_features: Option<String>,
    pub design_inspiration: Option<String>,
}

impl From<tournament_outfit::Model> for OutfitResponse {
    fn from(model: tournament_outfit::Model) -> Self {
        Self {
            id: model.id,
            celebrity_id: model.celebrity_id,
            tournament_id: model.tournament_id,
            year: model.year,
            description: model.description,
            image_url: model.image_url,
            result: model.result,
            main_color: model.main_color,
            accent_color: model.accent_color,
            special_features: model.special_features,
            design_inspiration: model.design_inspiration,
        }
    }
}

/// Outfit enriched with the tournament it was worn at
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CelebrityOutfitResponse {
    #[serde(flatten)]
    pub outfit: OutfitResponse,
    pub tournament: TournamentResponse,
}

/// Outfit enriched with the celebrity who wore it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TournamentOutfitResponse {
    #[serde(flatten)]
    pub outfit: OutfitResponse,
    pub celebrity: CelebrityResponse,
}

/// Request body for creating an outfit
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateOutfitRequest {
    pub celebrity_id: i32,
    pub tournament_id: i32,
    /// Tournament edition year
    #[validate(range(min = 1900, max = 2100, message = "Year must be between 1900 and 2100"))]
    pub year: i32,
    pub description: Option<String>,
    pub image_url: String,
    /// Tournament result, e.g. "Winner" or "Runner-up"
    pub result: Option<String>,
    pub main_color: String,
    pub accent_color: Option<String>,
    pub special_features: Option<String>,
    pub design_inspiration: Option<String>,
}

/// Query parameters for listing outfits
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct OutfitListQuery {
    /// Filter by tournament edition year
    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,
}

/// Get a celebrity's outfits with their tournaments
#[utoipa::path(
    get,
    path = "/api/v1/celebrities/{celebrity_id}/outfits",
    tag = "outfits",
    params(
        ("celebrity_id" = i32, Path, description = "Celebrity ID"),
        OutfitListQuery
    ),
    responses(
        (status = 200, description = "Outfits retrieved successfully", body = ApiResponse<Vec<CelebrityOutfitResponse>>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "Celebrity not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_celebrity_outfits(
    Path(celebrity_id): Path<i32>,
    Valid(Query(query)): Valid<Query<OutfitListQuery>>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<CelebrityOutfitResponse>>>), AppError> {
    trace!("Entering get_celebrity_outfits function");
    debug!("Fetching outfits for celebrity {}", celebrity_id);

    celebrity::Entity::find_by_id(celebrity_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Celebrity with id {} does not exist", celebrity_id))
        })?;

    let mut query_builder = tournament_outfit::Entity::find()
        .filter(tournament_outfit::Column::CelebrityId.eq(celebrity_id));
    if let Some(year) = query.year {
        query_builder = query_builder.filter(tournament_outfit::Column::Year.eq(year));
    }

    let rows = query_builder
        .order_by_asc(tournament_outfit::Column::Year)
        .find_also_related(tournament::Entity)
        .all(&state.db)
        .await?;

    let data: Vec<CelebrityOutfitResponse> = rows
        .into_iter()
        .filter_map(|(outfit, tournament_model)| {
            tournament_model.map(|t| CelebrityOutfitResponse {
                outfit: OutfitResponse::from(outfit),
                tournament: TournamentResponse::from(t),
            })
        })
        .collect();

    info!(
        "Successfully retrieved {} outfits for celebrity {}",
        data.len(),
        celebrity_id
    );
    let response = ApiResponse {
        data,
        message: "Outfits retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Get a tournament's outfits with their celebrities
#[utoipa::path(
    get,
    path = "/api/v1/tournaments/{tournament_id}/outfits",
    tag = "outfits",
    params(
        ("tournament_id" = i32, Path, description = "Tournament ID"),
        OutfitListQuery
    ),
    responses(
        (status = 200, description = "Outfits retrieved successfully", body = ApiResponse<Vec<TournamentOutfitResponse>>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "Tournament not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_tournament_outfits(
    Path(tournament_id): Path<i32>,
    Valid(Query(query)): Valid<Query<OutfitListQuery>>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<TournamentOutfitResponse>>>), AppError> {
    trace!("Entering get_tournament_outfits function");
    debug!("Fetching outfits for tournament {}", tournament_id);

    tournament::Entity::find_by_id(tournament_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Tournament with id {} does not exist",
                tournament_id
            ))
        })?;

    let mut query_builder = tournament_outfit::Entity::find()
        .filter(tournament_outfit::Column::TournamentId.eq(tournament_id));
    if let Some(year) = query.year {
        query_builder = query_builder.filter(tournament_outfit::Column::Year.eq(year));
    }

    let rows = query_builder
        .order_by_asc(tournament_outfit::Column::Year)
        .find_also_related(celebrity::Entity)
        .all(&state.db)
        .await?;

    let data: Vec<TournamentOutfitResponse> = rows
        .into_iter()
        .filter_map(|(outfit, celebrity_model)| {
            celebrity_model.map(|c| TournamentOutfitResponse {
                outfit: OutfitResponse::from(outfit),
                celebrity: CelebrityResponse::from(c),
            })
        })
        .collect();

    info!(
        "Successfully retrieved {} outfits for tournament {}",
        data.len(),
        tournament_id
    );
    let response = ApiResponse {
        data,
        message: "Outfits retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Create a new outfit
#[utoipa::path(
    post,
    path = "/api/v1/outfits",
    tag = "outfits",
    request_body = CreateOutfitRequest,
    responses(
        (status = 201, description = "Outfit created successfully", body = ApiResponse<OutfitResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "Celebrity or tournament not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn create_tournament_outfit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateOutfitRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OutfitResponse>>), AppError> {
    trace!("Entering create_tournament_outfit function");
    require_admin(&state, &headers).await?;
    request.validate()?;
    debug!(
        "Creating outfit for celebrity {} at tournament {}",
        request.celebrity_id, request.tournament_id
    );

    celebrity::Entity::find_by_id(request.celebrity_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            warn!("Celebrity with ID {} not found", request.celebrity_id);
            AppError::NotFound(format!(
                "Celebrity with id {} does not exist",
                request.celebrity_id
            ))
        })?;
    tournament::Entity::find_by_id(request.tournament_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            warn!("Tournament with ID {} not found", request.tournament_id);
            AppError::NotFound(format!(
                "Tournament with id {} does not exist",
                request.tournament_id
            ))
        })?;

    let new_outfit = tournament_outfit::ActiveModel {
        celebrity_id: Set(request.celebrity_id),
        tournament_id: Set(request.tournament_id),
        year: Set(request.year),
        description: Set(request.description),
        image_url: Set(request.image_url),
        result: Set(request.result),
        main_color: Set(request.main_color),
        accent_color: Set(request.accent_color),
        special_features: Set(request.special_features),
        design_inspiration: Set(request.design_inspiration),
        ..Default::default()
    };

    let created = new_outfit.insert(&state.db).await?;

    info!("Successfully created outfit with ID: {}", created.id);
    let response = ApiResponse {
        data: OutfitResponse::from(created),
        message: "Outfit created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}
