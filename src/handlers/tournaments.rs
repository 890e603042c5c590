use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use chrono::NaiveDate;
use model::entities::tournament;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::auth::session::require_admin;
use crate::errors::AppError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Tournament response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TournamentResponse {
    pub id: i32,
    pub name: String,
    pub location: String,
    /// Playing surface, e.g. "Clay", "Grass", "Hard"
    pub surface_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub image_url: String,
    /// Competition tier, e.g. "Grand Slam", "Masters 1000"
    pub tier: String,
}

impl From<tournament::Model> for TournamentResponse {
    fn from(model: tournament::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            location: model.location,
            surface_type: model.surface_type,
            start_date: model.start_date,
            end_date: model.end_date,
            description: model.description,
            image_url: model.image_url,
            tier: model.tier,
        }
    }
}

/// Request body for creating a tournament
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateTournamentRequest {
    pub name: String,
    pub location: String,
    /// Playing surface, e.g. "Clay", "Grass", "Hard"
    pub surface_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub image_url: String,
    /// Competition tier, e.g. "Grand Slam", "Masters 1000"
    pub tier: String,
}

/// Get all tournaments
#[utoipa::path(
    get,
    path = "/api/v1/tournaments",
    tag = "tournaments",
    responses(
        (status = 200, description = "Tournaments retrieved successfully", body = ApiResponse<Vec<TournamentResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_tournaments(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<TournamentResponse>>>), AppError> {
    trace!("Entering get_tournaments function");

    let tournaments = tournament::Entity::find()
        .order_by_asc(tournament::Column::StartDate)
        .all(&state.db)
        .await?;

    info!("Successfully retrieved {} tournaments", tournaments.len());
    let response = ApiResponse {
        data: tournaments.into_iter().map(TournamentResponse::from).collect(),
        message: "Tournaments retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Get a specific tournament by ID
#[utoipa::path(
    get,
    path = "/api/v1/tournaments/{tournament_id}",
    tag = "tournaments",
    params(
        ("tournament_id" = i32, Path, description = "Tournament ID")
    ),
    responses(
        (status = 200, description = "Tournament retrieved successfully", body = ApiResponse<TournamentResponse>),
        (status = 404, description = "Tournament not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_tournament(
    Path(tournament_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<TournamentResponse>>), AppError> {
    trace!("Entering get_tournament function");
    debug!("Fetching tournament with ID: {}", tournament_id);

    let found = tournament::Entity::find_by_id(tournament_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            warn!("Tournament with ID {} not found", tournament_id);
            AppError::NotFound(format!(
                "Tournament with id {} does not exist",
                tournament_id
            ))
        })?;

    info!("Successfully retrieved tournament: {}", found.name);
    let response = ApiResponse {
        data: TournamentResponse::from(found),
        message: "Tournament retrieved successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Create a new tournament
#[utoipa::path(
    post,
    path = "/api/v1/tournaments",
    tag = "tournaments",
    request_body = CreateTournamentRequest,
    responses(
        (status = 201, description = "Tournament created successfully", body = ApiResponse<TournamentResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(headers))]
pub async fn create_tournament(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateTournamentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TournamentResponse>>), AppError> {
    trace!("Entering create_tournament function");
    require_admin(&state, &headers).await?;
    debug!("Creating tournament: {}", request.name);

    let new_tournament = tournament::ActiveModel {
        name: Set(request.name),
        location: Set(request.location),
        surface_type: Set(request.surface_type),
        start_date: Set(request.start_date),
        end_date: Set(request.end_date),
        description: Set(request.description),
        image_url: Set(request.image_url),
        tier: Set(request.tier),
        ..Default::default()
    };

    let created = new_tournament.insert(&state.db).await?;

    info!("Successfully created tournament with ID: {}", created.id);
    let response = ApiResponse {
        data: TournamentResponse::from(created),
        message: "Tournament created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}
