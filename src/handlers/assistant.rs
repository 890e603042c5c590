use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

use crate::clients::assistant::ChatTurn;
use crate::errors::AppError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// A prior turn of the conversation
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ChatMessage {
    /// "user" or "assistant"; other roles are dropped
    pub role: String,
    pub content: String,
}

/// Request body for the style assistant
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct ChatRequest {
    /// The user's question
    #[validate(length(min = 1, message = "Question must not be empty"))]
    pub question: String,
    /// Prior turns, oldest first
    pub history: Option<Vec<ChatMessage>>,
}

/// Assistant reply
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatReply {
    pub reply: String,
}

/// Ask the style assistant a question
#[utoipa::path(
    post,
    path = "/api/v1/assistant/chat",
    tag = "assistant",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant replied successfully", body = ApiResponse<ChatReply>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 502, description = "Assistant unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ChatReply>>), AppError> {
    trace!("Entering chat function");
    request.validate()?;

    let history: Vec<ChatTurn> = request
        .history
        .unwrap_or_default()
        .into_iter()
        .map(|m| ChatTurn {
            role: m.role,
            content: m.content,
        })
        .collect();
    debug!(
        "Relaying question with {} prior turns to the assistant",
        history.len()
    );

    let reply = state.assistant.chat(&history, &request.question).await?;

    info!("Assistant replied with {} chars", reply.len());
    let response = ApiResponse {
        data: ChatReply { reply },
        message: "Assistant replied successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::OK, Json(response)))
}
