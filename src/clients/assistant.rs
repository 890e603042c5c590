//! Style assistant client. The single point of entry for all assistant API
//! calls; handlers never talk to the upstream directly.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const ASSISTANT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ASSISTANT_API_VERSION: &str = "2023-06-01";
/// Hardcoded so every deployment answers with the same model.
const MODEL: &str = "claude-3-5-sonnet-latest";
const MAX_TOKENS: u32 = 1024;
const MAX_RETRIES: u32 = 3;

const SYSTEM_PROMPT: &str = "You are the CeleCart style assistant. You answer \
questions about celebrity fashion, brand endorsements, tournament outfits and \
shopping ideas from the CeleCart catalog. Keep answers short, friendly and \
concrete.";

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant API key is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Assistant returned empty content")]
    EmptyContent,
}

/// A prior turn of the conversation, as relayed by the caller.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct AssistantRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AssistantMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AssistantMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AssistantResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

impl AssistantResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    error: UpstreamErrorBody,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: String,
}

/// Wraps the assistant messages API with retry logic.
#[derive(Clone, Debug)]
pub struct AssistantClient {
    client: Client,
    api_key: Option<String>,
}

impl AssistantClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("ASSISTANT_API_KEY").ok())
    }

    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send the conversation to the assistant and return its text reply.
    /// Retries on 429 and 5xx with exponential backoff.
    pub async fn chat(&self, history: &[ChatTurn], question: &str) -> Result<String, AssistantError> {
        let api_key = self.api_key.as_deref().ok_or(AssistantError::NotConfigured)?;

        let mut messages: Vec<AssistantMessage> = history
            .iter()
            .filter(|turn| matches!(turn.role.as_str(), "user" | "assistant"))
            .map(|turn| AssistantMessage {
                role: turn.role.as_str(),
                content: turn.content.as_str(),
            })
            .collect();
        messages.push(AssistantMessage {
            role: "user",
            content: question,
        });

        let request_body = AssistantRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages,
        };

        let mut last_error: Option<AssistantError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Assistant call attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ASSISTANT_API_URL)
                .header("x-api-key", api_key)
                .header("anthropic-version", ASSISTANT_API_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AssistantError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Assistant API returned {}: {}", status, body);
                last_error = Some(AssistantError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<UpstreamError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(AssistantError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let assistant_response: AssistantResponse = response.json().await?;
            let reply = assistant_response
                .text()
                .ok_or(AssistantError::EmptyContent)?;

            debug!("Assistant call succeeded ({} chars)", reply.len());
            return Ok(reply.to_string());
        }

        Err(last_error.unwrap_or(AssistantError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_client_fails_without_network() {
        let client = AssistantClient::unconfigured();
        assert!(!client.is_configured());

        let result = client.chat(&[], "what should I wear?").await;
        assert!(matches!(result, Err(AssistantError::NotConfigured)));
    }

    #[test]
    fn test_configured_flag() {
        assert!(AssistantClient::new(Some("key".into())).is_configured());
        assert!(!AssistantClient::new(None).is_configured());
    }
}
