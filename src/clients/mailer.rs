use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Mail API is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mail API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Clone, Debug)]
struct MailerConfig {
    api_url: String,
    api_key: String,
    from: String,
}

#[derive(Debug, Serialize)]
struct OutboundMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Posts transactional mail to an HTTP mail API. When unconfigured the
/// service stays up and callers degrade to dev-mode behavior.
#[derive(Clone, Debug)]
pub struct Mailer {
    client: Client,
    config: Option<MailerConfig>,
}

impl Mailer {
    pub fn from_env() -> Self {
        let config = match (std::env::var("MAIL_API_URL"), std::env::var("MAIL_API_KEY")) {
            (Ok(api_url), Ok(api_key)) => Some(MailerConfig {
                api_url,
                api_key,
                from: std::env::var("MAIL_FROM")
                    .unwrap_or_else(|_| "CeleCart <no-reply@celecart.com>".to_string()),
            }),
            _ => None,
        };

        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            config,
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            client: Client::new(),
            config: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Send a plain-text mail through the configured API.
    pub async fn send(&self, to: &str, subject: &str, text: &str) -> Result<(), MailerError> {
        let config = self.config.as_ref().ok_or(MailerError::NotConfigured)?;

        let mail = OutboundMail {
            from: config.from.as_str(),
            to,
            subject,
            text,
        };

        let response = self
            .client
            .post(&config.api_url)
            .bearer_auth(&config.api_key)
            .json(&mail)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!("Mail sent to {}", to);
        Ok(())
    }

    /// Send the password-reset mail for the given link.
    pub async fn send_password_reset(&self, to: &str, reset_url: &str) -> Result<(), MailerError> {
        let text = format!(
            "We received a request to reset your CeleCart password.\n\n\
             Open the link below to choose a new one. The link expires in 1 hour.\n\n\
             {}\n\n\
             If you did not request this, you can safely ignore this email.",
            reset_url
        );
        self.send(to, "Password Reset Request", &text).await
    }
}
