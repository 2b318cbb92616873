//! Slack alert delivery via `chat.postMessage`.
//!
//! Configuration is environment-sourced; if the bot token or channel id is
//! not set, [`SlackConfig::from_env`] returns `None` and the caller should
//! run without Slack delivery (log-only mode) rather than fail.

use std::time::Duration;

use serde::Deserialize;

/// Slack Web API endpoint for posting a message.
const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for Slack delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    /// The underlying HTTP request failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Slack returned a non-2xx status code.
    #[error("Slack returned HTTP {0}")]
    Http(u16),

    /// Slack accepted the request but reported an in-band error
    /// (e.g. `channel_not_found`, `invalid_auth`).
    #[error("Slack API error: {0}")]
    Api(String),
}

// ---------------------------------------------------------------------------
// SlackConfig
// ---------------------------------------------------------------------------

/// Configuration for the Slack delivery client.
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Bot token, sent as a bearer token.
    pub bot_token: String,
    /// Channel that receives the alerts.
    pub channel_id: String,
}

impl SlackConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if either variable is not set, signalling that Slack
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable           | Required |
    /// |--------------------|----------|
    /// | `SLACK_BOT_TOKEN`  | yes      |
    /// | `SLACK_CHANNEL_ID` | yes      |
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("SLACK_BOT_TOKEN").ok()?;
        let channel_id = std::env::var("SLACK_CHANNEL_ID").ok()?;
        Some(Self {
            bot_token,
            channel_id,
        })
    }
}

/// Render a Slack user id as an in-message mention token.
pub fn mention(user_id: &str) -> String {
    format!("<@{user_id}>")
}

// ---------------------------------------------------------------------------
// SlackClient
// ---------------------------------------------------------------------------

/// Response body of `chat.postMessage`. Slack reports failures in-band with
/// HTTP 200, so `ok` must be checked.
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Posts alert messages to a fixed Slack channel.
pub struct SlackClient {
    client: reqwest::Client,
    config: SlackConfig,
}

impl SlackClient {
    /// Create a new client with a pre-configured HTTP client.
    pub fn new(config: SlackConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Post one plain-text message to the configured channel.
    pub async fn post_message(&self, text: &str) -> Result<(), SlackError> {
        let payload = serde_json::json!({
            "channel": self.config.channel_id,
            "text": text,
        });

        let response = self
            .client
            .post(POST_MESSAGE_URL)
            .bearer_auth(&self.config.bot_token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SlackError::Http(response.status().as_u16()));
        }

        let body = response.json::<PostMessageResponse>().await?;
        if !body.ok {
            return Err(SlackError::Api(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        tracing::info!(channel = %self.config.channel_id, "Slack message posted");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
