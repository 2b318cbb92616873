//! HTTP client for the gateway's route-list endpoint.

use std::time::Duration;

use routewatch_core::route::RouteRecord;
use serde::Deserialize;

use crate::config::GatewayConfig;

/// Fixed timeout for the route-list request. The pipeline has no retry or
/// cancellation of its own; this bound is the only one.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors from the gateway REST client.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("gateway API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the telephony gateway's device-status API.
pub struct GatewayClient {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Fetch the current route list for the configured project.
    ///
    /// Sends one `GET /projects/{project_id}/phones` request with the API
    /// key as the basic-auth username and an empty password. No retry. A
    /// missing or non-array `data` payload normalizes to an empty list.
    pub async fn list_routes(&self) -> Result<Vec<RouteRecord>, GatewayError> {
        let url = format!(
            "{}/projects/{}/phones",
            self.config.base_url, self.config.project_id
        );

        let result = self.fetch_routes(&url).await;
        if let Err(err) = &result {
            tracing::error!(url = %url, error = %err, "Failed to fetch route list from gateway");
        }
        result
    }

    async fn fetch_routes(&self, url: &str) -> Result<Vec<RouteRecord>, GatewayError> {
        let response = self
            .client
            .get(url)
            .basic_auth(&self.config.api_key, Some(""))
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let payload = response.json::<serde_json::Value>().await?;
        Ok(routes_from_payload(payload))
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`GatewayError::Api`] containing the
    /// status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Extract route records from a gateway response payload.
///
/// The expected shape is `{ "data": [RouteRecord, ...] }`. A missing or
/// non-array `data` yields an empty list; an element that fails to
/// deserialize is logged and skipped instead of failing the whole batch.
pub fn routes_from_payload(payload: serde_json::Value) -> Vec<RouteRecord> {
    let Some(items) = payload.get("data").and_then(|data| data.as_array()) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match RouteRecord::deserialize(item) {
            Ok(route) => Some(route),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping malformed route record");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
