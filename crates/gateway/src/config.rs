//! Gateway connection settings.

/// Errors from reading gateway settings out of the environment.
#[derive(Debug, thiserror::Error)]
pub enum GatewayConfigError {
    /// A required environment variable is missing.
    #[error("{0} is not set")]
    MissingVar(&'static str),
}

/// Connection settings for the telephony gateway API.
///
/// All three values are required; there is no meaningful default for any
/// of them.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway instance, without a trailing slash.
    pub base_url: String,
    /// API key, sent as the basic-auth username with an empty password.
    pub api_key: String,
    /// Project whose routes are monitored.
    pub project_id: String,
}

impl GatewayConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            project_id: project_id.into(),
        }
    }

    /// Load settings from `GATEWAY_BASE_URL`, `GATEWAY_API_KEY` and
    /// `GATEWAY_PROJECT_ID`.
    pub fn from_env() -> Result<Self, GatewayConfigError> {
        Ok(Self::new(
            require("GATEWAY_BASE_URL")?,
            require("GATEWAY_API_KEY")?,
            require("GATEWAY_PROJECT_ID")?,
        ))
    }
}

fn require(name: &'static str) -> Result<String, GatewayConfigError> {
    std::env::var(name).map_err(|_| GatewayConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let config = GatewayConfig::new("https://gw.example.com/", "key", "proj");
        assert_eq!(config.base_url, "https://gw.example.com");
    }

    #[test]
    fn keeps_clean_base_url_untouched() {
        let config = GatewayConfig::new("https://gw.example.com", "key", "proj");
        assert_eq!(config.base_url, "https://gw.example.com");
    }

    #[test]
    fn missing_var_error_names_the_variable() {
        let err = GatewayConfigError::MissingVar("GATEWAY_API_KEY");
        assert_eq!(err.to_string(), "GATEWAY_API_KEY is not set");
    }
}
