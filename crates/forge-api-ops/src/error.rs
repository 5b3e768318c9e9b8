use thiserror::Error;

/// Error taxonomy for GitHub REST calls.
#[derive(Debug, Error)]
pub enum ForgeApiError {
    #[error("authentication failed: {message}")]
    Auth { message: String },

    #[error("rate limit exceeded: {message}")]
    RateLimit { message: String },

    #[error("resource not found: {message}")]
    NotFound { message: String },

    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("API request failed with HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse API response: {message}")]
    Parse { message: String },
}

impl ForgeApiError {
    /// Stable machine-readable error code for presentation-layer clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "auth",
            Self::RateLimit { .. } => "rate_limit",
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "validation",
            Self::Network { .. } => "network",
            Self::Api { .. } => "api",
            Self::Parse { .. } => "parse_error",
        }
    }
}

impl From<reqwest::Error> for ForgeApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse {
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}
