use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required filesystem path could not be determined.
    #[error("path error: {0}")]
    Path(String),

    /// Filesystem I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Token file is present but not decodable.
    #[error("invalid token file: {0}")]
    InvalidTokenFile(#[from] serde_json::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
