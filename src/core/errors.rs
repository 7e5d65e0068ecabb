//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// A required command-line argument was not supplied
    #[error("{message}")]
    MissingArgument {
        /// Diagnostic shown to the user
        message: String,
    },

    /// API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// API key rejected
    #[error("Authorization failed, check your API key")]
    AuthError,

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Retry after {retry_after:?} seconds")]
    RateLimitError {
        /// Seconds from the `Retry-After` header
        retry_after: Option<u64>,
    },

    /// Character quota exceeded
    #[error("Character quota exceeded for this billing period")]
    QuotaExceededError,

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Transport error, without the request URL
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// What was wrong with the body
        message: String,
    },

    /// Request timeout
    #[error("Request timeout")]
    TimeoutError,

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What is missing or malformed
        message: String,
    },

    /// Clipboard write failed
    #[error("Clipboard error: {message}")]
    ClipboardError {
        /// Error from the clipboard backend
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl TranslationError {
    /// Shorthand for a missing-argument error
    pub fn missing_argument(message: impl Into<String>) -> Self {
        TranslationError::MissingArgument {
            message: message.into(),
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            TranslationError::MissingArgument { .. } => 1,
            TranslationError::ApiError { .. }
            | TranslationError::AuthError
            | TranslationError::RateLimitError { .. }
            | TranslationError::QuotaExceededError
            | TranslationError::NetworkError { .. }
            | TranslationError::TimeoutError => 2,
            TranslationError::InvalidResponseError { .. } => 3,
            TranslationError::ConfigError { .. } => 4,
            TranslationError::ClipboardError { .. } => 5,
            TranslationError::IoError(_) | TranslationError::HttpError(_) => 1,
        }
    }

    /// Whether the diagnostic belongs on stdout rather than stderr
    pub fn is_usage_error(&self) -> bool {
        matches!(self, TranslationError::MissingArgument { .. })
    }
}

impl From<config::ConfigError> for TranslationError {
    fn from(err: config::ConfigError) -> Self {
        TranslationError::ConfigError {
            message: err.to_string(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
