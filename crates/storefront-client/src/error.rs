//! # Client Error Types
//!
//! Error types for HTTP, cache and configuration operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / std::io::Error / serde_json::Error                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientError (this module) ← Adds context and categorization           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in the app) ← What pages render as an error state           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client operation errors.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Fetch Errors
    // =========================================================================
    /// Request never got a response (DNS, refused connection, reset).
    #[error("Request failed: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Server answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Entity does not exist on the server.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    // =========================================================================
    // Cache Errors
    // =========================================================================
    /// Reading or writing the key-value cache failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Cache key contains characters the backend cannot store.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Serializing a value for the cache failed.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

impl ClientError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        ClientError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Returns true if a failed fetch may succeed when the caller tries
    /// again. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) | ClientError::Timeout(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error came from talking to the API.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_)
                | ClientError::Timeout(_)
                | ClientError::Status { .. }
                | ClientError::NotFound { .. }
                | ClientError::Decode(_)
        )
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

/// ## Error Mapping
/// ```text
/// timeout          → ClientError::Timeout
/// body decode      → ClientError::Decode
/// status (4xx/5xx) → ClientError::Status
/// other            → ClientError::Transport
/// ```
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let (true, Some(status)) = (err.is_status(), err.status()) {
            ClientError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ClientError::Transport("connection refused".into()).is_retryable());
        assert!(ClientError::Timeout("5s".into()).is_retryable());
        assert!(ClientError::Status {
            status: 503,
            url: "http://localhost/products".into()
        }
        .is_retryable());

        assert!(!ClientError::Status {
            status: 400,
            url: "http://localhost/checkout".into()
        }
        .is_retryable());
        assert!(!ClientError::not_found("Product", 7).is_retryable());
        assert!(!ClientError::InvalidConfig("bad".into()).is_retryable());
    }

    #[test]
    fn test_fetch_error_category() {
        assert!(ClientError::Decode("missing field".into()).is_fetch_error());
        assert!(!ClientError::Storage("disk full".into()).is_fetch_error());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ClientError::not_found("Product", 42).to_string(),
            "Product not found: 42"
        );
    }
}
