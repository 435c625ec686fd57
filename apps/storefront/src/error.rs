//! # App Error Type
//!
//! Unified error type for commands and pages.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Page                        Command                                    │
//! │  ────                        ───────                                    │
//! │                                                                         │
//! │  click "Add to Cart"                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Fetch Error? ─── ClientError::Status { .. } ──────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Cart Rule? ───── CoreError::CartTooLarge ─────── AppError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Failed fetches are also stored in the slice, so the page renders an   │
//! │  error block instead of the content.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_client::ClientError;
use storefront_core::{CoreError, ValidationError};

/// Result type for commands.
pub type AppResult<T> = Result<T, AppError>;

/// Error returned from commands and kept in store slices.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 7"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart rule violated
    CartError,

    /// Request to the API failed
    FetchError,

    /// Cart cache could not be read or written
    StorageError,

    /// Bad configuration
    ConfigError,

    /// Requested data is not in the store yet
    NotLoaded,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts client errors to app errors.
impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            e @ (ClientError::Transport(_)
            | ClientError::Timeout(_)
            | ClientError::Status { .. }
            | ClientError::Decode(_)) => AppError::new(ErrorCode::FetchError, e.to_string()),
            e @ (ClientError::Storage(_)
            | ClientError::InvalidKey(_)
            | ClientError::Serialization(_)) => {
                tracing::error!("Cart cache failure: {}", e);
                AppError::new(ErrorCode::StorageError, e.to_string())
            }
            e @ (ClientError::InvalidConfig(_)
            | ClientError::InvalidUrl(_)
            | ClientError::ConfigLoadFailed(_)
            | ClientError::ConfigSaveFailed(_)) => {
                AppError::new(ErrorCode::ConfigError, e.to_string())
            }
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CartTooLarge { max } => AppError::new(
                ErrorCode::CartError,
                format!("Cart cannot have more than {} items", max),
            ),
            CoreError::QuantityTooLarge { requested, max } => AppError::new(
                ErrorCode::ValidationError,
                format!("Quantity {} exceeds maximum allowed ({})", requested, max),
            ),
            CoreError::EmptyCart => AppError::new(ErrorCode::CartError, "Cart is empty"),
            CoreError::CheckoutInProgress => AppError::new(
                ErrorCode::CartError,
                "A checkout is already in progress",
            ),
            CoreError::Validation(e) => AppError::from(e),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serialization() {
        let err = AppError::not_found("Product", "7");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 7");

        let json = serde_json::to_value(ErrorCode::FetchError).unwrap();
        assert_eq!(json, "FETCH_ERROR");
    }

    #[test]
    fn test_client_error_mapping() {
        let err = AppError::from(ClientError::Status {
            status: 500,
            url: "http://localhost/products".into(),
        });
        assert_eq!(err.code, ErrorCode::FetchError);

        let err = AppError::from(ClientError::not_found("Product", 3));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 3");

        let err = AppError::from(ClientError::Storage("disk full".into()));
        assert_eq!(err.code, ErrorCode::StorageError);
    }

    #[test]
    fn test_core_error_mapping() {
        assert_eq!(AppError::from(CoreError::EmptyCart).code, ErrorCode::CartError);

        let err = AppError::from(CoreError::Validation(ValidationError::Required {
            field: "name".into(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }
}
