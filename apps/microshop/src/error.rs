//! # Application Errors
//!
//! Two layers:
//!
//! - [`AppError`]: typed failure of a command, wrapping the lower crates.
//! - [`ApiError`]: what a screen receives, a machine-readable code plus the
//!   message to show.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError / CoreError ─┐                                        │
//! │  StoreError ──────────────────┼──► AppError ──► ApiError { code, msg } │
//! │  ClientError ─────────────────┤                                        │
//! │  ApiResponse { error } ───────┘   (fixed messages pass through as-is)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```json
//! { "code": "SELLER_SETUP_REQUIRED",
//!   "message": "You need to complete seller onboarding before publishing listings." }
//! ```

use serde::Serialize;
use thiserror::Error;

use microshop_client::ClientError;
use microshop_core::{CoreError, ThemeError, ValidationError};
use microshop_store::{inventory_api, StoreError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// A `{ success: false }` response from an API module, message kept.
    #[error("{0}")]
    Api(String),

    /// Something the screen looked up is gone (`Product not found`).
    #[error("{0}")]
    NotFound(String),

    /// Payment simulation went through but a follow-up step failed.
    #[error("{0}")]
    Payment(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Core(CoreError::Validation(err))
    }
}

impl From<ThemeError> for AppError {
    fn from(err: ThemeError) -> Self {
        AppError::Core(CoreError::Theme(err))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Screen-Facing Error
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    NotAuthenticated,
    SellerSetupRequired,
    NotPurchasable,
    PaymentError,
    StorageError,
    NetworkError,
    ConfigError,
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Core(core) => match core {
                CoreError::InventoryNotFound => ApiError::new(ErrorCode::NotFound, core.to_string()),
                CoreError::NotPurchasable { reason } => {
                    ApiError::new(ErrorCode::NotPurchasable, reason)
                }
                CoreError::SellerNotEnabled => {
                    ApiError::new(ErrorCode::SellerSetupRequired, core.to_string())
                }
                CoreError::NotAuthenticated => {
                    ApiError::new(ErrorCode::NotAuthenticated, core.to_string())
                }
                CoreError::QuantityTooLarge { .. }
                | CoreError::Validation(_)
                | CoreError::Theme(_) => ApiError::validation(core.to_string()),
            },
            AppError::Store(e) => {
                tracing::error!("Local storage failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Local storage operation failed")
            }
            AppError::Client(e) => ApiError::new(ErrorCode::NetworkError, e.to_string()),
            AppError::Api(message) if message == inventory_api::NOT_FOUND => {
                ApiError::not_found(message)
            }
            AppError::Api(message) => ApiError::new(ErrorCode::Internal, message),
            AppError::NotFound(message) => ApiError::new(ErrorCode::NotFound, message),
            AppError::Payment(message) => ApiError::new(ErrorCode::PaymentError, message),
            AppError::Config(message) => ApiError::new(ErrorCode::ConfigError, message),
            AppError::Io(e) => {
                tracing::error!("I/O failed: {}", e);
                ApiError::internal("File operation failed")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        AppError::Core(err).into()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ThemeError> for ApiError {
    fn from(err: ThemeError) -> Self {
        AppError::from(err).into()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seller_error_serializes_with_code() {
        let api: ApiError = AppError::from(CoreError::SellerNotEnabled).into();
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["code"], "SELLER_SETUP_REQUIRED");
        assert_eq!(
            json["message"],
            "You need to complete seller onboarding before publishing listings."
        );
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = ValidationError::required("title", "Please enter a title");
        let api: ApiError = AppError::from(err).into();
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert_eq!(api.message, "Please enter a title");
    }

    #[test]
    fn test_storage_detail_is_hidden() {
        let api: ApiError = AppError::from(StoreError::Internal("disk /dev/sda1".into())).into();
        assert_eq!(api.code, ErrorCode::StorageError);
        assert!(!api.message.contains("sda1"));
    }
}
