//! # Error Types
//!
//! Domain-specific error types for microshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  microshop-core (this file)                                            │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Form input failures (user-facing text)         │
//! │  └── ThemeError       - Malformed colour strings                       │
//! │                                                                         │
//! │  microshop-store    └── StoreError  - Local storage failures           │
//! │  microshop-client   └── ClientError - HTTP failures                    │
//! │  apps/microshop     └── AppError → ApiError (serialized)               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → ApiError → Screen      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation messages are shown to the user verbatim, so their `Display`
//! output is the exact alert text of the form that raised them.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Listing cannot be found (by id or public slug).
    #[error("Inventory not found")]
    InventoryNotFound,

    /// Listing exists but is not in a state that allows the operation.
    ///
    /// ## When This Occurs
    /// - Buying a listing that is still a draft or already sold out
    /// - Requesting more units than `quantityAvailable`
    #[error("{reason}")]
    NotPurchasable { reason: String },

    /// Seller has not finished payment onboarding.
    #[error("You need to complete seller onboarding before publishing listings.")]
    SellerNotEnabled,

    /// An operation that needs a signed-in user ran while signed out.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Quantity exceeds what a single line may hold.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Theme error (wraps ThemeError).
    #[error("{0}")]
    Theme(#[from] ThemeError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// `Required` and `Invalid` carry the message the form shows; the remaining
/// variants build theirs from the field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{message}")]
    Required { field: String, message: String },

    /// Field is present but malformed.
    #[error("{message}")]
    Invalid { field: String, message: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

impl ValidationError {
    /// Shorthand for a [`ValidationError::Required`].
    pub fn required(field: &str, message: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Shorthand for a [`ValidationError::Invalid`].
    pub fn invalid(field: &str, message: &str) -> Self {
        ValidationError::Invalid {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// The form field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field, .. }
            | ValidationError::Invalid { field, .. }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. } => field,
        }
    }
}

// =============================================================================
// Theme Error
// =============================================================================

/// Colour parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    /// Input is not `#rrggbb` / `rrggbb`.
    #[error("Invalid hex colour '{0}': expected six hex digits")]
    InvalidHex(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
