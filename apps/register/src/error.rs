//! # API Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Register                           │
//! │                                                                         │
//! │  Shell                       Commands                                   │
//! │  ─────                       ────────                                   │
//! │                                                                         │
//! │  "2 - Add to cart"                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  File Error? ─── StoreError::Write { .. } ─────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule broken? ─── CoreError::InsufficientStock ── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Shell prints error.message and returns to the menu. Every code is     │
//! │  recoverable: the operator retries or picks another option.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use quickmart_core::{CoreError, ValidationError};
use quickmart_store::StoreError;
use serde::Serialize;

use crate::state::ConfigError;

/// Error returned from register commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product not in the inventory
    NotFound,

    /// Operator input failed validation
    ValidationError,

    /// Not enough units on hand
    InsufficientStock,

    /// Cash tendered below the total
    InsufficientCash,

    /// Cart operation failed (empty cart, item not in cart)
    CartError,

    /// Inventory or receipt file could not be written
    PersistenceFailure,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts store errors to API errors.
///
/// All of them mean the checkout (or start-up) could not touch its files.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Persistence failure");
        ApiError::new(ErrorCode::PersistenceFailure, err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(name) => ApiError::not_found("Product", &name),
            CoreError::NotInCart(name) => ApiError::cart(format!("Item not in cart: {}", name)),
            CoreError::InsufficientStock { available, .. } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!("Insufficient stock. Available: {}", available),
            ),
            CoreError::InsufficientCash { total, tendered } => ApiError::new(
                ErrorCode::InsufficientCash,
                format!(
                    "Not enough cash provided: total {}, tendered {}",
                    total, tendered
                ),
            ),
            CoreError::EmptyCart => ApiError::cart("Cart is empty"),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts input validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts configuration errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for register commands.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use quickmart_core::Money;
    use std::io;

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::ProductNotFound("Gadget".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: Gadget");

        let err: ApiError = CoreError::InsufficientStock {
            product: "Widget".to_string(),
            available: 3,
            requested: 5,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.message, "Insufficient stock. Available: 3");

        let err: ApiError = CoreError::InsufficientCash {
            total: Money::from_cents(1598),
            tendered: Money::from_cents(1500),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientCash);

        let err: ApiError = CoreError::from(ValidationError::MustBePositive {
            field: "Quantity".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Quantity must be greater than 0");
    }

    #[test]
    fn test_store_error_is_persistence_failure() {
        let err: ApiError = StoreError::write(
            "inventory.txt",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        )
        .into();
        assert_eq!(err.code, ErrorCode::PersistenceFailure);
        assert!(err.message.contains("disk full"));
    }

    #[test]
    fn test_display() {
        let err = ApiError::cart("Cart is empty");
        assert_eq!(err.to_string(), "[CartError] Cart is empty");
    }
}
