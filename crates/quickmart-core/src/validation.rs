//! # Validation Module
//!
//! Input validation for operator-entered values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell (prompt loop)                                           │
//! │  └── Reads raw text, re-prompts on error                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Text → typed value (quantity, cash, product name)                  │
//! │  └── Sign and range rules                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory / Cart                                              │
//! │  └── Stock never negative, quantities never zero                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quickmart_core::validation::{parse_quantity, parse_cash};
//!
//! assert_eq!(parse_quantity("3").unwrap(), 3);
//! assert!(parse_quantity("0").is_err());
//! assert!(parse_cash("20.00").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name typed by the operator.
///
/// ## Rules
/// - Must not be empty after trimming
///
/// ## Returns
/// The trimmed name.
pub fn validate_product_name(name: &str) -> ValidationResult<&str> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "Product name".to_string(),
        });
    }

    Ok(name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a signed quantity and narrows it to a unit count.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must fit in a `u32`
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "Quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "Quantity".to_string(),
        min: 1,
        max: i64::from(u32::MAX),
    })
}

/// Parses a quantity typed by the operator.
///
/// ## User Workflow
/// ```text
/// Quantity: "abc" → InvalidFormat   ("Invalid quantity.")
/// Quantity: "0"   → MustBePositive  ("Quantity must be greater than 0.")
/// Quantity: "3"   → Ok(3)
/// ```
pub fn parse_quantity(text: &str) -> ValidationResult<u32> {
    let qty: i64 = text
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "Quantity".to_string(),
            reason: format!("'{}' is not a whole number", text.trim()),
        })?;

    validate_quantity(qty)
}

/// Highest catalog price, in whole dollars.
///
/// Keeps `price × quantity` and cart sums far inside the decimal range for
/// any stock count a `u32` can hold.
pub const MAX_PRICE_DOLLARS: i64 = 1_000_000;

/// Validates a catalog price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for free items)
/// - Must not exceed [`MAX_PRICE_DOLLARS`]
pub fn validate_price(price: Money) -> ValidationResult<Money> {
    if price.is_negative() || price > Money::from_cents(MAX_PRICE_DOLLARS * 100) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_DOLLARS,
        });
    }

    Ok(price)
}

/// Parses the cash amount tendered at checkout.
///
/// ## Rules
/// - Must be a decimal amount (a leading `$` is accepted)
/// - Must not be negative
///
/// Whether it covers the total is decided by the checkout, not here.
pub fn parse_cash(text: &str) -> ValidationResult<Money> {
    let cash = Money::parse(text).map_err(|_| ValidationError::InvalidFormat {
        field: "Cash".to_string(),
        reason: "please enter a number".to_string(),
    })?;

    if cash.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "Cash".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(cash)
}

// =============================================================================
// Unit Tests
// =============================================================================
