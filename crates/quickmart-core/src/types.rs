//! # Domain Types
//!
//! Core domain types used throughout the register.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   copied at add time   ┌─────────────────┐         │
//! │  │  CatalogEntry   │ ─────────────────────► │    LineItem     │         │
//! │  │  ─────────────  │                        │  ─────────────  │         │
//! │  │  name           │                        │  product_name   │         │
//! │  │  stock          │                        │  unit_price  ❄  │         │
//! │  │  regular_price  │                        │  tax_class   ❄  │         │
//! │  │  member_price   │                        │  quantity       │         │
//! │  │  tax_class      │                        │  catalog key    │         │
//! │  └─────────────────┘                        └─────────────────┘         │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    TaxRate      │   │    TaxClass     │   │  CustomerType   │        │
//! │  │  0.065 = 6.5%   │   │  Taxable        │   │  Regular        │        │
//! │  │                 │   │  Exempt         │   │  Member         │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  ❄ = frozen when the line is created                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Catalog Keys
//! Product names are the identity. Lookups are case-insensitive, so every
//! lookup goes through [`catalog_key`], while the original casing is kept for
//! display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

/// Normalizes a product name into its case-insensitive lookup key.
#[inline]
pub fn catalog_key(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Sales tax rate as an exact fraction (`0.065` = 6.5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Creates a tax rate from basis points (650 = 6.5%).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(Decimal::new(i64::from(bps), 4))
    }

    /// Creates a tax rate from a fraction, rejecting values outside `[0, 1]`.
    pub fn from_decimal(rate: Decimal) -> Result<Self, ValidationError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(ValidationError::InvalidFormat {
                field: "tax_rate".to_string(),
                reason: format!("{} is not between 0 and 1", rate),
            });
        }
        Ok(TaxRate(rate))
    }

    /// Parses `0.065` or `6.5%`.
    ///
    /// ```rust
    /// use quickmart_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::parse("0.065").unwrap(), TaxRate::from_bps(650));
    /// assert_eq!(TaxRate::parse("6.5%").unwrap(), TaxRate::from_bps(650));
    /// assert!(TaxRate::parse("150%").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        let invalid = || ValidationError::InvalidFormat {
            field: "tax_rate".to_string(),
            reason: format!("'{}' is not a tax rate", text),
        };

        match text.strip_suffix('%') {
            Some(pct) => {
                let pct = Decimal::from_str(pct.trim()).map_err(|_| invalid())?;
                TaxRate::from_decimal(pct / Decimal::ONE_HUNDRED)
            }
            None => TaxRate::from_decimal(Decimal::from_str(text).map_err(|_| invalid())?),
        }
    }

    /// Returns the exact fraction.
    #[inline]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Rate as a percentage with one fractional digit, as printed on receipts.
    ///
    /// ```rust
    /// use quickmart_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::from_bps(650).percentage_display(), "6.5");
    /// assert_eq!(TaxRate::from_bps(825).percentage_display(), "8.3");
    /// ```
    pub fn percentage_display(&self) -> String {
        let pct = (self.0 * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        format!("{:.1}", pct)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage_display())
    }
}

// =============================================================================
// Tax Class
// =============================================================================

/// Whether a product's line total counts toward the tax base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxClass {
    Taxable,
    Exempt,
}

impl TaxClass {
    /// Label used in the inventory file.
    pub const fn label(&self) -> &'static str {
        match self {
            TaxClass::Taxable => "Taxable",
            TaxClass::Exempt => "Tax-Exempt",
        }
    }

    /// Reads an inventory file label.
    ///
    /// Any label containing "taxable" (case-insensitive) is taxable; every
    /// other label is exempt.
    pub fn from_label(label: &str) -> Self {
        if label.to_lowercase().contains("taxable") {
            TaxClass::Taxable
        } else {
            TaxClass::Exempt
        }
    }
}

impl fmt::Display for TaxClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxClass::Taxable => f.write_str("TAXABLE"),
            TaxClass::Exempt => f.write_str("EXEMPT"),
        }
    }
}

// =============================================================================
// Customer Type
// =============================================================================

/// Price tier chosen once at the start of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    #[default]
    Regular,
    Member,
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerType::Regular => f.write_str("REGULAR"),
            CustomerType::Member => f.write_str("MEMBER"),
        }
    }
}

// =============================================================================
// Catalog Entry
// =============================================================================

/// One inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name, original casing.
    pub name: String,

    /// Units on hand. Never negative.
    pub stock: u32,

    /// Price charged to regular customers.
    pub regular_price: Money,

    /// Price charged to members.
    pub member_price: Money,

    pub tax_class: TaxClass,
}

impl CatalogEntry {
    pub fn new(
        name: impl Into<String>,
        stock: u32,
        regular_price: Money,
        member_price: Money,
        tax_class: TaxClass,
    ) -> Self {
        CatalogEntry {
            name: name.into(),
            stock,
            regular_price,
            member_price,
            tax_class,
        }
    }

    /// Lookup key for this entry.
    #[inline]
    pub fn key(&self) -> String {
        catalog_key(&self.name)
    }

    /// Price for the given customer tier.
    pub fn price_for(&self, customer: CustomerType) -> Money {
        match customer {
            CustomerType::Member => self.member_price,
            CustomerType::Regular => self.regular_price,
        }
    }

    /// Per-unit member discount (`regular - member`).
    #[inline]
    pub fn member_discount(&self) -> Money {
        self.regular_price - self.member_price
    }

    /// Checks if `quantity` units can be taken from stock.
    #[inline]
    pub fn can_sell(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A line in the cart.
///
/// Uses the snapshot pattern: unit price and tax class are frozen when the
/// line is created. Later adds of the same product only touch `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name at time of adding (frozen).
    pub product_name: String,

    /// Unit price for the active tier at time of adding (frozen).
    pub unit_price: Money,

    /// Tax class at time of adding (frozen).
    pub tax_class: TaxClass,

    /// Units in the cart. Always > 0 while the line exists.
    pub quantity: u32,

    /// Key of the originating catalog entry, used only to look up live
    /// prices for member savings.
    pub catalog_key: String,
}

impl LineItem {
    /// Creates a line from a catalog entry, freezing the tier price.
    pub fn from_entry(entry: &CatalogEntry, customer: CustomerType, quantity: u32) -> Self {
        LineItem {
            product_name: entry.name.clone(),
            unit_price: entry.price_for(customer),
            tax_class: entry.tax_class,
            quantity,
            catalog_key: entry.key(),
        }
    }

    /// Unit price × quantity, unrounded.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
