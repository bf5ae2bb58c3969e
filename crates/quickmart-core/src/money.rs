//! # Money Module
//!
//! Provides the `Money` type and the rounding policy every price computation
//! in the register goes through.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    15.00 × 0.065 = 0.9749999999999999  → rounds to $0.97  ❌ WRONG!     │
//! │                                                                         │
//! │  With exact decimals:                                                   │
//! │    15.00 × 0.065 = 0.975               → rounds to $0.98  ✅            │
//! │                                                                         │
//! │  OUR RULE: keep aggregates exact, round ONCE per aggregate              │
//! │    subtotal   = Σ unit × qty              (never rounded early)         │
//! │    tax        = round2(Σ taxable × rate)                                │
//! │    total      = round2(subtotal + tax)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quickmart_core::money::Money;
//!
//! let price = Money::from_cents(500); // $5.00
//! let line = price * 3;               // $15.00
//! assert_eq!(line.to_string(), "$15.00");
//! assert_eq!(Money::parse("$4.02").unwrap(), Money::from_cents(402));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::{LineItem, TaxClass, TaxRate};

/// Number of fractional digits used for display and persistence.
pub const DECIMAL_PLACES: u32 = 2;

// =============================================================================
// Rounding Policy
// =============================================================================

/// Rounds a decimal half-up (midpoint away from zero) to 2 places.
///
/// ```rust
/// use quickmart_core::money::round2;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round2(Decimal::new(975, 3)), Decimal::new(98, 2));   // 0.975 → 0.98
/// assert_eq!(round2(Decimal::new(-975, 3)), Decimal::new(-98, 2)); // away from zero
/// ```
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Tax over a set of line items.
///
/// Only `Taxable` lines contribute to the base. The base is summed exactly and
/// rounded once, after multiplying by `rate`.
pub fn tax_for<'a, I>(items: I, rate: TaxRate) -> Money
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let base: Money = items
        .into_iter()
        .filter(|item| item.tax_class == TaxClass::Taxable)
        .map(LineItem::line_total)
        .sum();
    base.calculate_tax(rate)
}

/// Grand total: `round2(subtotal + tax)`.
#[inline]
pub fn total(subtotal: Money, tax: Money) -> Money {
    (subtotal + tax).round2()
}

// =============================================================================
// Money Type
// =============================================================================

/// An exact monetary amount in dollars.
///
/// ## Design Decisions
/// - **Decimal, not f64**: every price, tax and change amount is exact
/// - **Unrounded inside**: rounding is explicit (`round2`) and happens at
///   aggregate boundaries, never implicitly on arithmetic
/// - **Display always shows 2 places**, rounded half-up
///
/// ```text
/// CatalogEntry.regular_price ──┬──► LineItem.unit_price ──► LineItem.line_total
///                              │
///                              └──► Inventory file "$5.00"
///
/// Cart.subtotal ──► tax_for ──► total ──► Checkout (cash, change) ──► Receipt
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use quickmart_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, DECIMAL_PLACES))
    }

    /// Wraps an exact decimal amount (no rounding applied).
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Parses an amount such as `5.00`, `$5.00` or ` $ 12.5 `.
    ///
    /// ## Errors
    /// `ValidationError::InvalidFormat` when the text is not a decimal number.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let cleaned = text.trim().trim_start_matches('$').trim();
        Decimal::from_str(cleaned)
            .map(Money)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: format!("'{}' is not a decimal amount", text.trim()),
            })
    }

    /// Returns the exact, unrounded amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Two-decimal amount without the currency sign, for aligned columns.
    ///
    /// ```rust
    /// use quickmart_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(500).format_plain(), "5.00");
    /// ```
    pub fn format_plain(&self) -> String {
        format!("{:.2}", round2(self.0))
    }

    /// Returns this amount rounded half-up to cents.
    #[inline]
    pub fn round2(&self) -> Self {
        Money(round2(self.0))
    }

    /// Zero dollars.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Calculates tax at `rate`, rounded once, half-up.
    ///
    /// ```rust
    /// use quickmart_core::money::Money;
    /// use quickmart_core::types::TaxRate;
    ///
    /// let base = Money::from_cents(1500);    // $15.00
    /// let rate = TaxRate::from_bps(650);     // 6.5%
    /// // $15.00 × 6.5% = $0.975 → $0.98
    /// assert_eq!(base.calculate_tax(rate), Money::from_cents(98));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(round2(self.0 * rate.as_decimal()))
    }

    /// Multiplies by a unit quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount rounded to cents: `$12.34`, `-$5.50`, `$0.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = round2(self.0);
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        write!(f, "{}${:.2}", sign, rounded.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a unit quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
