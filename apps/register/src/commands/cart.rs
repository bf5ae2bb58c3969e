//! Cart commands: add, view, remove/adjust, empty.

use std::str::FromStr;

use quickmart_core::validation::{parse_quantity, validate_product_name, validate_quantity};
use quickmart_core::{
    CartTotals, CoreError, CustomerType, LineItem, Money, TaxRate, ValidationError,
};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::RegisterState;

/// Cart contents with totals at the configured tax rate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub customer: CustomerType,
    pub items: Vec<LineItem>,
    pub tax_rate: TaxRate,
    pub totals: CartTotals,
}

impl From<&RegisterState> for CartView {
    fn from(state: &RegisterState) -> Self {
        CartView {
            customer: state.customer(),
            items: state.cart().items().to_vec(),
            tax_rate: state.tax_rate(),
            totals: CartTotals::compute(
                state.cart(),
                state.tax_rate(),
                state.customer(),
                state.inventory(),
            ),
        }
    }
}

/// Result of a successful add.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedItem {
    pub product_name: String,
    pub quantity: u32,
    /// Tier price of the product right now.
    pub unit_price: Money,
    /// Units of this product now in the cart.
    pub in_cart: u32,
}

/// How much of a line to take out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveQuantity {
    All,
    Units(u32),
}

impl FromStr for RemoveQuantity {
    type Err = ValidationError;

    /// `all` (any case) or a positive whole number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(RemoveQuantity::All);
        }
        parse_quantity(s).map(RemoveQuantity::Units)
    }
}

/// Result of a removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Removal {
    pub product_name: String,
    pub removed: u32,
    /// Units left in the cart; 0 means the line is gone.
    pub remaining: u32,
}

/// Gets the current cart contents.
pub fn view_cart(state: &RegisterState) -> CartView {
    debug!("view_cart command");
    CartView::from(state)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Product looked up case-insensitively; unknown names are `NotFound`
/// - Quantity must be > 0
/// - Units already in the cart count against stock, so the cart can never
///   hold more than the inventory has
/// - Price is frozen at the tier price when the line is first created
pub fn add_to_cart(state: &mut RegisterState, name: &str, quantity: i64) -> ApiResult<AddedItem> {
    debug!(name = %name, quantity, "add_to_cart command");

    let name = validate_product_name(name)?;
    let entry = state
        .inventory
        .find(name)
        .cloned()
        .ok_or_else(|| CoreError::ProductNotFound(name.to_string()))?;
    let quantity = validate_quantity(quantity)?;

    let already = state.cart().find(name).map_or(0, |line| line.quantity);
    if !entry.can_sell(already.saturating_add(quantity)) {
        return Err(CoreError::InsufficientStock {
            product: entry.name.clone(),
            available: entry.stock.saturating_sub(already),
            requested: i64::from(quantity),
        }
        .into());
    }

    let customer = state.customer();
    state.session.cart_mut().add_item(&entry, quantity, customer);

    Ok(AddedItem {
        product_name: entry.name.clone(),
        quantity,
        unit_price: entry.price_for(customer),
        in_cart: already + quantity,
    })
}

/// Removes units of a cart line, or the whole line with [`RemoveQuantity::All`].
///
/// Removing zero units is a `ValidationError`.
pub fn remove_from_cart(
    state: &mut RegisterState,
    name: &str,
    quantity: RemoveQuantity,
) -> ApiResult<Removal> {
    debug!(name = %name, ?quantity, "remove_from_cart command");

    if quantity == RemoveQuantity::Units(0) {
        return Err(ValidationError::MustBePositive {
            field: "Quantity".to_string(),
        }
        .into());
    }

    let (product_name, current) = cart_line(state, name)?;
    let cart = state.session.cart_mut();

    let remaining = match quantity {
        RemoveQuantity::All => {
            cart.remove_item(name);
            0
        }
        RemoveQuantity::Units(n) => cart
            .remove_quantity(name, n)
            .ok_or_else(|| CoreError::NotInCart(name.to_string()))?,
    };

    Ok(Removal {
        product_name,
        removed: current - remaining,
        remaining,
    })
}

/// Takes one unit off a cart line; the last unit removes the line.
pub fn decrement_cart_item(state: &mut RegisterState, name: &str) -> ApiResult<Removal> {
    debug!(name = %name, "decrement_cart_item command");

    let (product_name, current) = cart_line(state, name)?;
    if !state.session.cart_mut().decrement_item(name) {
        return Err(CoreError::NotInCart(name.to_string()).into());
    }

    Ok(Removal {
        product_name,
        removed: 1,
        remaining: current - 1,
    })
}

/// Empties the cart. Returns how many lines were dropped.
pub fn clear_cart(state: &mut RegisterState) -> usize {
    debug!("clear_cart command");

    let cart = state.session.cart_mut();
    let lines = cart.line_count();
    cart.clear();
    lines
}

/// Display name and quantity of a cart line.
fn cart_line(state: &RegisterState, name: &str) -> ApiResult<(String, u32)> {
    let name = validate_product_name(name)?;
    state
        .cart()
        .find(name)
        .map(|line| (line.product_name.clone(), line.quantity))
        .ok_or_else(|| CoreError::NotInCart(name.to_string()).into())
}
