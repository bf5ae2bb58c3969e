//! # Cart
//!
//! The shopping cart for one customer transaction.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action          Cart Method              Line Change          │
//! │  ───────────────          ───────────              ───────────          │
//! │                                                                         │
//! │  Add to cart ───────────► add_item() ────────────► push / qty += n      │
//! │                                                                         │
//! │  Remove n units ────────► remove_quantity() ─────► qty -= n / remove    │
//! │                                                                         │
//! │  Remove one unit ───────► decrement_item() ──────► qty -= 1 / remove    │
//! │                                                                         │
//! │  Remove all ────────────► remove_item() ─────────► remove               │
//! │                                                                         │
//! │  Empty cart ────────────► clear() ───────────────► (no lines)           │
//! │                                                                         │
//! │  INVARIANT: a line exists only while its quantity is > 0               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are kept in insertion order and keyed by the lowercase product name.

use serde::Serialize;

use crate::inventory::Inventory;
use crate::money::{self, Money};
use crate::types::{catalog_key, CatalogEntry, CustomerType, LineItem, TaxRate};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by catalog key (adding the same product increases quantity)
/// - Quantity is always > 0; reaching zero removes the line
/// - Unit price and tax class are never re-snapshotted after the line exists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds `quantity` units of a product.
    ///
    /// ## Behavior
    /// - `quantity == 0`: no-op
    /// - Product already in cart: quantity increases, price stays as first
    ///   snapshotted (mixing tiers mid-cart never reprices added units)
    /// - Product not in cart: new line with the tier price frozen
    pub fn add_item(&mut self, entry: &CatalogEntry, quantity: u32, customer: CustomerType) {
        if quantity == 0 {
            return;
        }

        let key = entry.key();
        match self.items.iter_mut().find(|i| i.catalog_key == key) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self
                .items
                .push(LineItem::from_entry(entry, customer, quantity)),
        }
    }

    /// Removes a line entirely. Returns `true` if it existed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let key = catalog_key(name);
        let initial_len = self.items.len();
        self.items.retain(|i| i.catalog_key != key);
        self.items.len() != initial_len
    }

    /// Removes one unit; the line is removed when its last unit goes.
    /// Returns `true` if the item existed.
    pub fn decrement_item(&mut self, name: &str) -> bool {
        self.remove_quantity(name, 1).is_some()
    }

    /// Removes `quantity` units of a line.
    ///
    /// ## Returns
    /// - `None` if the product is not in the cart
    /// - `Some(remaining)`, where `0` means the line was removed
    ///
    /// Removing zero units leaves the line untouched.
    pub fn remove_quantity(&mut self, name: &str, quantity: u32) -> Option<u32> {
        let key = catalog_key(name);
        let index = self.items.iter().position(|i| i.catalog_key == key)?;

        let item = &mut self.items[index];
        if quantity >= item.quantity {
            self.items.remove(index);
            return Some(0);
        }

        item.quantity -= quantity;
        Some(item.quantity)
    }

    /// Looks up a line by product name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&LineItem> {
        let key = catalog_key(name);
        self.items.iter().find(|i| i.catalog_key == key)
    }

    /// Drops all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals, unrounded.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Tax on taxable lines, rounded once.
    pub fn tax(&self, rate: TaxRate) -> Money {
        money::tax_for(&self.items, rate)
    }

    /// Grand total (subtotal + tax), rounded.
    pub fn total(&self, rate: TaxRate) -> Money {
        money::total(self.subtotal(), self.tax(rate))
    }

    /// Member savings against live catalog prices.
    ///
    /// Zero for regular customers. For members, the sum over lines of
    /// `(regular - member) × quantity` using the catalog entry's *current*
    /// prices, not the frozen unit price. Lines whose product is no longer in
    /// the catalog contribute nothing.
    pub fn savings(&self, customer: CustomerType, catalog: &Inventory) -> Money {
        if customer != CustomerType::Member {
            return Money::zero();
        }

        self.items
            .iter()
            .filter_map(|item| {
                catalog
                    .find(&item.catalog_key)
                    .map(|entry| entry.member_discount() * item.quantity)
            })
            .sum()
    }
}

/// Aggregates of a cart at one tax rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_units: u64,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub savings: Money,
}

impl CartTotals {
    /// Computes every aggregate in one pass over the public API.
    pub fn compute(
        cart: &Cart,
        rate: TaxRate,
        customer: CustomerType,
        catalog: &Inventory,
    ) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_units: cart.total_units(),
            subtotal: cart.subtotal(),
            tax: cart.tax(rate),
            total: cart.total(rate),
            savings: cart.savings(customer, catalog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxClass;

    fn widget() -> CatalogEntry {
        CatalogEntry::new(
            "Widget",
            10,
            Money::from_cents(500),
            Money::from_cents(400),
            TaxClass::Taxable,
        )
    }

    fn milk() -> CatalogEntry {
        CatalogEntry::new(
            "Milk",
            24,
            Money::from_cents(349),
            Money::from_cents(319),
            TaxClass::Exempt,
        )
    }

    fn rate() -> TaxRate {
        TaxRate::from_bps(650)
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        cart.add_item(&widget(), 3, CustomerType::Regular);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_units(), 3);
        assert_eq!(cart.subtotal(), Money::from_cents(1500));
    }

    #[test]
    fn test_cart_large_quantities_do_not_overflow() {
        let mut plenty = widget();
        plenty.stock = u32::MAX;
        let mut bulk_milk = milk();
        bulk_milk.stock = u32::MAX;

        let mut cart = Cart::new();
        cart.add_item(&plenty, u32::MAX, CustomerType::Regular);
        cart.add_item(&plenty, 5, CustomerType::Regular);
        cart.add_item(&bulk_milk, u32::MAX, CustomerType::Regular);

        assert_eq!(cart.find("Widget").unwrap().quantity, u32::MAX);
        assert_eq!(cart.total_units(), 2 * u64::from(u32::MAX));
        assert!(cart.total(rate()).is_positive());
    }

    #[test]
    fn test_cart_add_zero_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&widget(), 0, CustomerType::Regular);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_add_same_product_keeps_first_price() {
        let mut cart = Cart::new();
        let entry = widget();

        cart.add_item(&entry, 2, CustomerType::Member);
        cart.add_item(&entry, 3, CustomerType::Regular);

        assert_eq!(cart.line_count(), 1);
        let line = &cart.items()[0];
        assert_eq!(line.quantity, 5);
        assert_eq!(line.unit_price, Money::from_cents(400));
    }

    #[test]
    fn test_cart_keys_are_case_insensitive() {
        let mut cart = Cart::new();
        let mut shouty = widget();
        shouty.name = "WIDGET".to_string();

        cart.add_item(&widget(), 1, CustomerType::Regular);
        cart.add_item(&shouty, 1, CustomerType::Regular);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.find("wIdGeT").map(|i| i.quantity), Some(2));
        assert_eq!(cart.items()[0].product_name, "Widget");
    }

    #[test]
    fn test_cart_items_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&milk(), 1, CustomerType::Regular);
        cart.add_item(&widget(), 1, CustomerType::Regular);
        cart.add_item(&milk(), 1, CustomerType::Regular);

        let names: Vec<&str> = cart.items().iter().map(|i| i.product_name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Widget"]);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(&widget(), 2, CustomerType::Regular);

        assert!(cart.remove_item("widget"));
        assert!(!cart.remove_item("widget"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_item_removes_last_unit() {
        let mut cart = Cart::new();
        cart.add_item(&widget(), 2, CustomerType::Regular);

        assert!(cart.decrement_item("Widget"));
        assert_eq!(cart.find("Widget").map(|i| i.quantity), Some(1));

        assert!(cart.decrement_item("Widget"));
        assert!(cart.find("Widget").is_none());

        // Second call on the now-absent line reports not found, cart unharmed
        assert!(!cart.decrement_item("Widget"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&widget(), 5, CustomerType::Regular);

        assert_eq!(cart.remove_quantity("Widget", 2), Some(3));
        assert_eq!(cart.remove_quantity("Widget", 0), Some(3));
        assert_eq!(cart.remove_quantity("Widget", 10), Some(0));
        assert_eq!(cart.remove_quantity("Widget", 1), None);
    }

    #[test]
    fn test_quantities_stay_positive_through_mixed_operations() {
        let mut cart = Cart::new();
        let ops: [(&str, u32); 8] = [
            ("add", 3),
            ("dec", 0),
            ("sub", 1),
            ("add", 1),
            ("dec", 0),
            ("dec", 0),
            ("sub", 7),
            ("dec", 0),
        ];

        for (op, n) in ops {
            match op {
                "add" => cart.add_item(&widget(), n, CustomerType::Regular),
                "dec" => {
                    cart.decrement_item("widget");
                }
                _ => {
                    cart.remove_quantity("widget", n);
                }
            }
            assert!(cart.items().iter().all(|i| i.quantity > 0));
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add_item(&widget(), 2, CustomerType::Regular);
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_cart_tax_calculation() {
        let mut cart = Cart::new();
        cart.add_item(&widget(), 3, CustomerType::Regular);

        // $15.00 × 6.5% = $0.975 → $0.98
        assert_eq!(cart.tax(rate()), Money::from_cents(98));
        assert_eq!(cart.total(rate()), Money::from_cents(1598));
    }

    #[test]
    fn test_exempt_lines_never_change_tax() {
        let mut cart = Cart::new();
        cart.add_item(&widget(), 3, CustomerType::Regular);
        let before = cart.tax(rate());

        cart.add_item(&milk(), 7, CustomerType::Regular);
        assert_eq!(cart.tax(rate()), before);

        cart.remove_quantity("milk", 4);
        assert_eq!(cart.tax(rate()), before);
        assert_eq!(cart.subtotal(), Money::from_cents(1500 + 3 * 349));
    }

    #[test]
    fn test_subtotal_independent_of_order() {
        let mut a = Cart::new();
        a.add_item(&widget(), 3, CustomerType::Regular);
        a.add_item(&milk(), 2, CustomerType::Regular);

        let mut b = Cart::new();
        b.add_item(&milk(), 2, CustomerType::Regular);
        b.add_item(&widget(), 3, CustomerType::Regular);

        assert_eq!(a.subtotal(), b.subtotal());
        assert_eq!(a.total(rate()), b.total(rate()));
    }

    #[test]
    fn test_savings_regular_is_zero() {
        let catalog = Inventory::from_entries([widget()]);
        let mut cart = Cart::new();
        cart.add_item(&widget(), 3, CustomerType::Regular);

        assert_eq!(cart.savings(CustomerType::Regular, &catalog), Money::zero());
    }

    #[test]
    fn test_savings_member_uses_live_prices() {
        let mut catalog = Inventory::from_entries([widget()]);
        let mut cart = Cart::new();
        cart.add_item(&widget(), 3, CustomerType::Member);

        assert_eq!(cart.items()[0].unit_price, Money::from_cents(400));
        assert_eq!(
            cart.savings(CustomerType::Member, &catalog),
            Money::from_cents(300)
        );

        let mut repriced = widget();
        repriced.regular_price = Money::from_cents(600);
        catalog.upsert(repriced);

        assert_eq!(
            cart.savings(CustomerType::Member, &catalog),
            Money::from_cents(600)
        );
        assert_eq!(cart.subtotal(), Money::from_cents(1200));
    }

    #[test]
    fn test_savings_skips_products_missing_from_catalog() {
        let catalog = Inventory::from_entries([milk()]);
        let mut cart = Cart::new();
        cart.add_item(&widget(), 3, CustomerType::Member);
        cart.add_item(&milk(), 1, CustomerType::Member);

        assert_eq!(
            cart.savings(CustomerType::Member, &catalog),
            Money::from_cents(30)
        );
    }

    #[test]
    fn test_cart_totals() {
        let catalog = Inventory::from_entries([widget()]);
        let mut cart = Cart::new();
        cart.add_item(&widget(), 3, CustomerType::Member);

        let totals = CartTotals::compute(&cart, rate(), CustomerType::Member, &catalog);
        assert_eq!(totals.total_units, 3);
        assert_eq!(totals.subtotal, Money::from_cents(1200));
        // $12.00 × 6.5% = $0.78
        assert_eq!(totals.tax, Money::from_cents(78));
        assert_eq!(totals.total, Money::from_cents(1278));
        assert_eq!(totals.savings, Money::from_cents(300));
    }
}
