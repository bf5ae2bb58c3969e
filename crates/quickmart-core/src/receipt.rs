//! # Receipt
//!
//! The immutable record of one completed checkout and its text rendering.
//!
//! ## Layout
//! ```text
//! October 17, 2026
//! TRANSACTION: 000008
//!
//! ITEM                 QTY        UNIT PRICE   TOTAL
//! Widget               3          $5.00        $15.00
//! ************************
//! TOTAL NUMBER OF ITEMS SOLD: 3
//! SUB-TOTAL: $15.00
//! TAX (6.5%): $0.98
//! TOTAL: $15.98
//! CASH: $20.00
//! CHANGE: $4.02
//! ************************
//!
//! YOU SAVED: $3.00!            ← members with positive savings only
//! ```
//!
//! Rendering is pure: the timestamp is handed in by the caller, so the same
//! receipt always renders to the same bytes.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::cart::Cart;
use crate::inventory::Inventory;
use crate::money::{self, Money};
use crate::types::{CustomerType, LineItem, TaxRate};

/// Largest id the 6-digit receipt file name can carry.
pub const MAX_TRANSACTION_NUMBER: u64 = 999_999;

/// Separator printed around the totals block.
const RULE: &str = "************************";

/// Date line at the top of the receipt (`October 17, 2026`).
const DATE_FORMAT: &str = "%B %-d, %Y";

/// Timestamp part of the receipt file name (`20261017_143005`).
const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A finalized sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub tx_number: u64,
    pub timestamp: NaiveDateTime,
    pub lines: Vec<LineItem>,
    pub total_units: u64,
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
    /// Cash tendered, rounded to cents.
    pub cash: Money,
    pub change: Money,
    /// Member savings; zero for regular customers.
    pub savings: Money,
}

impl Receipt {
    /// Builds the receipt for `cart` paid with `cash`.
    ///
    /// Change is `round2(cash) - total`. Sufficiency of `cash` is the
    /// caller's concern.
    pub fn for_cart(
        tx_number: u64,
        timestamp: NaiveDateTime,
        cart: &Cart,
        tax_rate: TaxRate,
        customer: CustomerType,
        catalog: &Inventory,
        cash: Money,
    ) -> Self {
        let subtotal = cart.subtotal();
        let tax = cart.tax(tax_rate);
        let total = money::total(subtotal, tax);
        let cash = cash.round2();

        Receipt {
            tx_number,
            timestamp,
            lines: cart.items().to_vec(),
            total_units: cart.total_units(),
            subtotal,
            tax_rate,
            tax,
            total,
            cash,
            change: cash - total,
            savings: cart.savings(customer, catalog),
        }
    }

    /// Zero-padded 6-digit transaction id.
    pub fn tx_id(&self) -> String {
        format!("{:06}", self.tx_number)
    }

    /// `tx_<id>_<yyyyMMdd_HHmmss>.txt`
    pub fn file_name(&self) -> String {
        format!(
            "tx_{}_{}.txt",
            self.tx_id(),
            self.timestamp.format(FILE_TIMESTAMP_FORMAT)
        )
    }

    /// Renders the receipt text, one `\n`-terminated line per row.
    pub fn render(&self) -> String {
        let mut rows = vec![
            self.timestamp.format(DATE_FORMAT).to_string(),
            format!("TRANSACTION: {}", self.tx_id()),
            String::new(),
            trim_row(&format!(
                "{:<20} {:<10} {:<12} {:<10}",
                "ITEM", "QTY", "UNIT PRICE", "TOTAL"
            )),
        ];

        for line in &self.lines {
            rows.push(trim_row(&format!(
                "{:<20} {:<10} ${:<11} ${:<10}",
                line.product_name,
                line.quantity,
                line.unit_price.format_plain(),
                line.line_total().format_plain()
            )));
        }

        rows.push(RULE.to_string());
        rows.push(format!("TOTAL NUMBER OF ITEMS SOLD: {}", self.total_units));
        rows.push(format!("SUB-TOTAL: {}", self.subtotal));
        rows.push(format!(
            "TAX ({}%): {}",
            self.tax_rate.percentage_display(),
            self.tax
        ));
        rows.push(format!("TOTAL: {}", self.total));
        rows.push(format!("CASH: {}", self.cash));
        rows.push(format!("CHANGE: {}", self.change));
        rows.push(RULE.to_string());

        if self.savings.is_positive() {
            rows.push(String::new());
            rows.push(format!("YOU SAVED: {}!", self.savings));
        }

        rows.into_iter().map(|row| row + "\n").collect()
    }
}

fn trim_row(row: &str) -> String {
    row.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogEntry, TaxClass};
    use chrono::NaiveDate;

    fn widget() -> CatalogEntry {
        CatalogEntry::new(
            "Widget",
            10,
            Money::from_cents(500),
            Money::from_cents(400),
            TaxClass::Taxable,
        )
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 7)
            .and_then(|d| d.and_hms_opt(9, 5, 3))
            .unwrap()
    }

    fn sale(customer: CustomerType) -> Receipt {
        let catalog = Inventory::from_entries([widget()]);
        let mut cart = Cart::new();
        cart.add_item(&widget(), 3, customer);
        Receipt::for_cart(
            8,
            at(),
            &cart,
            TaxRate::from_bps(650),
            customer,
            &catalog,
            Money::from_cents(2000),
        )
    }

    #[test]
    fn test_regular_totals() {
        let receipt = sale(CustomerType::Regular);

        assert_eq!(receipt.subtotal, Money::from_cents(1500));
        assert_eq!(receipt.tax, Money::from_cents(98));
        assert_eq!(receipt.total, Money::from_cents(1598));
        assert_eq!(receipt.change, Money::from_cents(402));
        assert_eq!(receipt.savings, Money::zero());
    }

    #[test]
    fn test_file_name() {
        let receipt = sale(CustomerType::Regular);
        assert_eq!(receipt.file_name(), "tx_000008_20261007_090503.txt");
    }

    #[test]
    fn test_render_regular() {
        let expected = "\
October 7, 2026
TRANSACTION: 000008

ITEM                 QTY        UNIT PRICE   TOTAL
Widget               3          $5.00        $15.00
************************
TOTAL NUMBER OF ITEMS SOLD: 3
SUB-TOTAL: $15.00
TAX (6.5%): $0.98
TOTAL: $15.98
CASH: $20.00
CHANGE: $4.02
************************
";
        assert_eq!(sale(CustomerType::Regular).render(), expected);
    }

    #[test]
    fn test_render_member_reports_savings() {
        let receipt = sale(CustomerType::Member);

        assert_eq!(receipt.subtotal, Money::from_cents(1200));
        assert_eq!(receipt.savings, Money::from_cents(300));

        let text = receipt.render();
        assert!(text.contains("Widget               3          $4.00        $12.00\n"));
        assert!(text.ends_with("************************\n\nYOU SAVED: $3.00!\n"));
    }

    #[test]
    fn test_cash_is_rounded_before_change() {
        let catalog = Inventory::from_entries([widget()]);
        let mut cart = Cart::new();
        cart.add_item(&widget(), 1, CustomerType::Regular);

        let cash = Money::parse("10.005").unwrap();
        let receipt = Receipt::for_cart(
            1,
            at(),
            &cart,
            TaxRate::from_bps(650),
            CustomerType::Regular,
            &catalog,
            cash,
        );

        // 5.00 + 0.325 → 5.33; 10.01 - 5.33 = 4.68
        assert_eq!(receipt.cash, Money::from_cents(1001));
        assert_eq!(receipt.change, Money::from_cents(468));
    }

    #[test]
    fn test_long_names_are_not_truncated() {
        let long = CatalogEntry::new(
            "Extra Large Family Size Cereal",
            5,
            Money::from_cents(799),
            Money::from_cents(699),
            TaxClass::Exempt,
        );
        let catalog = Inventory::from_entries([long.clone()]);
        let mut cart = Cart::new();
        cart.add_item(&long, 1, CustomerType::Regular);

        let receipt = Receipt::for_cart(
            1,
            at(),
            &cart,
            TaxRate::from_bps(650),
            CustomerType::Regular,
            &catalog,
            Money::from_cents(1000),
        );

        assert!(receipt
            .render()
            .contains("Extra Large Family Size Cereal 1          $7.99        $7.99\n"));
        assert!(receipt.render().contains("TAX (6.5%): $0.00\n"));
    }
}
