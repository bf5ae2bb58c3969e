//! # Inventory Line Codec
//!
//! Text format of the inventory file, one product per line:
//!
//! ```text
//! # comment lines and blank lines are ignored
//! Widget: 10, $5.00, $4.00, Taxable
//! Milk: 24, $3.49, $3.19, Tax-Exempt
//! ```
//!
//! ## Leniency
//! A line that cannot be read is dropped and reported, never raised:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw line ──► trim ──► blank / "#"? ──yes──► ignored (not a skip)       │
//! │                            │no                                          │
//! │                            ▼                                            │
//! │               split ":" → exactly 2 parts? ──no──► Skip                 │
//! │                            │                                            │
//! │               split "," → exactly 4 fields? ──no──► Skip                │
//! │                            │                                            │
//! │               qty u32, prices ≥ 0 decimals? ──no──► Skip                │
//! │                            │                                            │
//! │                            ▼                                            │
//! │                      CatalogEntry                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering is the inverse for well-formed entries: prices always carry a
//! `$` and two decimals, tax labels are `Taxable` or `Tax-Exempt`. Comments
//! are not preserved.

use std::fmt;

use crate::inventory::Inventory;
use crate::money::Money;
use crate::types::{CatalogEntry, TaxClass};
use crate::validation::validate_price;

/// Why a line was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The line does not split into a name and one remainder on `:`.
    NameSeparator,
    /// The remainder does not have exactly 4 comma-separated fields.
    FieldCount(usize),
    /// Nothing before the `:`.
    EmptyName,
    /// Quantity is not a non-negative whole number.
    Quantity(String),
    /// A price is not a decimal between 0 and the price cap.
    Price(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NameSeparator => f.write_str("expected exactly one ':'"),
            SkipReason::FieldCount(n) => write!(f, "expected 4 fields after ':', found {}", n),
            SkipReason::EmptyName => f.write_str("missing product name"),
            SkipReason::Quantity(q) => write!(f, "invalid quantity '{}'", q),
            SkipReason::Price(p) => write!(f, "invalid price '{}'", p),
        }
    }
}

/// A dropped line and where it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source text.
    pub line_number: usize,
    pub reason: SkipReason,
}

/// Result of decoding a whole inventory text.
#[derive(Debug, Clone, Default)]
pub struct ParsedInventory {
    pub inventory: Inventory,
    pub skipped: Vec<SkippedLine>,
}

/// Outcome of decoding one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Entry(CatalogEntry),
    /// Blank or comment line.
    Ignored,
    Skipped(SkipReason),
}

/// Decodes one line of the inventory format.
pub fn parse_line(raw: &str) -> LineOutcome {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return LineOutcome::Ignored;
    }

    match decode_entry(line) {
        Ok(entry) => LineOutcome::Entry(entry),
        Err(reason) => LineOutcome::Skipped(reason),
    }
}

fn decode_entry(line: &str) -> Result<CatalogEntry, SkipReason> {
    let parts: Vec<&str> = line.split(':').collect();
    if parts.len() != 2 {
        return Err(SkipReason::NameSeparator);
    }

    let name = parts[0].trim();
    let fields: Vec<&str> = parts[1].split(',').map(str::trim).collect();
    if fields.len() != 4 {
        return Err(SkipReason::FieldCount(fields.len()));
    }
    if name.is_empty() {
        return Err(SkipReason::EmptyName);
    }

    let stock: u32 = fields[0]
        .parse()
        .map_err(|_| SkipReason::Quantity(fields[0].to_string()))?;
    let regular_price = decode_price(fields[1])?;
    let member_price = decode_price(fields[2])?;
    let tax_class = TaxClass::from_label(fields[3]);

    Ok(CatalogEntry::new(
        name,
        stock,
        regular_price,
        member_price,
        tax_class,
    ))
}

fn decode_price(field: &str) -> Result<Money, SkipReason> {
    Money::parse(&field.replace('$', ""))
        .and_then(validate_price)
        .map_err(|_| SkipReason::Price(field.to_string()))
}

/// Decodes a whole inventory text, collecting skipped lines.
pub fn parse_inventory(text: &str) -> ParsedInventory {
    let mut parsed = ParsedInventory::default();

    for (index, raw) in text.lines().enumerate() {
        match parse_line(raw) {
            LineOutcome::Entry(entry) => parsed.inventory.upsert(entry),
            LineOutcome::Ignored => {}
            LineOutcome::Skipped(reason) => parsed.skipped.push(SkippedLine {
                line_number: index + 1,
                reason,
            }),
        }
    }

    parsed
}

/// Encodes one entry: `Name: qty, $regular, $member, Taxable|Tax-Exempt`.
pub fn render_line(entry: &CatalogEntry) -> String {
    format!(
        "{}: {}, {}, {}, {}",
        entry.name,
        entry.stock,
        entry.regular_price,
        entry.member_price,
        entry.tax_class.label()
    )
}

/// Encodes the whole inventory, one line per entry, newline terminated.
pub fn render_inventory(inventory: &Inventory) -> String {
    inventory
        .entries()
        .iter()
        .map(|entry| render_line(entry) + "\n")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Quick Mart inventory
Widget: 10, $5.00, $4.00, Taxable

Milk: 24, $3.49, $3.19, Tax-Exempt
Bread 12 $2.00
Eggs: 12, $2.99, $2.49
Soap: lots, $1.00, $0.90, Taxable
Gum: 5, $x, $0.50, Taxable
";

    #[test]
    fn test_parse_line_entry() {
        let outcome = parse_line("  Widget: 10, $5.00, $4.00, Taxable  ");
        assert_eq!(
            outcome,
            LineOutcome::Entry(CatalogEntry::new(
                "Widget",
                10,
                Money::from_cents(500),
                Money::from_cents(400),
                TaxClass::Taxable,
            ))
        );
    }

    #[test]
    fn test_parse_line_ignores_comments_and_blanks() {
        assert_eq!(parse_line(""), LineOutcome::Ignored);
        assert_eq!(parse_line("   "), LineOutcome::Ignored);
        assert_eq!(parse_line("# Widget: 1, $1, $1, Taxable"), LineOutcome::Ignored);
    }

    #[test]
    fn test_parse_line_tax_label_is_lenient() {
        let LineOutcome::Entry(entry) = parse_line("Tea: 1, $1.00, $1.00, NON-TAXABLE") else {
            panic!("expected entry");
        };
        assert_eq!(entry.tax_class, TaxClass::Taxable);

        let LineOutcome::Entry(entry) = parse_line("Tea: 1, $1.00, $1.00, food") else {
            panic!("expected entry");
        };
        assert_eq!(entry.tax_class, TaxClass::Exempt);
    }

    #[test]
    fn test_parse_line_skips_malformed() {
        assert_eq!(
            parse_line("Bread 12 $2.00"),
            LineOutcome::Skipped(SkipReason::NameSeparator)
        );
        assert_eq!(
            parse_line("A:B: 1, $1, $1, Taxable"),
            LineOutcome::Skipped(SkipReason::NameSeparator)
        );
        assert_eq!(
            parse_line("Eggs: 12, $2.99, $2.49"),
            LineOutcome::Skipped(SkipReason::FieldCount(3))
        );
        assert_eq!(
            parse_line(": 1, $1, $1, Taxable"),
            LineOutcome::Skipped(SkipReason::EmptyName)
        );
        assert_eq!(
            parse_line("Soap: -1, $1.00, $0.90, Taxable"),
            LineOutcome::Skipped(SkipReason::Quantity("-1".to_string()))
        );
        assert_eq!(
            parse_line("Gum: 5, $-1.00, $0.50, Taxable"),
            LineOutcome::Skipped(SkipReason::Price("$-1.00".to_string()))
        );
    }

    #[test]
    fn test_parse_line_skips_price_above_cap() {
        assert_eq!(
            parse_line("Gold: 10, $79228162514264337593543950335, $1.00, Taxable"),
            LineOutcome::Skipped(SkipReason::Price(
                "$79228162514264337593543950335".to_string()
            ))
        );
        assert_eq!(
            parse_line("Ring: 1, $999.00, $1000000.01, Taxable"),
            LineOutcome::Skipped(SkipReason::Price("$1000000.01".to_string()))
        );
        assert!(matches!(
            parse_line("Car: 1, $1000000.00, $950000, Taxable"),
            LineOutcome::Entry(_)
        ));
    }

    #[test]
    fn test_parse_inventory_reports_skips() {
        let parsed = parse_inventory(SAMPLE);

        let names: Vec<&str> = parsed
            .inventory
            .entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Widget", "Milk"]);

        let lines: Vec<usize> = parsed.skipped.iter().map(|s| s.line_number).collect();
        assert_eq!(lines, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_render_line() {
        let entry = CatalogEntry::new(
            "Milk",
            24,
            Money::from_cents(349),
            Money::parse("3.1").unwrap(),
            TaxClass::Exempt,
        );
        assert_eq!(render_line(&entry), "Milk: 24, $3.49, $3.10, Tax-Exempt");
    }

    #[test]
    fn test_render_then_parse_preserves_entries() {
        let parsed = parse_inventory(SAMPLE);
        let reparsed = parse_inventory(&render_inventory(&parsed.inventory));

        assert_eq!(reparsed.inventory, parsed.inventory);
        assert!(reparsed.skipped.is_empty());
    }
}
