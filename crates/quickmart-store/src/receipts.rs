//! # Receipt Store & Transaction Numbering
//!
//! Receipts are plain text files, one per checkout, and they are the only
//! record of which transaction numbers have been used.
//!
//! ## Recovery
//! ```text
//! receipts/
//! ├── tx_000002_20261016_101500.txt   ─┐
//! ├── tx_000007_20261016_174233.txt    ├─► max id = 7 ──► next = 8
//! ├── tx_000003_20261016_120101.txt   ─┘
//! ├── notes.txt                          (ignored)
//! └── .tx_000008_20261017_090000.txt.tmp (ignored, interrupted write)
//! ```
//!
//! The scan runs once at start-up; afterwards the [`TransactionCounter`]
//! advances in memory, one step per receipt actually written.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use quickmart_core::{Receipt, MAX_TRANSACTION_NUMBER};
use regex::Regex;
use tracing::{debug, info};

use crate::atomic::write_atomic;
use crate::error::{StoreError, StoreResult};

static RECEIPT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^tx_(\d{6})_.*\.txt$").expect("receipt name pattern is valid")
});

/// Extracts the transaction id from a receipt file name.
pub fn parse_receipt_name(name: &str) -> Option<u64> {
    RECEIPT_NAME
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|id| id.as_str().parse().ok())
}

// =============================================================================
// Receipt Store
// =============================================================================

/// Directory of receipt files.
#[derive(Debug, Clone)]
pub struct ReceiptStore {
    dir: PathBuf,
}

impl ReceiptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ReceiptStore { dir: dir.into() }
    }

    /// Highest transaction id among the receipt files, or 0 when there are
    /// none or the directory does not exist.
    pub fn last_transaction_number(&self) -> StoreResult<u64> {
        if !self.dir.is_dir() {
            debug!(dir = %self.dir.display(), "No receipt directory yet");
            return Ok(0);
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::list_dir(&self.dir, e))?;

        let last = entries
            .filter_map(Result::ok)
            .filter_map(|entry| parse_receipt_name(&entry.file_name().to_string_lossy()))
            .max()
            .unwrap_or(0);

        debug!(dir = %self.dir.display(), last, "Scanned receipt directory");
        Ok(last)
    }

    /// Renders `receipt` into `<dir>/<receipt.file_name()>`, creating the
    /// directory on first use.
    ///
    /// ## Errors
    /// - `TransactionNumbersExhausted` if the id needs more than 6 digits
    /// - `ListDir` if the directory cannot be created
    /// - `Write` / `Rename` if the file cannot be written
    pub fn write(&self, receipt: &Receipt) -> StoreResult<PathBuf> {
        if receipt.tx_number > MAX_TRANSACTION_NUMBER {
            return Err(StoreError::TransactionNumbersExhausted {
                next: receipt.tx_number,
            });
        }

        fs::create_dir_all(&self.dir).map_err(|e| StoreError::list_dir(&self.dir, e))?;

        let path = self.dir.join(receipt.file_name());
        write_atomic(&path, &receipt.render())?;

        info!(tx = receipt.tx_number, path = %path.display(), "Receipt written");
        Ok(path)
    }
}

// =============================================================================
// Transaction Counter
// =============================================================================

/// Next transaction number to issue.
///
/// Never persisted on its own: it is rebuilt from the receipt files at
/// start-up and only moves forward after a receipt is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionCounter {
    next: u64,
}

impl TransactionCounter {
    /// Starts right after the highest id in `store`.
    pub fn recover(store: &ReceiptStore) -> StoreResult<Self> {
        let counter = TransactionCounter::starting_at(store.last_transaction_number()? + 1);
        info!(next = counter.next, "Transaction counter recovered");
        Ok(counter)
    }

    pub fn starting_at(next: u64) -> Self {
        TransactionCounter { next }
    }

    /// The number the next checkout will use.
    pub fn peek(&self) -> StoreResult<u64> {
        if self.next > MAX_TRANSACTION_NUMBER {
            return Err(StoreError::TransactionNumbersExhausted { next: self.next });
        }
        Ok(self.next)
    }

    /// Marks the current number as used.
    pub fn advance(&mut self) {
        self.next += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::Path;
    use quickmart_core::{Cart, CatalogEntry, CustomerType, Inventory, Money, TaxClass, TaxRate};
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    fn receipt(tx_number: u64) -> Receipt {
        let widget = CatalogEntry::new(
            "Widget",
            10,
            Money::from_cents(500),
            Money::from_cents(400),
            TaxClass::Taxable,
        );
        let catalog = Inventory::from_entries([widget.clone()]);
        let mut cart = Cart::new();
        cart.add_item(&widget, 3, CustomerType::Regular);

        let at = NaiveDate::from_ymd_opt(2026, 10, 17)
            .and_then(|d| d.and_hms_opt(14, 30, 5))
            .unwrap();
        Receipt::for_cart(
            tx_number,
            at,
            &cart,
            TaxRate::from_bps(650),
            CustomerType::Regular,
            &catalog,
            Money::from_cents(2000),
        )
    }

    #[test]
    fn test_parse_receipt_name() {
        assert_eq!(parse_receipt_name("tx_000007_20261016_174233.txt"), Some(7));
        assert_eq!(parse_receipt_name("tx_123456_x.txt"), Some(123_456));
        assert_eq!(parse_receipt_name("tx_12345_20261016_174233.txt"), None);
        assert_eq!(parse_receipt_name("tx_000007_20261016_174233.txt.tmp"), None);
        assert_eq!(parse_receipt_name(".tx_000007_20261016_174233.txt.tmp"), None);
        assert_eq!(parse_receipt_name("notes.txt"), None);
    }

    #[test]
    fn test_recovery_takes_max_plus_one() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "tx_000003_20261016_120101.txt");
        touch(dir.path(), "tx_000007_20261016_174233.txt");
        touch(dir.path(), "tx_000002_20261016_101500.txt");
        touch(dir.path(), "tx_999999.txt");
        touch(dir.path(), "readme.md");

        let store = ReceiptStore::new(dir.path());
        assert_eq!(store.last_transaction_number().unwrap(), 7);

        let counter = TransactionCounter::recover(&store).unwrap();
        assert_eq!(counter.peek().unwrap(), 8);
    }

    #[test]
    fn test_recovery_missing_dir_starts_at_one() {
        let dir = TempDir::new().unwrap();
        let store = ReceiptStore::new(dir.path().join("receipts"));

        let counter = TransactionCounter::recover(&store).unwrap();
        assert_eq!(counter.peek().unwrap(), 1);
    }

    #[test]
    fn test_counter_exhaustion() {
        let mut counter = TransactionCounter::starting_at(MAX_TRANSACTION_NUMBER);
        assert_eq!(counter.peek().unwrap(), 999_999);

        counter.advance();
        assert!(matches!(
            counter.peek(),
            Err(StoreError::TransactionNumbersExhausted { next: 1_000_000 })
        ));
    }

    #[test]
    fn test_write_creates_dir_and_file() {
        let dir = TempDir::new().unwrap();
        let store = ReceiptStore::new(dir.path().join("receipts"));

        let path = store.write(&receipt(8)).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "tx_000008_20261017_143005.txt"
        );
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("October 17, 2026\nTRANSACTION: 000008\n"));
        assert!(text.contains("CHANGE: $4.02\n"));

        assert_eq!(store.last_transaction_number().unwrap(), 8);
    }

    #[test]
    fn test_write_refuses_seven_digit_ids() {
        let dir = TempDir::new().unwrap();
        let store = ReceiptStore::new(dir.path());

        assert!(matches!(
            store.write(&receipt(1_000_000)),
            Err(StoreError::TransactionNumbersExhausted { .. })
        ));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_fails_when_dir_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("receipts");
        fs::write(&blocker, "not a directory").unwrap();

        let store = ReceiptStore::new(&blocker);
        assert!(matches!(
            store.write(&receipt(1)),
            Err(StoreError::ListDir { .. })
        ));
    }
}
