//! # Store Error Types
//!
//! Error types for inventory file and receipt operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the path and the operation            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (register app) ← PersistenceFailure                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Shell prints "Error saving receipt or inventory: ..."                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Filesystem operation errors.
///
/// Every I/O variant carries the path it failed on so the operator can
/// see which file is the problem.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file (or its temporary sibling) could not be written.
    ///
    /// ## When This Occurs
    /// - Directory missing or not writable
    /// - Disk full
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The temporary file could not be moved over the destination.
    #[error("Failed to replace {path}: {source}")]
    Rename {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The receipt directory could not be listed or created.
    #[error("Failed to access directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The next transaction number no longer fits in a 6-digit receipt name.
    #[error("Transaction numbers exhausted: {next} does not fit in 6 digits")]
    TransactionNumbersExhausted { next: u64 },
}

impl StoreError {
    pub fn read(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn write(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn rename(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::Rename {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn list_dir(path: impl AsRef<Path>, source: io::Error) -> Self {
        StoreError::ListDir {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_path() {
        let err = StoreError::write(
            "/tmp/inventory.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed to write /tmp/inventory.txt: denied");

        let err = StoreError::TransactionNumbersExhausted { next: 1_000_000 };
        assert!(err.to_string().contains("1000000"));
    }
}
