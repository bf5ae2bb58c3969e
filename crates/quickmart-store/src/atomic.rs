//! Write-then-rename helper shared by the inventory file and the receipt store.
//!
//! ```text
//! contents ──► .<name>.tmp ──rename──► <name>
//!                  │ fails?
//!                  └──► remove tmp, destination untouched
//! ```
//!
//! The temporary sibling starts with `.` and ends in `.tmp`, so it never looks
//! like a receipt to the transaction number scan.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{StoreError, StoreResult};

/// Temporary sibling of `path`.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Replaces `path` with `contents`. Readers see either the old file or the
/// complete new one.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> StoreResult<()> {
    let tmp = tmp_path(path);

    if let Err(e) = write_synced(&tmp, contents) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::write(&tmp, e));
    }

    if let Err(e) = fs::rename(&tmp, path) {
        warn!(path = %path.display(), error = %e, "Failed to rename temporary file");
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::rename(path, e));
    }

    Ok(())
}

/// Writes `contents` and flushes them to disk before the rename.
fn write_synced(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}
