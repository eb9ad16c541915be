//! Atomic file write helpers.
//!
//! Uses a temp file + rename pattern so a reader never sees a half-written
//! counter file. When the rename cannot replace an existing target, we fall
//! back to backup-and-restore so the previous content survives a failure.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

/// Recover from an interrupted atomic write by restoring the `.bak` file.
///
/// If `path` does not exist but `path.bak` does, a crash happened inside the
/// backup-rename window of [`atomic_write`]. Returns whether a
/// backup was restored.
pub fn recover_bak_file(path: &Path) -> bool {
    let backup = path.with_extension("bak");
    if path.exists() || !backup.exists() {
        return false;
    }
    match fs::rename(&backup, path) {
        Ok(()) => {
            tracing::warn!(
                path = %path.display(),
                "Recovered .bak file from interrupted atomic write"
            );
            true
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                "Failed to recover .bak file: {e}"
            );
            false
        }
    }
}

/// Replaces `path` with `bytes`, creating missing parent directories.
///
/// The temp file is synced before the rename.
pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.exists() {
        debug!(path = %parent.display(), "Creating parent directory");
        fs::create_dir_all(parent)?;
    }

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    // Rename fails on some platforms when the target exists.
    if let Err(err) = tmp.persist(path) {
        if !path.exists() {
            return Err(err.error);
        }
        let backup_path = path.with_extension("bak");
        let _ = fs::remove_file(&backup_path);
        fs::rename(path, &backup_path)?;

        if let Err(rename_err) = err.file.persist(path) {
            let _ = fs::rename(&backup_path, path);
            return Err(rename_err.error);
        }
        if let Err(e) = fs::remove_file(&backup_path) {
            tracing::warn!(
                path = %backup_path.display(),
                "Failed to remove .bak after atomic write: {e}"
            );
        }
    }

    debug!(path = %path.display(), bytes = bytes.len(), "Atomic write complete");
    Ok(())
}
