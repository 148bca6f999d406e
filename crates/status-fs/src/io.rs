//! Atomic I/O operations
//!
//! Status artifacts are shared by many short-lived processes with no lock
//! between them, so every write goes to a sibling temp file first and is
//! then renamed over the destination. A reader only ever sees the complete
//! old content or the complete new content.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Error, NormalizedPath, Result};

/// Distinguishes temp files of concurrent writers inside one process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Tuning for [`write_atomic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Flush the temp file to disk before the rename.
    pub sync: bool,
    /// Unix permission bits applied to the destination after the rename.
    pub mode: Option<u32>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sync: true,
            mode: None,
        }
    }
}

impl WriteOptions {
    /// Default options with the given permission bits.
    pub fn with_mode(mode: u32) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }
}

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename so a partially written file is never
/// visible under the destination name. The temp file lives in the same
/// directory, which keeps the rename on one filesystem.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], options: WriteOptions) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_path = temp_path_for(&native_path);

    if let Err(e) = write_temp(&temp_path, content, options.sync) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, &native_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&native_path, e));
    }

    if let Some(mode) = options.mode {
        set_mode(&native_path, mode)?;
    }

    tracing::trace!(path = %path, bytes = content.len(), "atomic write complete");
    Ok(())
}

/// Sibling temp path: `.<file>.<pid>.<seq>.tmp`.
pub fn temp_path_for(native_path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    native_path.with_file_name(temp_name)
}

fn write_temp(temp_path: &Path, content: &[u8], sync: bool) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    if sync {
        temp_file
            .sync_all()
            .map_err(|e| Error::io(temp_path, e))?;
    }

    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| Error::io(path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

/// Read text content, returning `None` when the file does not exist.
pub fn read_text_if_exists(path: &NormalizedPath) -> Result<Option<String>> {
    let native_path = path.to_native();
    match fs::read_to_string(&native_path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}
