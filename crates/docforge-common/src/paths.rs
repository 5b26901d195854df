//! Path utilities for detecting document types by extension.
//!
//! Used by input collection, output naming and lock-file cleanup.

use std::path::{Path, PathBuf};

/// Prefix office suites give to the lock file they leave next to an open document.
pub const LOCK_FILE_PREFIX: &str = "~$";

/// Case-insensitive extension check.
pub(crate) fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

/// Whether `path` names an office lock file (`~$report.docx`).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use docforge_common::paths::is_lock_file;
///
/// assert!(is_lock_file(Path::new("/out/~$report.docx")));
/// assert!(!is_lock_file(Path::new("/out/report.docx")));
/// ```
pub fn is_lock_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with(LOCK_FILE_PREFIX))
        .unwrap_or(false)
}

/// Path of the transient lock file an office suite leaves beside `output`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use docforge_common::paths::lock_file_for;
///
/// let lock = lock_file_for(Path::new("/out/report.docx")).unwrap();
/// assert_eq!(lock, Path::new("/out/~$report.docx"));
/// ```
pub fn lock_file_for(output: &Path) -> Option<PathBuf> {
    let name = output.file_name()?.to_str()?;
    let lock_name = format!("{}{}", LOCK_FILE_PREFIX, name);
    Some(match output.parent() {
        Some(dir) => dir.join(lock_name),
        None => PathBuf::from(lock_name),
    })
}

/// Display name of a file (its final path component), for events and messages.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
