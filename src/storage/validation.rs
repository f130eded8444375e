//! Path resolution
//!
//! Translates provider paths into filesystem locations under a root.

use std::path::{Path, PathBuf};

/// Resolve `path` against `root`.
///
/// Absolute paths are used verbatim, relative paths are joined under the root.
pub fn resolve_path(root: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        root.join(candidate)
    }
}
