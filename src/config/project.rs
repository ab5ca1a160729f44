// src/config/project.rs

use std::path::{Path, PathBuf};

use crate::errors::{DevError, Result};
use crate::fs::FileSystem;

/// Config files that mark a directory as a Raptor project root, in lookup
/// order.
pub const MARKER_FILES: &[&str] = &[
    ".raptor.conf",
    ".raptor.toml",
    ".raptor.dev.conf",
    ".raptor.dev.toml",
    ".raptor.prod.conf",
    ".raptor.prod.toml",
];

/// Return the first marker file present in `root`.
///
/// Fails with [`DevError::NotProjectRoot`] when none exists; the dev server
/// refuses to start anywhere else.
pub fn find_project_marker(fs: &dyn FileSystem, root: &Path) -> Result<PathBuf> {
    MARKER_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| fs.is_file(candidate))
        .ok_or_else(|| DevError::NotProjectRoot {
            dir: root.to_path_buf(),
        })
}
