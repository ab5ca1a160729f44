// src/watch/tree.rs

//! Directory walk that registers every non-ignored directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::fs::FileSystem;
use crate::watch::filter::PathFilter;
use crate::watch::path_utils::relative_str;

/// Something directories can be registered with for change notification.
///
/// Implemented for the real `notify` watcher; tests use a recorder.
pub trait DirRegistrar {
    fn register(&mut self, dir: &Path) -> Result<()>;
}

/// Walk `root` and register it plus every directory below it that the
/// filter does not ignore. An ignored directory is pruned with its whole
/// subtree. Symlinked directories are not followed.
///
/// Failing to register or list the root is an error. A subdirectory that
/// cannot be registered or listed is skipped (with its subtree) and logged;
/// the rest of the tree is still watched.
///
/// Returns the registered directories in walk order, root first.
pub fn register_tree(
    fs: &dyn FileSystem,
    root: &Path,
    filter: &PathFilter,
    registrar: &mut dyn DirRegistrar,
) -> Result<Vec<PathBuf>> {
    registrar
        .register(root)
        .with_context(|| format!("watching root directory {:?}", root))?;
    let mut registered = vec![root.to_path_buf()];

    let mut stack = children_of(fs, root)
        .with_context(|| format!("listing root directory {:?}", root))?;

    while let Some(dir) = stack.pop() {
        let Some(rel) = relative_str(root, &dir) else {
            warn!(dir = ?dir, root = ?root, "directory outside project root; skipping");
            continue;
        };

        if filter.is_ignored(&rel) {
            debug!(dir = %rel, "ignored; pruning subtree");
            continue;
        }

        if let Err(err) = registrar.register(&dir) {
            warn!(dir = %rel, error = %err, "could not watch directory; skipping subtree");
            continue;
        }
        registered.push(dir.clone());

        match children_of(fs, &dir) {
            Ok(children) => stack.extend(children),
            Err(err) => {
                warn!(dir = %rel, error = %err, "could not list directory; subtree not watched");
            }
        }
    }

    Ok(registered)
}

/// Subdirectories of `dir`, ordered so that popping from the end of the
/// returned stack visits them alphabetically.
fn children_of(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs
        .read_dir(dir)?
        .into_iter()
        .filter(|p| fs.is_dir(p) && !fs.is_symlink(p))
        .collect();
    dirs.sort();
    dirs.reverse();
    Ok(dirs)
}
