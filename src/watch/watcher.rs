// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result as AnyResult;
use notify::event::{EventKind, ModifyKind, RenameMode};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::{load_ignore_set, IgnoreSet};
use crate::errors::{DevError, Result};
use crate::fs::FileSystem;
use crate::types::{ChangeKind, FileChange};
use crate::watch::filter::PathFilter;
use crate::watch::path_utils::relative_str;
use crate::watch::session::{WatchMessage, WatchSession};
use crate::watch::tree::{register_tree, DirRegistrar};

/// Produces a fresh [`WatchSession`] on demand.
///
/// The coordinator arms once after the initial build and again after every
/// reload cycle. Tests substitute a channel-driven implementation.
pub trait WatchArmer: Send {
    fn arm(&mut self) -> Result<WatchSession>;
}

impl DirRegistrar for RecommendedWatcher {
    fn register(&mut self, dir: &Path) -> AnyResult<()> {
        self.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(())
    }
}

/// `notify`-backed watcher over a project tree.
///
/// Each directory is registered individually (non-recursive) so ignored
/// subtrees such as `bin/` or `.git/` never produce events at all.
#[derive(Debug)]
pub struct TreeWatcher {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
    next_id: u64,
}

impl TreeWatcher {
    pub fn new(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        let root = root.into();
        // Canonicalize once so we have a stable base path.
        let root = root.canonicalize().unwrap_or(root);
        Self {
            root,
            fs,
            next_id: 1,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Arm a session using an explicit ignore set.
    pub fn arm_with(&mut self, ignore: &IgnoreSet) -> Result<WatchSession> {
        let id = self.next_id;
        self.next_id += 1;

        let filter = PathFilter::new(ignore);
        let (event_tx, event_rx) = mpsc::unbounded_channel::<WatchMessage>();

        // Called synchronously on notify's thread. Send failures mean the
        // session was disarmed; those events are meant to be lost.
        let callback_root = self.root.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    for (path, kind) in event_changes(&event) {
                        if let Some(rel) = relative_str(&callback_root, path) {
                            let _ = event_tx.send(WatchMessage::Change(FileChange::new(rel, kind)));
                        }
                    }
                }
                Err(err) => {
                    let _ = event_tx.send(WatchMessage::Error(err.to_string()));
                }
            },
            Config::default(),
        )
        .map_err(|e| DevError::WatcherInit(format!("creating watcher: {e}")))?;

        let registered = register_tree(self.fs.as_ref(), &self.root, &filter, &mut watcher)
            .map_err(|e| DevError::WatcherInit(format!("{e:#}")))?;

        info!(
            session = id,
            root = ?self.root,
            directories = registered.len(),
            "file watcher started"
        );
        debug!(session = id, ?registered, "watched directories");

        Ok(WatchSession::new(
            id,
            event_rx,
            Box::new(watcher),
            filter,
            registered,
        ))
    }
}

impl WatchArmer for TreeWatcher {
    /// Re-reads `.raptorignore` so edits to it apply from the next cycle.
    fn arm(&mut self) -> Result<WatchSession> {
        let ignore = load_ignore_set(self.fs.as_ref(), &self.root);
        self.arm_with(&ignore)
    }
}

/// Map a `notify` event kind onto the coarse kinds the coordinator cares
/// about.
///
/// A rename into place counts as a create: editors that save through a temp
/// file produce nothing else for the saved path.
pub fn change_kind(kind: &EventKind) -> ChangeKind {
    match kind {
        EventKind::Create(_) => ChangeKind::Create,
        EventKind::Modify(ModifyKind::Data(_)) | EventKind::Modify(ModifyKind::Any) => {
            ChangeKind::Write
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => ChangeKind::Create,
        EventKind::Modify(ModifyKind::Name(_)) => ChangeKind::Rename,
        EventKind::Modify(ModifyKind::Metadata(_)) => ChangeKind::Chmod,
        EventKind::Remove(_) => ChangeKind::Remove,
        _ => ChangeKind::Other,
    }
}

/// Per-path changes carried by one `notify` event.
///
/// A paired rename (`Name(Both)`) lists source then destination; the source
/// is reported as a rename and the destination as a create.
pub fn event_changes(event: &Event) -> Vec<(&Path, ChangeKind)> {
    if let EventKind::Modify(ModifyKind::Name(RenameMode::Both)) = event.kind {
        return event
            .paths
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let kind = if i == 1 {
                    ChangeKind::Create
                } else {
                    ChangeKind::Rename
                };
                (path.as_path(), kind)
            })
            .collect();
    }

    let kind = change_kind(&event.kind);
    event.paths.iter().map(|path| (path.as_path(), kind)).collect()
}
