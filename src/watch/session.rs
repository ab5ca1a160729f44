// src/watch/session.rs

use std::any::Any;
use std::fmt;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::types::FileChange;
use crate::watch::filter::PathFilter;

/// Message delivered by a live watch session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchMessage {
    Change(FileChange),
    /// The notification backend reported a problem. The session stays live.
    Error(String),
}

/// Opaque resource keeping the underlying notification source alive.
/// Dropping it releases the source.
pub type SessionHandle = Box<dyn Any + Send>;

/// One armed watch: the registered directories, the ignore filter they were
/// walked with, and the event stream.
///
/// Disarming drops the handle and closes the stream; nothing produced by this
/// session is observed afterwards, even if it was already queued.
pub struct WatchSession {
    id: u64,
    rx: Option<mpsc::UnboundedReceiver<WatchMessage>>,
    handle: Option<SessionHandle>,
    filter: PathFilter,
    registered: Vec<PathBuf>,
}

impl fmt::Debug for WatchSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchSession")
            .field("id", &self.id)
            .field("armed", &self.is_armed())
            .field("registered", &self.registered.len())
            .finish_non_exhaustive()
    }
}

impl WatchSession {
    pub fn new(
        id: u64,
        rx: mpsc::UnboundedReceiver<WatchMessage>,
        handle: SessionHandle,
        filter: PathFilter,
        registered: Vec<PathBuf>,
    ) -> Self {
        Self {
            id,
            rx: Some(rx),
            handle: Some(handle),
            filter,
            registered,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Directories registered when the session was armed, root first.
    pub fn registered(&self) -> &[PathBuf] {
        &self.registered
    }

    /// Next message from this session.
    ///
    /// Changes under an ignored path are dropped here. Returns `None` once the
    /// session is disarmed or its source went away.
    pub async fn recv(&mut self) -> Option<WatchMessage> {
        loop {
            let msg = self.rx.as_mut()?.recv().await;
            match msg {
                Some(WatchMessage::Change(change))
                    if self.filter.is_ignored_or_within(&change.path) =>
                {
                    debug!(session = self.id, path = %change.path, "change under ignored path; dropping");
                }
                Some(msg) => return Some(msg),
                None => {
                    debug!(session = self.id, "watch source closed");
                    self.rx = None;
                    return None;
                }
            }
        }
    }

    /// Release the notification source. Safe to call repeatedly.
    pub fn disarm(&mut self) {
        if let Some(mut rx) = self.rx.take() {
            rx.close();
        }
        if let Some(handle) = self.handle.take() {
            drop(handle);
            info!(session = self.id, "file watcher stopped");
        }
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        self.disarm();
    }
}
