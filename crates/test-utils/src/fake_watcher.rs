use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use tokio::sync::mpsc;

use raptor_dev::config::IgnoreSet;
use raptor_dev::errors::{DevError, Result};
use raptor_dev::types::{ChangeKind, FileChange};
use raptor_dev::watch::{DirRegistrar, PathFilter, WatchArmer, WatchMessage, WatchSession};

use crate::journal::{Journal, Step};

/// Session handle that records its own release.
struct DisarmRecorder {
    journal: Journal,
}

impl Drop for DisarmRecorder {
    fn drop(&mut self) {
        self.journal.push(Step::Disarm);
    }
}

type CurrentSender = Arc<Mutex<Option<mpsc::UnboundedSender<WatchMessage>>>>;

/// Channel-driven stand-in for the notify watcher.
///
/// Every `arm` opens a new session; [`WatchFeed`] injects messages into the
/// most recent one.
pub struct FakeArmer {
    journal: Journal,
    ignore: IgnoreSet,
    current: CurrentSender,
    next_id: u64,
    fail_on_arm: Option<usize>,
    arms: usize,
}

impl FakeArmer {
    pub fn new(journal: Journal, ignore: IgnoreSet) -> (Self, WatchFeed) {
        let current: CurrentSender = Arc::new(Mutex::new(None));
        let feed = WatchFeed {
            current: Arc::clone(&current),
        };
        let armer = Self {
            journal,
            ignore,
            current,
            next_id: 1,
            fail_on_arm: None,
            arms: 0,
        };
        (armer, feed)
    }

    /// Make the `n`th arm (1-based) fail.
    pub fn fail_on_arm(mut self, n: usize) -> Self {
        self.fail_on_arm = Some(n);
        self
    }
}

impl WatchArmer for FakeArmer {
    fn arm(&mut self) -> Result<WatchSession> {
        self.arms += 1;
        if self.fail_on_arm == Some(self.arms) {
            return Err(DevError::WatcherInit("permission denied".to_string()));
        }

        // Sender goes in before the journal entry; tests feed on seeing Arm.
        let (tx, rx) = mpsc::unbounded_channel();
        *self.current.lock().unwrap() = Some(tx);
        self.journal.push(Step::Arm);

        let id = self.next_id;
        self.next_id += 1;
        Ok(WatchSession::new(
            id,
            rx,
            Box::new(DisarmRecorder {
                journal: self.journal.clone(),
            }),
            PathFilter::new(&self.ignore),
            vec![PathBuf::from(".")],
        ))
    }
}

/// Test-side handle for pushing messages into the live fake session.
#[derive(Clone)]
pub struct WatchFeed {
    current: CurrentSender,
}

impl WatchFeed {
    /// Send a change; returns false if no session is live to receive it.
    pub fn change(&self, path: &str, kind: ChangeKind) -> bool {
        self.send(WatchMessage::Change(FileChange::new(path, kind)))
    }

    pub fn error(&self, msg: &str) -> bool {
        self.send(WatchMessage::Error(msg.to_string()))
    }

    fn send(&self, msg: WatchMessage) -> bool {
        match self.current.lock().unwrap().as_ref() {
            Some(tx) => tx.send(msg).is_ok(),
            None => false,
        }
    }
}

/// Registrar that only records what it was given.
#[derive(Debug, Default, Clone)]
pub struct RecordingRegistrar {
    pub registered: Vec<PathBuf>,
    pub refuse: Vec<PathBuf>,
}

impl RecordingRegistrar {
    pub fn refusing(paths: &[&str]) -> Self {
        Self {
            registered: Vec::new(),
            refuse: paths.iter().map(PathBuf::from).collect(),
        }
    }
}

impl DirRegistrar for RecordingRegistrar {
    fn register(&mut self, dir: &Path) -> anyhow::Result<()> {
        if self.refuse.iter().any(|p| p == dir) {
            return Err(anyhow!("refusing to watch {:?}", dir));
        }
        self.registered.push(dir.to_path_buf());
        Ok(())
    }
}
