use std::fmt;

/// Kind of filesystem change reported by the watcher.
///
/// Only `Create` and `Write` drive a reload cycle; the rest are observed and
/// dropped by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Create,
    Write,
    Remove,
    Rename,
    Chmod,
    Other,
}

impl ChangeKind {
    /// Whether a change of this kind should trigger a rebuild.
    pub fn is_qualifying(self) -> bool {
        matches!(self, ChangeKind::Create | ChangeKind::Write)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Create => "create",
            ChangeKind::Write => "write",
            ChangeKind::Remove => "remove",
            ChangeKind::Rename => "rename",
            ChangeKind::Chmod => "chmod",
            ChangeKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// A single filesystem change, with the path already made relative to the
/// project root (forward slashes, no leading `./`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub kind: ChangeKind,
}

impl FileChange {
    pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}
