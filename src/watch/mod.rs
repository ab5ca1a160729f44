// src/watch/mod.rs

//! File watching.
//!
//! This module is responsible for:
//! - Matching paths against the ignore set ([`filter`]).
//! - Walking the project tree and registering every non-ignored directory
//!   ([`tree`]).
//! - Wiring up the cross-platform filesystem watcher (`notify`) and exposing
//!   its events as a [`WatchSession`] that can be disarmed and re-armed.
//!
//! It does **not** know about builds or processes; it only turns filesystem
//! changes into messages.

pub mod filter;
pub mod path_utils;
pub mod session;
pub mod tree;
pub mod watcher;

pub use filter::{should_ignore, PathFilter};
pub use session::{SessionHandle, WatchMessage, WatchSession};
pub use tree::{register_tree, DirRegistrar};
pub use watcher::{change_kind, event_changes, TreeWatcher, WatchArmer};
