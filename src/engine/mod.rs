// src/engine/mod.rs

//! Reload coordinator.
//!
//! The pure state machine lives in [`core`]; the async/IO shell that owns the
//! watch session and the backend is in [`runtime`]. The shell feeds every
//! event into the core and executes the commands it gets back, in order.

use std::fmt;

use crate::exec::BuildOutcome;
use crate::types::FileChange;

/// Coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Watcher armed, nothing in progress.
    Idle,
    /// Build / stop / start in progress, watcher disarmed.
    Cycling,
    /// Fatal error; the process is exiting.
    Terminal,
    /// Shut down on request.
    Stopped,
}

impl fmt::Display for CoordinatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoordinatorState::Idle => "idle",
            CoordinatorState::Cycling => "cycling",
            CoordinatorState::Terminal => "terminal",
            CoordinatorState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Events flowing into the coordinator core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorEvent {
    /// Program start: run the initial build + start.
    Startup,
    /// The active watch session saw a change.
    FileChanged(FileChange),
    /// The active watch session reported a backend error.
    WatchError(String),
    BuildFinished(BuildOutcome),
    ProcessStarted,
    ProcessStartFailed(String),
    WatcherArmed,
    WatcherArmFailed(String),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Command produced by the core, executed by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreCommand {
    DisarmWatcher,
    RunBuild,
    StopProcess,
    StartProcess,
    ArmWatcher,
    Exit { success: bool },
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    /// Commands to execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the runtime loop should keep running after them.
    pub keep_running: bool,
}

impl CoreStep {
    pub fn none() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }

    pub fn run(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }

    pub fn exit(mut commands: Vec<CoreCommand>, success: bool) -> Self {
        commands.push(CoreCommand::Exit { success });
        Self {
            commands,
            keep_running: false,
        }
    }
}

pub mod core;
pub mod runtime;

pub use self::core::CoreCoordinator;
pub use self::runtime::Runtime;
