// src/engine/core.rs

//! Pure coordinator state machine.
//!
//! Synchronous and deterministic: no channels, no processes, no filesystem.
//! A reload cycle is
//!
//! ```text
//! change -> DisarmWatcher, RunBuild
//! build ok -> StopProcess, StartProcess -> (started) ArmWatcher -> Idle
//! build failed -> StopProcess, ArmWatcher -> Idle
//! ```
//!
//! The startup cycle is the same minus the disarm. Changes that arrive
//! outside `Idle` are dropped; the runtime never delivers them anyway since
//! the watcher is disarmed for the whole cycle.

use tracing::{debug, error, info, warn};

use crate::engine::{CoordinatorEvent, CoordinatorState, CoreCommand, CoreStep};
use crate::exec::BuildOutcome;
use crate::types::FileChange;

#[derive(Debug)]
pub struct CoreCoordinator {
    state: CoordinatorState,
    started: bool,
    cycles: u64,
}

impl Default for CoreCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreCoordinator {
    pub fn new() -> Self {
        Self {
            state: CoordinatorState::Cycling,
            started: false,
            cycles: 0,
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Number of cycles begun, the startup cycle included.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Handle one event and return what the runtime should do next.
    pub fn step(&mut self, event: CoordinatorEvent) -> CoreStep {
        match event {
            CoordinatorEvent::Startup => self.on_startup(),
            CoordinatorEvent::FileChanged(change) => self.on_file_changed(change),
            CoordinatorEvent::WatchError(err) => {
                warn!(error = %err, "file watch error");
                CoreStep::none()
            }
            CoordinatorEvent::BuildFinished(outcome) => self.on_build_finished(outcome),
            CoordinatorEvent::ProcessStarted => CoreStep::run(vec![CoreCommand::ArmWatcher]),
            CoordinatorEvent::ProcessStartFailed(err) => {
                error!(error = %err, "could not start app");
                self.state = CoordinatorState::Terminal;
                CoreStep::exit(Vec::new(), false)
            }
            CoordinatorEvent::WatcherArmed => {
                if self.state == CoordinatorState::Cycling {
                    debug!(cycle = self.cycles, "cycle finished; watching for changes");
                    self.state = CoordinatorState::Idle;
                }
                CoreStep::none()
            }
            CoordinatorEvent::WatcherArmFailed(err) => {
                error!(error = %err, "could not arm file watcher");
                self.state = CoordinatorState::Terminal;
                CoreStep::exit(vec![CoreCommand::StopProcess], false)
            }
            CoordinatorEvent::ShutdownRequested => {
                info!("shutdown requested");
                self.state = CoordinatorState::Stopped;
                CoreStep::exit(
                    vec![CoreCommand::DisarmWatcher, CoreCommand::StopProcess],
                    true,
                )
            }
        }
    }

    fn on_startup(&mut self) -> CoreStep {
        if self.started {
            debug!("duplicate startup event ignored");
            return CoreStep::none();
        }
        self.started = true;
        self.begin_cycle();
        CoreStep::run(vec![CoreCommand::RunBuild])
    }

    fn on_file_changed(&mut self, change: FileChange) -> CoreStep {
        if self.state != CoordinatorState::Idle {
            debug!(state = %self.state, path = %change.path, "change outside idle; dropping");
            return CoreStep::none();
        }
        if !change.kind.is_qualifying() {
            debug!(path = %change.path, kind = %change.kind, "non-qualifying change; dropping");
            return CoreStep::none();
        }

        info!(path = %change.path, kind = %change.kind, "change detected; reloading");
        self.begin_cycle();
        CoreStep::run(vec![CoreCommand::DisarmWatcher, CoreCommand::RunBuild])
    }

    fn on_build_finished(&mut self, outcome: BuildOutcome) -> CoreStep {
        if self.state != CoordinatorState::Cycling {
            warn!(state = %self.state, "build result outside a cycle; ignoring");
            return CoreStep::none();
        }

        if outcome.success {
            CoreStep::run(vec![CoreCommand::StopProcess, CoreCommand::StartProcess])
        } else {
            // Old code stays down until the next good build.
            CoreStep::run(vec![CoreCommand::StopProcess, CoreCommand::ArmWatcher])
        }
    }

    fn begin_cycle(&mut self) {
        self.cycles += 1;
        self.state = CoordinatorState::Cycling;
    }
}
