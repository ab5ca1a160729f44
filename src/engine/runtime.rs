// src/engine/runtime.rs

use std::collections::VecDeque;
use std::fmt;

use anyhow::anyhow;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::{DevError, Result};
use crate::exec::CycleBackend;
use crate::watch::{WatchArmer, WatchMessage, WatchSession};

use super::core::CoreCoordinator;
use super::{CoordinatorEvent, CoreCommand};

/// Async shell around [`CoreCoordinator`].
///
/// Owns the only watch session and (through the backend) the only managed
/// process. Everything runs on the task that calls [`Runtime::run`], one
/// command at a time, so two cycles can never overlap.
pub struct Runtime<B: CycleBackend, W: WatchArmer> {
    core: CoreCoordinator,
    backend: B,
    armer: W,
    session: Option<WatchSession>,
    event_rx: mpsc::Receiver<CoordinatorEvent>,
    fatal: Option<DevError>,
    exit_success: Option<bool>,
}

impl<B: CycleBackend, W: WatchArmer> fmt::Debug for Runtime<B, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<B: CycleBackend, W: WatchArmer> Runtime<B, W> {
    /// `event_rx` carries control events (shutdown). Closing it shuts the
    /// runtime down.
    pub fn new(
        core: CoreCoordinator,
        backend: B,
        armer: W,
        event_rx: mpsc::Receiver<CoordinatorEvent>,
    ) -> Self {
        Self {
            core,
            backend,
            armer,
            session: None,
            event_rx,
            fatal: None,
            exit_success: None,
        }
    }

    /// Main loop: run the startup cycle, then react to watch and control
    /// events until shutdown or a fatal error.
    pub async fn run(mut self) -> Result<()> {
        info!("reload coordinator started");

        let mut pending = VecDeque::from([CoordinatorEvent::Startup]);

        loop {
            while let Some(event) = pending.pop_front() {
                debug!(?event, state = %self.core.state(), "coordinator received event");

                let step = self.core.step(event);
                for command in step.commands {
                    if let Some(follow_up) = self.execute_command(command).await {
                        pending.push_back(follow_up);
                    }
                }

                if !step.keep_running {
                    return self.finish();
                }
            }

            let event = self.next_event().await;
            pending.push_back(event);
        }
    }

    async fn execute_command(&mut self, command: CoreCommand) -> Option<CoordinatorEvent> {
        debug!(?command, "executing command");
        match command {
            CoreCommand::DisarmWatcher => {
                if let Some(mut session) = self.session.take() {
                    session.disarm();
                }
                None
            }
            CoreCommand::RunBuild => {
                let outcome = self.backend.build().await;
                Some(CoordinatorEvent::BuildFinished(outcome))
            }
            CoreCommand::StopProcess => {
                self.backend.stop().await;
                None
            }
            CoreCommand::StartProcess => match self.backend.start().await {
                Ok(()) => Some(CoordinatorEvent::ProcessStarted),
                Err(err) => {
                    let msg = err.to_string();
                    self.fatal = Some(err);
                    Some(CoordinatorEvent::ProcessStartFailed(msg))
                }
            },
            CoreCommand::ArmWatcher => {
                // At most one session: release any leftover before arming.
                if let Some(mut stale) = self.session.take() {
                    stale.disarm();
                }
                match self.armer.arm() {
                    Ok(session) => {
                        self.session = Some(session);
                        Some(CoordinatorEvent::WatcherArmed)
                    }
                    Err(err) => {
                        let msg = err.to_string();
                        self.fatal = Some(err);
                        Some(CoordinatorEvent::WatcherArmFailed(msg))
                    }
                }
            }
            CoreCommand::Exit { success } => {
                self.exit_success = Some(success);
                None
            }
        }
    }

    async fn next_event(&mut self) -> CoordinatorEvent {
        tokio::select! {
            biased;
            control = self.event_rx.recv() => {
                control.unwrap_or(CoordinatorEvent::ShutdownRequested)
            }
            message = next_watch_message(&mut self.session) => match message {
                WatchMessage::Change(change) => CoordinatorEvent::FileChanged(change),
                WatchMessage::Error(err) => CoordinatorEvent::WatchError(err),
            },
        }
    }

    fn finish(mut self) -> Result<()> {
        if let Some(mut session) = self.session.take() {
            session.disarm();
        }

        if self.exit_success.unwrap_or(true) {
            info!(cycles = self.core.cycles(), "reload coordinator stopped");
            return Ok(());
        }

        Err(self
            .fatal
            .take()
            .unwrap_or_else(|| DevError::Other(anyhow!("reload coordinator hit a fatal error"))))
    }
}

/// Wait for the next message of the active session; pends forever while
/// none is armed.
async fn next_watch_message(session: &mut Option<WatchSession>) -> WatchMessage {
    if let Some(session) = session.as_mut() {
        if let Some(message) = session.recv().await {
            return message;
        }
    }
    std::future::pending().await
}
