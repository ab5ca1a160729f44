// src/exec/process.rs

//! Lifecycle of the single managed app process.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::config::DevSettings;
use crate::errors::{DevError, Result};

/// Owns at most one running instance of the built artifact.
///
/// `start` and `stop` are both safe to call with nothing running. A new
/// instance is only launched once the previous one has been interrupted and
/// waited for.
#[derive(Debug)]
pub struct ProcessSupervisor {
    root: PathBuf,
    program: PathBuf,
    env: BTreeMap<String, String>,
    stop_grace: Option<Duration>,
    child: Option<Child>,
}

impl ProcessSupervisor {
    pub fn new(root: impl Into<PathBuf>, settings: &DevSettings) -> Self {
        let root = root.into();
        let program = root.join(&settings.artifact);
        Self {
            root,
            program,
            env: settings.env.clone(),
            stop_grace: settings.stop_grace,
            child: None,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// PID of the live instance, if any.
    pub fn pid(&mut self) -> Option<u32> {
        if self.is_live() {
            self.child.as_ref().and_then(Child::id)
        } else {
            None
        }
    }

    /// Whether an instance is running right now. Reaps an instance that has
    /// exited on its own.
    pub fn is_live(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                info!(%status, "app exited on its own");
                self.child = None;
                false
            }
            Err(err) => {
                warn!(error = %err, "could not query app status");
                true
            }
        }
    }

    /// Launch the artifact with the inherited environment plus the dev
    /// variables, sharing our stdout/stderr.
    pub async fn start(&mut self) -> Result<()> {
        if self.is_live() {
            warn!("start requested while app is still running; stopping it first");
            self.stop().await;
        }

        let child = Command::new(&self.program)
            .current_dir(&self.root)
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DevError::ProcessStart {
                program: self.program.clone(),
                source,
            })?;

        info!(pid = ?child.id(), program = ?self.program, "app started");
        self.child = Some(child);
        Ok(())
    }

    /// Interrupt the running instance and wait for it to exit.
    ///
    /// No-op when nothing was started or the instance already exited.
    /// Failing to signal or to wait is logged and otherwise ignored, so a
    /// misbehaving instance never blocks the next start. With a grace period
    /// configured, an instance still running after it is killed.
    pub async fn stop(&mut self) {
        let Some(mut child) = self.child.take() else {
            debug!("stop: no app running");
            return;
        };

        match child.try_wait() {
            Ok(Some(status)) => {
                debug!(%status, "stop: app had already exited");
                return;
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "stop: could not query app status"),
        }

        let pid = child.id();
        if let Err(err) = interrupt(&mut child) {
            warn!(?pid, error = %err, "failed to send interrupt to app");
        }

        let waited = match self.stop_grace {
            None => child.wait().await,
            Some(grace) => match tokio::time::timeout(grace, child.wait()).await {
                Ok(res) => res,
                Err(_) => {
                    warn!(?pid, grace_ms = grace.as_millis() as u64, "app ignored interrupt; killing");
                    match child.kill().await {
                        Ok(()) => child.wait().await,
                        Err(err) => Err(err),
                    }
                }
            },
        };

        match waited {
            Ok(status) => log_exit(pid, status),
            Err(err) => warn!(?pid, error = %err, "error waiting for app to exit"),
        }
    }
}

fn log_exit(pid: Option<u32>, status: ExitStatus) {
    info!(?pid, %status, "app stopped");
}

#[cfg(unix)]
fn interrupt(child: &mut Child) -> std::io::Result<()> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let Some(pid) = child.id() else {
        // Already reaped.
        return Ok(());
    };
    let pid = i32::try_from(pid)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidInput, "pid out of range"))?;
    kill(Pid::from_raw(pid), Signal::SIGINT).map_err(std::io::Error::from)
}

#[cfg(not(unix))]
fn interrupt(child: &mut Child) -> std::io::Result<()> {
    child.start_kill()
}
