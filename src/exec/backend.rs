// src/exec/backend.rs

//! Pluggable build/process backend.
//!
//! The runtime drives a `CycleBackend` instead of touching processes
//! directly. Production uses [`RealCycleBackend`]; tests provide a backend
//! that records the calls and scripts build outcomes.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::config::DevSettings;
use crate::errors::Result;
use crate::exec::build::{BuildOutcome, BuildRunner};
use crate::exec::process::ProcessSupervisor;

/// The three side-effecting steps of a reload cycle.
pub trait CycleBackend: Send {
    /// Run the external build once.
    fn build(&mut self) -> Pin<Box<dyn Future<Output = BuildOutcome> + Send + '_>>;

    /// Stop the managed process if one is running; never fails.
    fn stop(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;

    /// Launch a new managed process. An error here is fatal.
    fn start(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Real backend: `BuildRunner` + `ProcessSupervisor`.
#[derive(Debug)]
pub struct RealCycleBackend {
    builder: BuildRunner,
    process: ProcessSupervisor,
}

impl RealCycleBackend {
    pub fn new(root: impl Into<PathBuf>, settings: &DevSettings) -> Self {
        let root = root.into();
        Self {
            builder: BuildRunner::new(root.clone(), settings),
            process: ProcessSupervisor::new(root, settings),
        }
    }

    pub fn builder(&self) -> &BuildRunner {
        &self.builder
    }

    pub fn process_mut(&mut self) -> &mut ProcessSupervisor {
        &mut self.process
    }
}

impl CycleBackend for RealCycleBackend {
    fn build(&mut self) -> Pin<Box<dyn Future<Output = BuildOutcome> + Send + '_>> {
        Box::pin(self.builder.run())
    }

    fn stop(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(self.process.stop())
    }

    fn start(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(self.process.start())
    }
}
