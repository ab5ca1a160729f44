// src/exec/build.rs

//! The external build step.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use colored::Colorize;
use tokio::process::Command;
use tracing::{error, info};

use crate::config::DevSettings;
use crate::exec::duration::format_elapsed;
use crate::fs::FileSystem;

/// Why a build did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildFailure {
    /// The build tool ran and exited non-zero (`None` if killed by a signal).
    ExitStatus(Option<i32>),
    /// The build tool could not be launched at all.
    Spawn(String),
}

/// Result of one build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    pub success: bool,
    pub elapsed: Duration,
    pub failure: Option<BuildFailure>,
}

impl BuildOutcome {
    pub fn succeeded(elapsed: Duration) -> Self {
        Self {
            success: true,
            elapsed,
            failure: None,
        }
    }

    pub fn failed(elapsed: Duration, failure: BuildFailure) -> Self {
        Self {
            success: false,
            elapsed,
            failure: Some(failure),
        }
    }
}

/// Runs the project's build command in the project root.
///
/// The build tool's stdout/stderr are inherited, so compiler output shows up
/// in the terminal as it is produced.
#[derive(Debug, Clone)]
pub struct BuildRunner {
    root: PathBuf,
    program: String,
    args: Vec<String>,
    output_dir: PathBuf,
}

impl BuildRunner {
    pub fn new(root: impl Into<PathBuf>, settings: &DevSettings) -> Self {
        Self {
            root: root.into(),
            program: settings.build_program.clone(),
            args: settings.build_args.clone(),
            output_dir: settings.output_dir.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output directory if it does not exist yet.
    pub fn prepare_output_dir(&self, fs: &dyn FileSystem) -> anyhow::Result<()> {
        let dir = self.root.join(&self.output_dir);
        if !fs.is_dir(&dir) {
            fs.create_dir_all(&dir)?;
            info!(dir = ?dir, "created output directory");
        }
        Ok(())
    }

    /// Run the build once and report how it went. Never retries.
    pub async fn run(&self) -> BuildOutcome {
        println!("Rebuilding application... 🏗️");
        info!(program = %self.program, args = ?self.args, "build started");

        let started = Instant::now();
        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await;
        let elapsed = started.elapsed();

        let outcome = match status {
            Ok(status) if status.success() => BuildOutcome::succeeded(elapsed),
            Ok(status) => BuildOutcome::failed(elapsed, BuildFailure::ExitStatus(status.code())),
            Err(err) => BuildOutcome::failed(elapsed, BuildFailure::Spawn(err.to_string())),
        };

        report(&outcome);
        outcome
    }
}

fn report(outcome: &BuildOutcome) {
    let took = format_elapsed(outcome.elapsed);
    match &outcome.failure {
        None => {
            println!("{} ✅", format!("Build completed in {took}").green());
            info!(elapsed_ms = outcome.elapsed.as_millis() as u64, "build succeeded");
        }
        Some(failure) => {
            println!("{} ❌", "Build failed".red());
            error!(?failure, elapsed_ms = outcome.elapsed.as_millis() as u64, "build failed");
        }
    }
}
