// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cli::DevArgs;
use crate::config::{find_project_marker, load_dev_settings, DevSettings};
use crate::engine::{CoordinatorEvent, CoreCoordinator, Runtime};
use crate::errors::{DevError, Result};
use crate::exec::RealCycleBackend;
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::TreeWatcher;

/// High-level entry point for `raptor dev`.
///
/// This wires together:
/// - project root detection and `[dev]` settings
/// - output directory preparation
/// - build/process backend and the tree watcher
/// - Ctrl-C handling
///
/// and then blocks on the coordinator task until it ends.
pub async fn run_dev(root: impl Into<PathBuf>, args: DevArgs) -> Result<()> {
    let root = root.into();
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let marker = find_project_marker(fs.as_ref(), &root)?;
    let mut settings = load_dev_settings(fs.as_ref(), &marker);
    if let Some(grace) = args.stop_grace {
        settings.stop_grace = Some(grace);
    }

    println!("Starting 🦖 Raptor development server with 🔥 hot reload 🔥");
    info!(
        root = ?root,
        marker = ?marker,
        build = %settings.build_command_line(),
        artifact = ?settings.artifact,
        "dev server starting"
    );

    let (control_tx, control_rx) = mpsc::channel::<CoordinatorEvent>(8);

    // Ctrl-C → graceful shutdown.
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            // Keep the sender alive; a closed channel means shutdown.
            std::future::pending::<()>().await;
        }
        let _ = control_tx.send(CoordinatorEvent::ShutdownRequested).await;
    });

    let runtime = build_runtime(root, &settings, fs, control_rx)?;

    tokio::spawn(runtime.run())
        .await
        .map_err(|e| DevError::Other(anyhow!("coordinator task failed: {e}")))?
}

/// Assemble the production coordinator for `root`.
pub fn build_runtime(
    root: PathBuf,
    settings: &DevSettings,
    fs: Arc<dyn FileSystem>,
    control_rx: mpsc::Receiver<CoordinatorEvent>,
) -> Result<Runtime<RealCycleBackend, TreeWatcher>> {
    let backend = RealCycleBackend::new(root.clone(), settings);
    backend.builder().prepare_output_dir(fs.as_ref())?;

    let watcher = TreeWatcher::new(root, fs);
    Ok(Runtime::new(
        CoreCoordinator::new(),
        backend,
        watcher,
        control_rx,
    ))
}
