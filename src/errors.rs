// src/errors.rs

//! Crate-wide error types.
//!
//! Only the fatal conditions get their own variants; everything that a
//! reload cycle can recover from is logged where it happens and never
//! travels through this type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevError {
    #[error("Please run this command in the root of a Raptor project (no config file found in {dir:?})")]
    NotProjectRoot { dir: PathBuf },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Error setting watcher: {0}")]
    WatcherInit(String),

    #[error("Error starting {program:?}: {source}")]
    ProcessStart {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DevError>;
