// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`build`] runs the external build step and times it.
//! - [`process`] owns the managed app process (start, interrupt, wait).
//! - [`backend`] provides the `CycleBackend` trait the runtime drives, with
//!   `RealCycleBackend` for production.
//! - [`duration`] has the small duration parser/formatter shared with config.

pub mod backend;
pub mod build;
pub mod duration;
pub mod process;

pub use backend::{CycleBackend, RealCycleBackend};
pub use build::{BuildFailure, BuildOutcome, BuildRunner};
pub use process::ProcessSupervisor;
