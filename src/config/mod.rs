// src/config/mod.rs

//! Project configuration: root detection, ignore patterns and the optional
//! `[dev]` settings table.

pub mod ignore;
pub mod loader;
pub mod model;
pub mod project;
pub mod validate;

pub use ignore::{load_ignore_set, IgnoreSet, DEFAULT_IGNORE_PATTERNS, IGNORE_FILE};
pub use loader::{load_dev_settings, load_from_str};
pub use model::{DevSettings, RawDevSection, RawMarkerFile, DEV_ENV_VAR};
pub use project::{find_project_marker, MARKER_FILES};
