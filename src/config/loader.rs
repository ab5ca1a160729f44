// src/config/loader.rs

use std::path::Path;

use tracing::{debug, warn};

use crate::config::model::{DevSettings, RawMarkerFile};
use crate::errors::Result;
use crate::fs::FileSystem;

/// Parse marker-file text and turn its `[dev]` table into settings.
///
/// A file without `[dev]` yields the defaults.
pub fn load_from_str(contents: &str) -> Result<DevSettings> {
    let raw: RawMarkerFile = toml::from_str(contents)?;
    match raw.dev {
        Some(section) => DevSettings::try_from(section),
        None => Ok(DevSettings::default()),
    }
}

/// Resolve the dev settings for a project given its marker file.
///
/// Only `.toml` markers are parsed. Any problem reading or validating the
/// file is logged and the defaults are used instead: the marker belongs to
/// the application, and the dev server must not refuse to start over it.
pub fn load_dev_settings(fs: &dyn FileSystem, marker: &Path) -> DevSettings {
    let is_toml = marker
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if !is_toml {
        debug!(marker = ?marker, "marker is not TOML; using default dev settings");
        return DevSettings::default();
    }

    let contents = match fs.read_to_string(marker) {
        Ok(c) => c,
        Err(err) => {
            warn!(marker = ?marker, error = %err, "could not read marker file; using default dev settings");
            return DevSettings::default();
        }
    };

    match load_from_str(&contents) {
        Ok(settings) => {
            debug!(marker = ?marker, ?settings, "loaded dev settings");
            settings
        }
        Err(err) => {
            warn!(marker = ?marker, error = %err, "invalid [dev] settings; using defaults");
            DevSettings::default()
        }
    }
}
