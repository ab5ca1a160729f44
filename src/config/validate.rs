// src/config/validate.rs

use std::path::PathBuf;

use crate::config::model::{DevSettings, RawDevSection};
use crate::errors::{DevError, Result};
use crate::exec::duration::parse_duration;

impl TryFrom<RawDevSection> for DevSettings {
    type Error = DevError;

    fn try_from(raw: RawDevSection) -> std::result::Result<Self, Self::Error> {
        let mut settings = DevSettings::default();

        if let Some(cmd) = raw.build_cmd {
            let (program, args) = split_build_cmd(cmd)?;
            settings.build_program = program;
            settings.build_args = args;
        }

        if let Some(artifact) = raw.artifact {
            settings.artifact = non_empty_path("artifact", artifact)?;
        }

        if let Some(dir) = raw.output_dir {
            settings.output_dir = non_empty_path("output_dir", dir)?;
        }

        if let Some(grace) = raw.stop_grace {
            let dur = parse_duration(&grace).map_err(|e| {
                DevError::ConfigError(format!("[dev].stop_grace: {e}"))
            })?;
            settings.stop_grace = Some(dur);
        }

        settings.env.extend(raw.env);

        Ok(settings)
    }
}

fn split_build_cmd(cmd: Vec<String>) -> Result<(String, Vec<String>)> {
    let mut parts = cmd.into_iter();
    match parts.next() {
        Some(program) if !program.trim().is_empty() => Ok((program, parts.collect())),
        _ => Err(DevError::ConfigError(
            "[dev].build_cmd must name a program as its first element".to_string(),
        )),
    }
}

fn non_empty_path(field: &str, value: String) -> Result<PathBuf> {
    if value.trim().is_empty() {
        return Err(DevError::ConfigError(format!(
            "[dev].{field} must not be empty"
        )));
    }
    Ok(PathBuf::from(value))
}
