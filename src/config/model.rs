// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Environment variable that tells the managed app it runs under the dev
/// server.
pub const DEV_ENV_VAR: &str = "RAPTOR_DEVELOPMENT";

/// Top-level view of a `.toml` marker file.
///
/// The marker is the application's own config; only the optional `[dev]`
/// table matters here and every other table is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMarkerFile {
    #[serde(default)]
    pub dev: Option<RawDevSection>,
}

/// `[dev]` table as written by the user:
///
/// ```toml
/// [dev]
/// build_cmd = ["go", "build", "-o", "bin/raptorapp"]
/// artifact = "bin/raptorapp"
/// output_dir = "bin"
/// stop_grace = "3s"
///
/// [dev.env]
/// APP_PORT = "3000"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDevSection {
    #[serde(default)]
    pub build_cmd: Option<Vec<String>>,
    #[serde(default)]
    pub artifact: Option<String>,
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub stop_grace: Option<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Effective settings for one dev-server session. Paths are relative to the
/// project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevSettings {
    pub build_program: String,
    pub build_args: Vec<String>,
    pub output_dir: PathBuf,
    pub artifact: PathBuf,
    /// Extra variables added on top of the inherited environment of the
    /// managed process.
    pub env: BTreeMap<String, String>,
    /// `None` waits for the app to exit indefinitely after the interrupt.
    pub stop_grace: Option<Duration>,
}

impl Default for DevSettings {
    fn default() -> Self {
        let mut env = BTreeMap::new();
        env.insert(DEV_ENV_VAR.to_string(), "true".to_string());

        Self {
            build_program: "go".to_string(),
            build_args: vec![
                "build".to_string(),
                "-o".to_string(),
                "bin/raptorapp".to_string(),
            ],
            output_dir: PathBuf::from("bin"),
            artifact: PathBuf::from("bin/raptorapp"),
            env,
            stop_grace: None,
        }
    }
}

impl DevSettings {
    /// The build command rendered for log output.
    pub fn build_command_line(&self) -> String {
        std::iter::once(self.build_program.as_str())
            .chain(self.build_args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
