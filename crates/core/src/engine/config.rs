//! Configuration for the engine module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the HandBrakeCLI engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path to the HandBrakeCLI binary.
    #[serde(default = "default_engine_path")]
    pub path: PathBuf,

    /// HandBrake preset applied to every title.
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Arguments placed before the engine arguments.
    /// Needed when the engine is started through a launcher,
    /// e.g. `flatpak` with `["run", "fr.handbrake.HandBrakeCLI"]`.
    #[serde(default)]
    pub launcher_args: Vec<String>,

    /// Additional arguments appended to every engine invocation.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_engine_path() -> PathBuf {
    PathBuf::from("HandBrakeCLI")
}

fn default_profile() -> String {
    "High Profile".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: default_engine_path(),
            profile: default_profile(),
            launcher_args: Vec::new(),
            extra_args: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Creates a new config with a custom engine path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Sets the preset profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Sets the launcher arguments.
    pub fn with_launcher_args(mut self, args: Vec<String>) -> Self {
        self.launcher_args = args;
        self
    }
}
