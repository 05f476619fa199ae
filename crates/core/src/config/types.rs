use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::engine::EngineConfig;
use crate::extractor::OutputNaming;
use crate::inventory::TrackSelection;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
}

/// Output location configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory converted titles are written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// File extension (container) of converted titles
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            extension: default_extension(),
        }
    }
}

impl OutputConfig {
    pub fn naming(&self) -> OutputNaming {
        OutputNaming::new(&self.dir, &self.extension)
    }
}

fn default_output_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join("Desktop"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_extension() -> String {
    "mp4".to_string()
}

/// Title selection configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SelectionConfig {
    /// Skip titles shorter than this many minutes (0 keeps everything)
    #[serde(default)]
    pub min_minutes: u32,
    /// Only convert these title ids (empty converts all)
    #[serde(default)]
    pub tracks: Vec<String>,
}

impl SelectionConfig {
    pub fn selection(&self) -> TrackSelection {
        TrackSelection::all()
            .with_min_minutes(self.min_minutes)
            .with_only(self.tracks.iter().cloned())
    }
}
