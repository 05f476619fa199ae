//! Output file naming.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Where converted titles are written and under which name.
///
/// Names are `<profile>_<source folder name>_<title id>.<extension>` inside
/// `output_dir`, so the same title of the same disc with the same profile
/// always maps to the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputNaming {
    pub output_dir: PathBuf,
    pub extension: String,
}

impl OutputNaming {
    pub fn new(output_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: extension.into(),
        }
    }

    /// Output path of title `track_id` from `source` converted with `profile`.
    pub fn output_path(&self, profile: &str, source: &Path, track_id: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{}_{}.{}",
            profile,
            source_basename(source),
            track_id,
            self.extension
        ))
    }
}

/// Name of the folder `source` points to.
///
/// Trailing `.` and `..` components are resolved first, relative paths
/// against the current directory. Only a filesystem root yields `"root"`.
pub fn source_basename(source: &Path) -> String {
    if let Some(name) = source.file_name() {
        return name.to_string_lossy().to_string();
    }

    std::fs::canonicalize(source)
        .unwrap_or_else(|_| normalize(source))
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "root".to_string())
}

/// Lexically folds `.` and `..` for paths that do not exist on disk.
fn normalize(source: &Path) -> PathBuf {
    let absolute = std::path::absolute(source).unwrap_or_else(|_| source.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
