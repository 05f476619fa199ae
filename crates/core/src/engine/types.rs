//! Types for the engine module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::inventory::TrackDescriptor;

/// Name of the folder holding the title sets inside a DVD folder.
pub const VIDEO_TS_DIR: &str = "VIDEO_TS";

/// A single title conversion handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionJob {
    /// The title being converted.
    pub track: TrackDescriptor,
    /// DVD folder the title was scanned from.
    pub source_path: PathBuf,
    /// Folder the engine reads the title from (`<source>/VIDEO_TS`).
    pub input_dir: PathBuf,
    /// Where the engine must write the converted file.
    pub output_path: PathBuf,
    /// Preset name passed through to the engine.
    pub profile: String,
}

impl ConversionJob {
    /// Creates a job for `track`, reading from the `VIDEO_TS` folder of `source_path`.
    pub fn new(
        track: TrackDescriptor,
        source_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        profile: impl Into<String>,
    ) -> Self {
        let source_path = source_path.into();
        let input_dir = source_path.join(VIDEO_TS_DIR);
        Self {
            track,
            source_path,
            input_dir,
            output_path: output_path.into(),
            profile: profile.into(),
        }
    }

    /// The engine-assigned title id.
    pub fn track_id(&self) -> &str {
        &self.track.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_input_dir() {
        let job = ConversionJob::new(
            TrackDescriptor::new("4"),
            "/media/MY_DVD",
            "/out/High Profile_MY_DVD_4.mp4",
            "High Profile",
        );
        assert_eq!(job.input_dir, PathBuf::from("/media/MY_DVD/VIDEO_TS"));
        assert_eq!(job.track_id(), "4");
    }
}
