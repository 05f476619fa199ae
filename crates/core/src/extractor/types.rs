//! Types for the extractor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::engine::{ConversionJob, EngineError};

/// Why a single title could not be converted.
#[derive(Debug, Error)]
pub enum TrackFailure {
    /// The engine could not be started or exited with a failure status.
    #[error("track {track_id}: {source}")]
    Engine {
        track_id: String,
        source: EngineError,
    },

    /// The engine reported success but left no file behind.
    #[error("failed to create track {}", .output_path.display())]
    OutputMissing {
        track_id: String,
        output_path: PathBuf,
    },

    /// The title's task ended without reporting back (panic or runtime shutdown).
    #[error("track {track_id}: task aborted: {reason}")]
    Aborted { track_id: String, reason: String },
}

impl TrackFailure {
    /// Id of the title that failed.
    pub fn track_id(&self) -> &str {
        match self {
            Self::Engine { track_id, .. }
            | Self::OutputMissing { track_id, .. }
            | Self::Aborted { track_id, .. } => track_id,
        }
    }
}

/// A batch in which at least one title failed.
///
/// The message lists every failure, one per line, in completion order.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("{}", join_failures(.failures))]
    Failed { failures: Vec<TrackFailure> },
}

fn join_failures(failures: &[TrackFailure]) -> String {
    failures.iter().map(|f| format!("{}\n", f)).collect()
}

impl BatchError {
    /// All per-title failures.
    pub fn failures(&self) -> &[TrackFailure] {
        match self {
            Self::Failed { failures } => failures,
        }
    }

    /// Ids of the titles that failed.
    pub fn failed_track_ids(&self) -> Vec<&str> {
        self.failures().iter().map(TrackFailure::track_id).collect()
    }
}

/// What happened to a title that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrackOutcome {
    /// Output already existed, the engine was not invoked.
    Skipped {
        track_id: String,
        output_path: PathBuf,
    },
    /// The engine ran and produced the output file.
    Converted {
        track_id: String,
        output_path: PathBuf,
        duration_ms: u64,
    },
}

impl TrackOutcome {
    pub fn track_id(&self) -> &str {
        match self {
            Self::Skipped { track_id, .. } | Self::Converted { track_id, .. } => track_id,
        }
    }

    pub fn output_path(&self) -> &PathBuf {
        match self {
            Self::Skipped { output_path, .. } | Self::Converted { output_path, .. } => output_path,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Result of a batch in which every title was skipped or converted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One entry per title that did not fail, in submission order.
    pub outcomes: Vec<TrackOutcome>,
}

impl BatchReport {
    /// Number of titles the engine converted in this run.
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_skipped()).count()
    }

    /// Number of titles skipped because their output already existed.
    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }
}

/// A job as it would be dispatched, for dry runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedJob {
    pub job: ConversionJob,
    /// Whether the output already exists, i.e. the title would be skipped.
    pub exists: bool,
}
