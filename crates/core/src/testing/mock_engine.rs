//! Mock engine for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::engine::{ConversionJob, Engine, EngineError};

/// A recorded conversion for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    /// The job that was submitted.
    pub job: ConversionJob,
    /// Whether the engine reported success.
    pub success: bool,
}

/// Mock implementation of the Engine trait.
///
/// Provides controllable behavior for testing:
/// - Serve a canned scan report
/// - Fail chosen titles with a non-zero exit
/// - Report success for chosen titles without writing their output
/// - Track conversions for assertions
///
/// Successful conversions write a small placeholder file at the output path.
///
/// # Example
///
/// ```rust,ignore
/// use discrip_core::testing::MockEngine;
///
/// let engine = MockEngine::new();
/// engine.set_scan_report("+ title 1:\n  + duration: 00:42:00\n").await;
/// engine.set_failing_track("1").await;
///
/// // ... run an Extractor with Arc::new(engine.clone()) ...
///
/// assert_eq!(engine.conversion_count().await, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockEngine {
    /// Recorded conversions.
    conversions: Arc<RwLock<Vec<RecordedConversion>>>,
    /// Sources passed to `scan`.
    scans: Arc<RwLock<Vec<PathBuf>>>,
    /// Report returned by `scan`.
    scan_report: Arc<RwLock<String>>,
    /// If set, the next scan fails with this error.
    scan_error: Arc<RwLock<Option<EngineError>>>,
    /// Titles whose conversion exits with a failure status.
    failing_tracks: Arc<RwLock<HashSet<String>>>,
    /// Titles that "succeed" without writing an output file.
    skip_output_tracks: Arc<RwLock<HashSet<String>>>,
    /// Simulated conversion duration in milliseconds.
    conversion_duration_ms: Arc<RwLock<u64>>,
    /// Conversions currently running.
    in_flight: Arc<AtomicUsize>,
    /// Highest number of conversions seen running at once.
    max_in_flight: Arc<AtomicUsize>,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    /// Create a new mock engine.
    pub fn new() -> Self {
        Self {
            conversions: Arc::new(RwLock::new(Vec::new())),
            scans: Arc::new(RwLock::new(Vec::new())),
            scan_report: Arc::new(RwLock::new(String::new())),
            scan_error: Arc::new(RwLock::new(None)),
            failing_tracks: Arc::new(RwLock::new(HashSet::new())),
            skip_output_tracks: Arc::new(RwLock::new(HashSet::new())),
            conversion_duration_ms: Arc::new(RwLock::new(10)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Set the report returned by `scan`.
    pub async fn set_scan_report(&self, report: impl Into<String>) {
        *self.scan_report.write().await = report.into();
    }

    /// Make the next scan fail with the given error.
    pub async fn set_scan_error(&self, error: EngineError) {
        *self.scan_error.write().await = Some(error);
    }

    /// Make every conversion of `track_id` exit with status 1.
    pub async fn set_failing_track(&self, track_id: impl Into<String>) {
        self.failing_tracks.write().await.insert(track_id.into());
    }

    /// Make conversions of `track_id` succeed without writing output.
    pub async fn set_skip_output(&self, track_id: impl Into<String>) {
        self.skip_output_tracks.write().await.insert(track_id.into());
    }

    /// Set the simulated conversion duration.
    pub async fn set_conversion_duration(&self, duration: Duration) {
        *self.conversion_duration_ms.write().await = duration.as_millis() as u64;
    }

    /// Get all recorded conversions.
    pub async fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.conversions.read().await.clone()
    }

    /// Get the number of conversions attempted.
    pub async fn conversion_count(&self) -> usize {
        self.conversions.read().await.len()
    }

    /// Highest number of conversions that were running at the same time.
    pub fn max_concurrent_conversions(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Get the number of scans performed.
    pub async fn scan_count(&self) -> usize {
        self.scans.read().await.len()
    }

    /// Clear recorded conversions and scans.
    pub async fn clear_recorded(&self) {
        self.conversions.write().await.clear();
        self.scans.write().await.clear();
    }
}

#[async_trait]
impl Engine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    async fn scan(&self, source: &Path) -> Result<String, EngineError> {
        self.scans.write().await.push(source.to_path_buf());

        if let Some(err) = self.scan_error.write().await.take() {
            return Err(err);
        }

        Ok(self.scan_report.read().await.clone())
    }

    async fn convert(&self, job: &ConversionJob) -> Result<(), EngineError> {
        let fails = self.failing_tracks.read().await.contains(job.track_id());

        self.conversions.write().await.push(RecordedConversion {
            job: job.clone(),
            success: !fails,
        });

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        let duration_ms = *self.conversion_duration_ms.read().await;
        if duration_ms > 0 {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if fails {
            return Err(EngineError::Exited {
                code: Some(1),
                stderr: None,
            });
        }

        if !self.skip_output_tracks.read().await.contains(job.track_id()) {
            tokio::fs::write(&job.output_path, b"mock video").await?;
        }

        Ok(())
    }

    async fn validate(&self) -> Result<(), EngineError> {
        Ok(())
    }
}
