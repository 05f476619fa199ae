//! Extractor implementation.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::engine::{ConversionJob, Engine};
use crate::inventory::TrackDescriptor;

use super::naming::OutputNaming;
use super::types::{BatchError, BatchReport, PlannedJob, TrackFailure, TrackOutcome};

/// Converts every title of a disc folder concurrently.
///
/// One task is spawned per title, with no concurrency cap.
pub struct Extractor<E>
where
    E: Engine + 'static,
{
    engine: Arc<E>,
    naming: OutputNaming,
    profile: String,
}

impl<E> Extractor<E>
where
    E: Engine + 'static,
{
    /// Create a new extractor.
    pub fn new(engine: Arc<E>, naming: OutputNaming, profile: impl Into<String>) -> Self {
        Self {
            engine,
            naming,
            profile: profile.into(),
        }
    }

    /// Preset name used for every title.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Builds the job for one title of `source`.
    pub fn job_for(&self, source: &Path, track: &TrackDescriptor) -> ConversionJob {
        let output_path = self.naming.output_path(&self.profile, source, &track.id);
        ConversionJob::new(track.clone(), source, output_path, self.profile.clone())
    }

    /// Lists the jobs `extract` would run, without running anything.
    pub async fn plan(&self, source: &Path, tracks: &[TrackDescriptor]) -> Vec<PlannedJob> {
        let mut planned = Vec::with_capacity(tracks.len());
        for track in tracks {
            let job = self.job_for(source, track);
            let exists = output_exists(&job.output_path).await;
            planned.push(PlannedJob { job, exists });
        }
        planned
    }

    /// Converts every title in `tracks`.
    ///
    /// All titles run to completion even if some fail. Returns the report
    /// when every title was either skipped or converted, or a single
    /// [`BatchError`] carrying every failure otherwise.
    pub async fn extract(
        &self,
        source: &Path,
        tracks: &[TrackDescriptor],
    ) -> Result<BatchReport, BatchError> {
        let started_at = Utc::now();

        // One slot per task, so no sender ever waits.
        let (failure_tx, mut failure_rx) = mpsc::channel::<TrackFailure>(tracks.len().max(1));

        let mut track_ids = Vec::with_capacity(tracks.len());
        let mut handles = Vec::with_capacity(tracks.len());

        for track in tracks {
            let job = self.job_for(source, track);
            let engine = Arc::clone(&self.engine);
            let failure_tx = failure_tx.clone();

            info!("Extracting track {:?}", track);
            track_ids.push(track.id.clone());

            handles.push(tokio::spawn(async move {
                match extract_track(engine.as_ref(), job).await {
                    Ok(outcome) => Some(outcome),
                    Err(failure) => {
                        warn!("{}", failure);
                        let _ = failure_tx.send(failure).await;
                        None
                    }
                }
            }));
        }
        drop(failure_tx);

        info!("Waiting for all {} track task(s) to finish...", handles.len());
        let results = join_all(handles).await;

        let mut outcomes = Vec::with_capacity(results.len());
        let mut aborted = Vec::new();

        for (track_id, result) in track_ids.into_iter().zip(results) {
            match result {
                Ok(Some(outcome)) => outcomes.push(outcome),
                Ok(None) => {}
                Err(e) => aborted.push(TrackFailure::Aborted {
                    track_id,
                    reason: e.to_string(),
                }),
            }
        }

        let mut failures = Vec::new();
        while let Ok(failure) = failure_rx.try_recv() {
            failures.push(failure);
        }
        failures.extend(aborted);

        if !failures.is_empty() {
            return Err(BatchError::Failed { failures });
        }

        Ok(BatchReport {
            started_at,
            finished_at: Utc::now(),
            outcomes,
        })
    }
}

/// Runs one title: skip if present, convert, then check the file appeared.
async fn extract_track<E>(engine: &E, job: ConversionJob) -> Result<TrackOutcome, TrackFailure>
where
    E: Engine + ?Sized,
{
    let track_id = job.track_id().to_string();

    if output_exists(&job.output_path).await {
        info!(
            "Skipping track {} - file already exists at {:?}",
            track_id, job.output_path
        );
        return Ok(TrackOutcome::Skipped {
            track_id,
            output_path: job.output_path,
        });
    }

    info!("Creating track {}, {:?}", track_id, job.output_path);
    let start = Instant::now();

    if let Err(source) = engine.convert(&job).await {
        return Err(TrackFailure::Engine { track_id, source });
    }

    if !output_exists(&job.output_path).await {
        return Err(TrackFailure::OutputMissing {
            track_id,
            output_path: job.output_path,
        });
    }

    Ok(TrackOutcome::Converted {
        track_id,
        output_path: job.output_path,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

async fn output_exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
