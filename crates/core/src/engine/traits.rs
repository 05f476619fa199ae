//! Trait definitions for the engine module.

use async_trait::async_trait;
use std::path::Path;

use super::error::EngineError;
use super::types::ConversionJob;

/// An external transcoder that can list and convert the titles of a disc folder.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Returns the name of this engine implementation.
    fn name(&self) -> &str;

    /// Scans `source` and returns the engine's free-text title report.
    async fn scan(&self, source: &Path) -> Result<String, EngineError>;

    /// Converts a single title.
    ///
    /// Success only means the engine reported success; callers must check
    /// that `job.output_path` was actually written.
    async fn convert(&self, job: &ConversionJob) -> Result<(), EngineError>;

    /// Validates that the engine is installed and can be started.
    async fn validate(&self) -> Result<(), EngineError>;
}
