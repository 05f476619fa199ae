//! Concurrent extraction of every selected title.
//!
//! The extractor fans out one task per title, skips titles whose output file
//! already exists, waits for every task and folds all per-title failures into
//! a single [`BatchError`]:
//!
//! - **Skip**: an existing file at the output path counts as already converted
//! - **Convert**: the engine runs with its output streamed to our stdout/stderr
//! - **Verify**: a title is only converted if its output file exists afterwards

mod naming;
mod runner;
mod types;

pub use naming::{source_basename, OutputNaming};
pub use runner::Extractor;
pub use types::{BatchError, BatchReport, PlannedJob, TrackFailure, TrackOutcome};
