//! Engine module for driving the external transcoder.
//!
//! This module provides the `Engine` trait and the HandBrakeCLI implementation
//! used to scan a disc folder for titles and to convert a single title.
//!
//! # Example
//!
//! ```ignore
//! use discrip_core::engine::{Engine, EngineConfig, HandbrakeEngine};
//!
//! let engine = HandbrakeEngine::new(EngineConfig::default());
//!
//! // Make sure HandBrakeCLI can be spawned
//! engine.validate().await?;
//!
//! // Raw scan report, ready for the inventory parser
//! let report = engine.scan(Path::new("/media/MY_DVD")).await?;
//! ```

mod config;
mod error;
mod handbrake;
mod traits;
mod types;

pub use config::EngineConfig;
pub use error::EngineError;
pub use handbrake::HandbrakeEngine;
pub use traits::Engine;
pub use types::{ConversionJob, VIDEO_TS_DIR};
