pub mod config;
pub mod engine;
pub mod extractor;
pub mod inventory;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, OutputConfig,
    SelectionConfig,
};
pub use engine::{ConversionJob, Engine, EngineConfig, EngineError, HandbrakeEngine};
pub use extractor::{
    BatchError, BatchReport, Extractor, OutputNaming, PlannedJob, TrackFailure, TrackOutcome,
};
pub use inventory::{
    fetch_inventory, parse_inventory, Inventory, InventoryError, TrackDescriptor, TrackSelection,
};
