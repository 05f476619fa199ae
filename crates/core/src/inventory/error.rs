//! Error types for the inventory module.

use thiserror::Error;

use crate::engine::EngineError;

/// Errors that can occur while building a title inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A duration line carried a field that is not a usable integer.
    #[error("failed to parse {field} from line {line:?}: {value:?}")]
    Parse {
        line: String,
        field: &'static str,
        value: String,
    },

    /// The engine scan itself failed.
    #[error("failed to scan titles: {0}")]
    Engine(#[from] EngineError),
}
