//! Title inventory of a disc folder.
//!
//! The engine's scan report is free text. Title lines (`+ title 4:`) open a
//! new track and duration lines (`+ duration: 00:26:00`) attach a runtime to
//! the most recently opened track.

mod error;
mod fetcher;
mod parser;
mod selection;
mod types;

pub use error::InventoryError;
pub use fetcher::fetch_inventory;
pub use parser::parse_inventory;
pub use selection::TrackSelection;
pub use types::{Inventory, TrackDescriptor};
