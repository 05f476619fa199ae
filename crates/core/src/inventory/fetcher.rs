use std::path::Path;
use tracing::{info, warn};

use crate::engine::Engine;

use super::error::InventoryError;
use super::parser::parse_inventory;
use super::types::Inventory;

/// Scans `source` with `engine` and parses the resulting report.
pub async fn fetch_inventory<E>(engine: &E, source: &Path) -> Result<Inventory, InventoryError>
where
    E: Engine + ?Sized,
{
    info!("Scanning titles of {:?} with {}", source, engine.name());

    let report = engine.scan(source).await?;
    let inventory = parse_inventory(&report)?;

    for line in &inventory.orphan_durations {
        warn!(
            "Ignoring duration on report line {} that precedes any title",
            line
        );
    }

    info!(
        "Found {} title(s), {} minute(s) in total",
        inventory.len(),
        inventory.total_minutes()
    );

    Ok(inventory)
}
