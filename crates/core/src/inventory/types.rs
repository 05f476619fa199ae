use serde::{Deserialize, Serialize};

/// One selectable title on the disc.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackDescriptor {
    /// Engine-assigned title number, kept as text.
    pub id: String,
    /// Runtime in whole minutes (seconds are dropped).
    pub runtime_minutes: u32,
}

impl TrackDescriptor {
    /// Creates a track with no known runtime.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            runtime_minutes: 0,
        }
    }

    /// Sets the runtime.
    pub fn with_runtime(mut self, minutes: u32) -> Self {
        self.runtime_minutes = minutes;
        self
    }
}

/// Parsed scan report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Titles in report order.
    pub tracks: Vec<TrackDescriptor>,
    /// 1-based line numbers of duration lines seen before any title line.
    pub orphan_durations: Vec<usize>,
}

impl Inventory {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Sum of all title runtimes in minutes.
    pub fn total_minutes(&self) -> u64 {
        self.tracks.iter().map(|t| u64::from(t.runtime_minutes)).sum()
    }
}
