//! Filtering of scanned titles before extraction.

use serde::{Deserialize, Serialize};

use super::types::TrackDescriptor;

/// Which titles of an inventory should be converted.
///
/// The default keeps every title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSelection {
    /// Titles shorter than this many minutes are dropped.
    #[serde(default)]
    pub min_minutes: u32,

    /// If non-empty, only these title ids are kept.
    #[serde(default)]
    pub only: Vec<String>,
}

impl TrackSelection {
    /// Selection that keeps every title.
    pub fn all() -> Self {
        Self::default()
    }

    /// Sets the minimum runtime.
    pub fn with_min_minutes(mut self, minutes: u32) -> Self {
        self.min_minutes = minutes;
        self
    }

    /// Restricts the selection to the given title ids.
    pub fn with_only<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `track` passes this selection.
    pub fn matches(&self, track: &TrackDescriptor) -> bool {
        track.runtime_minutes >= self.min_minutes
            && (self.only.is_empty() || self.only.iter().any(|id| *id == track.id))
    }

    /// Returns the selected titles, keeping their order.
    pub fn apply(&self, tracks: &[TrackDescriptor]) -> Vec<TrackDescriptor> {
        tracks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks() -> Vec<TrackDescriptor> {
        vec![
            TrackDescriptor::new("2").with_runtime(1),
            TrackDescriptor::new("4").with_runtime(26),
            TrackDescriptor::new("5").with_runtime(26),
            TrackDescriptor::new("9").with_runtime(95),
        ]
    }

    fn ids(tracks: &[TrackDescriptor]) -> Vec<&str> {
        tracks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_default_keeps_everything() {
        let selected = TrackSelection::all().apply(&tracks());
        assert_eq!(ids(&selected), vec!["2", "4", "5", "9"]);
    }

    #[test]
    fn test_min_minutes() {
        let selected = TrackSelection::all().with_min_minutes(26).apply(&tracks());
        assert_eq!(ids(&selected), vec!["4", "5", "9"]);
    }

    #[test]
    fn test_only_ids_keep_report_order() {
        let selected = TrackSelection::all()
            .with_only(["9", "2"])
            .apply(&tracks());
        assert_eq!(ids(&selected), vec!["2", "9"]);
    }

    #[test]
    fn test_combined_filters() {
        let selected = TrackSelection::all()
            .with_min_minutes(10)
            .with_only(["2", "5"])
            .apply(&tracks());
        assert_eq!(ids(&selected), vec!["5"]);
    }

    #[test]
    fn test_unknown_ids_select_nothing() {
        let selected = TrackSelection::all().with_only(["42"]).apply(&tracks());
        assert!(selected.is_empty());
    }
}
