//! Testing utilities and mock implementations.
//!
//! This module provides a mock implementation of the `Engine` trait,
//! allowing extraction to be tested without HandBrakeCLI installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use discrip_core::testing::{fixtures, MockEngine};
//!
//! let engine = MockEngine::new();
//! engine.set_scan_report(fixtures::scan_report(&[("2", 1), ("4", 26)])).await;
//! engine.set_failing_track("4").await;
//! ```

mod mock_engine;

pub use mock_engine::{MockEngine, RecordedConversion};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::inventory::TrackDescriptor;

    /// Builds a HandBrakeCLI-style scan report for the given `(id, minutes)` titles.
    pub fn scan_report(titles: &[(&str, u32)]) -> String {
        let mut report = String::from("[10:00:00] hb_init: starting libhb thread\n");
        report.push_str(&format!(
            "[10:00:01] scan: DVD has {} title(s)\n",
            titles.len()
        ));

        for (id, minutes) in titles {
            report.push_str(&format!("+ title {}:\n", id));
            report.push_str("  + vts 1, ttn 1, cells 0->7 (2034571 blocks)\n");
            report.push_str(&format!(
                "  + duration: {:02}:{:02}:17\n",
                minutes / 60,
                minutes % 60
            ));
            report.push_str("  + size: 720x480, pixel aspect: 32/27, display aspect: 1.78, 29.970 fps\n");
            report.push_str("  + chapters:\n");
            report.push_str("    + 1: duration 00:04:10\n");
        }

        report.push_str("HandBrake has exited.\n");
        report
    }

    /// Title descriptors matching [`scan_report`] input.
    pub fn tracks(titles: &[(&str, u32)]) -> Vec<TrackDescriptor> {
        titles
            .iter()
            .map(|(id, minutes)| TrackDescriptor::new(*id).with_runtime(*minutes))
            .collect()
    }
}
