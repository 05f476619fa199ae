//! Scan report parser.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::error::InventoryError;
use super::types::{Inventory, TrackDescriptor};

static TITLE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+?title\s+(\d+):").expect("title pattern is valid"));

static DURATION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.+?duration: (\d+):(\d+):\d+$").expect("duration pattern is valid")
});

/// Parses an engine scan report into an [`Inventory`].
///
/// Lines are processed in order. A title line appends a new track; a
/// duration line sets the runtime of the last appended track, overwriting
/// any earlier duration for it. Duration lines seen before the first title
/// are not attached to anything and are listed in
/// [`Inventory::orphan_durations`]. Every other line is ignored.
///
/// A report without title lines yields an empty inventory.
pub fn parse_inventory(report: &str) -> Result<Inventory, InventoryError> {
    let mut inventory = Inventory::default();

    for (idx, raw_line) in report.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');

        if let Some(caps) = TITLE_LINE.captures(line) {
            inventory.tracks.push(TrackDescriptor::new(&caps[1]));
            continue;
        }

        if let Some(caps) = DURATION_LINE.captures(line) {
            let minutes = runtime_minutes(line, &caps[1], &caps[2])?;

            match inventory.tracks.last_mut() {
                Some(track) => track.runtime_minutes = minutes,
                None => inventory.orphan_durations.push(idx + 1),
            }
        }
    }

    Ok(inventory)
}

/// Converts the `HH` and `MM` fields of a duration into whole minutes.
fn runtime_minutes(line: &str, hours: &str, minutes: &str) -> Result<u32, InventoryError> {
    let parse_error = |field: &'static str, value: &str| InventoryError::Parse {
        line: line.to_string(),
        field,
        value: value.to_string(),
    };

    let h: u32 = hours.parse().map_err(|_| parse_error("hours", hours))?;
    let m: u32 = minutes.parse().map_err(|_| parse_error("minutes", minutes))?;

    h.checked_mul(60)
        .and_then(|h| h.checked_add(m))
        .ok_or_else(|| parse_error("hours", hours))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, minutes: u32) -> TrackDescriptor {
        TrackDescriptor::new(id).with_runtime(minutes)
    }

    #[test]
    fn test_empty_report() {
        let inventory = parse_inventory("").unwrap();
        assert!(inventory.is_empty());
        assert!(inventory.orphan_durations.is_empty());
    }

    #[test]
    fn test_report_without_titles() {
        let report = "[12:00:01] hb_init: starting libhb thread\n\
                      [12:00:01] scan: DVD has 0 title(s)\n\
                      HandBrake has exited.\n";
        let inventory = parse_inventory(report).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_titles_with_durations() {
        let report = "+ title 2:\n  + duration: 00:01:00\n+ title 4:\n  + duration: 00:26:00\n";
        let inventory = parse_inventory(report).unwrap();
        assert_eq!(inventory.tracks, vec![track("2", 1), track("4", 26)]);
    }

    #[test]
    fn test_hours_are_folded_into_minutes() {
        let inventory = parse_inventory("+ title 1:\n  + duration: 01:02:59\n").unwrap();
        assert_eq!(inventory.tracks, vec![track("1", 62)]);

        let inventory = parse_inventory("+ title 1:\n  + duration: 00:26:13\n").unwrap();
        assert_eq!(inventory.tracks[0].runtime_minutes, 26);
    }

    #[test]
    fn test_title_without_duration_keeps_zero() {
        let report = "+ title 3:\n+ title 9:\n  + duration: 00:10:00\n";
        let inventory = parse_inventory(report).unwrap();
        assert_eq!(inventory.tracks, vec![track("3", 0), track("9", 10)]);
    }

    #[test]
    fn test_later_duration_overwrites() {
        let report = "+ title 1:\n  + duration: 00:10:00\n  + duration: 00:12:00\n";
        let inventory = parse_inventory(report).unwrap();
        assert_eq!(inventory.tracks, vec![track("1", 12)]);
    }

    #[test]
    fn test_orphan_duration_is_reported_not_attached() {
        let report = "  + duration: 00:05:00\n+ title 1:\n  + duration: 00:07:00\n";
        let inventory = parse_inventory(report).unwrap();
        assert_eq!(inventory.tracks, vec![track("1", 7)]);
        assert_eq!(inventory.orphan_durations, vec![1]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let report = "+ title 2:\r\n  + duration: 00:01:00\r\n";
        let inventory = parse_inventory(report).unwrap();
        assert_eq!(inventory.tracks, vec![track("2", 1)]);
    }

    #[test]
    fn test_chapter_durations_are_ignored() {
        let report = "+ title 5:\n  + duration: 00:26:00\n  + chapters:\n    \
                      + 1: duration 00:13:00\n    + 2: duration 00:13:00\n";
        let inventory = parse_inventory(report).unwrap();
        assert_eq!(inventory.tracks, vec![track("5", 26)]);
    }

    #[test]
    fn test_ids_are_not_renumbered() {
        let report = "+ title 12:\n+ title 3:\n+ title 07:\n";
        let ids: Vec<String> = parse_inventory(report)
            .unwrap()
            .tracks
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["12", "3", "07"]);
    }

    #[test]
    fn test_out_of_range_hours_fail() {
        let report = "+ title 1:\n  + duration: 99999999999:00:00\n";
        let err = parse_inventory(report).unwrap_err();
        match err {
            InventoryError::Parse { line, field, value } => {
                assert_eq!(field, "hours");
                assert_eq!(value, "99999999999");
                assert!(line.contains("duration: 99999999999:00:00"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_out_of_range_minutes_fail() {
        let report = "+ title 1:\n  + duration: 00:99999999999:00\n";
        let err = parse_inventory(report).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::Parse {
                field: "minutes",
                ..
            }
        ));
    }

    #[test]
    fn test_runtime_overflow_fails() {
        let report = "+ title 1:\n  + duration: 4000000000:00:00\n";
        assert!(parse_inventory(report).is_err());
    }
}
