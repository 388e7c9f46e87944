//! Query-window bookkeeping for incremental polling
//!
//! A [`Checkpoint`] records the creation-time range already ingested. Each run
//! derives its query window from the previous checkpoint's upper bound and the
//! current wall clock, so successive windows tile exactly with no gap and no
//! overlap.

mod store;

pub use store::{CheckpointFile, CheckpointStore};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Creation-time range of previously ingested items, ISO-8601 UTC at second
/// precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub created_from: String,
    pub created_to: String,
}

/// Ephemeral query bounds for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWindow {
    pub from: String,
    pub to: String,
}

impl Checkpoint {
    /// Compute this run's query window and the checkpoint that replaces `self`
    /// once the run succeeds.
    ///
    /// The next checkpoint's `created_from` is the previous `created_to`, not
    /// the first item's creation time: the window end becomes the next window
    /// start exactly.
    pub fn advance(&self, now: DateTime<Utc>) -> (QueryWindow, Checkpoint) {
        let now = format_timestamp(&now);
        let window = QueryWindow {
            from: self.created_to.clone(),
            to: now.clone(),
        };
        let next = Checkpoint {
            created_from: self.created_to.clone(),
            created_to: now,
        };
        (window, next)
    }
}

/// Format a timestamp in the API's required UTC text form,
/// `YYYY-MM-DDTHH:MM:SSZ` with no fractional seconds.
pub fn format_timestamp<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_timestamp_is_second_precision_utc() {
        let date = utc("2024-03-05T12:34:56.789Z");
        assert_eq!(format_timestamp(&date), "2024-03-05T12:34:56Z");
    }

    #[test]
    fn test_format_timestamp_converts_offset_to_utc() {
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let date = offset.with_ymd_and_hms(2024, 3, 5, 5, 0, 0).unwrap();
        assert_eq!(format_timestamp(&date), "2024-03-05T00:00:00Z");
    }

    #[test]
    fn test_advance_window_starts_at_previous_upper_bound() {
        let checkpoint = Checkpoint {
            created_from: "1900-01-01T00:00:00Z".to_string(),
            created_to: "2024-01-01T00:00:00Z".to_string(),
        };
        let now = utc("2024-01-02T09:30:00Z");

        let (window, next) = checkpoint.advance(now);

        assert_eq!(window.from, "2024-01-01T00:00:00Z");
        assert_eq!(window.to, "2024-01-02T09:30:00Z");
        assert_eq!(next.created_from, "2024-01-01T00:00:00Z");
        assert_eq!(next.created_to, "2024-01-02T09:30:00Z");
    }

    #[test]
    fn test_consecutive_advances_tile_without_gap_or_overlap() {
        let first = Checkpoint {
            created_from: "1900-01-01T00:00:00Z".to_string(),
            created_to: "2024-01-01T00:00:00Z".to_string(),
        };

        let (_, second) = first.advance(utc("2024-01-02T00:00:00Z"));
        let (window, third) = second.advance(utc("2024-01-03T00:00:00Z"));

        assert_eq!(second.created_from, first.created_to);
        assert_eq!(window.from, second.created_to);
        assert_eq!(third.created_from, second.created_to);
    }
}
