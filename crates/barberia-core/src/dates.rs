//! # Date Presets
//!
//! Quick date-range presets for the dashboard filter bar.
//!
//! ## The Three Presets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QUICK RANGES (relative to "today")                                     │
//! │                                                                         │
//! │  Today:  [today ────────────────────────────────────── today]           │
//! │                                                                         │
//! │  Week:   [monday of current week ───────────────────── today]           │
//! │          The week starts on MONDAY. A Sunday belongs to the week        │
//! │          that began six days earlier, not to the next one.              │
//! │                                                                         │
//! │  Month:  [first day of current month ───────────────── today]           │
//! │                                                                         │
//! │  All ranges end at today, never in the future.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use barberia_core::dates::DatePreset;
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 19).unwrap(); // a Wednesday
//! let range = DatePreset::Week.resolve(today);
//! assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 6, 17).unwrap());
//! assert_eq!(range.end, today);
//! ```

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::DateRange;

// =============================================================================
// Date Preset
// =============================================================================

/// A named quick range offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePreset {
    /// Just today.
    Today,
    /// Monday of the current week through today.
    Week,
    /// First day of the current month through today.
    Month,
}

impl DatePreset {
    /// Resolves the preset against a reference date.
    ///
    /// Pure: the caller supplies "today" so the resolution is testable and
    /// the same preset yields the same range for the same reference date.
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        let start = match self {
            DatePreset::Today => today,
            DatePreset::Week => {
                // num_days_from_monday: Monday=0 .. Sunday=6
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
            }
            // with_day(1) only fails for dates chrono cannot represent;
            // fall back to the single day rather than panic.
            DatePreset::Month => today.with_day(1).unwrap_or(today),
        };

        DateRange::new(start, today)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_today_is_single_day() {
        let today = date("2024-06-19");
        let range = DatePreset::Today.resolve(today);
        assert_eq!(range, DateRange::single_day(today));
    }

    #[test]
    fn test_week_starts_on_monday() {
        // 2024-06-19 is a Wednesday; the week began Monday 2024-06-17
        let range = DatePreset::Week.resolve(date("2024-06-19"));
        assert_eq!(range.start, date("2024-06-17"));
        assert_eq!(range.end, date("2024-06-19"));
    }

    #[test]
    fn test_week_on_monday_is_single_day() {
        let monday = date("2024-06-17");
        let range = DatePreset::Week.resolve(monday);
        assert_eq!(range, DateRange::single_day(monday));
    }

    #[test]
    fn test_week_sunday_belongs_to_previous_monday() {
        // 2024-06-23 is a Sunday; its week began Monday 2024-06-17,
        // six days earlier — NOT the following Monday
        let range = DatePreset::Week.resolve(date("2024-06-23"));
        assert_eq!(range.start, date("2024-06-17"));
        assert_eq!(range.end, date("2024-06-23"));
    }

    #[test]
    fn test_week_crosses_month_boundary() {
        // 2024-07-02 is a Tuesday; the week began Monday 2024-07-01
        let range = DatePreset::Week.resolve(date("2024-07-02"));
        assert_eq!(range.start, date("2024-07-01"));

        // 2024-05-01 is a Wednesday; the week began Monday 2024-04-29
        let range = DatePreset::Week.resolve(date("2024-05-01"));
        assert_eq!(range.start, date("2024-04-29"));
    }

    #[test]
    fn test_month_starts_on_first() {
        let range = DatePreset::Month.resolve(date("2024-06-19"));
        assert_eq!(range.start, date("2024-06-01"));
        assert_eq!(range.end, date("2024-06-19"));
    }

    #[test]
    fn test_month_on_first_is_single_day() {
        let first = date("2024-06-01");
        let range = DatePreset::Month.resolve(first);
        assert_eq!(range, DateRange::single_day(first));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&DatePreset::Week).unwrap(), "\"week\"");
        let parsed: DatePreset = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(parsed, DatePreset::Month);
    }
}
