//! # Time-of-Day Handling Utilities
//!
//! This module provides utilities for parsing and formatting the `HH:MM`
//! time-of-day strings carried by schedule configurations.

use chrono::NaiveTime;

/// Parses an `HH:MM` time-of-day string.
///
/// Leading/trailing whitespace is tolerated; anything beyond hours and
/// minutes (seconds, offsets, meridiems) is rejected.
///
/// # Example
/// ```rust
/// use fleetdeck_util::time_handling::parse_time_of_day;
///
/// assert!(parse_time_of_day("09:00").is_some());
/// assert!(parse_time_of_day("23:59").is_some());
/// assert!(parse_time_of_day("24:00").is_none());
/// assert!(parse_time_of_day("09:00:00").is_none());
/// ```
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

/// Returns true if the string is a valid `HH:MM` time of day.
pub fn is_time_of_day(raw: &str) -> bool {
    parse_time_of_day(raw).is_some()
}

/// Canonicalizes a time-of-day string to zero-padded `HH:MM`.
///
/// Returns None when the input does not parse; `"9:05"` becomes `"09:05"`
/// and canonical input passes through unchanged.
pub fn canonical_time_of_day(raw: &str) -> Option<String> {
    parse_time_of_day(raw).map(|time| time.format("%H:%M").to_string())
}

/// Formats an `HH:MM` time as a 12-hour clock string for display.
///
/// # Example
/// ```rust
/// use fleetdeck_util::time_handling::format_time_12h;
///
/// assert_eq!(format_time_12h("09:00"), Some("9:00 AM".to_string()));
/// assert_eq!(format_time_12h("17:30"), Some("5:30 PM".to_string()));
/// assert_eq!(format_time_12h("not a time"), None);
/// ```
pub fn format_time_12h(raw: &str) -> Option<String> {
    parse_time_of_day(raw).map(|time| time.format("%-I:%M %p").to_string())
}
