//! Time utilities: parsing wall-clock "HH:MM", minute arithmetic, formatting.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

/// Accepts "HH:MM" and the "HH:MM:SS" form some rows carry.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

pub fn parse_required_time(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    input.map(|s| parse_required_time(s)).transpose()
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Minutes elapsed since midnight.
pub fn minute_of_day(t: NaiveTime) -> i64 {
    i64::from(t.hour()) * 60 + i64::from(t.minute())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_seconds() {
        assert_eq!(parse_time("08:30"), NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(parse_time("08:30:00"), NaiveTime::from_hms_opt(8, 30, 0));
        assert!(parse_time("8h30").is_none());
        assert!(parse_time("25:00").is_none());
    }

    #[test]
    fn minute_of_day_counts_from_midnight() {
        let t = NaiveTime::from_hms_opt(22, 15, 0).unwrap();
        assert_eq!(minute_of_day(t), 22 * 60 + 15);
    }
}
