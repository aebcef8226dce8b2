//! Date helpers. Every component that writes or compares a shift date goes
//! through `format_iso` / `parse_iso`, so the stored and compared forms are
//! always the same `YYYY-MM-DD` string.

use chrono::{Datelike, Local, NaiveDate};

pub const ISO_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Canonical `YYYY-MM-DD` form of a calendar date (no timezone involved).
pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

pub fn parse_iso(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_FORMAT).ok()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let Some(mut d) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return out;
    };

    while d.month() == month {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}

/// Inclusive list of dates between `start` and `end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

/// Column headers of a Sunday-first week.
pub const WEEKDAY_HEADERS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Short label like "Feb 12, 2026".
pub fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_format_is_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        assert_eq!(format_iso(d), "2026-02-03");
        assert_eq!(parse_iso("2026-02-03"), Some(d));
    }

    #[test]
    fn month_bounds_handle_december_and_leap_years() {
        let d = NaiveDate::from_ymd_opt(2025, 12, 17).unwrap();
        assert_eq!(last_of_month(d), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

        let feb = NaiveDate::from_ymd_opt(2028, 2, 10).unwrap();
        assert_eq!(last_of_month(feb).day(), 29);
        assert_eq!(first_of_month(feb).day(), 1);
    }

    #[test]
    fn days_between_is_inclusive() {
        let a = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(days_between(a, b).len(), 4);
        assert!(days_between(b, a).is_empty());
    }
}
