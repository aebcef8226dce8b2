// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::{last_of_month, parse_iso};
use chrono::NaiveDate;

/// Parse `--range` (year / month / day / interval).
///
/// Accepts:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((a, b)) => {
            let (a, b) = (a.trim(), b.trim());
            if a.len() != b.len() {
                return Err(AppError::InvalidDate(format!(
                    "start and end must have the same format: {r}"
                )));
            }
            (period_bounds(a)?.0, period_bounds(b)?.1)
        }
        None => period_bounds(r.trim())?,
    };

    if end < start {
        return Err(AppError::InvalidDate(format!("range ends before it starts: {r}")));
    }
    Ok((start, end))
}

/// First and last day of a single `YYYY`, `YYYY-MM` or `YYYY-MM-DD` period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(p.to_string());

    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        7 => {
            let d1 = parse_iso(&format!("{p}-01")).ok_or_else(invalid)?;
            Ok((d1, last_of_month(d1)))
        }
        10 => {
            let d = parse_iso(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(AppError::InvalidDate(format!("unsupported range format: {p}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_periods() {
        assert_eq!(parse_range("2026").unwrap(), (d(2026, 1, 1), d(2026, 12, 31)));
        assert_eq!(parse_range("2028-02").unwrap(), (d(2028, 2, 1), d(2028, 2, 29)));
        assert_eq!(parse_range("2026-02-12").unwrap(), (d(2026, 2, 12), d(2026, 2, 12)));
    }

    #[test]
    fn intervals_take_outer_bounds() {
        assert_eq!(
            parse_range("2026-01:2026-03").unwrap(),
            (d(2026, 1, 1), d(2026, 3, 31))
        );
        assert_eq!(
            parse_range("2026-02-10:2026-02-16").unwrap(),
            (d(2026, 2, 10), d(2026, 2, 16))
        );
    }

    #[test]
    fn rejects_mixed_reversed_and_malformed() {
        assert!(matches!(parse_range("2026:2026-03"), Err(AppError::InvalidDate(_))));
        assert!(matches!(parse_range("2026-03:2026-01"), Err(AppError::InvalidDate(_))));
        assert!(matches!(parse_range("2026-13"), Err(AppError::InvalidDate(_))));
        assert!(matches!(parse_range("feb"), Err(AppError::InvalidDate(_))));
    }
}
