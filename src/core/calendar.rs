//! Calendar grid enumeration for week and month views (weeks start Sunday).

use crate::utils::date::{all_days_of_month, first_of_month, last_of_month};
use chrono::{Datelike, Duration, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Blank,
    Day(NaiveDate),
}

impl CalendarCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CalendarCell::Blank => None,
            CalendarCell::Day(d) => Some(*d),
        }
    }
}

/// Most recent Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Cells of the grid containing `reference`.
///
/// Week: the 7 dates from `week_start(reference)`.
/// Month: one blank per weekday before the 1st, every day of the month, then
/// blanks up to a multiple of 7.
pub fn cells(reference: NaiveDate, mode: ViewMode) -> Vec<CalendarCell> {
    match mode {
        ViewMode::Week => week_start(reference)
            .iter_days()
            .take(7)
            .map(CalendarCell::Day)
            .collect(),
        ViewMode::Month => {
            let first = first_of_month(reference);
            let leading = first.weekday().num_days_from_sunday() as usize;

            let mut out = vec![CalendarCell::Blank; leading];
            out.extend(
                all_days_of_month(reference.year(), reference.month())
                    .into_iter()
                    .map(CalendarCell::Day),
            );
            while out.len() % 7 != 0 {
                out.push(CalendarCell::Blank);
            }
            out
        }
    }
}

/// Inclusive first and last date covered by the view.
pub fn date_range(reference: NaiveDate, mode: ViewMode) -> (NaiveDate, NaiveDate) {
    match mode {
        ViewMode::Week => {
            let start = week_start(reference);
            (start, start + Duration::days(6))
        }
        ViewMode::Month => (first_of_month(reference), last_of_month(reference)),
    }
}

/// Moves the reference by one week, or by one month to its 1st.
pub fn navigate(reference: NaiveDate, mode: ViewMode, dir: Direction) -> NaiveDate {
    match (mode, dir) {
        (ViewMode::Week, Direction::Prev) => reference - Duration::days(7),
        (ViewMode::Week, Direction::Next) => reference + Duration::days(7),
        (ViewMode::Month, Direction::Prev) => first_of_month(reference)
            .checked_sub_months(Months::new(1))
            .unwrap_or(reference),
        (ViewMode::Month, Direction::Next) => first_of_month(reference)
            .checked_add_months(Months::new(1))
            .unwrap_or(reference),
    }
}
