//! Grouping of shifts into calendar days.

use crate::core::calendar::CalendarCell;
use crate::models::Shift;
use crate::utils::date::format_iso;
use chrono::NaiveDate;

/// Shifts whose date formats to the same ISO string as `date`.
pub fn shifts_for_date(shifts: &[Shift], date: NaiveDate) -> Vec<&Shift> {
    let key = format_iso(date);
    shifts.iter().filter(|s| s.date_str() == key).collect()
}

/// One bucket per cell, in cell order; blank cells get an empty bucket.
pub fn bucket_by_cells<'a>(
    shifts: &'a [Shift],
    cells: &[CalendarCell],
) -> Vec<(CalendarCell, Vec<&'a Shift>)> {
    cells
        .iter()
        .map(|cell| {
            let bucket = match cell.date() {
                Some(d) => shifts_for_date(shifts, d),
                None => Vec::new(),
            };
            (*cell, bucket)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::{ViewMode, cells};
    use crate::models::ShiftRole;
    use chrono::NaiveTime;

    fn shift(id: i64, date: NaiveDate) -> Shift {
        Shift {
            id,
            employee_id: None,
            date,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            role: ShiftRole::Cashier,
            notes: String::new(),
            created_by: 1,
            created_at: String::new(),
        }
    }

    #[test]
    fn shift_lands_only_in_its_own_day() {
        let target = NaiveDate::from_ymd_opt(2026, 2, 12).unwrap();
        let shifts = vec![shift(1, target), shift(2, target.succ_opt().unwrap())];

        let grid = cells(target, ViewMode::Month);
        let buckets = bucket_by_cells(&shifts, &grid);

        let holding: Vec<_> = buckets
            .iter()
            .filter(|(_, b)| b.iter().any(|s| s.id == 1))
            .map(|(c, _)| *c)
            .collect();
        assert_eq!(holding, vec![CalendarCell::Day(target)]);
        assert_eq!(buckets.len(), grid.len());
    }

    #[test]
    fn blank_cells_hold_nothing() {
        let shifts = vec![shift(1, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap())];
        let grid = cells(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(), ViewMode::Month);
        let buckets = bucket_by_cells(&shifts, &grid);
        assert!(buckets[0].1.is_empty());
        assert_eq!(buckets[3].1.len(), 1);
    }

    #[test]
    fn week_view_keeps_shifts_on_their_weekday() {
        let target = NaiveDate::from_ymd_opt(2026, 2, 12).unwrap();
        let shifts = vec![
            shift(1, target),
            shift(2, NaiveDate::from_ymd_opt(2026, 2, 13).unwrap()),
            shift(3, NaiveDate::from_ymd_opt(2026, 2, 15).unwrap()),
        ];

        let buckets = bucket_by_cells(&shifts, &cells(target, ViewMode::Week));
        assert_eq!(buckets.len(), 7);

        let holding: Vec<_> = buckets
            .iter()
            .filter(|(_, b)| b.iter().any(|s| s.id == 1))
            .map(|(c, _)| *c)
            .collect();
        assert_eq!(holding, vec![CalendarCell::Day(target)]);
        assert_eq!(buckets[4].0, CalendarCell::Day(target));
        assert_eq!(buckets[4].1.len(), 1);
        assert!(buckets.iter().all(|(_, b)| b.iter().all(|s| s.id != 3)));
    }
}
