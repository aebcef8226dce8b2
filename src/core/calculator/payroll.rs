//! Pure payroll aggregation over a set of shifts and a wage table.

use crate::core::calculator::duration::{OvernightPolicy, shift_hours};
use crate::models::{Profile, Shift};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeePayroll {
    pub employee_id: i64,
    pub full_name: String,
    pub hourly_wage: f64,
    pub shifts: usize,
    pub hours: f64,
    pub pay: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayrollSummary {
    pub rows: Vec<EmployeePayroll>,
    pub total_hours: f64,
    pub total_pay: f64,
    /// Open shifts and shifts of employees absent from the wage table.
    pub skipped: usize,
}

/// Sums hours per employee and prices them at the employee's wage.
/// Rows are ordered by name, then id. Values keep full precision; export
/// rows round them to cents.
pub fn aggregate(
    shifts: &[Shift],
    wages: &HashMap<i64, Profile>,
    policy: OvernightPolicy,
) -> PayrollSummary {
    let mut per_employee: HashMap<i64, EmployeePayroll> = HashMap::new();
    let mut skipped = 0;

    for shift in shifts {
        let Some(profile) = shift.employee_id.and_then(|id| wages.get(&id)) else {
            skipped += 1;
            continue;
        };

        let hours = shift_hours(shift.start_time, shift.end_time, policy);
        let entry = per_employee
            .entry(profile.id)
            .or_insert_with(|| EmployeePayroll {
                employee_id: profile.id,
                full_name: profile.full_name.clone(),
                hourly_wage: profile.hourly_wage,
                shifts: 0,
                hours: 0.0,
                pay: 0.0,
            });
        entry.shifts += 1;
        entry.hours += hours;
    }

    let mut rows: Vec<EmployeePayroll> = per_employee
        .into_values()
        .map(|mut r| {
            r.pay = r.hours * r.hourly_wage;
            r
        })
        .collect();
    rows.sort_by(|a, b| {
        a.full_name
            .cmp(&b.full_name)
            .then(a.employee_id.cmp(&b.employee_id))
    });

    let total_hours = rows.iter().map(|r| r.hours).sum();
    let total_pay = rows.iter().map(|r| r.pay).sum();

    PayrollSummary {
        rows,
        total_hours,
        total_pay,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, ShiftRole};
    use chrono::{NaiveDate, NaiveTime};

    fn profile(id: i64, name: &str, wage: f64) -> Profile {
        Profile {
            id,
            email: format!("{id}@paprika.test"),
            full_name: name.to_string(),
            role: Role::Employee,
            hourly_wage: wage,
            is_active: true,
            created_at: String::new(),
        }
    }

    fn shift(id: i64, emp: Option<i64>, start: u32, end: u32) -> Shift {
        Shift {
            id,
            employee_id: emp,
            date: NaiveDate::from_ymd_opt(2026, 2, 12).unwrap(),
            start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
            role: ShiftRole::Kitchen,
            notes: String::new(),
            created_by: 1,
            created_at: String::new(),
        }
    }

    fn wages(list: Vec<Profile>) -> HashMap<i64, Profile> {
        list.into_iter().map(|p| (p.id, p)).collect()
    }

    #[test]
    fn grand_total_is_hours_times_wage() {
        let w = wages(vec![profile(1, "Zora", 15.0), profile(2, "Ana", 20.0)]);
        let shifts = vec![
            shift(1, Some(1), 8, 16),
            shift(2, Some(2), 10, 14),
            shift(3, Some(1), 17, 21),
        ];

        let s = aggregate(&shifts, &w, OvernightPolicy::Rollover);
        assert_eq!(s.total_hours, 16.0);
        assert_eq!(s.total_pay, 12.0 * 15.0 + 4.0 * 20.0);
        assert_eq!(s.rows[0].full_name, "Ana");
        assert_eq!(s.rows[1].shifts, 2);
        assert_eq!(s.skipped, 0);
    }

    #[test]
    fn changing_one_wage_changes_only_that_contribution() {
        let shifts = vec![shift(1, Some(1), 8, 16), shift(2, Some(2), 8, 12)];
        let before = aggregate(
            &shifts,
            &wages(vec![profile(1, "A", 10.0), profile(2, "B", 10.0)]),
            OvernightPolicy::Rollover,
        );
        let after = aggregate(
            &shifts,
            &wages(vec![profile(1, "A", 12.0), profile(2, "B", 10.0)]),
            OvernightPolicy::Rollover,
        );

        assert_eq!(after.total_pay - before.total_pay, 8.0 * 2.0);
        assert_eq!(before.rows[1], after.rows[1]);
    }

    #[test]
    fn open_and_unknown_shifts_are_skipped() {
        let w = wages(vec![profile(1, "A", 10.0)]);
        let shifts = vec![
            shift(1, None, 8, 16),
            shift(2, Some(99), 8, 16),
            shift(3, Some(1), 22, 2),
        ];

        let s = aggregate(&shifts, &w, OvernightPolicy::Rollover);
        assert_eq!(s.skipped, 2);
        assert_eq!(s.total_hours, 4.0);
        assert_eq!(s.total_pay, 40.0);
    }
}
