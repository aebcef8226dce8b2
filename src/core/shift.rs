use crate::auth::require_manager;
use crate::core::batch::{BatchReport, run_batch};
use crate::db::log::audit;
use crate::db::profiles;
use crate::db::schedules::{self, ShiftPatch};
use crate::errors::{AppError, AppResult};
use crate::models::{NewShift, Profile, Shift, ShiftRole};
use crate::utils::date::{days_between, format_iso};
use crate::utils::time::parse_required_time;
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use rusqlite::Connection;

/// One employee's line in a bulk plan.
#[derive(Debug, Clone)]
pub struct EmployeeTemplate {
    pub employee_id: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub role: ShiftRole,
}

/// Date range × weekdays × employee templates.
#[derive(Debug, Clone)]
pub struct BulkShiftPlan {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub weekdays: Vec<Weekday>,
    pub templates: Vec<EmployeeTemplate>,
    pub notes: String,
}

impl BulkShiftPlan {
    pub fn validate(&self) -> AppResult<()> {
        if self.templates.is_empty() {
            return Err(AppError::Validation(
                "Select at least one employee".to_string(),
            ));
        }
        if self.weekdays.is_empty() {
            return Err(AppError::Validation(
                "Select at least one day of the week".to_string(),
            ));
        }
        if self.to < self.from {
            return Err(AppError::Validation(
                "End date must be on or after start date".to_string(),
            ));
        }
        for t in &self.templates {
            validate_times(t.start_time, t.end_time)?;
        }
        Ok(())
    }

    /// Every shift the plan produces, ordered by date then template order.
    pub fn expand(&self, created_by: i64) -> Vec<NewShift> {
        days_between(self.from, self.to)
            .into_iter()
            .filter(|d| self.weekdays.contains(&d.weekday()))
            .flat_map(|date| {
                self.templates.iter().map(move |t| NewShift {
                    employee_id: Some(t.employee_id),
                    date,
                    start_time: t.start_time,
                    end_time: t.end_time,
                    role: t.role,
                    notes: self.notes.clone(),
                    created_by,
                })
            })
            .collect()
    }
}

/// Parses "mon,tue,fri" (any chrono weekday spelling) into weekdays.
pub fn parse_weekdays(input: &str) -> AppResult<Vec<Weekday>> {
    let mut out = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let day: Weekday = part
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid weekday: {part}")))?;
        if !out.contains(&day) {
            out.push(day);
        }
    }
    Ok(out)
}

/// Parses one `EMP,START,END,ROLE` line of a bulk plan, e.g. `4,08:00,16:00,kitchen`.
pub fn parse_template(line: &str) -> AppResult<EmployeeTemplate> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    let [emp, start, end, role] = parts.as_slice() else {
        return Err(AppError::Validation(format!(
            "Expected EMP,START,END,ROLE, got: {line}"
        )));
    };

    let employee_id = emp
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Invalid employee id: {emp}")))?;
    let role = ShiftRole::parse(role)
        .ok_or_else(|| AppError::Validation(format!("Invalid shift role: {role}")))?;

    Ok(EmployeeTemplate {
        employee_id,
        start_time: parse_required_time(start)?,
        end_time: parse_required_time(end)?,
        role,
    })
}

fn validate_times(start: NaiveTime, end: NaiveTime) -> AppResult<()> {
    if start == end {
        return Err(AppError::InvalidShift(
            "start and end time must differ".to_string(),
        ));
    }
    Ok(())
}

fn validate_assignee(conn: &Connection, employee_id: Option<i64>) -> AppResult<()> {
    if let Some(id) = employee_id {
        let p = profiles::find_by_id(conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("employee {id}")))?;
        if !p.is_active {
            return Err(AppError::InvalidShift(format!(
                "{} is deactivated",
                p.full_name
            )));
        }
    }
    Ok(())
}

pub struct ShiftLogic;

impl ShiftLogic {
    pub fn add(conn: &Connection, actor: &Profile, shift: &NewShift) -> AppResult<i64> {
        require_manager(actor, "create shifts")?;
        validate_times(shift.start_time, shift.end_time)?;
        validate_assignee(conn, shift.employee_id)?;

        let id = schedules::insert_shift(conn, shift)?;
        audit(
            conn,
            "shift_add",
            &id.to_string(),
            &format!(
                "{} {}-{} {}",
                format_iso(shift.date),
                shift.start_time.format("%H:%M"),
                shift.end_time.format("%H:%M"),
                shift.role.label()
            ),
        )?;
        Ok(id)
    }

    pub fn edit(conn: &Connection, actor: &Profile, id: i64, patch: &ShiftPatch) -> AppResult<Shift> {
        require_manager(actor, "edit shifts")?;
        if patch.is_empty() {
            return Err(AppError::Validation("Nothing to update".to_string()));
        }

        let current = schedules::require_shift(conn, id)?;
        let updated = patch.apply_to(&current);
        validate_times(updated.start_time, updated.end_time)?;
        if patch.employee_id.is_some() {
            validate_assignee(conn, updated.employee_id)?;
        }

        schedules::save_shift(conn, &updated)?;
        audit(
            conn,
            "shift_edit",
            &id.to_string(),
            &format!("{} {}", updated.date_str(), updated.time_span()),
        )?;
        Ok(updated)
    }

    pub fn delete(conn: &Connection, actor: &Profile, id: i64) -> AppResult<()> {
        require_manager(actor, "delete shifts")?;
        schedules::delete_shift(conn, id)?;
        audit(conn, "shift_del", &id.to_string(), "Shift deleted")?;
        Ok(())
    }

    /// Inserts every shift of the plan in one transaction.
    pub fn bulk_create(conn: &mut Connection, actor: &Profile, plan: &BulkShiftPlan) -> AppResult<Vec<i64>> {
        require_manager(actor, "create shifts")?;
        plan.validate()?;
        for t in &plan.templates {
            validate_assignee(conn, Some(t.employee_id))?;
        }

        let shifts = plan.expand(actor.id);
        if shifts.is_empty() {
            return Err(AppError::Validation(
                "No shifts to create for the selected dates and days".to_string(),
            ));
        }

        let ids = schedules::insert_many(conn, &shifts)?;
        audit(
            conn,
            "bulk_shift_add",
            &format!("{}..{}", format_iso(plan.from), format_iso(plan.to)),
            &format!("{} shifts created", ids.len()),
        )?;
        Ok(ids)
    }

    /// Applies the same patch to every shift, independently.
    pub fn bulk_edit(conn: &Connection, actor: &Profile, ids: &[i64], patch: &ShiftPatch) -> AppResult<BatchReport> {
        require_manager(actor, "edit shifts")?;
        if patch.is_empty() {
            return Err(AppError::Validation("Nothing to update".to_string()));
        }

        let report = run_batch(ids, |id| {
            let current = schedules::require_shift(conn, id)?;
            let updated = patch.apply_to(&current);
            validate_times(updated.start_time, updated.end_time)?;
            if patch.employee_id.is_some() {
                validate_assignee(conn, updated.employee_id)?;
            }
            schedules::save_shift(conn, &updated)
        });

        audit(
            conn,
            "bulk_shift_edit",
            &format!("{} shifts", report.attempted),
            &format!("{} applied, {} failed", report.succeeded, report.failed()),
        )?;
        Ok(report)
    }

    pub fn bulk_delete(conn: &Connection, actor: &Profile, ids: &[i64]) -> AppResult<BatchReport> {
        require_manager(actor, "delete shifts")?;

        let report = run_batch(ids, |id| schedules::delete_shift(conn, id));

        audit(
            conn,
            "bulk_shift_del",
            &format!("{} shifts", report.attempted),
            &format!("{} deleted, {} failed", report.succeeded, report.failed()),
        )?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, day).unwrap()
    }

    fn plan(weekdays: Vec<Weekday>) -> BulkShiftPlan {
        BulkShiftPlan {
            from: d(1),
            to: d(14),
            weekdays,
            templates: vec![
                EmployeeTemplate {
                    employee_id: 2,
                    start_time: t(8),
                    end_time: t(16),
                    role: ShiftRole::Kitchen,
                },
                EmployeeTemplate {
                    employee_id: 3,
                    start_time: t(16),
                    end_time: t(23),
                    role: ShiftRole::Delivery,
                },
            ],
            notes: "Winter rota".to_string(),
        }
    }

    #[test]
    fn plan_expands_selected_weekdays_for_every_template() {
        let shifts = plan(vec![Weekday::Mon, Weekday::Fri]).expand(1);
        // Feb 1-14 2026 holds two Mondays and two Fridays
        assert_eq!(shifts.len(), 8);
        assert_eq!(shifts[0].date, d(2));
        assert_eq!(shifts[0].employee_id, Some(2));
        assert_eq!(shifts[1].employee_id, Some(3));
        assert!(shifts.iter().all(|s| s.notes == "Winter rota"));
    }

    #[test]
    fn plan_validation_rejects_empty_selections() {
        assert!(plan(vec![]).validate().is_err());

        let mut p = plan(vec![Weekday::Mon]);
        p.templates.clear();
        assert!(p.validate().is_err());

        let mut p = plan(vec![Weekday::Mon]);
        p.to = d(1);
        p.from = d(2);
        assert!(p.validate().is_err());
    }

    #[test]
    fn weekdays_parse_from_short_or_long_names() {
        assert_eq!(
            parse_weekdays("mon, Friday,mon").unwrap(),
            vec![Weekday::Mon, Weekday::Fri]
        );
        assert!(parse_weekdays("funday").is_err());
    }

    #[test]
    fn template_lines_parse() {
        let tpl = parse_template("4, 08:00, 16:30, Delivery").unwrap();
        assert_eq!(tpl.employee_id, 4);
        assert_eq!(tpl.end_time, NaiveTime::from_hms_opt(16, 30, 0).unwrap());
        assert_eq!(tpl.role, ShiftRole::Delivery);

        assert!(parse_template("4,08:00,16:00").is_err());
        assert!(parse_template("x,08:00,16:00,kitchen").is_err());
        assert!(parse_template("4,8am,16:00,kitchen").is_err());
    }
}
