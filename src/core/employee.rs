use crate::auth::require_manager;
use crate::core::batch::{BatchReport, run_batch};
use crate::db::log::audit;
use crate::db::profiles::{self, ProfilePatch};
use crate::errors::{AppError, AppResult};
use crate::models::{Profile, Role};
use rusqlite::Connection;
use std::collections::HashMap;

/// Role and/or wage change for one employee in a bulk edit.
#[derive(Debug, Clone)]
pub struct EmployeeEdit {
    pub employee_id: i64,
    pub role: Option<Role>,
    pub hourly_wage: Option<f64>,
}

/// Parses "ID:role:wage" entries; either side may be left empty
/// ("7::15.5", "9:manager:").
pub fn parse_edit(line: &str) -> AppResult<EmployeeEdit> {
    let parts: Vec<&str> = line.split(':').map(str::trim).collect();
    let [id, role, wage] = parts.as_slice() else {
        return Err(AppError::Validation(format!(
            "Expected ID:ROLE:WAGE, got '{line}'"
        )));
    };

    let employee_id = id
        .parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Invalid employee id: {id}")))?;
    let role = if role.is_empty() {
        None
    } else {
        Some(Role::parse(role).ok_or_else(|| AppError::Validation(format!("Invalid role: {role}")))?)
    };
    let hourly_wage = if wage.is_empty() {
        None
    } else {
        Some(parse_wage_str(wage)?)
    };

    Ok(EmployeeEdit {
        employee_id,
        role,
        hourly_wage,
    })
}

pub fn parse_wage_str(s: &str) -> AppResult<f64> {
    match s.trim().parse::<f64>() {
        Ok(w) if w.is_finite() && w >= 0.0 => Ok(w),
        _ => Err(AppError::InvalidWage(s.to_string())),
    }
}

pub struct EmployeeLogic;

impl EmployeeLogic {
    pub fn list(conn: &Connection, include_inactive: bool) -> AppResult<Vec<Profile>> {
        profiles::list_profiles(conn, include_inactive)
    }

    /// Applies each edit independently; one bad row does not stop the rest.
    pub fn bulk_edit(conn: &Connection, actor: &Profile, edits: &[EmployeeEdit]) -> AppResult<BatchReport> {
        require_manager(actor, "edit employees")?;

        let by_id: HashMap<i64, &EmployeeEdit> =
            edits.iter().map(|e| (e.employee_id, e)).collect();
        let ids: Vec<i64> = edits.iter().map(|e| e.employee_id).collect();

        let report = run_batch(&ids, |id| {
            let edit = by_id
                .get(&id)
                .ok_or_else(|| AppError::NotFound(format!("employee {id}")))?;
            let patch = ProfilePatch {
                role: edit.role,
                hourly_wage: edit.hourly_wage,
                ..Default::default()
            };
            if patch.is_empty() {
                return Err(AppError::Validation("Nothing to update".to_string()));
            }
            profiles::update_profile(conn, id, &patch)
        });

        audit(
            conn,
            "bulk_employee_edit",
            &format!("{} employees", report.attempted),
            &format!("{} applied, {} failed", report.succeeded, report.failed()),
        )?;
        Ok(report)
    }
}
