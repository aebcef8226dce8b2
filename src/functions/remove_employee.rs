use super::{FunctionContext, FunctionResponse, parse_body, require_manager_bearer, respond};
use crate::db::log::audit;
use crate::db::{profiles, schedules, sessions};
use crate::errors::AppError;
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct RemoveEmployeeRequest {
    pub employee_id: Option<i64>,
}

/// Deactivates an employee and drops their shifts from today on.
/// Past shifts stay for payroll history. Managers only.
pub fn remove_employee(
    conn: &Connection,
    authorization: Option<&str>,
    body: &str,
    ctx: &FunctionContext,
) -> FunctionResponse {
    respond(|| {
        let caller = require_manager_bearer(conn, authorization, ctx.now, "remove employees")?;
        let req: RemoveEmployeeRequest = parse_body(body)?;

        let id = req
            .employee_id
            .ok_or_else(|| AppError::Validation("Missing employee_id".to_string()))?;
        let employee = profiles::find_by_id(conn, id)?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

        if !employee.is_active {
            return Err(AppError::Validation(
                "Employee is already deactivated".to_string(),
            ));
        }

        let tx = conn.unchecked_transaction()?;
        profiles::deactivate(&tx, id)?;
        let removed = schedules::delete_from_date(&tx, id, ctx.today)?;
        sessions::delete_sessions_of(&tx, id)?;
        tx.commit()?;

        audit(
            conn,
            "employee_remove",
            &id.to_string(),
            &format!(
                "{} deactivated by {}, {removed} future shifts removed",
                employee.full_name, caller.email
            ),
        )?;

        Ok(json!({
            "success": true,
            "message": "Employee removed successfully",
            "removed_shifts": removed,
        }))
    })
}
