use super::{
    FunctionContext, FunctionResponse, non_blank, parse_body, parse_wage, require_manager_bearer,
    respond,
};
use crate::auth;
use crate::db::log::audit;
use crate::db::profiles::{self, ProfilePatch};
use crate::errors::AppError;
use crate::models::Role;
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub employee_id: Option<i64>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub hourly_wage: Option<Value>,
}

/// Changes login and profile fields of an employee. Managers only.
pub fn update_employee(
    conn: &Connection,
    authorization: Option<&str>,
    body: &str,
    ctx: &FunctionContext,
) -> FunctionResponse {
    respond(|| {
        let caller = require_manager_bearer(conn, authorization, ctx.now, "update employees")?;
        let req: UpdateEmployeeRequest = parse_body(body)?;

        let id = req
            .employee_id
            .ok_or_else(|| AppError::Validation("Missing employee_id".to_string()))?;
        let existing = profiles::find_by_id(conn, id)?
            .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

        let mut patch = ProfilePatch::default();

        if let Some(email) = non_blank(&req.email) {
            if !email.contains('@') {
                return Err(AppError::Validation(format!("Invalid email: {email}")));
            }
            if profiles::email_taken(conn, email, Some(id))? {
                return Err(AppError::Validation(format!(
                    "A user with email {email} already exists"
                )));
            }
            patch.email = Some(email.to_string());
        }
        if let Some(name) = non_blank(&req.full_name) {
            patch.full_name = Some(name.to_string());
        }
        if let Some(role) = non_blank(&req.role) {
            patch.role = Some(
                Role::parse(role)
                    .ok_or_else(|| AppError::Validation(format!("Invalid role: {role}")))?,
            );
        }
        if let Some(wage) = req.hourly_wage.as_ref().filter(|w| !w.is_null()) {
            patch.hourly_wage = Some(parse_wage(wage)?);
        }
        let password = req.password.as_deref().filter(|p| !p.is_empty());

        if patch.is_empty() && password.is_none() {
            return Err(AppError::Validation("Nothing to update".to_string()));
        }

        // validate the password before writing anything
        if let Some(p) = password
            && p.chars().count() < ctx.min_password_length
        {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                ctx.min_password_length
            )));
        }

        let tx = conn.unchecked_transaction()?;
        if !patch.is_empty() {
            profiles::update_profile(&tx, id, &patch)?;
        }
        if let Some(p) = password {
            auth::change_password(&tx, id, p, ctx.min_password_length)?;
        }
        tx.commit()?;

        audit(
            conn,
            "employee_edit",
            &id.to_string(),
            &format!("{} updated by {}", existing.full_name, caller.email),
        )?;

        let updated = profiles::require_by_id(conn, id)?;
        Ok(json!({
            "success": true,
            "profile": updated,
            "password_changed": password.is_some(),
        }))
    })
}
