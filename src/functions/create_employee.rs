use super::{
    FunctionContext, FunctionResponse, non_blank, parse_body, parse_wage, require_manager_bearer,
    respond,
};
use crate::auth;
use crate::db::log::audit;
use crate::db::profiles::{self, NewProfile};
use crate::errors::AppError;
use crate::models::Role;
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
    pub hourly_wage: Option<Value>,
}

const REQUIRED: [&str; 5] = ["email", "full_name", "role", "password", "hourly_wage"];

/// Creates a login plus profile. Managers only.
pub fn create_employee(
    conn: &Connection,
    authorization: Option<&str>,
    body: &str,
    ctx: &FunctionContext,
) -> FunctionResponse {
    respond(|| {
        let caller = require_manager_bearer(conn, authorization, ctx.now, "create employees")?;
        let req: CreateEmployeeRequest = parse_body(body)?;

        let (Some(email), Some(full_name), Some(role), Some(password), Some(wage)) = (
            non_blank(&req.email),
            non_blank(&req.full_name),
            non_blank(&req.role),
            req.password.as_deref().filter(|p| !p.is_empty()),
            req.hourly_wage.as_ref().filter(|w| !w.is_null()),
        ) else {
            return Err(AppError::Function {
                status: 400,
                message: format!("Missing required fields: {}", REQUIRED.join(", ")),
            });
        };

        if !email.contains('@') {
            return Err(AppError::Validation(format!("Invalid email: {email}")));
        }
        let role = Role::parse(role)
            .ok_or_else(|| AppError::Validation(format!("Invalid role: {role}")))?;
        let hourly_wage = parse_wage(wage)?;

        let new = NewProfile {
            email: email.to_string(),
            full_name: full_name.to_string(),
            role,
            hourly_wage,
        };
        let id = auth::register(conn, &new, password, ctx.min_password_length)?;
        let created = profiles::find_by_id(conn, id)?;

        audit(
            conn,
            "employee_add",
            &id.to_string(),
            &format!("{} created by {}", new.full_name, caller.email),
        )?;

        Ok(json!({
            "success": true,
            "user": {
                "id": id,
                "email": email.to_lowercase(),
                "full_name": new.full_name,
                "role": role.to_db_str(),
                "hourly_wage": hourly_wage,
            },
            "profile_created": created.is_some(),
        }))
    })
}
