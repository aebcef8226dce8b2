//! Privileged employee-management functions. Each takes the raw
//! `Authorization` value and a JSON body and answers with an HTTP-like
//! status plus a JSON body, so a transport layer can forward them as is.

pub mod create_employee;
pub mod remove_employee;
pub mod update_employee;

pub use create_employee::create_employee;
pub use remove_employee::remove_employee;
pub use update_employee::update_employee;

use crate::auth;
use crate::errors::AppError;
use crate::models::Profile;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionResponse {
    pub status: u16,
    pub body: Value,
}

impl FunctionResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field of a failed response.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    /// The body on success, otherwise an `AppError::Function` carrying the
    /// status and error text.
    pub fn into_result(self) -> Result<Value, AppError> {
        if self.is_success() {
            return Ok(self.body);
        }
        let message = self
            .error_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.body.to_string());
        Err(AppError::Function {
            status: self.status,
            message,
        })
    }
}

impl From<AppError> for FunctionResponse {
    fn from(err: AppError) -> Self {
        let (status, message) = match err {
            AppError::Unauthorized(m) => (401, m),
            AppError::Forbidden(m) => (403, m),
            AppError::NotFound(m) => (404, m),
            AppError::Validation(m)
            | AppError::InvalidWage(m)
            | AppError::InvalidDate(m)
            | AppError::InvalidTime(m)
            | AppError::InvalidShift(m) => (400, m),
            AppError::Json(e) => (400, format!("Invalid request body: {e}")),
            AppError::Function { status, message } => (status, message),
            other => (500, other.to_string()),
        };
        Self {
            status,
            body: json!({ "error": message }),
        }
    }
}

/// Clock and limits a function runs against.
#[derive(Debug, Clone, Copy)]
pub struct FunctionContext {
    pub now: DateTime<Utc>,
    pub today: NaiveDate,
    pub min_password_length: usize,
}

impl FunctionContext {
    pub fn current(min_password_length: usize) -> Self {
        Self {
            now: Utc::now(),
            today: crate::utils::date::today(),
            min_password_length,
        }
    }
}

/// Resolves the bearer value to an active manager.
/// 401 when the header or session is missing, 403 for non-managers.
pub(crate) fn require_manager_bearer(
    conn: &Connection,
    authorization: Option<&str>,
    now: DateTime<Utc>,
    action: &str,
) -> Result<Profile, AppError> {
    if authorization.is_none() {
        return Err(AppError::Unauthorized(
            "Missing authorization header".to_string(),
        ));
    }
    let token = auth::parse_bearer(authorization)
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization token".to_string()))?;

    let (_, caller) = auth::get_session(conn, token, now)?
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization token".to_string()))?;

    auth::require_manager(&caller, action)?;
    Ok(caller)
}

pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    Ok(serde_json::from_str(body)?)
}

/// Wages arrive either as a JSON number or as a numeric string.
pub(crate) fn parse_wage(value: &Value) -> Result<f64, AppError> {
    let wage = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| AppError::InvalidWage(value.to_string()))?;

    if !wage.is_finite() || wage < 0.0 {
        return Err(AppError::InvalidWage(format!("{wage} (must be >= 0)")));
    }
    Ok(wage)
}

/// Non-empty trimmed string, or `None`.
pub(crate) fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Runs `f`, turning its error into the matching status response.
pub(crate) fn respond<F>(f: F) -> FunctionResponse
where
    F: FnOnce() -> Result<Value, AppError>,
{
    match f() {
        Ok(body) => FunctionResponse::ok(body),
        Err(e) => e.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wage_accepts_number_or_numeric_string() {
        assert_eq!(parse_wage(&json!(12.5)).unwrap(), 12.5);
        assert_eq!(parse_wage(&json!("14")).unwrap(), 14.0);
        assert!(parse_wage(&json!("abc")).is_err());
        assert!(parse_wage(&json!(-1)).is_err());
    }

    #[test]
    fn errors_map_to_statuses() {
        let r: FunctionResponse = AppError::Forbidden("nope".into()).into();
        assert_eq!(r.status, 403);
        assert_eq!(r.error_message(), Some("nope"));
        let r: FunctionResponse = AppError::NotFound("x".into()).into();
        assert_eq!(r.status, 404);
    }
}
