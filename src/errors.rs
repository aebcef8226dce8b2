//! Unified application error type.
//! All modules (db, auth, core, cli, export) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation (caught before any write)
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid hourly wage: {0}")]
    InvalidWage(String),

    #[error("Invalid shift: {0}")]
    InvalidShift(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // ---------------------------
    // Authorization
    // ---------------------------
    #[error("Not signed in: {0}")]
    Unauthorized(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ---------------------------
    // Conflicts / lookups
    // ---------------------------
    #[error("Shift {0} was already claimed, refresh and retry")]
    AlreadyClaimed(i64),

    #[error("Not found: {0}")]
    NotFound(String),

    // ---------------------------
    // Endpoint functions
    // ---------------------------
    #[error("Request failed ({status}): {message}")]
    Function { status: u16, message: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration format error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
