//! One handler per subcommand, plus the session plumbing they share.

pub mod announce;
pub mod backup;
pub mod calendar;
pub mod complaint;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod employee;
pub mod export;
pub mod init;
pub mod log;
pub mod login;
pub mod payroll;
pub mod settings;
pub mod shift;

use crate::auth;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::Profile;
use crate::utils::date::{parse_iso, today};
use crate::utils::path::session_file_for;
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;

/// Where `login` keeps the token: `<database>.session`.
pub(crate) fn session_file(cfg: &Config) -> PathBuf {
    session_file_for(&cfg.database)
}

/// `--token` wins over the stored session file.
pub(crate) fn current_token(cli: &Cli, cfg: &Config) -> AppResult<Option<String>> {
    match &cli.token {
        Some(t) => Ok(Some(t.clone())),
        None => auth::read_token(&session_file(cfg)),
    }
}

/// Opens the database and resolves the signed-in profile.
pub(crate) fn signed_in(cli: &Cli, cfg: &Config) -> AppResult<(DbPool, Profile)> {
    let pool = DbPool::open(&cfg.database)?;
    let token = current_token(cli, cfg)?;
    let profile = auth::authenticate(&pool.conn, token.as_deref(), Utc::now())?;
    Ok((pool, profile))
}

/// `Authorization` header value for the employee functions.
pub(crate) fn bearer(cli: &Cli, cfg: &Config) -> AppResult<Option<String>> {
    Ok(current_token(cli, cfg)?.map(|t| format!("Bearer {t}")))
}

pub(crate) fn date_or_today(input: Option<&String>) -> AppResult<NaiveDate> {
    match input {
        Some(s) => parse_date(s),
        None => Ok(today()),
    }
}

pub(crate) fn parse_date(s: &str) -> AppResult<NaiveDate> {
    parse_iso(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}
