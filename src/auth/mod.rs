//! Email/password authentication with bearer session tokens.

pub mod password;

use crate::db::log::audit;
use crate::db::profiles::{self, NewProfile};
use crate::db::sessions;
use crate::errors::{AppError, AppResult};
use crate::models::{Profile, Session};
use chrono::{DateTime, Duration, Utc};
use password::{generate_salt, generate_token, hash_password, verify_password};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub const SESSION_HOURS: i64 = 12;

/// Creates a profile together with its credentials in one transaction.
pub fn register(
    conn: &Connection,
    profile: &NewProfile,
    password: &str,
    min_password_length: usize,
) -> AppResult<i64> {
    if password.chars().count() < min_password_length {
        return Err(AppError::Validation(format!(
            "Password must be at least {min_password_length} characters"
        )));
    }
    if profiles::email_taken(conn, &profile.email, None)? {
        return Err(AppError::Validation(format!(
            "A user with email {} already exists",
            profile.email.trim()
        )));
    }

    let tx = conn.unchecked_transaction()?;
    let id = profiles::insert_profile(&tx, profile)?;
    let salt = generate_salt();
    profiles::set_credentials(&tx, id, &salt, &hash_password(&salt, password))?;
    tx.commit()?;

    Ok(id)
}

pub fn change_password(
    conn: &Connection,
    profile_id: i64,
    password: &str,
    min_password_length: usize,
) -> AppResult<()> {
    if password.chars().count() < min_password_length {
        return Err(AppError::Validation(format!(
            "Password must be at least {min_password_length} characters"
        )));
    }
    let salt = generate_salt();
    profiles::set_credentials(conn, profile_id, &salt, &hash_password(&salt, password))
}

pub fn sign_in(
    conn: &Connection,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> AppResult<Session> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let profile = profiles::find_by_email(conn, email)?.ok_or_else(invalid)?;
    let (salt, hash) = profiles::load_credentials(conn, profile.id)?.ok_or_else(invalid)?;
    if !verify_password(&salt, password, &hash) {
        return Err(invalid());
    }
    if !profile.is_active {
        return Err(AppError::Unauthorized(
            "This account has been deactivated".to_string(),
        ));
    }

    sessions::purge_expired(conn, now)?;

    let session = Session {
        token: generate_token(),
        profile_id: profile.id,
        created_at: now,
        expires_at: now + Duration::hours(SESSION_HOURS),
    };
    sessions::insert_session(conn, &session)?;
    audit(conn, "login", &profile.email, "Signed in")?;

    Ok(session)
}

/// The live session and its profile, or `None` when the token is unknown,
/// expired or belongs to a deactivated profile.
pub fn get_session(
    conn: &Connection,
    token: &str,
    now: DateTime<Utc>,
) -> AppResult<Option<(Session, Profile)>> {
    let Some(session) = sessions::find_session(conn, token)? else {
        return Ok(None);
    };
    if session.is_expired_at(now) {
        sessions::delete_session(conn, token)?;
        return Ok(None);
    }
    match profiles::find_by_id(conn, session.profile_id)? {
        Some(p) if p.is_active => Ok(Some((session, p))),
        _ => Ok(None),
    }
}

/// Like `get_session` but a missing session is an error.
pub fn authenticate(conn: &Connection, token: Option<&str>, now: DateTime<Utc>) -> AppResult<Profile> {
    let token = token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Unauthorized("Please log in first".to_string()))?;

    get_session(conn, token.trim(), now)?
        .map(|(_, profile)| profile)
        .ok_or_else(|| AppError::Unauthorized("Session is invalid or has expired".to_string()))
}

pub fn sign_out(conn: &Connection, token: &str) -> AppResult<bool> {
    let removed = sessions::delete_session(conn, token)?;
    if removed {
        audit(conn, "logout", "", "Signed out")?;
    }
    Ok(removed)
}

pub fn require_manager(profile: &Profile, action: &str) -> AppResult<()> {
    if profile.is_manager() {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!("Only managers can {action}")))
    }
}

/// Extracts the token from an `Authorization` value of the form
/// `Bearer <token>`.
pub fn parse_bearer(header: Option<&str>) -> Option<&str> {
    let value = header?.trim();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then_some(token)
}

pub fn store_token(path: &Path, token: &str) -> AppResult<()> {
    fs::write(path, token)?;
    Ok(())
}

pub fn read_token(path: &Path) -> AppResult<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let token = fs::read_to_string(path)?.trim().to_string();
    Ok((!token.is_empty()).then_some(token))
}

pub fn clear_token(path: &Path) -> AppResult<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
