use crate::db::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::Session;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn parse_ts(col: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| conversion_error(col, AppError::InvalidDate(s.to_string())))
}

pub fn map_row(row: &Row) -> rusqlite::Result<Session> {
    let created: String = row.get("created_at")?;
    let expires: String = row.get("expires_at")?;

    Ok(Session {
        token: row.get("token")?,
        profile_id: row.get("profile_id")?,
        created_at: parse_ts(2, &created)?,
        expires_at: parse_ts(3, &expires)?,
    })
}

pub fn insert_session(conn: &Connection, s: &Session) -> AppResult<()> {
    conn.execute(
        "INSERT INTO sessions (token, profile_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            s.token,
            s.profile_id,
            s.created_at.to_rfc3339(),
            s.expires_at.to_rfc3339()
        ],
    )?;
    Ok(())
}

pub fn find_session(conn: &Connection, token: &str) -> AppResult<Option<Session>> {
    Ok(conn
        .query_row(
            "SELECT token, profile_id, created_at, expires_at FROM sessions WHERE token = ?1",
            [token],
            map_row,
        )
        .optional()?)
}

pub fn delete_session(conn: &Connection, token: &str) -> AppResult<bool> {
    Ok(conn.execute("DELETE FROM sessions WHERE token = ?1", [token])? > 0)
}

pub fn delete_sessions_of(conn: &Connection, profile_id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM sessions WHERE profile_id = ?1", [profile_id])?)
}

pub fn purge_expired(conn: &Connection, now: DateTime<Utc>) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM sessions WHERE expires_at <= ?1",
        [now.to_rfc3339()],
    )?)
}
