use crate::db::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::{Profile, Role};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashMap;

const COLUMNS: &str = "id, email, full_name, role, hourly_wage, is_active, created_at";

pub fn map_row(row: &Row) -> rusqlite::Result<Profile> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        conversion_error(3, AppError::Validation(format!("Invalid role: {role_str}")))
    })?;

    Ok(Profile {
        id: row.get("id")?,
        email: row.get("email")?,
        full_name: row.get("full_name")?,
        role,
        hourly_wage: row.get("hourly_wage")?,
        is_active: row.get::<_, i32>("is_active")? == 1,
        created_at: row.get("created_at")?,
    })
}

/// Fields of a profile to insert. Email is stored lowercased.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub hourly_wage: f64,
}

pub fn insert_profile(conn: &Connection, p: &NewProfile) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO profiles (email, full_name, role, hourly_wage, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, 1, ?5)",
        params![
            p.email.trim().to_lowercase(),
            p.full_name.trim(),
            p.role.to_db_str(),
            p.hourly_wage,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<Profile>> {
    let sql = format!("SELECT {COLUMNS} FROM profiles WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

pub fn find_by_email(conn: &Connection, email: &str) -> AppResult<Option<Profile>> {
    let sql = format!("SELECT {COLUMNS} FROM profiles WHERE email = ?1");
    Ok(conn
        .query_row(&sql, [email.trim().to_lowercase()], map_row)
        .optional()?)
}

pub fn require_by_id(conn: &Connection, id: i64) -> AppResult<Profile> {
    find_by_id(conn, id)?.ok_or_else(|| AppError::NotFound(format!("employee {id}")))
}

pub fn email_taken(conn: &Connection, email: &str, except_id: Option<i64>) -> AppResult<bool> {
    Ok(match find_by_email(conn, email)? {
        Some(p) => Some(p.id) != except_id,
        None => false,
    })
}

/// Profiles ordered by name. Inactive ones only when `include_inactive`.
pub fn list_profiles(conn: &Connection, include_inactive: bool) -> AppResult<Vec<Profile>> {
    let sql = if include_inactive {
        format!("SELECT {COLUMNS} FROM profiles ORDER BY full_name ASC, id ASC")
    } else {
        format!("SELECT {COLUMNS} FROM profiles WHERE is_active = 1 ORDER BY full_name ASC, id ASC")
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_profiles(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM profiles", [], |r| r.get(0))?)
}

/// Wage table (id → profile) used by the payroll aggregator. Includes
/// inactive profiles so past shifts still price correctly.
pub fn wage_table(conn: &Connection) -> AppResult<HashMap<i64, Profile>> {
    Ok(list_profiles(conn, true)?
        .into_iter()
        .map(|p| (p.id, p))
        .collect())
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub hourly_wage: Option<f64>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.full_name.is_none()
            && self.role.is_none()
            && self.hourly_wage.is_none()
    }
}

pub fn update_profile(conn: &Connection, id: i64, patch: &ProfilePatch) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE profiles SET
            email       = COALESCE(?2, email),
            full_name   = COALESCE(?3, full_name),
            role        = COALESCE(?4, role),
            hourly_wage = COALESCE(?5, hourly_wage)
         WHERE id = ?1",
        params![
            id,
            patch.email.as_ref().map(|e| e.trim().to_lowercase()),
            patch.full_name.as_ref().map(|n| n.trim().to_string()),
            patch.role.map(|r| r.to_db_str()),
            patch.hourly_wage,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("employee {id}")));
    }
    Ok(())
}

pub fn deactivate(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("UPDATE profiles SET is_active = 0 WHERE id = ?1", [id])?;
    Ok(())
}

pub fn set_credentials(conn: &Connection, profile_id: i64, salt: &str, hash: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO credentials (profile_id, salt, password_hash) VALUES (?1, ?2, ?3)
         ON CONFLICT(profile_id) DO UPDATE SET salt = excluded.salt, password_hash = excluded.password_hash",
        params![profile_id, salt, hash],
    )?;
    Ok(())
}

/// Returns `(salt, password_hash)` for the profile.
pub fn load_credentials(conn: &Connection, profile_id: i64) -> AppResult<Option<(String, String)>> {
    Ok(conn
        .query_row(
            "SELECT salt, password_hash FROM credentials WHERE profile_id = ?1",
            [profile_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?)
}
