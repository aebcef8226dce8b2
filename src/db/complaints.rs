use crate::db::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::{Complaint, ComplaintCategory, ComplaintStatus, Urgency};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "id, title, description, category, urgency, status, submitted_by, resolved_by, created_at, updated_at";

pub fn map_row(row: &Row) -> rusqlite::Result<Complaint> {
    let cat_str: String = row.get("category")?;
    let category = ComplaintCategory::from_db_str(&cat_str).ok_or_else(|| {
        conversion_error(3, AppError::Validation(format!("Invalid category: {cat_str}")))
    })?;

    let urg_str: String = row.get("urgency")?;
    let urgency = Urgency::from_db_str(&urg_str).ok_or_else(|| {
        conversion_error(4, AppError::Validation(format!("Invalid urgency: {urg_str}")))
    })?;

    let status_str: String = row.get("status")?;
    let status = ComplaintStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(5, AppError::Validation(format!("Invalid status: {status_str}")))
    })?;

    Ok(Complaint {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        category,
        urgency,
        status,
        submitted_by: row.get("submitted_by")?,
        resolved_by: row.get("resolved_by")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_complaint(
    conn: &Connection,
    title: &str,
    description: &str,
    category: ComplaintCategory,
    urgency: Urgency,
    submitted_by: i64,
) -> AppResult<i64> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO complaints (title, description, category, urgency, status, submitted_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, 'open', ?5, ?6, ?6)",
        params![
            title,
            description,
            category.to_db_str(),
            urgency.to_db_str(),
            submitted_by,
            now
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_complaint(conn: &Connection, id: i64) -> AppResult<Option<Complaint>> {
    let sql = format!("SELECT {COLUMNS} FROM complaints WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

pub fn set_status(
    conn: &Connection,
    id: i64,
    status: ComplaintStatus,
    resolved_by: Option<i64>,
) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE complaints SET status = ?2, resolved_by = ?3, updated_at = ?4 WHERE id = ?1",
        params![id, status.to_db_str(), resolved_by, Local::now().to_rfc3339()],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("complaint {id}")));
    }
    Ok(())
}

/// Newest first, optionally filtered by status.
pub fn list_complaints(
    conn: &Connection,
    status: Option<ComplaintStatus>,
) -> AppResult<Vec<Complaint>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM complaints
         WHERE (?1 IS NULL OR status = ?1)
         ORDER BY created_at DESC, id DESC"
    ))?;
    let rows = stmt.query_map([status.map(|s| s.to_db_str())], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
