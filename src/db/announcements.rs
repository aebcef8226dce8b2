use crate::db::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::{Announcement, AnnouncementCategory, Priority};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str = "id, title, content, category, priority, created_by, created_at, updated_at";

// urgent > high > normal, then newest first
const ORDER: &str = "ORDER BY CASE priority WHEN 'urgent' THEN 0 WHEN 'high' THEN 1 ELSE 2 END,
                     created_at DESC, id DESC";

pub fn map_row(row: &Row) -> rusqlite::Result<Announcement> {
    let cat_str: String = row.get("category")?;
    let category = AnnouncementCategory::from_db_str(&cat_str).ok_or_else(|| {
        conversion_error(3, AppError::Validation(format!("Invalid category: {cat_str}")))
    })?;

    let prio_str: String = row.get("priority")?;
    let priority = Priority::from_db_str(&prio_str).ok_or_else(|| {
        conversion_error(4, AppError::Validation(format!("Invalid priority: {prio_str}")))
    })?;

    Ok(Announcement {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        category,
        priority,
        created_by: row.get("created_by")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_announcement(
    conn: &Connection,
    title: &str,
    content: &str,
    category: AnnouncementCategory,
    priority: Priority,
    created_by: i64,
) -> AppResult<i64> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO announcements (title, content, category, priority, created_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![
            title,
            content,
            category.to_db_str(),
            priority.to_db_str(),
            created_by,
            now
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_announcement(conn: &Connection, id: i64) -> AppResult<Option<Announcement>> {
    let sql = format!("SELECT {COLUMNS} FROM announcements WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

pub fn save_announcement(conn: &Connection, a: &Announcement) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE announcements SET title = ?2, content = ?3, category = ?4, priority = ?5, updated_at = ?6
         WHERE id = ?1",
        params![
            a.id,
            a.title,
            a.content,
            a.category.to_db_str(),
            a.priority.to_db_str(),
            Local::now().to_rfc3339(),
        ],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("announcement {}", a.id)));
    }
    Ok(())
}

pub fn delete_announcement(conn: &Connection, id: i64) -> AppResult<()> {
    if conn.execute("DELETE FROM announcements WHERE id = ?1", [id])? == 0 {
        return Err(AppError::NotFound(format!("announcement {id}")));
    }
    Ok(())
}

pub fn list_announcements(
    conn: &Connection,
    category: Option<AnnouncementCategory>,
) -> AppResult<Vec<Announcement>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM announcements WHERE (?1 IS NULL OR category = ?1) {ORDER}"
    ))?;
    let rows = stmt.query_map([category.map(|c| c.to_db_str())], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
