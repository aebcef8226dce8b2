use crate::db::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::{NewShift, Shift, ShiftRole};
use crate::utils::date::{format_iso, parse_iso};
use crate::utils::time::{format_time, parse_time};
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Row, params};

const COLUMNS: &str =
    "id, employee_id, date, start_time, end_time, shift_role, notes, created_by, created_at";

pub fn map_row(row: &Row) -> rusqlite::Result<Shift> {
    let date_str: String = row.get("date")?;
    let date = parse_iso(&date_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidDate(date_str.clone())))?;

    let start_str: String = row.get("start_time")?;
    let start_time = parse_time(&start_str)
        .ok_or_else(|| conversion_error(3, AppError::InvalidTime(start_str.clone())))?;

    let end_str: String = row.get("end_time")?;
    let end_time = parse_time(&end_str)
        .ok_or_else(|| conversion_error(4, AppError::InvalidTime(end_str.clone())))?;

    let role_str: String = row.get("shift_role")?;
    let role = ShiftRole::from_db_str(&role_str).ok_or_else(|| {
        conversion_error(5, AppError::InvalidShift(format!("Invalid role: {role_str}")))
    })?;

    Ok(Shift {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        date,
        start_time,
        end_time,
        role,
        notes: row.get("notes")?,
        created_by: row.get("created_by")?,
        created_at: row.get("created_at")?,
    })
}

fn collect(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<Shift>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_shift(conn: &Connection, s: &NewShift) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO schedules (employee_id, date, start_time, end_time, shift_role, notes, created_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            s.employee_id,
            format_iso(s.date),
            format_time(s.start_time),
            format_time(s.end_time),
            s.role.to_db_str(),
            s.notes,
            s.created_by,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Inserts all shifts atomically; nothing is written if one insert fails.
pub fn insert_many(conn: &mut Connection, shifts: &[NewShift]) -> AppResult<Vec<i64>> {
    let tx = conn.transaction()?;
    let mut ids = Vec::with_capacity(shifts.len());
    for s in shifts {
        ids.push(insert_shift(&tx, s)?);
    }
    tx.commit()?;
    Ok(ids)
}

pub fn find_shift(conn: &Connection, id: i64) -> AppResult<Option<Shift>> {
    let sql = format!("SELECT {COLUMNS} FROM schedules WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_row).optional()?)
}

pub fn require_shift(conn: &Connection, id: i64) -> AppResult<Shift> {
    find_shift(conn, id)?.ok_or_else(|| AppError::NotFound(format!("shift {id}")))
}

/// Shifts with `from <= date <= to`, ordered by date then start time.
pub fn list_range(conn: &Connection, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Shift>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM schedules
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC, start_time ASC, id ASC"
    );
    collect(conn, &sql, params![format_iso(from), format_iso(to)])
}

pub fn list_for_employee(
    conn: &Connection,
    employee_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<Shift>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM schedules
         WHERE employee_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC, start_time ASC, id ASC"
    );
    collect(conn, &sql, params![employee_id, format_iso(from), format_iso(to)])
}

/// Unassigned shifts dated `from` or later.
pub fn list_open(conn: &Connection, from: NaiveDate) -> AppResult<Vec<Shift>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM schedules
         WHERE employee_id IS NULL AND date >= ?1
         ORDER BY date ASC, start_time ASC, id ASC"
    );
    collect(conn, &sql, params![format_iso(from)])
}

/// Partial update of a shift. `employee_id: Some(None)` unassigns it.
#[derive(Debug, Clone, Default)]
pub struct ShiftPatch {
    pub employee_id: Option<Option<i64>>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub role: Option<ShiftRole>,
    pub notes: Option<String>,
}

impl ShiftPatch {
    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.role.is_none()
            && self.notes.is_none()
    }

    /// The shift as it would look after the patch.
    pub fn apply_to(&self, shift: &Shift) -> Shift {
        let mut out = shift.clone();
        if let Some(emp) = self.employee_id {
            out.employee_id = emp;
        }
        if let Some(d) = self.date {
            out.date = d;
        }
        if let Some(t) = self.start_time {
            out.start_time = t;
        }
        if let Some(t) = self.end_time {
            out.end_time = t;
        }
        if let Some(r) = self.role {
            out.role = r;
        }
        if let Some(n) = &self.notes {
            out.notes = n.clone();
        }
        out
    }
}

/// Writes every field of `shift` back to its row.
pub fn save_shift(conn: &Connection, shift: &Shift) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE schedules SET employee_id = ?2, date = ?3, start_time = ?4, end_time = ?5,
                shift_role = ?6, notes = ?7
         WHERE id = ?1",
        params![
            shift.id,
            shift.employee_id,
            shift.date_str(),
            shift.start_str(),
            shift.end_str(),
            shift.role.to_db_str(),
            shift.notes,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("shift {}", shift.id)));
    }
    Ok(())
}

pub fn delete_shift(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM schedules WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("shift {id}")));
    }
    Ok(())
}

/// Deletes the employee's shifts dated `from` or later; returns how many.
pub fn delete_from_date(conn: &Connection, employee_id: i64, from: NaiveDate) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM schedules WHERE employee_id = ?1 AND date >= ?2",
        params![employee_id, format_iso(from)],
    )?)
}

/// Assigns the shift only if it is still unassigned. Returns the number of
/// changed rows (0 or 1); the check and the write are one statement.
pub fn claim_if_open(conn: &Connection, shift_id: i64, employee_id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE schedules SET employee_id = ?1 WHERE id = ?2 AND employee_id IS NULL",
        params![employee_id, shift_id],
    )?)
}

/// The employee's own shifts plus every open shift in the range.
pub fn list_visible_to(
    conn: &Connection,
    employee_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<Shift>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM schedules
         WHERE (employee_id = ?1 OR employee_id IS NULL) AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC, start_time ASC, id ASC"
    );
    collect(conn, &sql, params![employee_id, format_iso(from), format_iso(to)])
}
