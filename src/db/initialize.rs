use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Brings the schema up to date and returns how many migrations ran.
/// The roster tables rely on foreign keys, so a connection without them is
/// refused.
pub fn init_db(conn: &Connection) -> AppResult<usize> {
    let applied = run_pending_migrations(conn)?;

    let fk: i64 = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    if fk != 1 {
        return Err(AppError::Migration(
            "foreign key enforcement is off for this connection".to_string(),
        ));
    }

    Ok(applied)
}
