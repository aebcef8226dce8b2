use crate::errors::AppResult;
use crate::models::StoreSettings;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

/// The singleton settings row; `None` when no manager has set a limit yet.
pub fn load_settings(conn: &Connection) -> AppResult<Option<StoreSettings>> {
    Ok(conn
        .query_row(
            "SELECT daily_payroll_limit, updated_at, updated_by FROM store_settings WHERE id = 1",
            [],
            |r| {
                Ok(StoreSettings {
                    daily_payroll_limit: r.get(0)?,
                    updated_at: r.get(1)?,
                    updated_by: r.get(2)?,
                })
            },
        )
        .optional()?)
}

pub fn save_daily_limit(conn: &Connection, limit: f64, updated_by: i64) -> AppResult<()> {
    conn.execute(
        "INSERT INTO store_settings (id, daily_payroll_limit, updated_at, updated_by)
         VALUES (1, ?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET
            daily_payroll_limit = excluded.daily_payroll_limit,
            updated_at = excluded.updated_at,
            updated_by = excluded.updated_by",
        params![limit, Local::now().to_rfc3339(), updated_by],
    )?;
    Ok(())
}
