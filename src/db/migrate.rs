//! Schema migrations. Each migration is applied once and recorded in the
//! `log` table as a `migration_applied` row whose target is its version.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20260201_0001_profiles_and_auth",
        description: "Created profiles, credentials and sessions tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            email        TEXT NOT NULL UNIQUE,
            full_name    TEXT NOT NULL,
            role         TEXT NOT NULL CHECK(role IN ('employee','manager')),
            hourly_wage  REAL NOT NULL DEFAULT 0 CHECK(hourly_wage >= 0),
            is_active    INTEGER NOT NULL DEFAULT 1,
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS credentials (
            profile_id    INTEGER PRIMARY KEY REFERENCES profiles(id),
            salt          TEXT NOT NULL,
            password_hash TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sessions (
            token       TEXT PRIMARY KEY,
            profile_id  INTEGER NOT NULL REFERENCES profiles(id),
            created_at  TEXT NOT NULL,
            expires_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20260201_0002_schedules",
        description: "Created schedules table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER REFERENCES profiles(id),
            date        TEXT NOT NULL,
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            shift_role  TEXT NOT NULL CHECK(shift_role IN ('kitchen','delivery','cashier','manager')),
            notes       TEXT NOT NULL DEFAULT '',
            created_by  INTEGER NOT NULL REFERENCES profiles(id),
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_schedules_date ON schedules(date, start_time);
        CREATE INDEX IF NOT EXISTS idx_schedules_employee ON schedules(employee_id, date);
        "#,
    },
    Migration {
        version: "20260203_0003_announcements_complaints",
        description: "Created announcements and complaints tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS announcements (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            title       TEXT NOT NULL,
            content     TEXT NOT NULL,
            category    TEXT NOT NULL CHECK(category IN ('general','hours','emergency','rules')),
            priority    TEXT NOT NULL DEFAULT 'normal' CHECK(priority IN ('normal','high','urgent')),
            created_by  INTEGER NOT NULL REFERENCES profiles(id),
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS complaints (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            title        TEXT NOT NULL,
            description  TEXT NOT NULL,
            category     TEXT NOT NULL CHECK(category IN ('equipment','supplies','pos','other')),
            urgency      TEXT NOT NULL CHECK(urgency IN ('low','medium','high','critical')),
            status       TEXT NOT NULL DEFAULT 'open' CHECK(status IN ('open','in_progress','resolved')),
            submitted_by INTEGER NOT NULL REFERENCES profiles(id),
            resolved_by  INTEGER REFERENCES profiles(id),
            created_at   TEXT NOT NULL,
            updated_at   TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20260205_0004_store_settings",
        description: "Created store_settings singleton",
        sql: r#"
        CREATE TABLE IF NOT EXISTS store_settings (
            id                  INTEGER PRIMARY KEY CHECK(id = 1),
            daily_payroll_limit REAL NOT NULL CHECK(daily_payroll_limit >= 0),
            updated_at          TEXT NOT NULL,
            updated_by          INTEGER REFERENCES profiles(id)
        );
        "#,
    },
];

/// Ensure that the `log` table exists; it also tracks applied migrations.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {e}", m.version)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Public entry point: run all pending migrations. Returns how many ran.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        success(format!("Migration applied: {} → {}", m.version, m.description));
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_pending_migrations(&conn).unwrap(), MIGRATIONS.len());
        assert_eq!(run_pending_migrations(&conn).unwrap(), 0);

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table'
                 AND name IN ('profiles','schedules','announcements','complaints','store_settings')",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(tables, 5);
    }
}
