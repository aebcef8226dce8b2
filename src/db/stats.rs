use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::parse_iso;
use rusqlite::OptionalExtension;
use std::fs;

const COUNTED_TABLES: [&str; 5] = [
    "profiles",
    "schedules",
    "announcements",
    "complaints",
    "log",
];

/// Row count per table, in a fixed order.
pub fn table_counts(pool: &DbPool) -> AppResult<Vec<(&'static str, i64)>> {
    let mut out = Vec::new();
    for table in COUNTED_TABLES {
        let count: i64 = pool
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        out.push((table, count));
    }
    Ok(out)
}

/// First and last shift date, when any shift exists.
pub fn shift_date_range(pool: &DbPool) -> AppResult<Option<(String, String)>> {
    Ok(pool
        .conn
        .query_row(
            "SELECT MIN(date), MAX(date) FROM schedules HAVING COUNT(*) > 0",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?)
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for (table, count) in table_counts(pool)? {
        println!("{}• {}:{} {}{}{}", CYAN, table, RESET, GREEN, count, RESET);
    }

    //
    // 3) SHIFT DATE RANGE
    //
    let range = shift_date_range(pool)?;
    let (fmt_first, fmt_last) = match &range {
        Some((f, l)) => (f.clone(), l.clone()),
        None => (format!("{GREY}--{RESET}"), format!("{GREY}--{RESET}")),
    };

    println!("{}• Shift dates:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE SHIFTS/DAY
    //
    if let Some((f, l)) = range
        && let (Some(d1), Some(d2)) = (parse_iso(&f), parse_iso(&l))
    {
        let shifts: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM schedules", [], |row| row.get(0))?;
        let days = (d2 - d1).num_days() + 1;
        println!(
            "{}• Average shifts/day:{} {:.2}",
            CYAN,
            RESET,
            shifts as f64 / days as f64
        );
    }

    println!();
    Ok(())
}
