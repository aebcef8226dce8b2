use crate::cli::commands::signed_in;
use crate::cli::parser::{Cli, Commands, ExportKind};
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::info;
use crate::utils::date::today;
use chrono::Utc;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Export {
        what,
        format,
        file,
        range,
        employee,
        force,
    } = &cli.command
    else {
        return Ok(());
    };
    let (pool, me) = signed_in(cli, cfg)?;

    // payroll and the schedule grid default to the current month
    let month = || today().format("%Y-%m").to_string();

    match what {
        ExportKind::Payroll => {
            let range = range.clone().unwrap_or_else(month);
            let rows =
                ExportLogic::export_payroll(&pool.conn, &me, cfg, *format, file, &range, *force)?;
            info(format!("{rows} employee rows ({})", format.as_str()));
        }
        ExportKind::Ics => {
            let events = ExportLogic::export_ics(
                &pool.conn,
                &me,
                cfg,
                *employee,
                file,
                range.as_deref(),
                *force,
                Utc::now(),
            )?;
            if events > 0 {
                info(format!("{events} shifts written"));
            }
        }
        ExportKind::Schedule => {
            let range = range.clone().unwrap_or_else(month);
            let pages = ExportLogic::export_schedule_pdf(
                &pool.conn, &me, cfg, file, &range, *force, today(),
            )?;
            info(format!("{pages} month pages written"));
        }
    }

    Ok(())
}
