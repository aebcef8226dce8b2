use crate::cli::commands::{date_or_today, signed_in};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::calendar::{CalendarCell, Direction, ViewMode, navigate};
use crate::core::request::{RequestTracker, SCHEDULE_LOAD};
use crate::core::schedule::{ScheduleLogic, ScheduleView};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::date::{month_name, today};
use chrono::Datelike;
use std::fmt::Write as _;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Calendar {
        view,
        date,
        prev,
        next,
        employee,
    } = &cli.command
    else {
        return Ok(());
    };
    let (pool, me) = signed_in(cli, cfg)?;

    let mode = ViewMode::from(*view);
    let mut reference = date_or_today(date.as_ref())?;
    if *prev {
        reference = navigate(reference, mode, Direction::Prev);
    } else if *next {
        reference = navigate(reference, mode, Direction::Next);
    }

    let mut tracker = RequestTracker::new();
    let token = tracker.begin(SCHEDULE_LOAD);
    let Some(schedule) =
        ScheduleLogic::load(&pool.conn, &me, reference, mode, *employee, &token, &tracker)?
    else {
        return Ok(());
    };

    header(match mode {
        ViewMode::Week => format!("Week of {}", schedule.cells()[0].date().unwrap_or(reference)),
        ViewMode::Month => format!("{} {}", month_name(reference.month()), reference.year()),
    });
    print!("{}", render_grid(&schedule));
    Ok(())
}

/// One block per week row: each day with its shifts, blanks skipped.
pub fn render_grid(view: &ScheduleView) -> String {
    let mut out = String::new();
    let now = today();

    for (i, (cell, shifts)) in view.buckets().into_iter().enumerate() {
        if i % 7 == 0 && i > 0 {
            out.push('\n');
        }
        let CalendarCell::Day(d) = cell else { continue };

        let marker = if d == now { " *" } else { "" };
        let _ = writeln!(out, "{}{}", d.format("%a %d %b"), marker);
        if shifts.is_empty() {
            let _ = writeln!(out, "    -");
        }
        for s in shifts {
            let _ = writeln!(
                out,
                "    {}  {:<8}  {}",
                s.time_span(),
                s.role.label(),
                view.assignee(s).unwrap_or("OPEN")
            );
        }
    }

    out
}
