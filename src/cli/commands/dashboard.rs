use crate::cli::parser::Commands;
use crate::dashboard::notifications::{end_of_day_summary, mark_as_read, send_shift_end_reminders};
use crate::dashboard::manager::render_checklist_detail;
use crate::dashboard::worker::apply_update;
use crate::dashboard::{DemoStore, View, render};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use chrono::Local;

/// The store is rebuilt on every call, so `--set` and `--read` only affect
/// the view printed by this invocation.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    let Commands::Dashboard {
        view,
        employee,
        summary,
        detail,
        set,
        read,
    } = cmd
    else {
        return Ok(());
    };

    let now = Local::now().naive_local();
    let mut store = DemoStore::seeded(now);

    for update in set {
        apply_update(&mut store, update, now)?;
    }
    for id in read {
        mark_as_read(&mut store, id)?;
    }
    send_shift_end_reminders(&mut store, now);

    let view = View::parse(view.as_str(), employee.as_deref())
        .ok_or_else(|| AppError::Validation(format!("Unknown view: {}", view.as_str())))?;

    header(view.title());
    print!("{}", render(&view, &store, now));

    if let Some(id) = detail {
        let checklist = store
            .checklists
            .iter()
            .find(|c| c.id == *id)
            .ok_or_else(|| AppError::NotFound(format!("checklist {id}")))?;
        header("Checklist detail");
        print!("{}", render_checklist_detail(checklist));
    }

    if *summary {
        header("End of day summary");
        info(end_of_day_summary(&store));
    }

    Ok(())
}
