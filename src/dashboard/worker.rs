//! Worker checklist view and task updates.

use crate::dashboard::model::{Checklist, TaskKind};
use crate::dashboard::store::DemoStore;
use crate::errors::{AppError, AppResult};
use crate::utils::formatting::{percent, progress_bar};
use chrono::NaiveDateTime;
use std::fmt::Write;

/// What the worker entered for a task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskInput {
    Checkbox(bool),
    /// Empty string clears the value.
    Number(String),
    Text(String),
    /// Chosen file name, `None` when the picker was cancelled.
    Photo(Option<String>),
}

impl TaskInput {
    /// Builds the input matching `kind` from a raw CLI value.
    pub fn from_raw(kind: &TaskKind, raw: &str) -> AppResult<Self> {
        Ok(match kind {
            TaskKind::Checkbox => match raw.trim().to_lowercase().as_str() {
                "" | "1" | "y" | "yes" | "true" | "done" => TaskInput::Checkbox(true),
                "0" | "n" | "no" | "false" | "undone" => TaskInput::Checkbox(false),
                other => {
                    return Err(AppError::Validation(format!(
                        "Invalid checkbox value: {other}"
                    )));
                }
            },
            TaskKind::Number { .. } => {
                let v = raw.trim();
                if !v.is_empty() && v.parse::<f64>().is_err() {
                    return Err(AppError::Validation(format!("Not a number: {v}")));
                }
                TaskInput::Number(v.to_string())
            }
            TaskKind::Text => TaskInput::Text(raw.to_string()),
            TaskKind::Photo => {
                TaskInput::Photo(Some(raw.trim().to_string()).filter(|s| !s.is_empty()))
            }
        })
    }
}

/// Applies `input` to one task, stamps it, then refreshes the checklist's
/// status and progress.
pub fn update_task(
    checklist: &mut Checklist,
    task_id: &str,
    input: TaskInput,
    now: NaiveDateTime,
) -> AppResult<()> {
    let task = checklist
        .tasks
        .iter_mut()
        .find(|t| t.id == task_id)
        .ok_or_else(|| AppError::NotFound(format!("task {task_id} in {}", checklist.id)))?;

    match (&task.kind, input) {
        (TaskKind::Checkbox, TaskInput::Checkbox(checked)) => {
            task.completed = checked;
        }
        (TaskKind::Number { .. }, TaskInput::Number(v)) => {
            task.completed = !v.is_empty();
            task.value = (!v.is_empty()).then_some(v);
        }
        (TaskKind::Text, TaskInput::Text(v)) => {
            task.completed = !v.trim().is_empty();
            task.value = Some(v);
        }
        (TaskKind::Photo, TaskInput::Photo(file)) => {
            // a cancelled picker leaves the task as it was
            let Some(file) = file else {
                return Ok(());
            };
            task.completed = true;
            task.value = Some(file);
        }
        (kind, input) => {
            return Err(AppError::Validation(format!(
                "{} task cannot take {input:?}",
                kind.label()
            )));
        }
    }

    task.timestamp = Some(now);
    checklist.last_updated = now;
    checklist.recompute();
    Ok(())
}

/// Applies `CHECKLIST/TASK=VALUE`, converting the value for the task's kind.
pub fn apply_update(store: &mut DemoStore, input: &str, now: NaiveDateTime) -> AppResult<()> {
    let invalid = || AppError::Validation(format!("Expected CHECKLIST/TASK=VALUE, got: {input}"));
    let (target, raw) = input.split_once('=').ok_or_else(invalid)?;
    let (checklist_id, task_id) = target.trim().split_once('/').ok_or_else(invalid)?;

    let checklist = store
        .checklist_mut(checklist_id)
        .ok_or_else(|| AppError::NotFound(format!("checklist {checklist_id}")))?;
    let kind = checklist
        .tasks
        .iter()
        .find(|t| t.id == task_id)
        .map(|t| t.kind.clone())
        .ok_or_else(|| AppError::NotFound(format!("task {task_id} in {checklist_id}")))?;

    update_task(checklist, task_id, TaskInput::from_raw(&kind, raw)?, now)
}

/// Rounded share of completed tasks over all of the worker's checklists.
pub fn overall_progress(checklists: &[&Checklist]) -> u32 {
    let total: usize = checklists.iter().map(|c| c.tasks.len()).sum();
    let done: usize = checklists.iter().map(|c| c.completed_tasks()).sum();
    percent(done, total)
}

fn task_line(kind: &TaskKind, completed: bool, value: Option<&str>) -> String {
    let mark = if completed { "[x]" } else { "[ ]" };
    match (kind, value) {
        (TaskKind::Number { unit }, Some(v)) => format!("{mark} {v} {unit}"),
        (TaskKind::Text, Some(v)) if !v.trim().is_empty() => format!("{mark} \"{}\"", v.trim()),
        (TaskKind::Photo, Some(f)) => format!("{mark} photo: {f}"),
        _ => mark.to_string(),
    }
}

pub fn render_worker(store: &DemoStore, employee_id: &str) -> String {
    let mut out = String::new();

    let Some(employee) = store.employee(employee_id) else {
        let _ = writeln!(out, "Unknown employee: {employee_id}");
        return out;
    };
    let checklists = store.checklists_for(employee_id);
    let progress = overall_progress(&checklists);

    let _ = writeln!(out, "👷 {} ({})", employee.name, employee.shift);
    let _ = writeln!(out, "Today's progress {}", progress_bar(progress, 20));

    for c in checklists {
        let badge = if c.is_complete() { "Complete" } else { "In Progress" };
        let _ = writeln!(out, "\n■ {} [{}] ({})", c.title, badge, c.id);
        for t in &c.tasks {
            let line = task_line(&t.kind, t.completed, t.value.as_deref());
            let stamp = t
                .timestamp
                .map(|ts| format!("  {}", ts.format("%H:%M")))
                .unwrap_or_default();
            let _ = writeln!(out, "  {} {}: {}{}", t.id, t.title, line, stamp);
        }
        let _ = writeln!(
            out,
            "  📍 {}  🕐 {}  ✓ {}/{} tasks",
            c.location_name,
            c.last_updated.format("%H:%M"),
            c.completed_tasks(),
            c.tasks.len()
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::model::ChecklistStatus;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 12)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn fridge(store: &mut DemoStore) -> &mut Checklist {
        store
            .checklist_mut("checklist-emp-2-fridge-temps")
            .unwrap()
    }

    #[test]
    fn number_completes_only_with_a_value() {
        let mut store = DemoStore::seeded(now());
        let c = fridge(&mut store);

        update_task(c, "task-1", TaskInput::Number("3".into()), now()).unwrap();
        assert!(c.tasks[0].completed);
        assert_eq!(c.tasks[0].value.as_deref(), Some("3"));

        update_task(c, "task-1", TaskInput::Number(String::new()), now()).unwrap();
        assert!(!c.tasks[0].completed);
        assert_eq!(c.tasks[0].timestamp, Some(now()));
    }

    #[test]
    fn text_needs_non_blank_content() {
        let mut store = DemoStore::seeded(now());
        let c = fridge(&mut store);
        update_task(c, "task-5", TaskInput::Text("   ".into()), now()).unwrap();
        assert!(!c.tasks[4].completed);
        update_task(c, "task-5", TaskInput::Text("door seal worn".into()), now()).unwrap();
        assert!(c.tasks[4].completed);
    }

    #[test]
    fn completing_every_task_completes_the_checklist() {
        let mut store = DemoStore::seeded(now());
        let c = fridge(&mut store);
        for id in ["task-1", "task-2", "task-3"] {
            update_task(c, id, TaskInput::Number("3".into()), now()).unwrap();
        }
        update_task(c, "task-4", TaskInput::Checkbox(true), now()).unwrap();
        update_task(c, "task-5", TaskInput::Text("ok".into()), now()).unwrap();

        assert_eq!(c.status, ChecklistStatus::Complete);
        assert_eq!(c.progress, 100);
        assert_eq!(c.last_updated, now());

        update_task(c, "task-4", TaskInput::Checkbox(false), now()).unwrap();
        assert_eq!(c.status, ChecklistStatus::Pending);
        assert_eq!(c.progress, 80);
    }

    #[test]
    fn photo_without_file_changes_nothing() {
        let mut store = DemoStore::seeded(now());
        let c = store
            .checklist_mut("checklist-emp-2-cleaning")
            .unwrap();
        let before = c.tasks[4].completed;
        update_task(c, "task-5", TaskInput::Photo(None), now()).unwrap();
        assert_eq!(c.tasks[4].completed, before);

        update_task(c, "task-5", TaskInput::Photo(Some("floor.jpg".into())), now()).unwrap();
        assert!(c.tasks[4].completed);
    }

    #[test]
    fn mismatched_input_is_rejected() {
        let mut store = DemoStore::seeded(now());
        let c = fridge(&mut store);
        assert!(update_task(c, "task-1", TaskInput::Checkbox(true), now()).is_err());
        assert!(update_task(c, "task-9", TaskInput::Checkbox(true), now()).is_err());
    }

    #[test]
    fn overall_progress_rounds_over_all_tasks() {
        let store = DemoStore::seeded(now());
        let lists = store.checklists_for("emp-1");
        let total: usize = lists.iter().map(|c| c.tasks.len()).sum();
        let done: usize = lists.iter().map(|c| c.completed_tasks()).sum();
        assert_eq!(overall_progress(&lists), percent(done, total));
        assert!(render_worker(&store, "emp-1").contains("Marko Petrović"));
    }

    #[test]
    fn cli_style_updates_convert_by_kind() {
        let mut store = DemoStore::seeded(now());
        apply_update(&mut store, "checklist-emp-2-fridge-temps/task-2=4.5", now()).unwrap();
        let c = store.checklist_mut("checklist-emp-2-fridge-temps").unwrap();
        assert_eq!(c.tasks[1].value.as_deref(), Some("4.5"));

        assert!(apply_update(&mut store, "checklist-emp-2-fridge-temps/task-2=warm", now()).is_err());
        assert!(apply_update(&mut store, "no-such/task-1=1", now()).is_err());
        assert!(apply_update(&mut store, "missing-equals", now()).is_err());
    }
}
