use crate::core::bucket::bucket_by_cells;
use crate::core::calendar::{CalendarCell, ViewMode, cells, date_range};
use crate::core::request::{RequestToken, RequestTracker};
use crate::db::{profiles, schedules};
use crate::errors::AppResult;
use crate::models::{Profile, Shift};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::HashMap;

/// Shifts of one calendar view, bucketed per cell, plus the names needed
/// to render them.
#[derive(Debug, Clone)]
pub struct ScheduleView {
    pub reference: NaiveDate,
    pub mode: ViewMode,
    pub shifts: Vec<Shift>,
    pub names: HashMap<i64, String>,
}

impl ScheduleView {
    pub fn cells(&self) -> Vec<CalendarCell> {
        cells(self.reference, self.mode)
    }

    pub fn buckets(&self) -> Vec<(CalendarCell, Vec<&Shift>)> {
        bucket_by_cells(&self.shifts, &self.cells())
    }

    /// Employee name, or `None` for an open shift.
    pub fn assignee(&self, shift: &Shift) -> Option<&str> {
        shift
            .employee_id
            .map(|id| self.names.get(&id).map(String::as_str).unwrap_or("?"))
    }
}

pub struct ScheduleLogic;

impl ScheduleLogic {
    /// Loads the view. Employees see their own shifts plus open ones;
    /// managers see everything, or one employee's shifts when filtered.
    /// `None` when `token` is no longer the latest schedule load.
    #[allow(clippy::too_many_arguments)]
    pub fn load(
        conn: &Connection,
        actor: &Profile,
        reference: NaiveDate,
        mode: ViewMode,
        only_employee: Option<i64>,
        token: &RequestToken,
        tracker: &RequestTracker,
    ) -> AppResult<Option<ScheduleView>> {
        let (from, to) = date_range(reference, mode);

        let shifts = if !actor.is_manager() {
            schedules::list_visible_to(conn, actor.id, from, to)?
        } else if let Some(id) = only_employee {
            schedules::list_for_employee(conn, id, from, to)?
        } else {
            schedules::list_range(conn, from, to)?
        };
        let names = name_table(conn)?;

        Ok(tracker.accept(
            token,
            ScheduleView {
                reference,
                mode,
                shifts,
                names,
            },
        ))
    }
}

/// id → full name of every profile, active or not.
pub fn name_table(conn: &Connection) -> AppResult<HashMap<i64, String>> {
    Ok(profiles::list_profiles(conn, true)?
        .into_iter()
        .map(|p| (p.id, p.full_name))
        .collect())
}
