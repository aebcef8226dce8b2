// src/export/logic.rs

use crate::auth::require_manager;
use crate::config::Config;
use crate::core::calendar::ViewMode;
use crate::core::payroll::{PayrollLogic, PayrollPeriod};
use crate::core::request::{RequestTracker, SCHEDULE_LOAD};
use crate::core::schedule::{ScheduleLogic, ScheduleView};
use crate::db::{profiles, schedules};
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::ics::{IcsOptions, build_calendar, export_ics};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::export_rows;
use crate::export::pdf_export::{export_payroll_pdf, export_schedule_pdf};
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::models::{Profile, Shift};
use crate::ui::messages::warning;
use crate::utils::date::{first_of_month, format_iso};
use chrono::{DateTime, Months, NaiveDate, Utc};
use rusqlite::Connection;
use std::path::Path;

/// High level export entry points.
pub struct ExportLogic;

impl ExportLogic {
    /// Payroll report over `range` (see `parse_range`) in the chosen format.
    /// Returns the number of employee rows written.
    pub fn export_payroll(
        conn: &Connection,
        actor: &Profile,
        cfg: &Config,
        format: ExportFormat,
        file: &str,
        range: &str,
        force: bool,
    ) -> AppResult<usize> {
        require_manager(actor, "export payroll")?;

        let path = Path::new(file);
        let (from, to) = parse_range(range)?;
        ensure_writable(path, force)?;

        let period = if from == to {
            PayrollPeriod::Day(from)
        } else {
            PayrollPeriod::Range(from, to)
        };
        let report = PayrollLogic::report(conn, actor, period, cfg.overnight_policy)?;
        let rows = export_rows(&report.summary);

        if rows.is_empty() {
            warning("No payroll rows found for selected range.");
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&report, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, &report.summary, "Payroll", path)?,
            ExportFormat::Pdf => {
                let title = payroll_title(&cfg.store_name, from, to);
                export_payroll_pdf(&rows, &report.summary, path, &title)?
            }
        }

        Ok(rows.len())
    }

    /// Calendar file of one employee's shifts. Without `employee_id` the
    /// caller's own shifts are exported. Returns the number of events;
    /// nothing is written when there are none.
    #[allow(clippy::too_many_arguments)]
    pub fn export_ics(
        conn: &Connection,
        actor: &Profile,
        cfg: &Config,
        employee_id: Option<i64>,
        file: &str,
        range: Option<&str>,
        force: bool,
        now: DateTime<Utc>,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        let (employee, shifts) = Self::ics_shifts(conn, actor, employee_id, range)?;

        if shifts.is_empty() {
            warning(format!("No shifts found to export for {}.", employee.full_name));
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let opts = IcsOptions {
            store_name: cfg.store_name.clone(),
            location: cfg.calendar_location.clone(),
            timezone: cfg.calendar_timezone.clone(),
        };
        let content = build_calendar(&shifts, &opts, now.naive_utc());
        export_ics(&content, path)?;

        Ok(shifts.len())
    }

    /// Shifts that go into an employee's calendar, oldest first.
    pub fn ics_shifts(
        conn: &Connection,
        actor: &Profile,
        employee_id: Option<i64>,
        range: Option<&str>,
    ) -> AppResult<(Profile, Vec<Shift>)> {
        let employee = match employee_id {
            Some(id) if id != actor.id => {
                require_manager(actor, "export other employees' calendars")?;
                profiles::require_by_id(conn, id)?
            }
            _ => actor.clone(),
        };

        let (from, to) = match range {
            Some(r) if !r.eq_ignore_ascii_case("all") => parse_range(r)?,
            _ => all_time(),
        };
        let shifts = schedules::list_for_employee(conn, employee.id, from, to)?;
        Ok((employee, shifts))
    }

    /// Month-grid PDF, one page per month touched by `range`. Returns the
    /// number of pages.
    pub fn export_schedule_pdf(
        conn: &Connection,
        actor: &Profile,
        cfg: &Config,
        file: &str,
        range: &str,
        force: bool,
        today: NaiveDate,
    ) -> AppResult<usize> {
        require_manager(actor, "export the schedule")?;

        let path = Path::new(file);
        let (from, to) = parse_range(range)?;
        ensure_writable(path, force)?;

        let months = Self::month_views(conn, actor, from, to)?;
        export_schedule_pdf(&months, &cfg.store_name, today, path)?;
        Ok(months.len())
    }

    fn month_views(
        conn: &Connection,
        actor: &Profile,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ScheduleView>> {
        let mut tracker = RequestTracker::new();
        let mut views = Vec::new();
        let mut month = first_of_month(from);

        while month <= to {
            let token = tracker.begin(SCHEDULE_LOAD);
            if let Some(view) =
                ScheduleLogic::load(conn, actor, month, ViewMode::Month, None, &token, &tracker)?
            {
                views.push(view);
            }
            match month.checked_add_months(Months::new(1)) {
                Some(next) => month = next,
                None => break,
            }
        }

        Ok(views)
    }
}

fn all_time() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN),
        NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX),
    )
}

fn payroll_title(store: &str, from: NaiveDate, to: NaiveDate) -> String {
    if from == to {
        format!("{store} payroll for {}", format_iso(from))
    } else {
        format!("{store} payroll from {} to {}", format_iso(from), format_iso(to))
    }
}
