// src/export/pdf_export.rs

use crate::core::calculator::payroll::PayrollSummary;
use crate::core::calendar::CalendarCell;
use crate::core::schedule::ScheduleView;
use crate::errors::{AppError, AppResult};
use crate::export::model::{PayrollExportRow, get_headers, rows_to_table};
use crate::export::notify_export_success;
use crate::export::pdf::{GridCell, PdfManager};
use crate::ui::messages::info;
use crate::utils::date::{WEEKDAY_HEADERS, month_name};
use chrono::{Datelike, NaiveDate};
use std::path::Path;

pub(crate) fn export_payroll_pdf(
    rows: &[PayrollExportRow],
    summary: &PayrollSummary,
    path: &Path,
    title: &str,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let data_vec = rows_to_table(rows, summary);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, &headers, &data_vec);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}

/// Grid cells of one month view: "Thu 12" then, per shift, the employee
/// name (or OPEN) and its time span.
pub(crate) fn month_grid_cells(view: &ScheduleView, today: NaiveDate) -> Vec<GridCell> {
    view.buckets()
        .into_iter()
        .map(|(cell, shifts)| match cell {
            CalendarCell::Blank => GridCell::default(),
            CalendarCell::Day(date) => {
                let mut lines = Vec::new();
                if shifts.is_empty() {
                    lines.push("No shifts".to_string());
                }
                for s in shifts {
                    lines.push(view.assignee(s).unwrap_or("OPEN").to_string());
                    lines.push(s.time_span());
                }
                GridCell {
                    label: Some(date.format("%a %-d").to_string()),
                    lines,
                    highlight: date == today,
                }
            }
        })
        .collect()
}

/// One landscape page per month view.
pub(crate) fn export_schedule_pdf(
    months: &[ScheduleView],
    store_name: &str,
    today: NaiveDate,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting schedule to PDF: {}", path.display()));

    let mut pdf = PdfManager::landscape();
    for view in months {
        let title = format!(
            "{} roster - {} {}",
            store_name,
            month_name(view.reference.month()),
            view.reference.year()
        );
        pdf.write_month_grid(&title, &WEEKDAY_HEADERS, &month_grid_cells(view, today));
    }

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
