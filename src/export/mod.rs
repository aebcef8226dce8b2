// src/export/mod.rs

mod fs_utils;
pub mod ics;
mod json_csv;
pub mod logic;
mod model;
mod pdf;
mod pdf_export;
pub(crate) mod range;
mod xlsx;

pub use ics::{IcsOptions, build_calendar};
pub use logic::ExportLogic;
pub use model::PayrollExportRow;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every exporter.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

/// Output formats of the payroll report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}
