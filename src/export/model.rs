// src/export/model.rs

use crate::core::calculator::payroll::{EmployeePayroll, PayrollSummary};
use serde::Serialize;

/// Flat payroll line shared by the CSV, XLSX and PDF exporters.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PayrollExportRow {
    pub employee_id: i64,
    pub employee: String,
    pub hourly_wage: f64,
    pub shifts: usize,
    pub hours: f64,
    pub pay: f64,
}

impl From<&EmployeePayroll> for PayrollExportRow {
    fn from(r: &EmployeePayroll) -> Self {
        Self {
            employee_id: r.employee_id,
            employee: r.full_name.clone(),
            hourly_wage: round2(r.hourly_wage),
            shifts: r.shifts,
            hours: round2(r.hours),
            pay: round2(r.pay),
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub(crate) fn export_rows(summary: &PayrollSummary) -> Vec<PayrollExportRow> {
    summary.rows.iter().map(PayrollExportRow::from).collect()
}

/// Header for CSV / XLSX / PDF
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["employee_id", "employee", "hourly_wage", "shifts", "hours", "pay"]
}

pub(crate) fn row_to_cells(r: &PayrollExportRow) -> Vec<String> {
    vec![
        r.employee_id.to_string(),
        r.employee.clone(),
        format!("{:.2}", r.hourly_wage),
        r.shifts.to_string(),
        format!("{:.2}", r.hours),
        format!("{:.2}", r.pay),
    ]
}

/// Table body plus a closing totals line (for PDF).
pub(crate) fn rows_to_table(rows: &[PayrollExportRow], summary: &PayrollSummary) -> Vec<Vec<String>> {
    let mut table: Vec<Vec<String>> = rows.iter().map(row_to_cells).collect();
    table.push(vec![
        String::new(),
        "TOTAL".to_string(),
        String::new(),
        rows.iter().map(|r| r.shifts).sum::<usize>().to_string(),
        format!("{:.2}", summary.total_hours),
        format!("{:.2}", summary.total_pay),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_line_closes_the_table() {
        let summary = PayrollSummary {
            rows: vec![EmployeePayroll {
                employee_id: 3,
                full_name: "Ana".into(),
                hourly_wage: 15.0,
                shifts: 2,
                hours: 12.5,
                pay: 187.5,
            }],
            total_hours: 12.5,
            total_pay: 187.5,
            skipped: 1,
        };

        let rows = export_rows(&summary);
        let table = rows_to_table(&rows, &summary);

        assert_eq!(table.len(), 2);
        assert_eq!(table[0], vec!["3", "Ana", "15.00", "2", "12.50", "187.50"]);
        assert_eq!(table[1][1], "TOTAL");
        assert_eq!(table[1][5], "187.50");
        assert_eq!(get_headers().len(), table[0].len());
    }

    #[test]
    fn export_rows_round_to_cents() {
        let summary = PayrollSummary {
            rows: vec![EmployeePayroll {
                employee_id: 5,
                full_name: "Bo".into(),
                hourly_wage: 13.0,
                shifts: 1,
                hours: 20.0 / 60.0,
                pay: 20.0 / 60.0 * 13.0,
            }],
            total_hours: 20.0 / 60.0,
            total_pay: 20.0 / 60.0 * 13.0,
            skipped: 0,
        };

        let rows = export_rows(&summary);
        assert_eq!(rows[0].hours, 0.33);
        assert_eq!(rows[0].pay, 4.33);
        assert_eq!(summary.rows[0].hours, 20.0 / 60.0);
    }
}
