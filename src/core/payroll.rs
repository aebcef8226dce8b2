use crate::auth::require_manager;
use crate::core::calculator::budget::{BudgetStatus, compare};
use crate::core::calculator::duration::{OvernightPolicy, shift_hours};
use crate::core::calculator::payroll::{PayrollSummary, aggregate};
use crate::core::request::{RequestToken, RequestTracker};
use crate::core::settings::SettingsLogic;
use crate::db::{profiles, schedules};
use crate::errors::{AppError, AppResult};
use crate::models::{Profile, Shift};
use crate::utils::date::format_iso;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayrollPeriod {
    Day(NaiveDate),
    Range(NaiveDate, NaiveDate),
}

impl PayrollPeriod {
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            PayrollPeriod::Day(d) => (d, d),
            PayrollPeriod::Range(a, b) => (a, b),
        }
    }

    pub fn label(&self) -> String {
        match *self {
            PayrollPeriod::Day(d) => format_iso(d),
            PayrollPeriod::Range(a, b) => format!("{} → {}", format_iso(a), format_iso(b)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PayrollReport {
    pub period: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub summary: PayrollSummary,
    /// Only for single-day reports; the limit is a daily one.
    pub budget: Option<BudgetStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EarningsLine {
    pub shift: Shift,
    pub hours: f64,
    pub pay: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EarningsReport {
    pub employee: Profile,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub lines: Vec<EarningsLine>,
    pub total_hours: f64,
    pub total_pay: f64,
}

pub struct PayrollLogic;

impl PayrollLogic {
    /// Payroll over the period, with budget comparison for a single day.
    pub fn report(
        conn: &Connection,
        actor: &Profile,
        period: PayrollPeriod,
        policy: OvernightPolicy,
    ) -> AppResult<PayrollReport> {
        require_manager(actor, "view payroll")?;

        let (from, to) = period.bounds();
        if to < from {
            return Err(AppError::InvalidDate(format!(
                "end {} is before start {}",
                format_iso(to),
                format_iso(from)
            )));
        }

        let shifts = schedules::list_range(conn, from, to)?;
        let wages = profiles::wage_table(conn)?;
        let summary = aggregate(&shifts, &wages, policy);

        let budget = match period {
            PayrollPeriod::Day(_) => Some(compare(
                summary.total_pay,
                SettingsLogic::daily_limit(conn)?,
            )),
            PayrollPeriod::Range(..) => None,
        };

        Ok(PayrollReport {
            period: period.label(),
            from,
            to,
            summary,
            budget,
        })
    }

    /// Like `report`, but `None` when `token` was superseded by a newer
    /// payroll load while this one ran.
    pub fn report_latest(
        conn: &Connection,
        actor: &Profile,
        period: PayrollPeriod,
        policy: OvernightPolicy,
        token: &RequestToken,
        tracker: &RequestTracker,
    ) -> AppResult<Option<PayrollReport>> {
        let report = Self::report(conn, actor, period, policy)?;
        Ok(tracker.accept(token, report))
    }

    /// One employee's shifts with hours and pay. Employees see only
    /// themselves; managers may look at anyone.
    pub fn earnings(
        conn: &Connection,
        actor: &Profile,
        employee_id: Option<i64>,
        from: NaiveDate,
        to: NaiveDate,
        policy: OvernightPolicy,
    ) -> AppResult<EarningsReport> {
        let employee = match employee_id {
            Some(id) if id != actor.id => {
                require_manager(actor, "view other employees' earnings")?;
                profiles::require_by_id(conn, id)?
            }
            _ => actor.clone(),
        };

        let lines: Vec<EarningsLine> = schedules::list_for_employee(conn, employee.id, from, to)?
            .into_iter()
            .map(|shift| {
                let hours = shift_hours(shift.start_time, shift.end_time, policy);
                EarningsLine {
                    pay: hours * employee.hourly_wage,
                    hours,
                    shift,
                }
            })
            .collect();

        let total_hours = lines.iter().map(|l| l.hours).sum();
        let total_pay = lines.iter().map(|l| l.pay).sum();

        Ok(EarningsReport {
            employee,
            from,
            to,
            lines,
            total_hours,
            total_pay,
        })
    }
}
