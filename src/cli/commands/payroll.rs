use crate::cli::commands::{date_or_today, parse_date, signed_in};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::calendar::{ViewMode, date_range};
use crate::core::payroll::{PayrollLogic, PayrollPeriod};
use crate::core::request::{PAYROLL_LOAD, RequestTracker};
use crate::errors::AppResult;
use crate::export::range::parse_range;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::formatting::{format_hours, format_money};
use crate::utils::table::Table;

pub fn payroll(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Payroll { date, range } = &cli.command else {
        return Ok(());
    };
    let (pool, me) = signed_in(cli, cfg)?;

    let period = match (date, range) {
        (Some(d), _) => PayrollPeriod::Day(parse_date(d)?),
        (None, Some(r)) => match parse_range(r)? {
            (from, to) if from == to => PayrollPeriod::Day(from),
            (from, to) => PayrollPeriod::Range(from, to),
        },
        (None, None) => PayrollPeriod::Day(date_or_today(None)?),
    };

    let mut tracker = RequestTracker::new();
    let token = tracker.begin(PAYROLL_LOAD);
    let Some(report) = PayrollLogic::report_latest(
        &pool.conn,
        &me,
        period,
        cfg.overnight_policy,
        &token,
        &tracker,
    )?
    else {
        return Ok(());
    };

    let sym = &cfg.currency_symbol;
    header(format!("Payroll {}", report.period));

    if report.summary.rows.is_empty() {
        info("No assigned shifts in this period.");
    } else {
        let mut t = Table::new(&["employee", "shifts", "hours", "wage", "pay"]);
        for r in &report.summary.rows {
            t.add_row(vec![
                r.full_name.clone(),
                r.shifts.to_string(),
                format_hours(r.hours),
                format_money(r.hourly_wage, sym),
                format_money(r.pay, sym),
            ]);
        }
        t.add_row(vec![
            "TOTAL".to_string(),
            report.summary.rows.iter().map(|r| r.shifts).sum::<usize>().to_string(),
            format_hours(report.summary.total_hours),
            String::new(),
            format_money(report.summary.total_pay, sym),
        ]);
        print!("{}", t.render());
    }

    if report.summary.skipped > 0 {
        info(format!(
            "{} open or unassigned shifts not counted",
            report.summary.skipped
        ));
    }

    if let Some(budget) = &report.budget {
        if budget.is_over() {
            warning(budget.describe(sym));
        } else {
            success(budget.describe(sym));
        }
    }

    Ok(())
}

pub fn earnings(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Earnings {
        period,
        date,
        employee,
    } = &cli.command
    else {
        return Ok(());
    };
    let (pool, me) = signed_in(cli, cfg)?;

    let reference = date_or_today(date.as_ref())?;
    let (from, to) = date_range(reference, ViewMode::from(*period));
    let report = PayrollLogic::earnings(
        &pool.conn,
        &me,
        *employee,
        from,
        to,
        cfg.overnight_policy,
    )?;

    let sym = &cfg.currency_symbol;
    header(format!("Earnings of {} {from} → {to}", report.employee.full_name));

    if report.lines.is_empty() {
        info("No shifts in this period.");
        return Ok(());
    }

    let mut t = Table::new(&["date", "time", "role", "hours", "pay"]);
    for l in &report.lines {
        t.add_row(vec![
            l.shift.date_str(),
            l.shift.time_span(),
            l.shift.role.label().to_string(),
            format_hours(l.hours),
            format_money(l.pay, sym),
        ]);
    }
    print!("{}", t.render());
    success(format!(
        "Total: {} · {} at {}/h",
        format_hours(report.total_hours),
        format_money(report.total_pay, sym),
        format_money(report.employee.hourly_wage, sym)
    ));

    Ok(())
}
