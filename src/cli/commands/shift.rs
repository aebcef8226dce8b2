use crate::cli::commands::{date_or_today, parse_date, signed_in};
use crate::cli::parser::{Cli, Commands, ShiftCmd};
use crate::config::Config;
use crate::core::claim::ClaimLogic;
use crate::core::schedule::name_table;
use crate::core::shift::{BulkShiftPlan, ShiftLogic, parse_template, parse_weekdays};
use crate::db::schedules::{self, ShiftPatch};
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::{NewShift, Shift, ShiftRole};
use crate::ui::messages::{header, info, success};
use crate::utils::date::{first_of_month, last_of_month, today};
use crate::utils::table::Table;
use crate::utils::time::{parse_optional_time, parse_required_time};
use std::collections::HashMap;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Shift { action } = &cli.command else {
        return Ok(());
    };
    let (mut pool, me) = signed_in(cli, cfg)?;

    match action {
        ShiftCmd::Add {
            date,
            start,
            end,
            role,
            employee,
            notes,
        } => {
            let shift = NewShift {
                employee_id: *employee,
                date: parse_date(date)?,
                start_time: parse_required_time(start)?,
                end_time: parse_required_time(end)?,
                role: parse_role(role)?,
                notes: notes.trim().to_string(),
                created_by: me.id,
            };
            let id = ShiftLogic::add(&pool.conn, &me, &shift)?;
            if employee.is_none() {
                success(format!("Open shift {id} added for {date}"));
            } else {
                success(format!("Shift {id} added for {date}"));
            }
        }

        ShiftCmd::Edit {
            id,
            date,
            start,
            end,
            role,
            employee,
            notes,
        } => {
            let patch = ShiftPatch {
                employee_id: employee.as_deref().map(parse_assignee).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                start_time: parse_optional_time(start.as_ref())?,
                end_time: parse_optional_time(end.as_ref())?,
                role: role.as_deref().map(parse_role).transpose()?,
                notes: notes.clone(),
            };
            let updated = ShiftLogic::edit(&pool.conn, &me, *id, &patch)?;
            success(format!(
                "Shift {id} updated: {} {}",
                updated.date_str(),
                updated.time_span()
            ));
        }

        ShiftCmd::Delete { id } => {
            ShiftLogic::delete(&pool.conn, &me, *id)?;
            success(format!("Shift {id} deleted"));
        }

        ShiftCmd::List { range, employee } => {
            let (from, to) = match range {
                Some(r) => parse_range(r)?,
                None => (first_of_month(today()), last_of_month(today())),
            };
            let shifts = if !me.is_manager() {
                schedules::list_visible_to(&pool.conn, me.id, from, to)?
            } else if let Some(emp) = employee {
                schedules::list_for_employee(&pool.conn, *emp, from, to)?
            } else {
                schedules::list_range(&pool.conn, from, to)?
            };

            header(format!("Shifts {from} → {to}"));
            print_shifts(&shifts, &name_table(&pool.conn)?);
        }

        ShiftCmd::Open { from } => {
            let from = date_or_today(from.as_ref())?;
            let shifts = schedules::list_open(&pool.conn, from)?;

            header(format!("Open shifts from {from}"));
            if shifts.is_empty() {
                info("No open shifts.");
            } else {
                print_shifts(&shifts, &HashMap::new());
            }
        }

        ShiftCmd::Claim { id } => {
            let shift = ClaimLogic::claim(&pool.conn, *id, &me)?;
            success(format!(
                "Shift {id} claimed: {} {} ({})",
                shift.date_str(),
                shift.time_span(),
                shift.role.label()
            ));
        }

        ShiftCmd::BulkCreate {
            from,
            to,
            weekdays,
            assign,
            notes,
        } => {
            let plan = BulkShiftPlan {
                from: parse_date(from)?,
                to: parse_date(to)?,
                weekdays: parse_weekdays(weekdays)?,
                templates: assign
                    .iter()
                    .map(|a| parse_template(a))
                    .collect::<AppResult<Vec<_>>>()?,
                notes: notes.trim().to_string(),
            };
            let ids = ShiftLogic::bulk_create(&mut pool.conn, &me, &plan)?;
            success(format!("{} shifts created", ids.len()));
        }

        ShiftCmd::BulkEdit {
            ids,
            employee,
            start,
            end,
            role,
        } => {
            let patch = ShiftPatch {
                employee_id: employee.as_deref().map(parse_assignee).transpose()?,
                start_time: parse_optional_time(start.as_ref())?,
                end_time: parse_optional_time(end.as_ref())?,
                role: role.as_deref().map(parse_role).transpose()?,
                ..ShiftPatch::default()
            };
            let report = ShiftLogic::bulk_edit(&pool.conn, &me, ids, &patch)?;
            report.print("Shift update");
        }

        ShiftCmd::BulkDelete { ids } => {
            let report = ShiftLogic::bulk_delete(&pool.conn, &me, ids)?;
            report.print("Shift delete");
        }
    }

    Ok(())
}

fn parse_role(s: &str) -> AppResult<ShiftRole> {
    ShiftRole::parse(s).ok_or_else(|| AppError::Validation(format!("Invalid shift role: {s}")))
}

/// `open` (or `none`) unassigns, anything else is an employee id.
fn parse_assignee(s: &str) -> AppResult<Option<i64>> {
    match s.trim().to_lowercase().as_str() {
        "open" | "none" => Ok(None),
        other => other
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("Invalid employee id: {s}"))),
    }
}

fn print_shifts(shifts: &[Shift], names: &HashMap<i64, String>) {
    let mut t = Table::new(&["id", "date", "time", "role", "employee", "notes"]);
    for s in shifts {
        let who = match s.employee_id {
            Some(id) => names.get(&id).cloned().unwrap_or_else(|| format!("#{id}")),
            None => "OPEN".to_string(),
        };
        t.add_row(vec![
            s.id.to_string(),
            s.date_str(),
            s.time_span(),
            s.role.label().to_string(),
            who,
            s.notes.clone(),
        ]);
    }
    print!("{}", t.render());
}
