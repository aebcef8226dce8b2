use crate::cli::commands::{bearer, signed_in};
use crate::cli::parser::{Cli, Commands, EmployeeCmd};
use crate::config::Config;
use crate::core::employee::{EmployeeLogic, parse_edit};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::functions::{self, FunctionContext};
use crate::ui::messages::{header, info, success};
use crate::utils::formatting::format_money;
use crate::utils::table::Table;
use serde_json::{Map, Value, json};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = &cli.command else {
        return Ok(());
    };

    match action {
        EmployeeCmd::Add {
            email,
            password,
            name,
            role,
            wage,
        } => {
            let body = json!({
                "email": email,
                "password": password,
                "full_name": name,
                "role": role,
                "hourly_wage": wage,
            });
            let out = call(cli, cfg, &body, functions::create_employee)?;
            let id = out["user"]["id"].as_i64().unwrap_or_default();
            success(format!("Employee {name} created (id {id})"));
        }

        EmployeeCmd::Update {
            id,
            email,
            password,
            name,
            role,
            wage,
        } => {
            let mut body = Map::new();
            body.insert("employee_id".into(), json!(id));
            let fields = [
                ("email", email),
                ("password", password),
                ("full_name", name),
                ("role", role),
                ("hourly_wage", wage),
            ];
            for (key, value) in fields {
                if let Some(v) = value {
                    body.insert(key.into(), json!(v));
                }
            }
            let out = call(cli, cfg, &Value::Object(body), functions::update_employee)?;
            let who = out["profile"]["full_name"].as_str().unwrap_or_default();
            success(format!("Employee {id} ({who}) updated"));
            if out["password_changed"].as_bool() == Some(true) {
                info("Password changed.");
            }
        }

        EmployeeCmd::Remove { id } => {
            let body = json!({ "employee_id": id });
            let out = call(cli, cfg, &body, functions::remove_employee)?;
            success(format!(
                "{} ({} upcoming shifts removed)",
                out["message"].as_str().unwrap_or("Employee removed"),
                out["removed_shifts"].as_u64().unwrap_or(0)
            ));
        }

        EmployeeCmd::List { all } => {
            let (pool, _me) = signed_in(cli, cfg)?;
            let list = EmployeeLogic::list(&pool.conn, *all)?;

            header("Employees");
            let mut t = Table::new(&["id", "name", "email", "role", "wage", "active"]);
            for p in &list {
                t.add_row(vec![
                    p.id.to_string(),
                    p.full_name.clone(),
                    p.email.clone(),
                    p.role.to_db_str().to_string(),
                    format_money(p.hourly_wage, &cfg.currency_symbol),
                    if p.is_active { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", t.render());
        }

        EmployeeCmd::BulkEdit { edits } => {
            let parsed = edits
                .iter()
                .map(|e| parse_edit(e))
                .collect::<AppResult<Vec<_>>>()?;
            let (pool, me) = signed_in(cli, cfg)?;
            let report = EmployeeLogic::bulk_edit(&pool.conn, &me, &parsed)?;
            report.print("Employee update");
        }
    }

    Ok(())
}

type EmployeeFunction =
    fn(&rusqlite::Connection, Option<&str>, &str, &FunctionContext) -> functions::FunctionResponse;

/// Runs one employee function with the current session as bearer.
fn call(cli: &Cli, cfg: &Config, body: &Value, f: EmployeeFunction) -> AppResult<Value> {
    let pool = DbPool::open(&cfg.database)?;
    let authorization = bearer(cli, cfg)?;
    let ctx = FunctionContext::current(cfg.min_password_length);
    f(&pool.conn, authorization.as_deref(), &body.to_string(), &ctx).into_result()
}
