use crate::cli::commands::signed_in;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::settings::SettingsLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::format_money;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Settings { daily_limit, print } = &cli.command else {
        return Ok(());
    };
    let (pool, me) = signed_in(cli, cfg)?;

    if let Some(limit) = daily_limit {
        SettingsLogic::set_daily_limit(&pool.conn, &me, *limit)?;
        success(format!(
            "Daily payroll limit set to {}",
            format_money(*limit, &cfg.currency_symbol)
        ));
    }

    if *print || daily_limit.is_none() {
        match SettingsLogic::load(&pool.conn)? {
            Some(s) if s.daily_payroll_limit > 0.0 => info(format!(
                "Daily payroll limit: {} (updated {})",
                format_money(s.daily_payroll_limit, &cfg.currency_symbol),
                s.updated_at
            )),
            _ => info("No daily payroll limit configured."),
        }
    }

    Ok(())
}
