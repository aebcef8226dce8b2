//! paprika library root.
//! Exposes the CLI parser, the high-level run() function and every module
//! the commands are built from.

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod db;
pub mod errors;
pub mod export;
pub mod functions;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => commands::init::handle(cli, cfg),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
        Commands::Login { .. } => commands::login::login(cli, cfg),
        Commands::Logout => commands::login::logout(cli, cfg),
        Commands::Whoami => commands::login::whoami(cli, cfg),
        Commands::Employee { .. } => commands::employee::handle(cli, cfg),
        Commands::Shift { .. } => commands::shift::handle(cli, cfg),
        Commands::Payroll { .. } => commands::payroll::payroll(cli, cfg),
        Commands::Earnings { .. } => commands::payroll::earnings(cli, cfg),
        Commands::Calendar { .. } => commands::calendar::handle(cli, cfg),
        Commands::Announce { .. } => commands::announce::handle(cli, cfg),
        Commands::Complaint { .. } => commands::complaint::handle(cli, cfg),
        Commands::Settings { .. } => commands::settings::handle(cli, cfg),
        Commands::Export { .. } => commands::export::handle(cli, cfg),
        Commands::Dashboard { .. } => commands::dashboard::handle(&cli.command),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // in test mode the user's config file is never read
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
