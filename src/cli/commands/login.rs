use crate::auth;
use crate::cli::commands::{current_token, session_file, signed_in};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use chrono::Utc;

pub fn login(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Login { email, password } = &cli.command else {
        return Ok(());
    };

    let pool = DbPool::open(&cfg.database)?;
    let session = auth::sign_in(&pool.conn, email, password, Utc::now())?;
    auth::store_token(&session_file(cfg), &session.token)?;

    success(format!(
        "Signed in as {}, session valid until {}",
        email.trim().to_lowercase(),
        session.expires_at.format("%Y-%m-%d %H:%M UTC")
    ));
    Ok(())
}

pub fn logout(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Some(token) = current_token(cli, cfg)? else {
        info("No active session.");
        return Ok(());
    };

    let pool = DbPool::open(&cfg.database)?;
    if auth::sign_out(&pool.conn, &token)? {
        success("Signed out.");
    } else {
        warning("Session was already expired.");
    }
    auth::clear_token(&session_file(cfg))?;
    Ok(())
}

pub fn whoami(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let (_pool, me) = signed_in(cli, cfg)?;
    println!(
        "{} <{}> · {} · id {}",
        me.full_name,
        me.email,
        me.role.to_db_str(),
        me.id
    );
    Ok(())
}
