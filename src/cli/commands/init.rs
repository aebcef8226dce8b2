use crate::auth;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::profiles::{self, NewProfile};
use crate::errors::AppResult;
use crate::models::Role;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database and all pending migrations
///  - the first manager, when `--admin-*` is given and no profile exists yet
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Init {
        admin_email,
        admin_password,
        admin_name,
    } = &cli.command
    else {
        return Ok(());
    };

    let db_path = match &cli.db {
        Some(custom) => Config::init_all(Some(custom.clone()), cli.test)?,
        None => Config::init_all(Some(cfg.database.clone()), cli.test)?,
    };

    info("Initializing paprika…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Database    : {db_path}"));

    let pool = DbPool::open(&db_path)?;
    audit(&pool.conn, "init", &db_path, "Database initialized")?;
    success(format!("Database initialized at {db_path}"));

    if let (Some(email), Some(password), Some(name)) = (admin_email, admin_password, admin_name) {
        if profiles::count_profiles(&pool.conn)? > 0 {
            warning("Profiles already exist, no manager was created.");
        } else {
            let new = NewProfile {
                email: email.trim().to_lowercase(),
                full_name: name.trim().to_string(),
                role: Role::Manager,
                hourly_wage: 0.0,
            };
            let id = auth::register(&pool.conn, &new, password, cfg.min_password_length)?;
            audit(&pool.conn, "employee_add", &new.email, "First manager created")?;
            success(format!("Manager {} created (id {id})", new.email));
        }
    }

    Ok(())
}
