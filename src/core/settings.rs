use crate::auth::require_manager;
use crate::db::log::audit;
use crate::db::settings;
use crate::errors::{AppError, AppResult};
use crate::models::{Profile, StoreSettings};
use rusqlite::Connection;

pub struct SettingsLogic;

impl SettingsLogic {
    pub fn set_daily_limit(conn: &Connection, actor: &Profile, limit: f64) -> AppResult<()> {
        require_manager(actor, "change store settings")?;
        if !limit.is_finite() || limit < 0.0 {
            return Err(AppError::Validation(format!(
                "Daily payroll limit must be >= 0 (got {limit})"
            )));
        }

        settings::save_daily_limit(conn, limit, actor.id)?;
        audit(conn, "settings", "daily_payroll_limit", &format!("{limit:.2}"))?;
        Ok(())
    }

    pub fn load(conn: &Connection) -> AppResult<Option<StoreSettings>> {
        settings::load_settings(conn)
    }

    /// The configured limit, or `None` when never set.
    pub fn daily_limit(conn: &Connection) -> AppResult<Option<f64>> {
        Ok(settings::load_settings(conn)?.map(|s| s.daily_payroll_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::register;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::profiles::{self, NewProfile};
    use crate::models::Role;

    #[test]
    fn limit_is_stored_and_overwritten() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        let p = NewProfile {
            email: "boss@p.test".to_string(),
            full_name: "Boss".to_string(),
            role: Role::Manager,
            hourly_wage: 0.0,
        };
        let id = register(&conn, &p, "secret1", 6).unwrap();
        let boss = profiles::require_by_id(&conn, id).unwrap();

        assert_eq!(SettingsLogic::daily_limit(&conn).unwrap(), None);
        SettingsLogic::set_daily_limit(&conn, &boss, 500.0).unwrap();
        SettingsLogic::set_daily_limit(&conn, &boss, 650.0).unwrap();
        assert_eq!(SettingsLogic::daily_limit(&conn).unwrap(), Some(650.0));
        assert!(SettingsLogic::set_daily_limit(&conn, &boss, -1.0).is_err());
    }
}
