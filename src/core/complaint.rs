use crate::auth::require_manager;
use crate::db::complaints;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::{Complaint, ComplaintCategory, ComplaintStatus, Profile, Urgency};
use rusqlite::Connection;

pub struct ComplaintLogic;

impl ComplaintLogic {
    /// Any signed-in user may submit.
    pub fn submit(
        conn: &Connection,
        actor: &Profile,
        title: &str,
        description: &str,
        category: ComplaintCategory,
        urgency: Urgency,
    ) -> AppResult<i64> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(AppError::Validation(
                "Title and description must not be empty".to_string(),
            ));
        }

        let id = complaints::insert_complaint(conn, title, description, category, urgency, actor.id)?;
        audit(
            conn,
            "complaint_add",
            &id.to_string(),
            &format!("{title} ({})", urgency.to_db_str()),
        )?;
        Ok(id)
    }

    /// Any status may be set at any time; `resolved` records the resolver,
    /// every other status clears it.
    pub fn set_status(conn: &Connection, actor: &Profile, id: i64, status: ComplaintStatus) -> AppResult<Complaint> {
        require_manager(actor, "update complaint status")?;

        let resolved_by = (status == ComplaintStatus::Resolved).then_some(actor.id);
        complaints::set_status(conn, id, status, resolved_by)?;
        audit(conn, "complaint_status", &id.to_string(), status.to_db_str())?;

        complaints::find_complaint(conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("complaint {id}")))
    }

    pub fn list(conn: &Connection, status: Option<ComplaintStatus>) -> AppResult<Vec<Complaint>> {
        complaints::list_complaints(conn, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::register;
    use crate::db::migrate::run_pending_migrations;
    use crate::db::profiles::{self, NewProfile};
    use crate::models::Role;

    fn profile(conn: &Connection, email: &str, role: Role) -> Profile {
        let p = NewProfile {
            email: email.to_string(),
            full_name: email.to_string(),
            role,
            hourly_wage: 12.0,
        };
        let id = register(conn, &p, "secret1", 6).unwrap();
        profiles::require_by_id(conn, id).unwrap()
    }

    #[test]
    fn resolving_records_the_manager_and_reopening_clears_it() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        let boss = profile(&conn, "boss@p.test", Role::Manager);
        let cook = profile(&conn, "cook@p.test", Role::Employee);

        let id = ComplaintLogic::submit(
            &conn,
            &cook,
            "Fryer 2",
            "Thermostat stuck",
            ComplaintCategory::Equipment,
            Urgency::High,
        )
        .unwrap();

        assert!(matches!(
            ComplaintLogic::set_status(&conn, &cook, id, ComplaintStatus::Resolved),
            Err(AppError::Forbidden(_))
        ));

        let c = ComplaintLogic::set_status(&conn, &boss, id, ComplaintStatus::Resolved).unwrap();
        assert_eq!(c.resolved_by, Some(boss.id));

        let c = ComplaintLogic::set_status(&conn, &boss, id, ComplaintStatus::InProgress).unwrap();
        assert_eq!(c.resolved_by, None);

        assert_eq!(ComplaintLogic::list(&conn, Some(ComplaintStatus::InProgress)).unwrap().len(), 1);
        assert!(ComplaintLogic::list(&conn, Some(ComplaintStatus::Open)).unwrap().is_empty());
        assert!(matches!(
            ComplaintLogic::set_status(&conn, &boss, 999, ComplaintStatus::Open),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn empty_description_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        let cook = profile(&conn, "cook@p.test", Role::Employee);
        assert!(
            ComplaintLogic::submit(&conn, &cook, "POS", " ", ComplaintCategory::Pos, Urgency::Low)
                .is_err()
        );
    }
}
