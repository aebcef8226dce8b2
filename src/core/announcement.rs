use crate::auth::require_manager;
use crate::db::announcements;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::{Announcement, AnnouncementCategory, Priority, Profile};
use rusqlite::Connection;

fn required(field: &str, value: &str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(v.to_string())
}

#[derive(Debug, Clone, Default)]
pub struct AnnouncementPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<AnnouncementCategory>,
    pub priority: Option<Priority>,
}

pub struct AnnouncementLogic;

impl AnnouncementLogic {
    pub fn create(
        conn: &Connection,
        actor: &Profile,
        title: &str,
        content: &str,
        category: AnnouncementCategory,
        priority: Priority,
    ) -> AppResult<i64> {
        require_manager(actor, "post announcements")?;
        let title = required("Title", title)?;
        let content = required("Content", content)?;

        let id = announcements::insert_announcement(conn, &title, &content, category, priority, actor.id)?;
        audit(conn, "announcement_add", &id.to_string(), &title)?;
        Ok(id)
    }

    pub fn update(conn: &Connection, actor: &Profile, id: i64, patch: &AnnouncementPatch) -> AppResult<Announcement> {
        require_manager(actor, "edit announcements")?;

        let mut a = announcements::find_announcement(conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("announcement {id}")))?;
        if let Some(t) = &patch.title {
            a.title = required("Title", t)?;
        }
        if let Some(c) = &patch.content {
            a.content = required("Content", c)?;
        }
        if let Some(c) = patch.category {
            a.category = c;
        }
        if let Some(p) = patch.priority {
            a.priority = p;
        }

        announcements::save_announcement(conn, &a)?;
        audit(conn, "announcement_edit", &id.to_string(), &a.title)?;
        Ok(a)
    }

    pub fn delete(conn: &Connection, actor: &Profile, id: i64) -> AppResult<()> {
        require_manager(actor, "delete announcements")?;
        announcements::delete_announcement(conn, id)?;
        audit(conn, "announcement_del", &id.to_string(), "Announcement deleted")?;
        Ok(())
    }

    /// Urgent first, then high, then normal; newest first within a priority.
    pub fn list(conn: &Connection, category: Option<AnnouncementCategory>) -> AppResult<Vec<Announcement>> {
        announcements::list_announcements(conn, category)
    }
}
