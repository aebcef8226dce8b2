//! Notification feed, summaries and reminder generation.

use crate::dashboard::model::{Notification, NotificationKind};
use crate::dashboard::store::DemoStore;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, Timelike};
use std::fmt::Write;

/// Hour at which workers with open checklists get the shift-end reminder.
pub const SHIFT_END_REMINDER_HOUR: u32 = 15;

/// "just now", "5 min ago", "3 hours ago", "2 days ago", or "Feb 3".
pub fn relative_age(ts: NaiveDateTime, now: NaiveDateTime) -> String {
    let mins = (now - ts).num_minutes();
    if mins < 1 {
        return "just now".to_string();
    }
    if mins < 60 {
        return format!("{mins} min ago");
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{hours} hour{} ago", if hours > 1 { "s" } else { "" });
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days} day{} ago", if days > 1 { "s" } else { "" });
    }
    ts.format("%b %-d").to_string()
}

/// Notifications newest first.
pub fn feed(store: &DemoStore) -> Vec<&Notification> {
    let mut items: Vec<&Notification> = store.notifications.iter().collect();
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items
}

pub fn unread_count(store: &DemoStore) -> usize {
    store.notifications.iter().filter(|n| !n.read).count()
}

pub fn mark_as_read(store: &mut DemoStore, id: &str) -> AppResult<()> {
    let n = store
        .notifications
        .iter_mut()
        .find(|n| n.id == id)
        .ok_or_else(|| AppError::NotFound(format!("notification {id}")))?;
    n.read = true;
    Ok(())
}

/// Prepends a new unread notification and returns its id.
pub fn send(
    store: &mut DemoStore,
    kind: NotificationKind,
    title: &str,
    message: &str,
    recipient: &str,
    recipient_name: &str,
    now: NaiveDateTime,
) -> String {
    let id = store.next_id("notif");
    store.notifications.insert(
        0,
        Notification {
            id: id.clone(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            recipient: recipient.to_string(),
            recipient_name: recipient_name.to_string(),
            timestamp: now,
            read: false,
        },
    );
    id
}

/// One sentence per location: "Name: c/t complete (missing: who - what)".
pub fn end_of_day_summary(store: &DemoStore) -> String {
    store
        .locations
        .iter()
        .map(|loc| {
            let lists: Vec<_> = store
                .checklists
                .iter()
                .filter(|c| c.location_id == loc.id)
                .collect();
            let done = lists.iter().filter(|c| c.is_complete()).count();
            let missing: Vec<String> = lists
                .iter()
                .filter(|c| !c.is_complete())
                .map(|c| format!("{} - {}", c.employee_name, c.title))
                .collect();

            let mut line = format!("{}: {}/{} complete", loc.name, done, lists.len());
            if !missing.is_empty() {
                let _ = write!(line, " (missing: {})", missing.join(", "));
            }
            line
        })
        .collect::<Vec<_>>()
        .join(". ")
}

/// At the reminder hour, sends one reminder per worker who still has an
/// incomplete checklist. Returns the ids sent (none at any other hour).
pub fn send_shift_end_reminders(store: &mut DemoStore, now: NaiveDateTime) -> Vec<String> {
    if now.hour() != SHIFT_END_REMINDER_HOUR {
        return Vec::new();
    }

    let mut names: Vec<String> = Vec::new();
    for c in store.checklists.iter().filter(|c| !c.is_complete()) {
        if !names.contains(&c.employee_name) {
            names.push(c.employee_name.clone());
        }
    }

    names
        .iter()
        .map(|name| {
            send(
                store,
                NotificationKind::ShiftReminder,
                "⏰ Shift Ending Soon",
                "You have 1 hour left in your shift. Please complete remaining checklists.",
                "worker",
                name,
                now,
            )
        })
        .collect()
}

pub fn render_notifications(store: &DemoStore, now: NaiveDateTime) -> String {
    let mut out = String::new();
    let items = feed(store);
    if items.is_empty() {
        out.push_str("🔔 No notifications yet\n");
        return out;
    }

    let _ = writeln!(out, "🔔 {} unread\n", unread_count(store));
    for n in items {
        let _ = writeln!(
            out,
            "{} {}{} [{}]\n   {}\n   To: {} · {}",
            n.kind.icon(),
            n.title,
            if n.read { "" } else { " •" },
            n.id,
            n.message,
            n.recipient_name,
            relative_age(n.timestamp, now)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 12)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn relative_ages() {
        let now = at(12);
        assert_eq!(relative_age(now, now), "just now");
        assert_eq!(relative_age(now - Duration::minutes(5), now), "5 min ago");
        assert_eq!(relative_age(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(relative_age(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(relative_age(now - Duration::days(2), now), "2 days ago");
        assert_eq!(relative_age(now - Duration::days(9), now), "Feb 3");
    }

    #[test]
    fn send_prepends_unread_and_mark_reads_it() {
        let mut store = DemoStore::seeded(at(9));
        let before = unread_count(&store);
        let id = send(&mut store, NotificationKind::Alert, "Freezer", "Check it", "manager", "GM", at(10));
        assert_eq!(store.notifications[0].id, id);
        assert_eq!(unread_count(&store), before + 1);

        mark_as_read(&mut store, &id).unwrap();
        assert_eq!(unread_count(&store), before);
        assert!(mark_as_read(&mut store, "notif-999").is_err());
    }

    #[test]
    fn summary_lists_every_location() {
        let store = DemoStore::seeded(at(9));
        let summary = end_of_day_summary(&store);
        assert!(summary.starts_with("Knez Mihailova: "));
        assert!(summary.contains("Production Facility: "));
        assert!(summary.contains("/9 complete"));
        assert!(summary.contains("(missing: "));
    }

    #[test]
    fn reminders_only_fire_at_fifteen() {
        let mut store = DemoStore::seeded(at(9));
        assert!(send_shift_end_reminders(&mut store, at(14)).is_empty());

        let sent = send_shift_end_reminders(&mut store, at(15));
        let pending_workers = {
            let mut names: Vec<&str> = store
                .checklists
                .iter()
                .filter(|c| !c.is_complete())
                .map(|c| c.employee_name.as_str())
                .collect();
            names.sort();
            names.dedup();
            names.len()
        };
        assert_eq!(sent.len(), pending_workers);
    }

    #[test]
    fn feed_is_newest_first() {
        let store = DemoStore::seeded(at(9));
        let items = feed(&store);
        assert!(items.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }
}
