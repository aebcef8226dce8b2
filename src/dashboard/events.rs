//! Event scheduling with automatic reminder dates.

use crate::dashboard::model::{Event, EventKind};
use crate::dashboard::store::{DemoStore, NewEvent};
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_iso;
use crate::utils::time::parse_time;
use chrono::{Duration, NaiveDate};
use std::fmt::Write;

/// Days before the event on which a reminder goes out.
pub const REMINDER_OFFSETS: [i64; 3] = [7, 3, 1];

pub const ALL_LOCATIONS: &str = "all";

pub fn reminder_dates(date: NaiveDate) -> Vec<NaiveDate> {
    REMINDER_OFFSETS
        .iter()
        .map(|d| date - Duration::days(*d))
        .collect()
}

impl NewEvent {
    /// Builds an event from raw form values; title, date and time are required.
    pub fn parse(
        kind: &str,
        title: &str,
        date: &str,
        time: &str,
        location_id: &str,
        description: &str,
    ) -> AppResult<Self> {
        if title.trim().is_empty() || date.trim().is_empty() || time.trim().is_empty() {
            return Err(AppError::Validation(
                "Please fill in all required fields (title, date, time)".to_string(),
            ));
        }
        Ok(Self {
            kind: EventKind::parse(kind)
                .ok_or_else(|| AppError::Validation(format!("Invalid event type: {kind}")))?,
            title: title.trim().to_string(),
            date: parse_iso(date).ok_or_else(|| AppError::InvalidDate(date.to_string()))?,
            time: parse_time(time).ok_or_else(|| AppError::InvalidTime(time.to_string()))?,
            location_id: location_id.trim().to_string(),
            description: description.trim().to_string(),
        })
    }
}

/// Adds the event to the store and returns its id.
pub fn create_event(store: &mut DemoStore, new: NewEvent) -> AppResult<String> {
    let location_name = if new.location_id == ALL_LOCATIONS {
        "All Locations".to_string()
    } else {
        store
            .location_name(&new.location_id)
            .ok_or_else(|| AppError::NotFound(format!("location {}", new.location_id)))?
            .to_string()
    };

    let id = store.next_id("event");
    store.events.push(Event {
        id: id.clone(),
        kind: new.kind,
        title: new.title,
        reminders: reminder_dates(new.date),
        date: new.date,
        time: new.time,
        location_id: new.location_id,
        location_name,
        description: new.description,
    });
    Ok(id)
}

/// Whole days from `today` to the event (negative once it has passed).
pub fn days_until(event: &Event, today: NaiveDate) -> i64 {
    (event.date - today).num_days()
}

/// Events sorted by date, then time.
pub fn sorted_events(store: &DemoStore) -> Vec<&Event> {
    let mut events: Vec<&Event> = store.events.iter().collect();
    events.sort_by_key(|e| (e.date, e.time));
    events
}

fn until_label(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        d if d < 0 => format!("{} days ago", -d),
        d => format!("in {d} days"),
    }
}

pub fn render_events(store: &DemoStore, today: NaiveDate) -> String {
    let mut out = String::new();
    let events = sorted_events(store);
    if events.is_empty() {
        out.push_str("No events scheduled.\n");
        return out;
    }

    for e in events {
        let _ = writeln!(
            out,
            "{} {} ({})\n   {} at {} | {}",
            e.kind.icon(),
            e.title,
            until_label(days_until(e, today)),
            e.date.format("%A, %B %-d, %Y"),
            e.time.format("%H:%M"),
            e.location_name
        );
        if !e.description.is_empty() {
            let _ = writeln!(out, "   {}", e.description);
        }
        let reminders: Vec<String> = e.reminders.iter().map(|d| d.format("%b %-d").to_string()).collect();
        let _ = writeln!(out, "   reminders: {}", reminders.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 12).unwrap()
    }

    fn store() -> DemoStore {
        DemoStore::seeded(today().and_hms_opt(8, 0, 0).unwrap())
    }

    #[test]
    fn reminders_are_seven_three_and_one_day_before() {
        let d = NaiveDate::from_ymd_opt(2026, 2, 22).unwrap();
        assert_eq!(
            reminder_dates(d),
            vec![
                NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
                NaiveDate::from_ymd_opt(2026, 2, 19).unwrap(),
                NaiveDate::from_ymd_opt(2026, 2, 21).unwrap(),
            ]
        );
    }

    #[test]
    fn create_resolves_location_names() {
        let mut store = store();
        let e = NewEvent::parse("training", "Fryer safety", "2026-03-01", "09:30", "location-3", "").unwrap();
        let id = create_event(&mut store, e).unwrap();
        let created = store.events.iter().find(|e| e.id == id).unwrap();
        assert_eq!(created.location_name, "Zemun");
        assert_eq!(days_until(created, today()), 17);

        let all = NewEvent::parse("meeting", "All hands", "2026-03-02", "10:00", "all", "").unwrap();
        let id = create_event(&mut store, all).unwrap();
        assert!(store.events.iter().any(|e| e.id == id && e.location_name == "All Locations"));
    }

    #[test]
    fn missing_fields_and_unknown_location_fail() {
        assert!(NewEvent::parse("meeting", " ", "2026-03-02", "10:00", "all", "").is_err());
        assert!(NewEvent::parse("meeting", "x", "", "10:00", "all", "").is_err());
        assert!(NewEvent::parse("meeting", "x", "2026-03-02", "25:00", "all", "").is_err());

        let mut store = store();
        let e = NewEvent::parse("meeting", "x", "2026-03-02", "10:00", "location-9", "").unwrap();
        assert!(create_event(&mut store, e).is_err());
    }

    #[test]
    fn events_are_sorted_by_date() {
        let store = store();
        let dates: Vec<NaiveDate> = sorted_events(&store).iter().map(|e| e.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }
}
