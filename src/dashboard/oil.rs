//! Fryer oil rotation status.

use crate::dashboard::model::{Location, OilChange};
use crate::dashboard::store::DemoStore;
use crate::utils::date::short_label;
use chrono::NaiveDate;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OilStatus {
    Good,
    /// 6 or 7 days since the last change.
    DueSoon,
    /// More than 7 days since the last change.
    Overdue,
    NoHistory,
}

impl OilStatus {
    pub fn from_days(days_since: i64) -> Self {
        match days_since {
            d if d > 7 => OilStatus::Overdue,
            6 | 7 => OilStatus::DueSoon,
            _ => OilStatus::Good,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OilStatus::Good => "Good",
            OilStatus::DueSoon => "Due Soon",
            OilStatus::Overdue => "Overdue",
            OilStatus::NoHistory => "No History",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FryerStatus<'a> {
    pub location: &'a Location,
    pub fryer: u32,
    pub last_change: Option<&'a OilChange>,
    pub days_since: Option<i64>,
    pub status: OilStatus,
}

/// Latest change of the given fryer.
fn last_change<'a>(changes: &'a [OilChange], location_id: &str, fryer: u32) -> Option<&'a OilChange> {
    changes
        .iter()
        .filter(|c| c.location_id == location_id && c.fryer == fryer)
        .max_by_key(|c| c.date)
}

/// Every fryer of every location, in location order.
pub fn fryer_statuses(store: &DemoStore, today: NaiveDate) -> Vec<FryerStatus<'_>> {
    store
        .locations
        .iter()
        .flat_map(|location| {
            (1..=location.fryers).map(move |fryer| {
                let last = last_change(&store.oil_changes, &location.id, fryer);
                let days_since = last.map(|c| (today - c.date).num_days());
                FryerStatus {
                    location,
                    fryer,
                    last_change: last,
                    days_since,
                    status: days_since.map_or(OilStatus::NoHistory, OilStatus::from_days),
                }
            })
        })
        .collect()
}

/// The change whose next due date comes first.
pub fn next_scheduled_change(store: &DemoStore) -> Option<&OilChange> {
    store.oil_changes.iter().min_by_key(|c| c.next_due)
}

pub fn render_oil(store: &DemoStore, today: NaiveDate) -> String {
    let mut out = String::new();
    let mut current = "";

    for f in fryer_statuses(store, today) {
        let location: &Location = f.location;
        if location.id != current {
            current = location.id.as_str();
            let _ = writeln!(out, "\n🏪 {}", location.name);
        }
        match (f.last_change, f.days_since) {
            (Some(c), Some(days)) => {
                let _ = writeln!(
                    out,
                    "  Fryer {} [{}] last {} ({} days ago) by {}, next due {}",
                    f.fryer,
                    f.status.label(),
                    short_label(c.date),
                    days,
                    c.employee_name,
                    short_label(c.next_due)
                );
            }
            _ => {
                let _ = writeln!(out, "  Fryer {} [{}]", f.fryer, f.status.label());
            }
        }
    }

    if let Some(next) = next_scheduled_change(store) {
        let name = store.location_name(&next.location_id).unwrap_or("?");
        let _ = writeln!(
            out,
            "\n🔥 Next scheduled change: {}, Fryer {} on {}",
            name,
            next.fryer,
            short_label(next.next_due)
        );
    }
    out
}
