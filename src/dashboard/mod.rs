//! Checklist and compliance dashboard over a volatile demo dataset.

pub mod events;
pub mod manager;
pub mod model;
pub mod notifications;
pub mod oil;
pub mod store;
pub mod worker;

pub use store::DemoStore;

use chrono::NaiveDateTime;

/// The screens of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Worker(String),
    Manager,
    Oil,
    Events,
    Notifications,
}

impl View {
    /// Maps a view name (and the employee for the worker view) to a `View`.
    pub fn parse(name: &str, employee: Option<&str>) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "worker" => Some(View::Worker(employee.unwrap_or("emp-1").to_string())),
            "manager" => Some(View::Manager),
            "oil" => Some(View::Oil),
            "events" => Some(View::Events),
            "notifications" => Some(View::Notifications),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Worker(_) => "Worker Checklists",
            View::Manager => "Manager Dashboard",
            View::Oil => "Oil Change Tracker",
            View::Events => "Event Scheduler",
            View::Notifications => "Notifications",
        }
    }
}

/// Renders a view of the store as plain text.
pub fn render(view: &View, store: &DemoStore, now: NaiveDateTime) -> String {
    match view {
        View::Worker(id) => worker::render_worker(store, id),
        View::Manager => manager::render_manager(store),
        View::Oil => oil::render_oil(store, now.date()),
        View::Events => events::render_events(store, now.date()),
        View::Notifications => notifications::render_notifications(store, now),
    }
}
