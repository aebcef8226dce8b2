use crate::utils::formatting::percent;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Restaurant,
    Production,
}

#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub kind: LocationKind,
    pub fryers: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaffRole {
    Worker,
    TeamLeader,
}

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    pub location_id: String,
    pub shift: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    Checkbox,
    Number { unit: String },
    Text,
    Photo,
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Checkbox => "checkbox",
            TaskKind::Number { .. } => "number",
            TaskKind::Text => "text",
            TaskKind::Photo => "photo",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskTemplate {
    pub id: String,
    pub title: String,
    pub kind: TaskKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistTemplate {
    pub id: String,
    pub title: String,
    pub frequency: Frequency,
    pub tasks: Vec<TaskTemplate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub kind: TaskKind,
    pub completed: bool,
    pub value: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    Pending,
    Complete,
}

#[derive(Debug, Clone, Serialize)]
pub struct Checklist {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub location_id: String,
    pub location_name: String,
    pub template_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub status: ChecklistStatus,
    pub progress: u32,
    pub last_updated: NaiveDateTime,
    pub tasks: Vec<Task>,
}

impl Checklist {
    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn is_complete(&self) -> bool {
        self.status == ChecklistStatus::Complete
    }

    /// Derives status and progress from the tasks.
    pub fn recompute(&mut self) {
        let done = self.completed_tasks();
        self.progress = percent(done, self.tasks.len());
        self.status = if done == self.tasks.len() {
            ChecklistStatus::Complete
        } else {
            ChecklistStatus::Pending
        };
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OilChange {
    pub id: String,
    pub location_id: String,
    pub fryer: u32,
    pub date: NaiveDate,
    pub employee_id: String,
    pub employee_name: String,
    pub next_due: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Cleaning,
    Meeting,
    Inspection,
    Maintenance,
    Training,
}

impl EventKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cleaning" => Some(Self::Cleaning),
            "meeting" => Some(Self::Meeting),
            "inspection" => Some(Self::Inspection),
            "maintenance" => Some(Self::Maintenance),
            "training" => Some(Self::Training),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            EventKind::Cleaning => "🧹",
            EventKind::Meeting => "👥",
            EventKind::Inspection => "🔍",
            EventKind::Maintenance => "🔧",
            EventKind::Training => "🎓",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: String,
    pub kind: EventKind,
    pub title: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location_id: String,
    pub location_name: String,
    pub description: String,
    pub reminders: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    ShiftReminder,
    OilChange,
    EventReminder,
    DailySummary,
    Alert,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::ShiftReminder => "⏰",
            NotificationKind::OilChange => "🔥",
            NotificationKind::EventReminder => "📅",
            NotificationKind::DailySummary => "📊",
            NotificationKind::Alert => "⚠️",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub recipient: String,
    pub recipient_name: String,
    pub timestamp: NaiveDateTime,
    pub read: bool,
}
