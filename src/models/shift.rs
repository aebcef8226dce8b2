use crate::utils::date::format_iso;
use crate::utils::time::format_time;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftRole {
    Kitchen,
    Delivery,
    Cashier,
    Manager,
}

impl ShiftRole {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShiftRole::Kitchen => "kitchen",
            ShiftRole::Delivery => "delivery",
            ShiftRole::Cashier => "cashier",
            ShiftRole::Manager => "manager",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "kitchen" => Some(ShiftRole::Kitchen),
            "delivery" => Some(ShiftRole::Delivery),
            "cashier" => Some(ShiftRole::Cashier),
            "manager" => Some(ShiftRole::Manager),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::from_db_str(&s.trim().to_lowercase())
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShiftRole::Kitchen => "Kitchen",
            ShiftRole::Delivery => "Delivery",
            ShiftRole::Cashier => "Cashier",
            ShiftRole::Manager => "Manager",
        }
    }
}

/// ⇔ one row of `schedules`. `employee_id == None` is an open shift.
#[derive(Debug, Clone, Serialize)]
pub struct Shift {
    pub id: i64,
    pub employee_id: Option<i64>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub role: ShiftRole,
    pub notes: String,
    pub created_by: i64,
    pub created_at: String,
}

impl Shift {
    pub fn date_str(&self) -> String {
        format_iso(self.date)
    }

    pub fn start_str(&self) -> String {
        format_time(self.start_time)
    }

    pub fn end_str(&self) -> String {
        format_time(self.end_time)
    }

    pub fn time_span(&self) -> String {
        format!("{}-{}", self.start_str(), self.end_str())
    }
}

/// Insert payload for `schedules`.
#[derive(Debug, Clone)]
pub struct NewShift {
    pub employee_id: Option<i64>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub role: ShiftRole,
    pub notes: String,
    pub created_by: i64,
}
