use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementCategory {
    General,
    Hours,
    Emergency,
    Rules,
}

impl AnnouncementCategory {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Hours => "hours",
            Self::Emergency => "emergency",
            Self::Rules => "rules",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "general" => Some(Self::General),
            "hours" => Some(Self::Hours),
            "emergency" => Some(Self::Emergency),
            "rules" => Some(Self::Rules),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::from_db_str(&s.trim().to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::from_db_str(&s.trim().to_lowercase())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: AnnouncementCategory,
    pub priority: Priority,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}
