use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintCategory {
    Equipment,
    Supplies,
    Pos,
    Other,
}

impl ComplaintCategory {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Self::Equipment => "equipment",
            Self::Supplies => "supplies",
            Self::Pos => "pos",
            Self::Other => "other",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "equipment" => Some(Self::Equipment),
            "supplies" => Some(Self::Supplies),
            "pos" => Some(Self::Pos),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::from_db_str(&s.trim().to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::from_db_str(&s.trim().to_lowercase())
    }
}

/// Linear in spirit (open → in_progress → resolved) but not enforced:
/// a manager may set any status at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "in_progress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }

    /// Accepts "in-progress" as well as the stored "in_progress".
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_db_str(&s.trim().to_lowercase().replace('-', "_"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Complaint {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub urgency: Urgency,
    pub status: ComplaintStatus,
    pub submitted_by: i64,
    pub resolved_by: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}
