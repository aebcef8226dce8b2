use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Manager,
}

impl Role {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "employee" => Some(Role::Employee),
            "manager" => Some(Role::Manager),
            _ => None,
        }
    }

    /// Lenient parser for user input ("Manager", "EMPLOYEE", ...).
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_db_str(&s.trim().to_lowercase())
    }
}

/// ⇔ one row of `profiles`. Never hard-deleted: `is_active = false` keeps
/// the row so historical shifts still resolve a name.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub hourly_wage: f64,
    pub is_active: bool,
    pub created_at: String,
}

impl Profile {
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}
