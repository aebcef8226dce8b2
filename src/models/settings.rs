use serde::Serialize;

/// Singleton row of `store_settings`.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSettings {
    pub daily_payroll_limit: f64,
    pub updated_at: String,
    pub updated_by: Option<i64>,
}
