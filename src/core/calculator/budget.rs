use serde::Serialize;
use std::fmt;

/// Payroll total measured against the daily limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetStatus {
    NoLimit,
    Within { remaining: f64 },
    Over { overage: f64, percent_over: f64 },
}

/// Compares `total` with `limit`. A missing or non-positive limit means no
/// limit is configured; it is never used as a divisor.
pub fn compare(total: f64, limit: Option<f64>) -> BudgetStatus {
    match limit {
        Some(limit) if limit > 0.0 => {
            if total <= limit {
                BudgetStatus::Within {
                    remaining: limit - total,
                }
            } else {
                let overage = total - limit;
                BudgetStatus::Over {
                    overage,
                    percent_over: overage / limit * 100.0,
                }
            }
        }
        _ => BudgetStatus::NoLimit,
    }
}

impl BudgetStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, BudgetStatus::Over { .. })
    }

    /// Human readable line using the given currency symbol.
    pub fn describe(&self, symbol: &str) -> String {
        match self {
            BudgetStatus::NoLimit => "No daily limit configured".to_string(),
            BudgetStatus::Within { remaining } => {
                format!("Within budget: {symbol}{remaining:.2} remaining")
            }
            BudgetStatus::Over {
                overage,
                percent_over,
            } => format!("Over budget by {symbol}{overage:.2} ({percent_over:.1}% over)"),
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe(""))
    }
}
