//! Best-effort batches: every item is attempted, failures are collected and
//! applied items stay applied.

use crate::errors::AppResult;
use crate::ui::messages::{batch_outcome, warning};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<(i64, String)>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Prints "k of N failed" style feedback plus one line per failure.
    pub fn print(&self, label: &str) {
        batch_outcome(label, self.attempted, self.failed());
        for (id, reason) in &self.failures {
            warning(format!("  #{id}: {reason}"));
        }
    }
}

/// Applies `op` to every id independently.
pub fn run_batch<F>(ids: &[i64], mut op: F) -> BatchReport
where
    F: FnMut(i64) -> AppResult<()>,
{
    let mut report = BatchReport {
        attempted: ids.len(),
        ..Default::default()
    };

    for &id in ids {
        match op(id) {
            Ok(()) => report.succeeded += 1,
            Err(e) => report.failures.push((id, e.to_string())),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn k_failures_out_of_n_are_reported() {
        let ids: Vec<i64> = (1..=10).collect();
        let mut applied = Vec::new();
        let report = run_batch(&ids, |id| {
            if id % 4 == 0 {
                Err(AppError::NotFound(format!("shift {id}")))
            } else {
                applied.push(id);
                Ok(())
            }
        });

        assert_eq!(report.attempted, 10);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.succeeded, 8);
        assert_eq!(applied.len(), 8);
        assert_eq!(report.failures[0].0, 4);
    }

    #[test]
    fn empty_batch_is_clean() {
        let report = run_batch(&[], |_| Ok(()));
        assert!(report.is_clean());
        assert_eq!(report.attempted, 0);
    }
}
