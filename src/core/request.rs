//! Staleness guard for loads that may be superseded before they finish.
//! Each load takes a token; only the latest token of an operation may
//! publish its result.

use std::collections::HashMap;

pub const PAYROLL_LOAD: &str = "payroll";
pub const SCHEDULE_LOAD: &str = "schedule";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    operation: String,
    seq: u64,
}

impl RequestToken {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: HashMap<String, u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new token for `operation`, invalidating earlier ones.
    pub fn begin(&mut self, operation: &str) -> RequestToken {
        let seq = self.latest.entry(operation.to_string()).or_insert(0);
        *seq += 1;
        RequestToken {
            operation: operation.to_string(),
            seq: *seq,
        }
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.latest.get(&token.operation) == Some(&token.seq)
    }

    /// Returns `value` if `token` is still the latest, `None` if stale.
    pub fn accept<T>(&self, token: &RequestToken, value: T) -> Option<T> {
        self.is_current(token).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_result_is_dropped() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin("payroll");
        let second = tracker.begin("payroll");

        assert_eq!(tracker.accept(&first, "old"), None);
        assert_eq!(tracker.accept(&second, "new"), Some("new"));
        assert!(second.seq() > first.seq());
    }

    #[test]
    fn operations_are_independent() {
        let mut tracker = RequestTracker::new();
        let payroll = tracker.begin("payroll");
        let _schedule = tracker.begin("schedule");
        assert!(tracker.is_current(&payroll));
    }
}
