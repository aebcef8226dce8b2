use crate::utils::time::minute_of_day;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// How a shift whose end is not after its start is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OvernightPolicy {
    /// The shift crosses midnight: 24 h are added when `end <= start`.
    #[default]
    Rollover,
    /// Plain same-day difference; an overnight shift comes out negative.
    SameDay,
}

/// Hours worked between `start` and `end`.
pub fn shift_hours(start: NaiveTime, end: NaiveTime, policy: OvernightPolicy) -> f64 {
    let mut minutes = minute_of_day(end) - minute_of_day(start);
    if policy == OvernightPolicy::Rollover && minutes <= 0 {
        minutes += 24 * 60;
    }
    minutes as f64 / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn day_shift_is_exact() {
        assert_eq!(shift_hours(t(8, 0), t(16, 0), OvernightPolicy::Rollover), 8.0);
        assert_eq!(shift_hours(t(8, 0), t(16, 0), OvernightPolicy::SameDay), 8.0);
        assert_eq!(shift_hours(t(9, 15), t(13, 45), OvernightPolicy::Rollover), 4.5);
    }

    #[test]
    fn overnight_rolls_over_by_default() {
        assert_eq!(shift_hours(t(22, 0), t(2, 0), OvernightPolicy::default()), 4.0);
        assert_eq!(shift_hours(t(8, 0), t(8, 0), OvernightPolicy::Rollover), 24.0);
    }

    #[test]
    fn same_day_policy_keeps_negative_duration() {
        assert_eq!(shift_hours(t(22, 0), t(2, 0), OvernightPolicy::SameDay), -20.0);
        assert_eq!(shift_hours(t(8, 0), t(8, 0), OvernightPolicy::SameDay), 0.0);
    }
}
