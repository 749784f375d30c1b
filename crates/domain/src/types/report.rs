//! Computed compliance metrics and per-limit verdicts
//!
//! These are the outputs of the compliance engine, bundled per calendar
//! date for display. Each metric field is exactly one calculator's result;
//! nothing here is derived from another metric.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The seven compliance metrics for one calendar date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyMetrics {
    pub date: NaiveDate,

    /// Peak rolling-24h flight instruction time over the day (hours,
    /// unadjusted spans).
    pub flight_time_hours: f64,

    /// Peak rolling-24h contact time over the day (hours, pre/post
    /// adjusted, all non-Other types).
    pub contact_time_hours: f64,

    /// Earliest adjusted start to latest adjusted end (hours).
    pub duty_day_hours: f64,

    /// Gap between the previous day's latest adjusted end and this day's
    /// earliest adjusted start (hours). 24.0 when either day is empty.
    pub rest_hours: f64,

    /// Consecutive working days ending at `date`.
    pub consecutive_days: u32,

    /// Sunday-to-Saturday week total (hours, including briefing time).
    pub weekly_hours: f64,

    /// Trailing 7-calendar-day total (hours, including briefing time).
    pub past_seven_days_hours: f64,
}

/// Per-limit compliance verdicts for one date.
///
/// `true` means within limits. Rest is a minimum; every other limit is a
/// maximum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceStatus {
    pub flight_time_ok: bool,
    pub contact_time_ok: bool,
    pub duty_day_ok: bool,
    pub rest_ok: bool,
    pub consecutive_days_ok: bool,
    pub weekly_hours_ok: bool,
    pub past_seven_days_ok: bool,
}

impl ComplianceStatus {
    /// Whether every limit is satisfied.
    pub fn is_compliant(&self) -> bool {
        self.flight_time_ok
            && self.contact_time_ok
            && self.duty_day_ok
            && self.rest_ok
            && self.consecutive_days_ok
            && self.weekly_hours_ok
            && self.past_seven_days_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_serialization() {
        let metrics = DailyMetrics {
            date: "2024-03-15".parse().unwrap(),
            flight_time_hours: 4.5,
            contact_time_hours: 6.0,
            duty_day_hours: 9.0,
            rest_hours: 11.5,
            consecutive_days: 3,
            weekly_hours: 32.0,
            past_seven_days_hours: 30.5,
        };

        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains("flight_time_hours"));

        let back: DailyMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metrics);
    }

    #[test]
    fn test_is_compliant_requires_every_limit() {
        let mut status = ComplianceStatus {
            flight_time_ok: true,
            contact_time_ok: true,
            duty_day_ok: true,
            rest_ok: true,
            consecutive_days_ok: true,
            weekly_hours_ok: true,
            past_seven_days_ok: true,
        };
        assert!(status.is_compliant());

        status.rest_ok = false;
        assert!(!status.is_compliant());
    }
}
