//! Configuration structures
//!
//! Warning thresholds are a settings concern: the compliance engine never
//! stores them, it only receives them as comparison operands.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONSECUTIVE_DAYS_LIMIT, DEFAULT_CONTACT_HOURS_LIMIT, DEFAULT_DUTY_DAY_HOURS_LIMIT,
    DEFAULT_FLIGHT_HOURS_LIMIT, DEFAULT_PAST_SEVEN_DAYS_HOURS_LIMIT, DEFAULT_REST_HOURS_MINIMUM,
    DEFAULT_WEEKLY_HOURS_LIMIT,
};
use crate::types::report::{ComplianceStatus, DailyMetrics};

/// The seven warning limits evaluated against [`DailyMetrics`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WarningThresholds {
    /// Maximum rolling-24h flight instruction time (hours).
    pub flight_hours: f64,

    /// Maximum rolling-24h contact time (hours).
    pub contact_hours: f64,

    /// Minimum rest between duty days (hours).
    pub rest_hours: f64,

    /// Maximum duty-day span (hours).
    pub duty_day_hours: f64,

    /// Maximum consecutive working days.
    pub consecutive_days: u32,

    /// Maximum Sunday-to-Saturday week total (hours).
    pub weekly_hours: f64,

    /// Maximum trailing 7-day total (hours).
    pub past_seven_days_hours: f64,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            flight_hours: DEFAULT_FLIGHT_HOURS_LIMIT,
            contact_hours: DEFAULT_CONTACT_HOURS_LIMIT,
            rest_hours: DEFAULT_REST_HOURS_MINIMUM,
            duty_day_hours: DEFAULT_DUTY_DAY_HOURS_LIMIT,
            consecutive_days: DEFAULT_CONSECUTIVE_DAYS_LIMIT,
            weekly_hours: DEFAULT_WEEKLY_HOURS_LIMIT,
            past_seven_days_hours: DEFAULT_PAST_SEVEN_DAYS_HOURS_LIMIT,
        }
    }
}

impl WarningThresholds {
    /// Evaluate metrics against the limits.
    ///
    /// Rest is a minimum (`metric >= limit`); every other limit is a
    /// maximum (`metric <= limit`).
    pub fn check(&self, metrics: &DailyMetrics) -> ComplianceStatus {
        ComplianceStatus {
            flight_time_ok: metrics.flight_time_hours <= self.flight_hours,
            contact_time_ok: metrics.contact_time_hours <= self.contact_hours,
            duty_day_ok: metrics.duty_day_hours <= self.duty_day_hours,
            rest_ok: metrics.rest_hours >= self.rest_hours,
            consecutive_days_ok: metrics.consecutive_days <= self.consecutive_days,
            weekly_hours_ok: metrics.weekly_hours <= self.weekly_hours,
            past_seven_days_ok: metrics.past_seven_days_hours <= self.past_seven_days_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> DailyMetrics {
        DailyMetrics {
            date: "2024-03-15".parse().unwrap(),
            flight_time_hours: 7.9,
            contact_time_hours: 9.5,
            duty_day_hours: 12.0,
            rest_hours: 10.0,
            consecutive_days: 5,
            weekly_hours: 45.0,
            past_seven_days_hours: 44.0,
        }
    }

    #[test]
    fn test_defaults_pass_a_typical_day() {
        let status = WarningThresholds::default().check(&metrics());
        assert!(status.is_compliant());
    }

    #[test]
    fn test_rest_is_a_minimum() {
        let thresholds = WarningThresholds::default();

        let mut short_rest = metrics();
        short_rest.rest_hours = 9.9;
        assert!(!thresholds.check(&short_rest).rest_ok);

        let mut exact_rest = metrics();
        exact_rest.rest_hours = thresholds.rest_hours;
        assert!(thresholds.check(&exact_rest).rest_ok);
    }

    #[test]
    fn test_boundary_values_are_compliant() {
        let thresholds = WarningThresholds::default();
        let mut at_limit = metrics();
        at_limit.flight_time_hours = thresholds.flight_hours;
        at_limit.consecutive_days = thresholds.consecutive_days;

        let status = thresholds.check(&at_limit);
        assert!(status.flight_time_ok);
        assert!(status.consecutive_days_ok);
    }

    #[test]
    fn test_partial_toml_overrides_keep_defaults() {
        let parsed: WarningThresholds =
            serde_json::from_str(r#"{"flight_hours": 6.0}"#).unwrap();

        assert!((parsed.flight_hours - 6.0).abs() < f64::EPSILON);
        assert!((parsed.rest_hours - DEFAULT_REST_HOURS_MINIMUM).abs() < f64::EPSILON);
    }
}
