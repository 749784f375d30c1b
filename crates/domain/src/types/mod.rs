//! Domain types and models

pub mod report;

// Re-export report types for convenience
pub use report::{ComplianceStatus, DailyMetrics};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SafeHoursError;

/* -------------------------------------------------------------------------- */
/* Activity Types */
/* -------------------------------------------------------------------------- */

/// ActivityType: WHAT kind of instruction was logged (drives which limits
/// apply)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActivityType {
    /// In-aircraft flight instruction
    Flight,
    /// Ground instruction
    Ground,
    /// Simulator session
    #[serde(rename = "SIM", alias = "Sim")]
    Sim,
    /// Anything else on the timeline. Legacy exports used the split
    /// "Other Internal"/"Other External" labels; both collapse here.
    #[serde(alias = "Other Internal", alias = "Other External")]
    Other,
}

impl ActivityType {
    /// Whether pre/post briefing offsets extend this activity's span.
    pub fn briefing_applies(self) -> bool {
        matches!(self, Self::Flight | Self::Sim)
    }

    /// Whether the activity counts toward compliance metrics.
    ///
    /// `Other` activities appear in listings and on the timeline but are
    /// excluded from every limit calculation.
    pub fn counts_toward_compliance(self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Canonical label, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flight => "Flight",
            Self::Ground => "Ground",
            Self::Sim => "SIM",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityType {
    type Err = SafeHoursError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Flight" => Ok(Self::Flight),
            "Ground" => Ok(Self::Ground),
            "SIM" | "Sim" => Ok(Self::Sim),
            "Other" | "Other Internal" | "Other External" => Ok(Self::Other),
            other => {
                Err(SafeHoursError::InvalidInput(format!("unknown activity type: {other}")))
            }
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Activity */
/* -------------------------------------------------------------------------- */

/// A single logged activity.
///
/// `start_time`/`end_time` are wall-clock `HH:MM` strings; an `end_time`
/// earlier than `start_time` means the activity runs overnight and ends on
/// `date + 1`. Times stay as strings so malformed values flow through the
/// fail-soft calculators instead of being rejected at construction.
///
/// Pre/post briefing offsets are hour values and are honored only for
/// Flight and SIM activities. The legacy `pre_post_value` field carries a
/// combined total that is split evenly whenever a separate field is absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,

    #[serde(rename = "type")]
    pub activity_type: ActivityType,

    /// Local calendar date the activity *starts* on.
    pub date: NaiveDate,

    pub start_time: String,
    pub end_time: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_value: Option<f64>,

    /// Legacy combined pre+post total, kept indefinitely for old exports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_post_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Activity {
    /// Create a new activity with a generated id.
    pub fn new(
        activity_type: ActivityType,
        date: NaiveDate,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            activity_type,
            date,
            start_time: start_time.into(),
            end_time: end_time.into(),
            pre_value: None,
            post_value: None,
            pre_post_value: None,
            notes: None,
        }
    }

    /// Attach separate pre/post briefing offsets (hours).
    pub fn with_briefing(mut self, pre: f64, post: f64) -> Self {
        self.pre_value = Some(pre);
        self.post_value = Some(post);
        self
    }

    /// Attach a legacy combined pre+post total (hours).
    pub fn with_legacy_briefing(mut self, total: f64) -> Self {
        self.pre_post_value = Some(total);
        self
    }

    /// Attach free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Stored pre-briefing hours, before type gating.
    ///
    /// Falls back to half the legacy combined value when the separate
    /// field is absent.
    pub fn stored_pre_hours(&self) -> f64 {
        match (self.pre_value, self.pre_post_value) {
            (Some(pre), _) => pre,
            (None, Some(total)) => total / 2.0,
            (None, None) => 0.0,
        }
    }

    /// Stored post-briefing hours, before type gating.
    pub fn stored_post_hours(&self) -> f64 {
        match (self.post_value, self.pre_post_value) {
            (Some(post), _) => post,
            (None, Some(total)) => total / 2.0,
            (None, None) => 0.0,
        }
    }

    /// Combined stored pre+post hours, before type gating. Exports write
    /// this into the legacy combined column.
    pub fn briefing_total_hours(&self) -> f64 {
        self.stored_pre_hours() + self.stored_post_hours()
    }

    /// Effective pre-briefing minutes. Zero unless briefing applies to the
    /// activity type.
    pub fn pre_minutes(&self) -> i64 {
        if !self.activity_type.briefing_applies() {
            return 0;
        }
        hours_to_minutes(self.stored_pre_hours())
    }

    /// Effective post-briefing minutes. Zero unless briefing applies to
    /// the activity type.
    pub fn post_minutes(&self) -> i64 {
        if !self.activity_type.briefing_applies() {
            return 0;
        }
        hours_to_minutes(self.stored_post_hours())
    }
}

fn hours_to_minutes(hours: f64) -> i64 {
    if !hours.is_finite() || hours <= 0.0 {
        return 0;
    }
    (hours * 60.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_activity_serialization_round_trip() {
        let activity = Activity::new(ActivityType::Flight, date("2024-03-15"), "09:00", "11:30")
            .with_briefing(0.5, 0.5)
            .with_notes("stalls and slow flight");

        let json = serde_json::to_string(&activity).unwrap();
        assert!(json.contains("\"type\":\"Flight\""));
        assert!(json.contains("start_time"));

        let back: Activity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, activity);
    }

    #[test]
    fn test_legacy_type_labels_deserialize() {
        let internal: ActivityType = serde_json::from_str("\"Other Internal\"").unwrap();
        let external: ActivityType = serde_json::from_str("\"Other External\"").unwrap();
        let sim: ActivityType = serde_json::from_str("\"SIM\"").unwrap();

        assert_eq!(internal, ActivityType::Other);
        assert_eq!(external, ActivityType::Other);
        assert_eq!(sim, ActivityType::Sim);
    }

    #[test]
    fn test_legacy_combined_value_splits_evenly() {
        let activity = Activity::new(ActivityType::Flight, date("2024-03-15"), "09:00", "11:00")
            .with_legacy_briefing(1.0);

        assert_eq!(activity.pre_minutes(), 30);
        assert_eq!(activity.post_minutes(), 30);
        assert!((activity.briefing_total_hours() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_separate_values_take_precedence_over_legacy() {
        let mut activity =
            Activity::new(ActivityType::Sim, date("2024-03-15"), "09:00", "11:00")
                .with_briefing(1.0, 0.25);
        activity.pre_post_value = Some(3.0);

        assert_eq!(activity.pre_minutes(), 60);
        assert_eq!(activity.post_minutes(), 15);
    }

    #[test]
    fn test_briefing_ignored_for_ground_and_other() {
        let ground = Activity::new(ActivityType::Ground, date("2024-03-15"), "09:00", "11:00")
            .with_briefing(1.0, 1.0);
        let other = Activity::new(ActivityType::Other, date("2024-03-15"), "09:00", "11:00")
            .with_legacy_briefing(2.0);

        assert_eq!(ground.pre_minutes(), 0);
        assert_eq!(ground.post_minutes(), 0);
        assert_eq!(other.pre_minutes(), 0);
        assert_eq!(other.post_minutes(), 0);

        // The stored totals still survive for round-trip exports.
        assert!((ground.briefing_total_hours() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compliance_gating() {
        assert!(ActivityType::Flight.counts_toward_compliance());
        assert!(ActivityType::Ground.counts_toward_compliance());
        assert!(ActivityType::Sim.counts_toward_compliance());
        assert!(!ActivityType::Other.counts_toward_compliance());
    }

    #[test]
    fn test_type_parse_rejects_unknown() {
        assert!("Banner Tow".parse::<ActivityType>().is_err());
        assert_eq!("Other External".parse::<ActivityType>().unwrap(), ActivityType::Other);
    }
}
