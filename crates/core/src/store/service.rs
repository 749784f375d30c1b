//! Compliance service - write gate and metric bundling
//!
//! The engine functions stay pure; this service is the one place that
//! loads state, applies the overlap gate, and persists. Overlap is also
//! the one failure that must propagate: silently storing a double-booked
//! activity would corrupt every downstream compliance guarantee.

use std::sync::Arc;

use chrono::NaiveDate;
use safehours_domain::{
    Activity, ComplianceStatus, DailyMetrics, Result, SafeHoursError, WarningThresholds,
};
use tracing::debug;

use super::ports::ActivityRepository;
use crate::engine::calendar::{
    consecutive_days, duty_day_hours, past_seven_days_hours, rest_between_hours, weekly_hours,
};
use crate::engine::rolling::{peak_rolling_contact_time, peak_rolling_flight_time};
use crate::engine::span::check_time_overlap;

/// Coordinates activity writes and compliance evaluation over an injected
/// repository.
pub struct ComplianceService {
    repository: Arc<dyn ActivityRepository>,
}

impl ComplianceService {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<dyn ActivityRepository>) -> Self {
        Self { repository }
    }

    /// Add a new activity, rejecting it when its effective span would
    /// double-book the day.
    pub fn add_activity(&self, activity: Activity) -> Result<()> {
        self.gate_write(&activity, None)?;
        self.repository.upsert(&activity)
    }

    /// Update an activity in place, keeping the no-overlap guarantee. The
    /// stored version of the same id is excluded from the conflict scan.
    pub fn update_activity(&self, activity: Activity) -> Result<()> {
        self.gate_write(&activity, Some(&activity.id))?;
        self.repository.upsert(&activity)
    }

    /// Remove an activity by id.
    pub fn delete_activity(&self, id: &str) -> Result<()> {
        self.repository.delete(id)
    }

    /// Every stored activity.
    pub fn list_activities(&self) -> Result<Vec<Activity>> {
        self.repository.load_all()
    }

    /// Compute all seven compliance metrics for a date.
    pub fn metrics_for(&self, date: NaiveDate) -> Result<DailyMetrics> {
        let activities = self.repository.load_all()?;
        debug!(%date, count = activities.len(), "computing daily metrics");

        Ok(DailyMetrics {
            date,
            flight_time_hours: peak_rolling_flight_time(&activities, date),
            contact_time_hours: peak_rolling_contact_time(&activities, date),
            duty_day_hours: duty_day_hours(&activities, date),
            rest_hours: rest_between_hours(&activities, date),
            consecutive_days: consecutive_days(&activities, date),
            weekly_hours: weekly_hours(&activities, date),
            past_seven_days_hours: past_seven_days_hours(&activities, date),
        })
    }

    /// Evaluate a date against warning thresholds.
    pub fn check(
        &self,
        date: NaiveDate,
        thresholds: &WarningThresholds,
    ) -> Result<ComplianceStatus> {
        Ok(thresholds.check(&self.metrics_for(date)?))
    }

    fn gate_write(&self, activity: &Activity, exclude_id: Option<&str>) -> Result<()> {
        let same_day = self.repository.find_by_date(activity.date)?;
        if check_time_overlap(&same_day, activity, exclude_id) {
            return Err(SafeHoursError::OverlapConflict(format!(
                "{} {}-{} on {}",
                activity.activity_type, activity.start_time, activity.end_time, activity.date
            )));
        }
        Ok(())
    }
}
