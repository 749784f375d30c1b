//! Rolling 24-hour window calculators
//!
//! Interval-intersection sums over `[instant - 24h, instant]`, evaluated
//! at arbitrary instants rather than calendar days. Two parameterizations
//! of one algorithm: flight time counts only Flight activities on their
//! raw spans, contact time counts every non-Other activity on its
//! pre/post-adjusted span.
//!
//! Activity counts stay small in a personal log, so each query is a plain
//! O(n) scan with no pre-indexing.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use safehours_domain::constants::ROLLING_WINDOW_HOURS;
use safehours_domain::{Activity, ActivityType};
use tracing::warn;

use crate::time::time_to_minutes;

/// Absolute start/end instants of an activity, reconstructed from its
/// date and wall-clock times. The end lands on the next day when the
/// clock value wraps. `None` when a time fails to parse; the activity
/// then contributes nothing to any window.
pub(crate) fn absolute_span(
    activity: &Activity,
    adjusted: bool,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start_min = match time_to_minutes(&activity.start_time) {
        Ok(minutes) => minutes,
        Err(err) => {
            warn!(id = %activity.id, error = %err, "skipping activity with invalid start time");
            return None;
        }
    };
    let end_min = match time_to_minutes(&activity.end_time) {
        Ok(minutes) => minutes,
        Err(err) => {
            warn!(id = %activity.id, error = %err, "skipping activity with invalid end time");
            return None;
        }
    };

    let midnight = activity.date.and_hms_opt(0, 0, 0)?;
    let mut start = midnight + Duration::minutes(i64::from(start_min));
    let mut end = midnight + Duration::minutes(i64::from(end_min));
    if end < start {
        end += Duration::days(1);
    }

    if adjusted {
        start -= Duration::minutes(activity.pre_minutes());
        end += Duration::minutes(activity.post_minutes());
    }

    Some((start, end))
}

fn window_minutes(
    activities: &[Activity],
    instant: NaiveDateTime,
    filter: fn(&Activity) -> bool,
    adjusted: bool,
) -> i64 {
    let window_start = instant - Duration::hours(ROLLING_WINDOW_HOURS);

    activities
        .iter()
        .filter(|activity| filter(activity))
        .filter_map(|activity| absolute_span(activity, adjusted))
        .map(|(start, end)| {
            let overlap_start = start.max(window_start);
            let overlap_end = end.min(instant);
            if overlap_end > overlap_start {
                (overlap_end - overlap_start).num_minutes()
            } else {
                0
            }
        })
        .sum()
}

fn is_flight(activity: &Activity) -> bool {
    activity.activity_type == ActivityType::Flight
}

fn is_contact(activity: &Activity) -> bool {
    activity.activity_type.counts_toward_compliance()
}

fn minutes_to_hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}

/// Flight instruction hours inside `[instant - 24h, instant]`.
///
/// Pre/post briefing is excluded: only raw flight time counts toward the
/// flight limit.
pub fn rolling_flight_time(activities: &[Activity], instant: NaiveDateTime) -> f64 {
    minutes_to_hours(window_minutes(activities, instant, is_flight, false))
}

/// Contact hours (activity plus briefing, all non-Other types) inside
/// `[instant - 24h, instant]`.
pub fn rolling_contact_time(activities: &[Activity], instant: NaiveDateTime) -> f64 {
    minutes_to_hours(window_minutes(activities, instant, is_contact, true))
}

/// Maximum rolling-24h flight time reached at any instant of `date`.
pub fn peak_rolling_flight_time(activities: &[Activity], date: NaiveDate) -> f64 {
    peak_over_day(activities, date, is_flight, false)
}

/// Maximum rolling-24h contact time reached at any instant of `date`.
pub fn peak_rolling_contact_time(activities: &[Activity], date: NaiveDate) -> f64 {
    peak_over_day(activities, date, is_contact, true)
}

/// The window sum is piecewise linear in the instant, so its maxima can
/// only land where the derivative changes sign: at an activity's end
/// (accumulation stops) or at its start plus 24h (the span begins leaving
/// the trailing window). Evaluating at exactly those instants, clamped to
/// the day, plus end-of-day finds the true peak - unlike sampling on the
/// hour, which misses maxima from off-hour starts.
fn peak_over_day(
    activities: &[Activity],
    date: NaiveDate,
    filter: fn(&Activity) -> bool,
    adjusted: bool,
) -> f64 {
    let Some(day_start) = date.and_hms_opt(0, 0, 0) else {
        return 0.0;
    };
    let day_end = day_start + Duration::days(1);

    let mut instants = vec![day_end];
    for activity in activities.iter().filter(|activity| filter(activity)) {
        if let Some((start, end)) = absolute_span(activity, adjusted) {
            for candidate in [end, start + Duration::hours(ROLLING_WINDOW_HOURS)] {
                if candidate > day_start && candidate <= day_end {
                    instants.push(candidate);
                }
            }
        }
    }

    instants
        .into_iter()
        .map(|instant| window_minutes(activities, instant, filter, adjusted))
        .max()
        .map_or(0.0, minutes_to_hours)
}
