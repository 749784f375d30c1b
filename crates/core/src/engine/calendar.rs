//! Calendar-aligned aggregators
//!
//! Duty-day span, rest between days, consecutive working days, and the
//! weekly / trailing-7-day hour totals. All of them ignore `Other`
//! activities, and all of them fail soft: a malformed record degrades to
//! the conservative default instead of taking a compliance screen down.

use chrono::{Datelike, Days, NaiveDate};
use safehours_domain::constants::{
    CONSECUTIVE_DAYS_LOOKBACK, FULL_REST_HOURS, MINUTES_PER_DAY,
};
use safehours_domain::Activity;
use tracing::warn;

use crate::time::{calculate_duration, time_to_minutes};

fn qualifies(activity: &Activity, date: NaiveDate) -> bool {
    activity.date == date && activity.activity_type.counts_toward_compliance()
}

/// Adjusted start minute-of-day (`start - pre`); negative when
/// pre-briefing reaches into the previous day.
fn adjusted_start_minutes(activity: &Activity) -> Option<i64> {
    match time_to_minutes(&activity.start_time) {
        Ok(minutes) => Some(i64::from(minutes) - activity.pre_minutes()),
        Err(err) => {
            warn!(id = %activity.id, error = %err, "skipping activity with invalid start time");
            None
        }
    }
}

/// Adjusted end minute-of-day (`end + post`), pushed past 1440 for
/// overnight activities so day-span arithmetic keeps its ordering.
fn adjusted_end_minutes(activity: &Activity) -> Option<i64> {
    let (start, end) =
        match (time_to_minutes(&activity.start_time), time_to_minutes(&activity.end_time)) {
            (Ok(s), Ok(e)) => (i64::from(s), i64::from(e)),
            (Err(err), _) | (_, Err(err)) => {
                warn!(id = %activity.id, error = %err, "skipping activity with invalid end time");
                return None;
            }
        };

    let end = if end < start { end + MINUTES_PER_DAY } else { end };
    Some(end + activity.post_minutes())
}

fn is_overnight(activity: &Activity) -> bool {
    match (time_to_minutes(&activity.start_time), time_to_minutes(&activity.end_time)) {
        (Ok(start), Ok(end)) => end < start,
        _ => false,
    }
}

/// Duty-day span for `date`: earliest adjusted start to latest adjusted
/// end among the date's own activities, in hours. Zero for an empty day.
///
/// Activities are keyed by their start date only; a previous day's
/// overnight activity never stretches this day's span.
pub fn duty_day_hours(activities: &[Activity], date: NaiveDate) -> f64 {
    let earliest = activities
        .iter()
        .filter(|activity| qualifies(activity, date))
        .filter_map(adjusted_start_minutes)
        .min();
    let latest = activities
        .iter()
        .filter(|activity| qualifies(activity, date))
        .filter_map(adjusted_end_minutes)
        .max();

    match (earliest, latest) {
        (Some(start), Some(end)) if end > start => (end - start) as f64 / 60.0,
        _ => 0.0,
    }
}

/// Rest between the previous day's latest adjusted end and this day's
/// earliest adjusted start, in hours.
///
/// Returns the full-rest sentinel of 24 when either day has no
/// qualifying activities; "no previous duty" reads as compliant, not as a
/// computed rest value.
pub fn rest_between_hours(activities: &[Activity], date: NaiveDate) -> f64 {
    let Some(previous) = date.pred_opt() else {
        return FULL_REST_HOURS;
    };

    let prev_latest_end = activities
        .iter()
        .filter(|activity| qualifies(activity, previous))
        .filter_map(adjusted_end_minutes)
        .max();
    let curr_earliest_start = activities
        .iter()
        .filter(|activity| qualifies(activity, date))
        .filter_map(adjusted_start_minutes)
        .min();

    match (prev_latest_end, curr_earliest_start) {
        (Some(end), Some(start)) => ((MINUTES_PER_DAY - end) + start) as f64 / 60.0,
        _ => FULL_REST_HOURS,
    }
}

/// Consecutive working days ending at `date`: walk backward day by day,
/// counting days with at least one qualifying activity, stopping at the
/// first gap. Lookback is capped at 30 days.
pub fn consecutive_days(activities: &[Activity], date: NaiveDate) -> u32 {
    let mut count = 0;
    let mut day = date;

    for _ in 0..CONSECUTIVE_DAYS_LOOKBACK {
        let worked = activities.iter().any(|activity| qualifies(activity, day));
        if !worked {
            break;
        }
        count += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }

    count
}

/// Sunday of the week containing `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// Hours worked in the Sunday-to-Saturday week containing `date`,
/// briefing time included.
pub fn weekly_hours(activities: &[Activity], date: NaiveDate) -> f64 {
    let start = week_start(date);
    let end = start + Days::new(6);
    windowed_hours(activities, start, end)
}

/// Hours worked in the trailing 7-calendar-day window `[date - 6, date]`,
/// briefing time included.
pub fn past_seven_days_hours(activities: &[Activity], date: NaiveDate) -> f64 {
    let start = date - Days::new(6);
    windowed_hours(activities, start, date)
}

/// Shared aggregation for calendar windows.
///
/// Each qualifying activity contributes duration plus briefing minutes.
/// The overnight next-day portion is added up front and subtracted back
/// out when the following day falls outside the window - the spillover is
/// added then conditionally removed, never conditionally added.
fn windowed_hours(
    activities: &[Activity],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> f64 {
    let mut total: i64 = 0;

    for activity in activities.iter().filter(|activity| {
        activity.activity_type.counts_toward_compliance()
            && activity.date >= window_start
            && activity.date <= window_end
    }) {
        let duration = i64::from(calculate_duration(&activity.start_time, &activity.end_time));
        let mut minutes = duration + activity.pre_minutes() + activity.post_minutes();

        if is_overnight(activity) {
            let spills_out = activity.date.succ_opt().map_or(true, |next| next > window_end);
            if spills_out {
                // The portion past midnight, post-briefing included.
                if let Ok(end) = time_to_minutes(&activity.end_time) {
                    minutes -= i64::from(end) + activity.post_minutes();
                }
            }
        }

        total += minutes;
    }

    total as f64 / 60.0
}
