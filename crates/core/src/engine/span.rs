//! Effective spans and overlap detection
//!
//! An activity's effective span is its start/end window after applying
//! pre/post briefing offsets. The overlap check over those spans is the
//! sole defense against double-booking: after a successful add or update,
//! no two activities on the same date may have intersecting effective
//! spans.

use safehours_domain::Activity;
use tracing::warn;

use crate::time::time_to_minutes;

/// Pre/post-adjusted span in minutes-of-day on the activity's own date.
///
/// `start` goes negative when pre-briefing reaches into the previous day.
/// For overnight activities `end` is *smaller* than `start`: the overlap
/// comparison is same-day-only by design and performs no day-wrap
/// handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveSpan {
    pub start: i64,
    pub end: i64,
}

/// Compute an activity's effective span on its own date.
///
/// Returns `None` when either time fails to parse; such an activity
/// cannot conflict with anything.
pub fn effective_span(activity: &Activity) -> Option<EffectiveSpan> {
    let start = minutes_or_skip(&activity.start_time, activity)?;
    let end = minutes_or_skip(&activity.end_time, activity)?;

    Some(EffectiveSpan {
        start: start - activity.pre_minutes(),
        end: end + activity.post_minutes(),
    })
}

fn minutes_or_skip(time: &str, activity: &Activity) -> Option<i64> {
    match time_to_minutes(time) {
        Ok(minutes) => Some(i64::from(minutes)),
        Err(err) => {
            warn!(id = %activity.id, time, error = %err, "skipping span with invalid time");
            None
        }
    }
}

/// Report whether `candidate` would double-book against `activities`.
///
/// Only activities sharing the candidate's date are compared;
/// `exclude_id` skips the activity currently being edited. Boundary rule:
/// a candidate starting exactly at an existing span's end does not
/// conflict, while one starting exactly at an existing span's start does.
///
/// Applies to every activity type, `Other` included: double-booking is a
/// scheduling problem, not a compliance metric.
pub fn check_time_overlap(
    activities: &[Activity],
    candidate: &Activity,
    exclude_id: Option<&str>,
) -> bool {
    let Some(new_span) = effective_span(candidate) else {
        return false;
    };

    activities
        .iter()
        .filter(|existing| existing.date == candidate.date)
        .filter(|existing| exclude_id.map_or(true, |id| existing.id != id))
        .filter_map(effective_span)
        .any(|existing| spans_conflict(new_span, existing))
}

fn spans_conflict(new: EffectiveSpan, existing: EffectiveSpan) -> bool {
    // candidate start falls inside the existing span
    (new.start >= existing.start && new.start < existing.end)
        // candidate end falls inside the existing span
        || (new.end > existing.start && new.end <= existing.end)
        // candidate fully contains the existing span
        || (new.start <= existing.start && new.end >= existing.end)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use safehours_domain::ActivityType;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn flight(start: &str, end: &str) -> Activity {
        Activity::new(ActivityType::Flight, date("2024-03-15"), start, end)
    }

    #[test]
    fn test_effective_span_applies_briefing() {
        let activity = flight("09:00", "11:00").with_briefing(0.5, 1.0);
        let span = effective_span(&activity).unwrap();

        assert_eq!(span.start, 510); // 08:30
        assert_eq!(span.end, 720); // 12:00
    }

    #[test]
    fn test_effective_span_ignores_briefing_for_ground() {
        let activity =
            Activity::new(ActivityType::Ground, date("2024-03-15"), "09:00", "11:00")
                .with_briefing(1.0, 1.0);
        let span = effective_span(&activity).unwrap();

        assert_eq!(span.start, 540);
        assert_eq!(span.end, 660);
    }

    #[test]
    fn test_plain_overlap_detected() {
        let existing = vec![flight("09:00", "11:00")];
        let candidate = flight("10:00", "12:00");

        assert!(check_time_overlap(&existing, &candidate, None));
    }

    #[test]
    fn test_briefing_extends_the_conflict_window() {
        // 09:00-11:00 with 1h post briefing occupies until 12:00.
        let existing = vec![flight("09:00", "11:00").with_briefing(0.0, 1.0)];
        let candidate = flight("11:30", "13:00");

        assert!(check_time_overlap(&existing, &candidate, None));
    }

    #[test]
    fn test_touching_boundary_is_not_a_conflict() {
        let existing = vec![flight("09:00", "11:00")];
        let candidate = flight("11:00", "12:00");

        assert!(!check_time_overlap(&existing, &candidate, None));
    }

    #[test]
    fn test_identical_start_is_a_conflict() {
        let existing = vec![flight("09:00", "11:00")];
        let candidate = flight("09:00", "09:30");

        assert!(check_time_overlap(&existing, &candidate, None));
    }

    #[test]
    fn test_containment_is_a_conflict() {
        let existing = vec![flight("09:30", "10:00")];
        let candidate = flight("09:00", "11:00");

        assert!(check_time_overlap(&existing, &candidate, None));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = flight("09:00", "11:00");
        let b = flight("10:00", "12:00");

        assert!(check_time_overlap(std::slice::from_ref(&a), &b, None));
        assert!(check_time_overlap(std::slice::from_ref(&b), &a, None));
    }

    #[test]
    fn test_other_dates_do_not_conflict() {
        let existing = vec![flight("09:00", "11:00")];
        let mut candidate = flight("09:30", "10:30");
        candidate.date = date("2024-03-16");

        assert!(!check_time_overlap(&existing, &candidate, None));
    }

    #[test]
    fn test_exclude_id_permits_editing_in_place() {
        let existing = flight("09:00", "11:00");
        let mut edited = existing.clone();
        edited.end_time = String::from("10:30");

        let log = vec![existing.clone()];
        assert!(check_time_overlap(&log, &edited, None));
        assert!(!check_time_overlap(&log, &edited, Some(&existing.id)));
    }

    #[test]
    fn test_unparseable_candidate_never_conflicts() {
        let existing = vec![flight("09:00", "11:00")];
        let candidate = flight("junk", "10:00");

        assert!(!check_time_overlap(&existing, &candidate, None));
    }

    #[test]
    fn test_other_activities_still_block_the_slot() {
        let existing =
            vec![Activity::new(ActivityType::Other, date("2024-03-15"), "09:00", "11:00")];
        let candidate = flight("10:00", "12:00");

        assert!(check_time_overlap(&existing, &candidate, None));
    }
}
