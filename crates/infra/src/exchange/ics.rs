//! iCalendar exchange.
//!
//! One `VEVENT` per activity. `DTSTART`/`DTEND` are floating local times
//! with briefing minutes folded in, so the calendar block shows the whole
//! commitment including pre/post time. The raw fields ride along in
//! `DESCRIPTION` as key lines (`Type:`, `Pre/Post Value:`, `Notes:`) so an
//! exported file can be imported back without loss.

use chrono::{Duration, NaiveDateTime};
use safehours_core::time_to_minutes;
use safehours_domain::{Activity, ActivityType, Result};
use tracing::info;
use uuid::Uuid;

use crate::errors::InfraError;

const CALENDAR_HEADER: &str = "BEGIN:VCALENDAR\r\n\
                               VERSION:2.0\r\n\
                               PRODID:-//SafeHours//Duty Time Log//EN\r\n\
                               CALSCALE:GREGORIAN\r\n";
const CALENDAR_FOOTER: &str = "END:VCALENDAR\r\n";
const DT_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Render activities as an iCalendar document.
pub fn export_ics(activities: &[Activity]) -> Result<String> {
    let mut out = String::from(CALENDAR_HEADER);

    for activity in activities {
        let (start, end) = event_window(activity)?;

        out.push_str("BEGIN:VEVENT\r\n");
        out.push_str(&format!("UID:{}\r\n", activity.id));
        out.push_str(&format!("DTSTART:{}\r\n", start.format(DT_FORMAT)));
        out.push_str(&format!("DTEND:{}\r\n", end.format(DT_FORMAT)));
        out.push_str(&format!(
            "SUMMARY:SafeHours: {} Activity\r\n",
            activity.activity_type.as_str()
        ));
        out.push_str(&format!("DESCRIPTION:{}\r\n", escape_text(&description(activity))));
        out.push_str("END:VEVENT\r\n");
    }

    out.push_str(CALENDAR_FOOTER);
    info!(count = activities.len(), "exported activities to ics");
    Ok(out)
}

/// Parse activities back out of an iCalendar document produced by
/// [`export_ics`] (or an equivalent feed using the same description
/// keys).
pub fn import_ics(content: &str) -> Result<Vec<Activity>> {
    let mut activities = Vec::new();
    let mut event: Option<RawEvent> = None;

    for line in unfold_lines(content) {
        if line == "BEGIN:VEVENT" {
            event = Some(RawEvent::default());
            continue;
        }
        if line == "END:VEVENT" {
            if let Some(raw) = event.take() {
                activities.push(raw.into_activity()?);
            }
            continue;
        }

        if let Some(raw) = event.as_mut() {
            if let Some((name, value)) = line.split_once(':') {
                // Drop property parameters such as `;VALUE=DATE-TIME`.
                let name = name.split(';').next().unwrap_or(name);
                match name {
                    "UID" => raw.uid = Some(value.to_string()),
                    "DTSTART" => raw.dtstart = Some(value.to_string()),
                    "DTEND" => raw.dtend = Some(value.to_string()),
                    "SUMMARY" => raw.summary = Some(value.to_string()),
                    "DESCRIPTION" => raw.description = Some(value.to_string()),
                    _ => {}
                }
            }
        }
    }

    info!(count = activities.len(), "imported activities from ics");
    Ok(activities)
}

/// Event window with briefing minutes folded in, half of the combined
/// total on each side. Folding the even split (rather than any uneven
/// stored breakdown) matches the legacy combined representation carried
/// in `DESCRIPTION`, which is what lets import recover the raw clock
/// times exactly.
///
/// Malformed stored times are an explicit export error: unlike a
/// compliance metric, a calendar feed must not silently shrink an event.
fn event_window(activity: &Activity) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let start_min = time_to_minutes(&activity.start_time).map_err(|err| {
        InfraError::MalformedCalendar(format!("activity {}: {err}", activity.id))
    })?;
    let end_min = time_to_minutes(&activity.end_time).map_err(|err| {
        InfraError::MalformedCalendar(format!("activity {}: {err}", activity.id))
    })?;

    let midnight = activity.date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        InfraError::MalformedCalendar(format!("activity {}: invalid date", activity.id))
    })?;

    let mut start = midnight + Duration::minutes(i64::from(start_min));
    let mut end = midnight + Duration::minutes(i64::from(end_min));
    if end < start {
        end += Duration::days(1);
    }

    let side = briefing_side_minutes(activity.activity_type, activity.briefing_total_hours());
    Ok((start - side, end + side))
}

fn briefing_side_minutes(activity_type: ActivityType, total_hours: f64) -> Duration {
    if !activity_type.briefing_applies() || total_hours <= 0.0 || !total_hours.is_finite() {
        return Duration::zero();
    }
    Duration::minutes((total_hours / 2.0 * 60.0).round() as i64)
}

fn description(activity: &Activity) -> String {
    let mut text = format!(
        "Type: {}\nPre/Post Value: {}",
        activity.activity_type.as_str(),
        activity.briefing_total_hours()
    );
    if let Some(notes) = activity.notes.as_deref() {
        text.push_str("\nNotes: ");
        text.push_str(notes);
    }
    text
}

#[derive(Default)]
struct RawEvent {
    uid: Option<String>,
    dtstart: Option<String>,
    dtend: Option<String>,
    summary: Option<String>,
    description: Option<String>,
}

impl RawEvent {
    fn into_activity(self) -> Result<Activity> {
        let description = self.description.map(|text| unescape_text(&text)).unwrap_or_default();
        let (type_label, total, notes) = parse_description(&description);

        let type_label = type_label
            .or_else(|| summary_type_label(self.summary.as_deref()))
            .ok_or_else(|| InfraError::MalformedCalendar(String::from("event without a type")))?;
        let activity_type: ActivityType = type_label.parse().map_err(|_| {
            InfraError::MalformedCalendar(format!("unknown activity type '{type_label}'"))
        })?;

        let dtstart = parse_datetime(self.dtstart.as_deref(), "DTSTART")?;
        let dtend = parse_datetime(self.dtend.as_deref(), "DTEND")?;

        // Undo the briefing fold. The export splits the combined total
        // evenly, so the same split recovers the raw clock times.
        let (pre_value, post_value) = if total > 0.0 {
            (Some(total / 2.0), Some(total / 2.0))
        } else {
            (None, None)
        };
        let side = briefing_side_minutes(activity_type, total);
        let start = dtstart + side;
        let end = dtend - side;

        Ok(Activity {
            id: self.uid.unwrap_or_else(|| Uuid::new_v4().to_string()),
            activity_type,
            date: start.date(),
            start_time: start.format("%H:%M").to_string(),
            end_time: end.format("%H:%M").to_string(),
            pre_value,
            post_value,
            pre_post_value: None,
            notes,
        })
    }
}

fn parse_datetime(value: Option<&str>, property: &str) -> Result<NaiveDateTime> {
    let value =
        value.ok_or_else(|| InfraError::MalformedCalendar(format!("missing {property}")))?;
    NaiveDateTime::parse_from_str(value, DT_FORMAT)
        .map_err(|_| InfraError::MalformedCalendar(format!("invalid {property} '{value}'")).into())
}

/// Pull the type, combined briefing total, and notes out of the
/// description key lines.
fn parse_description(text: &str) -> (Option<String>, f64, Option<String>) {
    let mut type_label = None;
    let mut total = 0.0;
    let mut notes: Option<String> = None;
    let mut in_notes = false;

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("Notes:") {
            notes = Some(rest.trim_start().to_string());
            in_notes = true;
        } else if let Some(rest) = line.strip_prefix("Type:") {
            type_label = Some(rest.trim().to_string());
            in_notes = false;
        } else if let Some(rest) = line.strip_prefix("Pre/Post Value:") {
            total = rest.trim().parse().unwrap_or(0.0);
            in_notes = false;
        } else if in_notes {
            // Multi-line notes continue until the end of the description.
            if let Some(existing) = notes.as_mut() {
                existing.push('\n');
                existing.push_str(line);
            }
        }
    }

    (type_label, total, notes.filter(|n| !n.is_empty()))
}

fn summary_type_label(summary: Option<&str>) -> Option<String> {
    summary?
        .strip_prefix("SafeHours: ")?
        .strip_suffix(" Activity")
        .map(|label| label.to_string())
}

/// RFC 5545 TEXT escaping.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn unescape_text(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            unescaped.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => unescaped.push('\n'),
            Some(other) => unescaped.push(other),
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

/// Split into logical lines, joining RFC 5545 folded continuations
/// (lines starting with a space or tab).
fn unfold_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in content.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(continuation) = raw.strip_prefix([' ', '\t']) {
            if let Some(last) = lines.last_mut() {
                last.push_str(continuation);
                continue;
            }
        }
        lines.push(raw.to_string());
    }
    lines
}
