//! Wall-clock time conversion utilities
//!
//! Parsing and formatting for `HH:MM` values and minute spans. Foundation
//! for every calculator in the engine. Parsing returns a dedicated error
//! so internal callers see real failures; only the fail-soft calculators
//! collapse bad input to a default.

use safehours_domain::constants::MINUTES_PER_DAY;
use thiserror::Error;
use tracing::warn;

/// Error type for wall-clock time parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    #[error("Time component out of range: {0}")]
    OutOfRange(String),
}

/// Parse an `HH:MM` value into minutes since midnight.
///
/// Hours must be 0-23 and minutes 0-59; anything else is an error rather
/// than a silent zero.
pub fn time_to_minutes(time: &str) -> Result<u32, TimeParseError> {
    let (hours_part, minutes_part) =
        time.split_once(':').ok_or_else(|| TimeParseError::InvalidFormat(time.to_string()))?;

    let hours = parse_component(hours_part, time)?;
    let minutes = parse_component(minutes_part, time)?;

    if hours > 23 || minutes > 59 {
        return Err(TimeParseError::OutOfRange(time.to_string()));
    }

    Ok(hours * 60 + minutes)
}

fn parse_component(part: &str, original: &str) -> Result<u32, TimeParseError> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeParseError::InvalidFormat(original.to_string()));
    }
    part.parse().map_err(|_| TimeParseError::InvalidFormat(original.to_string()))
}

/// Format minutes since midnight as `HH:MM`, wrapping past 24h.
///
/// Negative input formats as `"00:00"`.
pub fn minutes_to_time(minutes: i64) -> String {
    if minutes < 0 {
        return String::from("00:00");
    }
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;
    format!("{hours:02}:{mins:02}")
}

/// Normalize flexible numeric shorthand into `HH:MM`.
///
/// Accepts 1-2 digits as an hour (`"7"` -> `"07:00"`), 3 digits as `H:MM`
/// (`"130"` -> `"01:30"`), 4 digits as `HH:MM` (`"1330"` -> `"13:30"`), or
/// an already colon-separated value. Returns `None` rather than guessing
/// on anything ambiguous or out of range.
pub fn parse_time_input(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains(':') {
        return time_to_minutes(trimmed).ok().map(|m| minutes_to_time(i64::from(m)));
    }

    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes): (u32, u32) = match trimmed.len() {
        1 | 2 => (trimmed.parse().ok()?, 0),
        3 => (trimmed[..1].parse().ok()?, trimmed[1..].parse().ok()?),
        4 => (trimmed[..2].parse().ok()?, trimmed[2..].parse().ok()?),
        _ => return None,
    };

    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(format!("{hours:02}:{minutes:02}"))
}

/// Minutes between two wall-clock times, treating `end < start` as an
/// overnight span.
///
/// Malformed input yields 0: a duration cell on a compliance screen must
/// degrade, not crash.
pub fn calculate_duration(start: &str, end: &str) -> u32 {
    let (start_min, end_min) = match (time_to_minutes(start), time_to_minutes(end)) {
        (Ok(s), Ok(e)) => (s, e),
        (Err(err), _) | (_, Err(err)) => {
            warn!(start, end, error = %err, "invalid time in duration calculation");
            return 0;
        }
    };

    if end_min < start_min {
        end_min + MINUTES_PER_DAY as u32 - start_min
    } else {
        end_min - start_min
    }
}
