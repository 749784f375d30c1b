//! CSV exchange in the legacy flat schema.
//!
//! Columns: `id,type,date,startTime,endTime,prePostValue,notes`. Export
//! folds pre+post into the combined column; import splits it evenly back
//! into the separate fields. Unlike the compliance calculators, parse
//! failures here are explicit errors: a silently-dropped row would lose
//! logged duty time.

use std::io::{Read, Write};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use safehours_domain::{Activity, ActivityType, Result};
use safehours_core::time_to_minutes;
use tracing::info;
use uuid::Uuid;

use crate::errors::InfraError;

const HEADER: [&str; 7] = ["id", "type", "date", "startTime", "endTime", "prePostValue", "notes"];

/// Write activities as legacy-schema CSV.
pub fn export_csv<W: Write>(activities: &[Activity], writer: W) -> Result<()> {
    let mut out = WriterBuilder::new().from_writer(writer);
    out.write_record(HEADER).map_err(InfraError::from)?;

    for activity in activities {
        let date_field = activity.date.to_string();
        let total = activity.briefing_total_hours();
        let pre_post_field = if total > 0.0 { total.to_string() } else { String::new() };

        out.write_record([
            activity.id.as_str(),
            activity.activity_type.as_str(),
            date_field.as_str(),
            activity.start_time.as_str(),
            activity.end_time.as_str(),
            pre_post_field.as_str(),
            activity.notes.as_deref().unwrap_or(""),
        ])
        .map_err(InfraError::from)?;
    }

    out.flush().map_err(InfraError::from)?;
    info!(count = activities.len(), "exported activities to csv");
    Ok(())
}

/// Read activities from legacy-schema CSV.
///
/// A row's combined `prePostValue` is split evenly into the separate
/// pre/post fields; rows without an id get a fresh one.
pub fn import_csv<R: Read>(reader: R) -> Result<Vec<Activity>> {
    let mut input = ReaderBuilder::new().trim(Trim::All).flexible(true).from_reader(reader);

    let mut activities = Vec::new();
    for (index, record) in input.records().enumerate() {
        let record = record.map_err(InfraError::from)?;
        // Header occupies line 1.
        activities.push(parse_record(&record, index + 2)?);
    }

    info!(count = activities.len(), "imported activities from csv");
    Ok(activities)
}

fn parse_record(record: &StringRecord, line: usize) -> Result<Activity> {
    let field = |index: usize| record.get(index).unwrap_or("").trim();

    let activity_type: ActivityType = field(1).parse().map_err(|_| {
        InfraError::MalformedRecord(format!("line {line}: unknown activity type '{}'", field(1)))
    })?;

    let date: NaiveDate = field(2).parse().map_err(|_| {
        InfraError::MalformedRecord(format!("line {line}: invalid date '{}'", field(2)))
    })?;

    let start_time = validated_time(field(3), line)?;
    let end_time = validated_time(field(4), line)?;

    let pre_post = field(5);
    let (pre_value, post_value) = if pre_post.is_empty() {
        (None, None)
    } else {
        let total: f64 = pre_post.parse().map_err(|_| {
            InfraError::MalformedRecord(format!(
                "line {line}: invalid pre/post value '{pre_post}'"
            ))
        })?;
        (Some(total / 2.0), Some(total / 2.0))
    };

    let id = field(0);
    let id = if id.is_empty() { Uuid::new_v4().to_string() } else { id.to_string() };

    let notes = field(6);
    let notes = if notes.is_empty() { None } else { Some(notes.to_string()) };

    Ok(Activity {
        id,
        activity_type,
        date,
        start_time,
        end_time,
        pre_value,
        post_value,
        pre_post_value: None,
        notes,
    })
}

fn validated_time(value: &str, line: usize) -> Result<String> {
    time_to_minutes(value)
        .map_err(|err| InfraError::MalformedRecord(format!("line {line}: {err}")))?;
    Ok(value.to_string())
}
