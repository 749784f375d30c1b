//! SQLite-backed activity repository.
//!
//! Implements the `ActivityRepository` port over the shared [`DbManager`]
//! connection. Rows keep the legacy pre/post columns so databases written
//! by older exports load without migration.

use std::sync::Arc;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Row};
use safehours_core::ActivityRepository;
use safehours_domain::{Activity, ActivityType, Result, SafeHoursError};

use super::manager::DbManager;

const INSERT_ACTIVITY_SQL: &str = "INSERT OR REPLACE INTO activities (
        id, activity_type, date, start_time, end_time,
        pre_value, post_value, pre_post_value, notes
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

const SELECT_COLUMNS: &str = "SELECT id, activity_type, date, start_time, end_time,
        pre_value, post_value, pre_post_value, notes FROM activities";

/// Activity repository backed by the local SQLite store.
pub struct SqliteActivityRepository {
    db: Arc<DbManager>,
}

impl SqliteActivityRepository {
    /// Construct a repository over the shared database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

impl ActivityRepository for SqliteActivityRepository {
    fn load_all(&self) -> Result<Vec<Activity>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(SELECT_COLUMNS)?;
            let rows = stmt.query_map(params![], map_activity_row)?;
            rows.collect()
        })
    }

    fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Activity>> {
        self.db.with_connection(|conn| {
            let mut stmt =
                conn.prepare(&format!("{SELECT_COLUMNS} WHERE date = ?1 ORDER BY start_time"))?;
            let rows = stmt.query_map(params![date.to_string()], map_activity_row)?;
            rows.collect()
        })
    }

    fn upsert(&self, activity: &Activity) -> Result<()> {
        self.db.with_connection(|conn| {
            conn.execute(
                INSERT_ACTIVITY_SQL,
                params![
                    activity.id,
                    activity.activity_type.as_str(),
                    activity.date.to_string(),
                    activity.start_time,
                    activity.end_time,
                    activity.pre_value,
                    activity.post_value,
                    activity.pre_post_value,
                    activity.notes,
                ],
            )?;
            Ok(())
        })
    }

    fn delete(&self, id: &str) -> Result<()> {
        let deleted = self.db.with_connection(|conn| {
            conn.execute("DELETE FROM activities WHERE id = ?1", params![id])
        })?;

        if deleted == 0 {
            return Err(SafeHoursError::NotFound(format!("activity {id}")));
        }
        Ok(())
    }
}

fn map_activity_row(row: &Row<'_>) -> rusqlite::Result<Activity> {
    let type_label: String = row.get(1)?;
    let activity_type: ActivityType = type_label
        .parse()
        .map_err(|err| conversion_error(1, err))?;

    let date_text: String = row.get(2)?;
    let date: NaiveDate = date_text.parse().map_err(|err| conversion_error(2, err))?;

    Ok(Activity {
        id: row.get(0)?,
        activity_type,
        date,
        start_time: row.get(3)?,
        end_time: row.get(4)?,
        pre_value: row.get(5)?,
        post_value: row.get(6)?,
        pre_post_value: row.get(7)?,
        notes: row.get(8)?,
    })
}

fn conversion_error(
    index: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}
