//! Port interfaces for activity storage
//!
//! These traits define the boundary between the compliance engine and
//! infrastructure implementations.

use chrono::NaiveDate;
use safehours_domain::{Activity, Result};

/// Trait for persisting the activity log.
///
/// Synchronous API to match the local-store design: the engine is pure
/// and the personal logs it serves stay small, so implementations wrap a
/// local database rather than a remote service.
pub trait ActivityRepository: Send + Sync {
    /// Every stored activity, in no particular order.
    fn load_all(&self) -> Result<Vec<Activity>>;

    /// Activities starting on the given date.
    fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Activity>>;

    /// Insert a new activity or replace the one sharing its id.
    fn upsert(&self, activity: &Activity) -> Result<()>;

    /// Remove an activity by id. `NotFound` when no such activity exists.
    fn delete(&self, id: &str) -> Result<()>;
}
