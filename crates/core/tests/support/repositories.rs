//! Mock repository implementations for testing
//!
//! Provides an in-memory stand-in for the activity repository port,
//! enabling deterministic tests without database dependencies.

use std::sync::Mutex;

use chrono::NaiveDate;
use safehours_core::ActivityRepository;
use safehours_domain::{Activity, Result as DomainResult, SafeHoursError};

/// In-memory mock for `ActivityRepository`.
#[derive(Default)]
pub struct InMemoryActivityRepository {
    activities: Mutex<Vec<Activity>>,
}

impl InMemoryActivityRepository {
    /// Create a new mock seeded with the provided activities.
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities: Mutex::new(activities) }
    }

    /// Number of stored activities.
    pub fn len(&self) -> usize {
        self.activities.lock().expect("repository lock poisoned").len()
    }
}

impl ActivityRepository for InMemoryActivityRepository {
    fn load_all(&self) -> DomainResult<Vec<Activity>> {
        Ok(self.activities.lock().expect("repository lock poisoned").clone())
    }

    fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Activity>> {
        Ok(self
            .activities
            .lock()
            .expect("repository lock poisoned")
            .iter()
            .filter(|activity| activity.date == date)
            .cloned()
            .collect())
    }

    fn upsert(&self, activity: &Activity) -> DomainResult<()> {
        let mut activities = self.activities.lock().expect("repository lock poisoned");
        match activities.iter_mut().find(|stored| stored.id == activity.id) {
            Some(stored) => *stored = activity.clone(),
            None => activities.push(activity.clone()),
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> DomainResult<()> {
        let mut activities = self.activities.lock().expect("repository lock poisoned");
        let before = activities.len();
        activities.retain(|activity| activity.id != id);
        if activities.len() == before {
            return Err(SafeHoursError::NotFound(format!("activity {id}")));
        }
        Ok(())
    }
}
