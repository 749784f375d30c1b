//! Activity builders for tests.

use chrono::NaiveDate;
use safehours_domain::{Activity, ActivityType};

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("test date literal")
}

pub fn flight(day: &str, start: &str, end: &str) -> Activity {
    Activity::new(ActivityType::Flight, date(day), start, end)
}

pub fn ground(day: &str, start: &str, end: &str) -> Activity {
    Activity::new(ActivityType::Ground, date(day), start, end)
}

pub fn sim(day: &str, start: &str, end: &str) -> Activity {
    Activity::new(ActivityType::Sim, date(day), start, end)
}

pub fn other(day: &str, start: &str, end: &str) -> Activity {
    Activity::new(ActivityType::Other, date(day), start, end)
}
