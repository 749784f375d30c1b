//! Threshold configuration loader
//!
//! Loads warning thresholds from environment variables or a TOML file.
//!
//! ## Loading Strategy
//! 1. Start from defaults
//! 2. Merge a config file when one is found (probed paths below)
//! 3. Apply per-field environment overrides on top
//!
//! Loading never fails: thresholds guard a compliance screen, so a broken
//! settings file degrades to the defaults with a logged warning.
//!
//! ## Environment Variables
//! - `SAFEHOURS_FLIGHT_HOURS`: rolling-24h flight limit
//! - `SAFEHOURS_CONTACT_HOURS`: rolling-24h contact limit
//! - `SAFEHOURS_REST_HOURS`: minimum rest
//! - `SAFEHOURS_DUTY_DAY_HOURS`: duty-day span limit
//! - `SAFEHOURS_CONSECUTIVE_DAYS`: consecutive working days limit
//! - `SAFEHOURS_WEEKLY_HOURS`: Sunday-Saturday week limit
//! - `SAFEHOURS_PAST_SEVEN_DAYS_HOURS`: trailing 7-day limit
//!
//! ## File Locations
//! The loader probes, in order: `./safehours.toml`, `./config.toml`,
//! `../safehours.toml`.

use std::path::{Path, PathBuf};

use safehours_domain::{Result, SafeHoursError, WarningThresholds};
use tracing::{debug, warn};

/// Load thresholds with the automatic fallback strategy.
pub fn load() -> WarningThresholds {
    let base = match probe_config_paths() {
        Some(path) => load_from_file(&path).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "ignoring unreadable threshold config");
            WarningThresholds::default()
        }),
        None => {
            debug!("no threshold config file found, using defaults");
            WarningThresholds::default()
        }
    };

    apply_env_overrides(base)
}

/// Load thresholds from a specific TOML file.
///
/// Missing fields keep their defaults; an unreadable or invalid file is a
/// `Config` error.
pub fn load_from_file(path: &Path) -> Result<WarningThresholds> {
    let contents = std::fs::read_to_string(path).map_err(|err| {
        SafeHoursError::Config(format!("failed to read {}: {err}", path.display()))
    })?;

    toml::from_str(&contents).map_err(|err| {
        SafeHoursError::Config(format!("invalid threshold config {}: {err}", path.display()))
    })
}

/// Apply `SAFEHOURS_*` environment overrides on top of `base`.
pub fn apply_env_overrides(mut base: WarningThresholds) -> WarningThresholds {
    override_f64("SAFEHOURS_FLIGHT_HOURS", &mut base.flight_hours);
    override_f64("SAFEHOURS_CONTACT_HOURS", &mut base.contact_hours);
    override_f64("SAFEHOURS_REST_HOURS", &mut base.rest_hours);
    override_f64("SAFEHOURS_DUTY_DAY_HOURS", &mut base.duty_day_hours);
    override_u32("SAFEHOURS_CONSECUTIVE_DAYS", &mut base.consecutive_days);
    override_f64("SAFEHOURS_WEEKLY_HOURS", &mut base.weekly_hours);
    override_f64("SAFEHOURS_PAST_SEVEN_DAYS_HOURS", &mut base.past_seven_days_hours);
    base
}

fn override_f64(name: &str, slot: &mut f64) {
    if let Ok(value) = std::env::var(name) {
        match value.parse() {
            Ok(parsed) => *slot = parsed,
            Err(_) => warn!(name, %value, "ignoring unparseable threshold override"),
        }
    }
}

fn override_u32(name: &str, slot: &mut u32) {
    if let Ok(value) = std::env::var(name) {
        match value.parse() {
            Ok(parsed) => *slot = parsed,
            Err(_) => warn!(name, %value, "ignoring unparseable threshold override"),
        }
    }
}

fn probe_config_paths() -> Option<PathBuf> {
    const CANDIDATES: [&str; 3] = ["safehours.toml", "config.toml", "../safehours.toml"];

    CANDIDATES.iter().map(PathBuf::from).find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_from_file_merges_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "flight_hours = 6.0\nconsecutive_days = 12").unwrap();

        let thresholds = load_from_file(file.path()).unwrap();
        assert!((thresholds.flight_hours - 6.0).abs() < f64::EPSILON);
        assert_eq!(thresholds.consecutive_days, 12);
        // Unspecified fields keep their defaults.
        assert!((thresholds.rest_hours - WarningThresholds::default().rest_hours).abs()
            < f64::EPSILON);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "flight_hours = \"lots\"").unwrap();

        assert!(matches!(load_from_file(file.path()), Err(SafeHoursError::Config(_))));
    }

    #[test]
    fn test_env_override_applies() {
        // Env mutation is process-wide; use a variable no other test reads.
        std::env::set_var("SAFEHOURS_CONSECUTIVE_DAYS", "9");
        let thresholds = apply_env_overrides(WarningThresholds::default());
        std::env::remove_var("SAFEHOURS_CONSECUTIVE_DAYS");

        assert_eq!(thresholds.consecutive_days, 9);
    }
}
