//! # SafeHours Infra
//!
//! Infrastructure adapters for SafeHours.
//!
//! This crate contains:
//! - SQLite-backed activity repository
//! - CSV and iCalendar exchange
//! - Threshold configuration loading
//! - Logging bootstrap for embedding applications
//!
//! ## Architecture
//! - Implements the port traits from `safehours-core`
//! - The compliance engine never reaches storage directly; everything
//!   here is a collaborator injected by the caller

pub mod config;
pub mod database;
pub mod errors;
pub mod exchange;
pub mod logging;

pub use database::{DbManager, SqliteActivityRepository};
pub use errors::InfraError;
pub use exchange::csv::{export_csv, import_csv};
pub use exchange::ics::{export_ics, import_ics};
