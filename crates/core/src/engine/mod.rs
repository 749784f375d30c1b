//! The time-window compliance engine
//!
//! Pure functions that convert a set of timestamped activities into the
//! seven compliance metrics, plus the overlap check that rejects
//! double-booked entries. Every function treats its activity slice as
//! read-only and derives everything per call; there is no hidden state
//! and no clock access.

pub mod calendar;
pub mod rolling;
pub mod span;
