//! Import/export collaborators for the activity log.

pub mod csv;
pub mod ics;
