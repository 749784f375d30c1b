//! Activity storage boundary
//!
//! The port trait and the service that coordinates writes and compliance
//! evaluation over it.

pub mod ports;
pub mod service;

pub use ports::ActivityRepository;
pub use service::ComplianceService;
