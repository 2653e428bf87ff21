//! Core domain logic for the airline/airport registry.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::airline::{Airline, AirlineDraft, AirlineId, AirlinePatch, AirlineValidationError};
pub use model::airport::{Airport, AirportId, AirportPatch, AirportValidationError};
pub use repo::airline_repo::{AirlineRepository, SqliteAirlineRepository};
pub use repo::airport_repo::{AirportRepository, SqliteAirportRepository};
pub use repo::{RepoError, RepoResult};
pub use service::airline_airport_service::AirlineAirportService;
pub use service::airline_service::AirlineService;
pub use service::airport_service::AirportService;
pub use service::{BusinessError, BusinessErrorKind, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
