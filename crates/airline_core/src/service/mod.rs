//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Translate repository failures into business errors with fixed,
//!   caller-facing messages.
//!
//! # Invariants
//! - Services never bypass repository validation/persistence contracts.
//! - Every `BusinessError` maps to exactly one `BusinessErrorKind`.

use crate::model::airline::{AirlineId, AirlineValidationError};
use crate::model::airport::{AirportId, AirportValidationError};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod airline_airport_service;
pub mod airline_service;
pub mod airport_service;

pub const AIRLINE_NOT_FOUND_MESSAGE: &str = "The airline with the given id was not found";
pub const AIRPORT_NOT_FOUND_MESSAGE: &str = "The airport with the given id was not found";
pub const AIRPORT_NOT_ASSOCIATED_MESSAGE: &str =
    "The airport with the given id is not associated to the airline";

pub type ServiceResult<T> = Result<T, BusinessError>;

/// Coarse error category surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessErrorKind {
    /// Referenced identifier has no stored entity.
    NotFound,
    /// Input or record violates a domain rule.
    PreconditionFailed,
    /// Airport exists but is not linked to the airline.
    NotAssociated,
    /// Storage or consistency failure.
    Internal,
}

/// Service-level error for registry use-cases.
#[derive(Debug)]
pub enum BusinessError {
    AirlineNotFound(AirlineId),
    AirportNotFound(AirportId),
    AirportNotAssociated {
        airline_id: AirlineId,
        airport_id: AirportId,
    },
    InvalidAirline(AirlineValidationError),
    InvalidAirport(AirportValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl BusinessError {
    pub fn kind(&self) -> BusinessErrorKind {
        match self {
            Self::AirlineNotFound(_) | Self::AirportNotFound(_) => BusinessErrorKind::NotFound,
            Self::AirportNotAssociated { .. } => BusinessErrorKind::NotAssociated,
            Self::InvalidAirline(_) | Self::InvalidAirport(_) => {
                BusinessErrorKind::PreconditionFailed
            }
            Self::Repo(_) | Self::InconsistentState(_) => BusinessErrorKind::Internal,
        }
    }
}

impl Display for BusinessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AirlineNotFound(_) => f.write_str(AIRLINE_NOT_FOUND_MESSAGE),
            Self::AirportNotFound(_) => f.write_str(AIRPORT_NOT_FOUND_MESSAGE),
            Self::AirportNotAssociated { .. } => f.write_str(AIRPORT_NOT_ASSOCIATED_MESSAGE),
            Self::InvalidAirline(err) => write!(f, "{err}"),
            Self::InvalidAirport(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent registry state: {details}"),
        }
    }
}

impl Error for BusinessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidAirline(err) => Some(err),
            Self::InvalidAirport(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for BusinessError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::AirlineNotFound(id) => Self::AirlineNotFound(id),
            RepoError::AirportNotFound(id) => Self::AirportNotFound(id),
            RepoError::AirlineValidation(err) => Self::InvalidAirline(err),
            RepoError::AirportValidation(err) => Self::InvalidAirport(err),
            other => Self::Repo(other),
        }
    }
}

impl From<AirlineValidationError> for BusinessError {
    fn from(value: AirlineValidationError) -> Self {
        Self::InvalidAirline(value)
    }
}

impl From<AirportValidationError> for BusinessError {
    fn from(value: AirportValidationError) -> Self {
        Self::InvalidAirport(value)
    }
}
