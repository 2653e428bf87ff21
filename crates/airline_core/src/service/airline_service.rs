//! Airline use-case service.
//!
//! # Responsibility
//! - Provide find/create/update/delete entry points for airlines.
//! - Validate caller input at the boundary before persistence.
//!
//! # Invariants
//! - `update` is a shallow merge of provided fields onto the stored record.
//! - Returned airlines always carry their linked airports.

use crate::model::airline::{Airline, AirlineDraft, AirlineId, AirlinePatch};
use crate::repo::airline_repo::AirlineRepository;
use crate::service::{BusinessError, ServiceResult};
use log::info;

/// Use-case service wrapper for airline CRUD operations.
pub struct AirlineService<R: AirlineRepository> {
    repo: R,
}

impl<R: AirlineRepository> AirlineService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn find_all(&self) -> ServiceResult<Vec<Airline>> {
        Ok(self.repo.list_airlines(true)?)
    }

    pub fn find_one(&self, id: AirlineId) -> ServiceResult<Airline> {
        self.repo
            .get_airline(id, true)?
            .ok_or(BusinessError::AirlineNotFound(id))
    }

    /// Validates `draft` and persists it as a new airline.
    pub fn create(&self, draft: &AirlineDraft) -> ServiceResult<Airline> {
        let airline = draft.validate()?;
        let id = self.repo.create_airline(&airline)?;
        info!("event=airline_create module=service status=ok airline_id={id}");

        self.repo
            .get_airline(id, true)?
            .ok_or(BusinessError::InconsistentState(
                "created airline not found in read-back",
            ))
    }

    pub fn update(&self, id: AirlineId, patch: &AirlinePatch) -> ServiceResult<Airline> {
        let mut airline = self.find_one(id)?;
        patch.apply_to(&mut airline)?;
        self.repo.update_airline(&airline)?;
        info!("event=airline_update module=service status=ok airline_id={id}");

        self.repo
            .get_airline(id, true)?
            .ok_or(BusinessError::InconsistentState(
                "updated airline not found in read-back",
            ))
    }

    pub fn delete(&self, id: AirlineId) -> ServiceResult<()> {
        self.repo.delete_airline(id)?;
        info!("event=airline_delete module=service status=ok airline_id={id}");
        Ok(())
    }
}
