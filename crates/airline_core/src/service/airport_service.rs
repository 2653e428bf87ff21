//! Airport use-case service.
//!
//! # Responsibility
//! - Provide find/create/update/delete entry points for airports.
//!
//! # Invariants
//! - Create and update fail with a precondition error unless the resulting
//!   code is exactly three characters.
//! - `update` is a shallow merge of provided fields onto the stored record.

use crate::model::airport::{Airport, AirportId, AirportPatch};
use crate::repo::airport_repo::AirportRepository;
use crate::service::{BusinessError, ServiceResult};
use log::info;

/// Use-case service wrapper for airport CRUD operations.
pub struct AirportService<R: AirportRepository> {
    repo: R,
}

impl<R: AirportRepository> AirportService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn find_all(&self) -> ServiceResult<Vec<Airport>> {
        Ok(self.repo.list_airports()?)
    }

    pub fn find_one(&self, id: AirportId) -> ServiceResult<Airport> {
        self.repo
            .get_airport(id)?
            .ok_or(BusinessError::AirportNotFound(id))
    }

    /// Persists a new airport after checking its code and text fields.
    pub fn create(&self, airport: &Airport) -> ServiceResult<Airport> {
        airport.validate()?;
        let id = self.repo.create_airport(airport)?;
        info!("event=airport_create module=service status=ok airport_id={id}");

        self.repo
            .get_airport(id)?
            .ok_or(BusinessError::InconsistentState(
                "created airport not found in read-back",
            ))
    }

    pub fn update(&self, id: AirportId, patch: &AirportPatch) -> ServiceResult<Airport> {
        let mut airport = self.find_one(id)?;
        patch.apply_to(&mut airport)?;
        self.repo.update_airport(&airport)?;
        info!("event=airport_update module=service status=ok airport_id={id}");

        self.repo
            .get_airport(id)?
            .ok_or(BusinessError::InconsistentState(
                "updated airport not found in read-back",
            ))
    }

    pub fn delete(&self, id: AirportId) -> ServiceResult<()> {
        self.repo.delete_airport(id)?;
        info!("event=airport_delete module=service status=ok airport_id={id}");
        Ok(())
    }
}
