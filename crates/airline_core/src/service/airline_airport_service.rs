//! Airline-airport association use-case service.
//!
//! # Responsibility
//! - Add, find, list, replace and remove airports on one airline.
//! - Check existence of both sides and membership before touching links.
//!
//! # Invariants
//! - Airport existence is checked before airline existence, except for
//!   `update_airports_from_airline` which checks the airline first.
//! - `update_airports_from_airline` never writes unless every airport
//!   resolves; it replaces the set instead of merging.
//! - Adding an already linked airport leaves exactly one link.

use crate::model::airline::{Airline, AirlineId};
use crate::model::airport::{Airport, AirportId};
use crate::repo::airline_repo::AirlineRepository;
use crate::repo::airport_repo::AirportRepository;
use crate::service::{BusinessError, ServiceResult};
use log::info;
use std::collections::HashSet;

/// Association manager between airlines and airports.
pub struct AirlineAirportService<A: AirlineRepository, P: AirportRepository> {
    airlines: A,
    airports: P,
}

impl<A: AirlineRepository, P: AirportRepository> AirlineAirportService<A, P> {
    /// Creates a service over the given airline and airport repositories.
    pub fn new(airlines: A, airports: P) -> Self {
        Self { airlines, airports }
    }

    /// Links one airport to one airline and returns the updated airline.
    pub fn add_airport_to_airline(
        &self,
        airline_id: AirlineId,
        airport_id: AirportId,
    ) -> ServiceResult<Airline> {
        self.require_airport(airport_id)?;
        self.require_airline(airline_id)?;

        self.airlines.link_airport(airline_id, airport_id)?;
        info!(
            "event=airline_airport_add module=service status=ok airline_id={airline_id} airport_id={airport_id}"
        );

        self.reload_airline(airline_id, "airline missing after airport link")
    }

    /// Returns the linked airport, or `AirportNotAssociated` when the
    /// airport exists but is not linked.
    pub fn find_airport_from_airline(
        &self,
        airline_id: AirlineId,
        airport_id: AirportId,
    ) -> ServiceResult<Airport> {
        self.require_airport(airport_id)?;
        let airline = self.require_airline(airline_id)?;

        airline
            .airports
            .into_iter()
            .find(|airport| airport.id == airport_id)
            .ok_or(BusinessError::AirportNotAssociated {
                airline_id,
                airport_id,
            })
    }

    /// Lists every airport linked to one airline.
    pub fn find_airports_from_airline(
        &self,
        airline_id: AirlineId,
    ) -> ServiceResult<Vec<Airport>> {
        Ok(self.require_airline(airline_id)?.airports)
    }

    /// Replaces the airline's airport set with exactly `airport_ids`.
    ///
    /// Duplicate ids collapse into one link.
    pub fn update_airports_from_airline(
        &self,
        airline_id: AirlineId,
        airport_ids: &[AirportId],
    ) -> ServiceResult<Airline> {
        self.require_airline(airline_id)?;

        let mut seen = HashSet::with_capacity(airport_ids.len());
        let mut resolved = Vec::with_capacity(airport_ids.len());
        for airport_id in airport_ids {
            self.require_airport(*airport_id)?;
            if seen.insert(*airport_id) {
                resolved.push(*airport_id);
            }
        }

        self.airlines.replace_airports(airline_id, &resolved)?;
        info!(
            "event=airline_airport_replace module=service status=ok airline_id={} airport_count={}",
            airline_id,
            resolved.len()
        );

        self.reload_airline(airline_id, "airline missing after airport replacement")
    }

    /// Unlinks one airport from one airline.
    pub fn delete_airport_from_airline(
        &self,
        airline_id: AirlineId,
        airport_id: AirportId,
    ) -> ServiceResult<()> {
        self.require_airport(airport_id)?;
        let airline = self.require_airline(airline_id)?;
        let not_associated = BusinessError::AirportNotAssociated {
            airline_id,
            airport_id,
        };

        if !airline.has_airport(airport_id) {
            return Err(not_associated);
        }
        if !self.airlines.unlink_airport(airline_id, airport_id)? {
            return Err(not_associated);
        }

        info!(
            "event=airline_airport_remove module=service status=ok airline_id={airline_id} airport_id={airport_id}"
        );
        Ok(())
    }

    fn require_airport(&self, airport_id: AirportId) -> ServiceResult<Airport> {
        self.airports
            .get_airport(airport_id)?
            .ok_or(BusinessError::AirportNotFound(airport_id))
    }

    fn require_airline(&self, airline_id: AirlineId) -> ServiceResult<Airline> {
        self.airlines
            .get_airline(airline_id, true)?
            .ok_or(BusinessError::AirlineNotFound(airline_id))
    }

    fn reload_airline(
        &self,
        airline_id: AirlineId,
        details: &'static str,
    ) -> ServiceResult<Airline> {
        self.airlines
            .get_airline(airline_id, true)?
            .ok_or(BusinessError::InconsistentState(details))
    }
}
