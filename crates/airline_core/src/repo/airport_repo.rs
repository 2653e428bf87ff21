//! Airport repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `airports` storage.
//! - Materialize the airline back-reference from `airline_airports`.
//!
//! # Invariants
//! - Write paths must call `Airport::validate()` before SQL mutations.
//! - Deleting an airport removes its join rows through the FK cascade.
//! - Listing order is `name ASC, id ASC`.

use crate::model::airline::AirlineId;
use crate::model::airport::{Airport, AirportId};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

pub(crate) const AIRPORT_COLUMNS: &str = "airports.id AS id,
    airports.name AS name,
    airports.code AS code,
    airports.country AS country,
    airports.city AS city";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    ("airports", &["id", "name", "code", "country", "city"]),
    ("airline_airports", &["airline_id", "airport_id"]),
];

/// Repository interface for airport CRUD operations.
pub trait AirportRepository {
    /// Inserts one airport and returns its stable id.
    fn create_airport(&self, airport: &Airport) -> RepoResult<AirportId>;
    /// Overwrites all scalar fields of an existing airport.
    fn update_airport(&self, airport: &Airport) -> RepoResult<()>;
    /// Loads one airport with its linked airline ids.
    fn get_airport(&self, id: AirportId) -> RepoResult<Option<Airport>>;
    /// Lists all airports.
    fn list_airports(&self) -> RepoResult<Vec<Airport>>;
    /// Hard-deletes one airport.
    fn delete_airport(&self, id: AirportId) -> RepoResult<()>;
}

/// SQLite-backed airport repository.
pub struct SqliteAirportRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAirportRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }
}

impl AirportRepository for SqliteAirportRepository<'_> {
    fn create_airport(&self, airport: &Airport) -> RepoResult<AirportId> {
        airport.validate()?;

        self.conn.execute(
            "INSERT INTO airports (id, name, code, country, city)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                airport.id.to_string(),
                airport.name.as_str(),
                airport.code.as_str(),
                airport.country.as_str(),
                airport.city.as_str(),
            ],
        )?;

        Ok(airport.id)
    }

    fn update_airport(&self, airport: &Airport) -> RepoResult<()> {
        airport.validate()?;

        let changed = self.conn.execute(
            "UPDATE airports
             SET
                name = ?1,
                code = ?2,
                country = ?3,
                city = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                airport.name.as_str(),
                airport.code.as_str(),
                airport.country.as_str(),
                airport.city.as_str(),
                airport.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::AirportNotFound(airport.id));
        }

        Ok(())
    }

    fn get_airport(&self, id: AirportId) -> RepoResult<Option<Airport>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {AIRPORT_COLUMNS}
             FROM airports
             WHERE airports.id = ?1;"
        ))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let mut airport = parse_airport_row(row)?;
            airport.airline_ids = load_airline_ids_for_airport(self.conn, airport.id)?;
            return Ok(Some(airport));
        }

        Ok(None)
    }

    fn list_airports(&self) -> RepoResult<Vec<Airport>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {AIRPORT_COLUMNS}
             FROM airports
             ORDER BY airports.name ASC, airports.id ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut airports = Vec::new();
        while let Some(row) = rows.next()? {
            let mut airport = parse_airport_row(row)?;
            airport.airline_ids = load_airline_ids_for_airport(self.conn, airport.id)?;
            airports.push(airport);
        }

        Ok(airports)
    }

    fn delete_airport(&self, id: AirportId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM airports WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::AirportNotFound(id));
        }

        Ok(())
    }
}

/// Decodes one row selected with `AIRPORT_COLUMNS`.
///
/// `airline_ids` is left empty; callers load it when needed. A row that
/// fails validation is reported as `InvalidData`, never as caller input.
pub(crate) fn parse_airport_row(row: &Row<'_>) -> RepoResult<Airport> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "airports.id")?;

    let airport = Airport::with_id(
        id,
        row.get::<_, String>("name")?,
        row.get::<_, String>("code")?,
        row.get::<_, String>("country")?,
        row.get::<_, String>("city")?,
    );
    airport.validate().map_err(|err| {
        RepoError::InvalidData(format!("stored airport `{id}` is invalid: {err}"))
    })?;
    Ok(airport)
}

pub(crate) fn load_airline_ids_for_airport(
    conn: &Connection,
    airport_id: AirportId,
) -> RepoResult<Vec<AirlineId>> {
    let mut stmt = conn.prepare(
        "SELECT airline_id
         FROM airline_airports
         WHERE airport_id = ?1
         ORDER BY airline_id ASC;",
    )?;
    let mut rows = stmt.query([airport_id.to_string()])?;
    let mut ids = Vec::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        ids.push(parse_uuid(&value, "airline_airports.airline_id")?);
    }
    Ok(ids)
}
