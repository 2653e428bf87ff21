//! Airline repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `airlines` storage.
//! - Own airline-airport link writes on the `airline_airports` join table.
//!
//! # Invariants
//! - Write paths must call `Airline::validate()` before SQL mutations.
//! - A given airport is linked to a given airline at most once; the join
//!   table primary key enforces it and repeated links are no-ops.
//! - `replace_airports` swaps the whole link set in a single transaction.
//! - Linked airports are listed `name ASC, id ASC`.

use crate::model::airline::{Airline, AirlineId};
use crate::model::airport::{Airport, AirportId};
use crate::repo::airport_repo::{load_airline_ids_for_airport, parse_airport_row, AIRPORT_COLUMNS};
use crate::repo::{ensure_connection_ready, parse_uuid, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

const AIRLINE_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    foundation_date,
    web_page
FROM airlines";

const FOUNDATION_DATE_FORMAT: &str = "%Y-%m-%d";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "airlines",
        &["id", "name", "description", "foundation_date", "web_page"],
    ),
    ("airports", &["id"]),
    ("airline_airports", &["airline_id", "airport_id"]),
];

/// Repository interface for airline CRUD and airport link operations.
pub trait AirlineRepository {
    /// Inserts one airline and returns its stable id. Airports are ignored.
    fn create_airline(&self, airline: &Airline) -> RepoResult<AirlineId>;
    /// Overwrites all scalar fields of an existing airline.
    fn update_airline(&self, airline: &Airline) -> RepoResult<()>;
    /// Loads one airline, optionally with its linked airports.
    fn get_airline(&self, id: AirlineId, include_airports: bool) -> RepoResult<Option<Airline>>;
    /// Lists all airlines sorted by `name ASC, id ASC`.
    fn list_airlines(&self, include_airports: bool) -> RepoResult<Vec<Airline>>;
    /// Hard-deletes one airline and, by cascade, its links.
    fn delete_airline(&self, id: AirlineId) -> RepoResult<()>;
    /// Links one airport to one airline. Linking twice keeps one link.
    fn link_airport(&self, airline_id: AirlineId, airport_id: AirportId) -> RepoResult<()>;
    /// Removes one link. Returns whether a link existed.
    fn unlink_airport(&self, airline_id: AirlineId, airport_id: AirportId) -> RepoResult<bool>;
    /// Replaces the full link set of one airline.
    ///
    /// Nothing is written when the airline or any listed airport is missing.
    fn replace_airports(
        &self,
        airline_id: AirlineId,
        airport_ids: &[AirportId],
    ) -> RepoResult<()>;
}

/// SQLite-backed airline repository.
pub struct SqliteAirlineRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAirlineRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }

    fn begin_immediate(&self) -> RepoResult<Transaction<'conn>> {
        Ok(Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?)
    }
}

impl AirlineRepository for SqliteAirlineRepository<'_> {
    fn create_airline(&self, airline: &Airline) -> RepoResult<AirlineId> {
        airline.validate()?;

        self.conn.execute(
            "INSERT INTO airlines (
                id,
                name,
                description,
                foundation_date,
                web_page
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                airline.id.to_string(),
                airline.name.as_str(),
                airline.description.as_str(),
                date_to_db(airline.foundation_date),
                airline.web_page.as_str(),
            ],
        )?;

        Ok(airline.id)
    }

    fn update_airline(&self, airline: &Airline) -> RepoResult<()> {
        airline.validate()?;

        let changed = self.conn.execute(
            "UPDATE airlines
             SET
                name = ?1,
                description = ?2,
                foundation_date = ?3,
                web_page = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                airline.name.as_str(),
                airline.description.as_str(),
                date_to_db(airline.foundation_date),
                airline.web_page.as_str(),
                airline.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::AirlineNotFound(airline.id));
        }

        Ok(())
    }

    fn get_airline(&self, id: AirlineId, include_airports: bool) -> RepoResult<Option<Airline>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AIRLINE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let mut airline = parse_airline_row(row)?;
            if include_airports {
                airline.airports = load_airports_for_airline(self.conn, airline.id)?;
            }
            return Ok(Some(airline));
        }

        Ok(None)
    }

    fn list_airlines(&self, include_airports: bool) -> RepoResult<Vec<Airline>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AIRLINE_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut airlines = Vec::new();
        while let Some(row) = rows.next()? {
            let mut airline = parse_airline_row(row)?;
            if include_airports {
                airline.airports = load_airports_for_airline(self.conn, airline.id)?;
            }
            airlines.push(airline);
        }

        Ok(airlines)
    }

    fn delete_airline(&self, id: AirlineId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM airlines WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::AirlineNotFound(id));
        }

        Ok(())
    }

    fn link_airport(&self, airline_id: AirlineId, airport_id: AirportId) -> RepoResult<()> {
        let tx = self.begin_immediate()?;
        ensure_airline_exists(&tx, airline_id)?;
        ensure_airport_exists(&tx, airport_id)?;

        tx.execute(
            "INSERT OR IGNORE INTO airline_airports (airline_id, airport_id)
             VALUES (?1, ?2);",
            params![airline_id.to_string(), airport_id.to_string()],
        )?;
        touch_airline(&tx, airline_id)?;

        tx.commit()?;
        Ok(())
    }

    fn unlink_airport(&self, airline_id: AirlineId, airport_id: AirportId) -> RepoResult<bool> {
        let tx = self.begin_immediate()?;
        ensure_airline_exists(&tx, airline_id)?;

        let removed = tx.execute(
            "DELETE FROM airline_airports
             WHERE airline_id = ?1
               AND airport_id = ?2;",
            params![airline_id.to_string(), airport_id.to_string()],
        )?;
        if removed > 0 {
            touch_airline(&tx, airline_id)?;
        }

        tx.commit()?;
        Ok(removed > 0)
    }

    fn replace_airports(
        &self,
        airline_id: AirlineId,
        airport_ids: &[AirportId],
    ) -> RepoResult<()> {
        let tx = self.begin_immediate()?;
        ensure_airline_exists(&tx, airline_id)?;

        tx.execute(
            "DELETE FROM airline_airports WHERE airline_id = ?1;",
            [airline_id.to_string()],
        )?;

        for airport_id in airport_ids {
            // Dropping `tx` on this early return rolls back the delete above.
            ensure_airport_exists(&tx, *airport_id)?;
            tx.execute(
                "INSERT OR IGNORE INTO airline_airports (airline_id, airport_id)
                 VALUES (?1, ?2);",
                params![airline_id.to_string(), airport_id.to_string()],
            )?;
        }
        touch_airline(&tx, airline_id)?;

        tx.commit()?;
        Ok(())
    }
}

fn parse_airline_row(row: &Row<'_>) -> RepoResult<Airline> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "airlines.id")?;

    let date_text: String = row.get("foundation_date")?;
    let foundation_date = NaiveDate::parse_from_str(&date_text, FOUNDATION_DATE_FORMAT)
        .map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid date `{date_text}` in airlines.foundation_date"
            ))
        })?;

    let airline = Airline {
        id,
        name: row.get("name")?,
        description: row.get("description")?,
        foundation_date,
        web_page: row.get("web_page")?,
        airports: Vec::new(),
    };
    airline.validate().map_err(|err| {
        RepoError::InvalidData(format!("stored airline `{id}` is invalid: {err}"))
    })?;
    Ok(airline)
}

fn load_airports_for_airline(
    conn: &Connection,
    airline_id: AirlineId,
) -> RepoResult<Vec<Airport>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {AIRPORT_COLUMNS}
         FROM airline_airports aa
         INNER JOIN airports ON airports.id = aa.airport_id
         WHERE aa.airline_id = ?1
         ORDER BY airports.name ASC, airports.id ASC;"
    ))?;
    let mut rows = stmt.query([airline_id.to_string()])?;
    let mut airports = Vec::new();
    while let Some(row) = rows.next()? {
        let mut airport = parse_airport_row(row)?;
        airport.airline_ids = load_airline_ids_for_airport(conn, airport.id)?;
        airports.push(airport);
    }
    Ok(airports)
}

fn ensure_airline_exists(tx: &Transaction<'_>, airline_id: AirlineId) -> RepoResult<()> {
    if !row_exists(tx, "SELECT EXISTS(SELECT 1 FROM airlines WHERE id = ?1);", airline_id)? {
        return Err(RepoError::AirlineNotFound(airline_id));
    }
    Ok(())
}

fn ensure_airport_exists(tx: &Transaction<'_>, airport_id: AirportId) -> RepoResult<()> {
    if !row_exists(tx, "SELECT EXISTS(SELECT 1 FROM airports WHERE id = ?1);", airport_id)? {
        return Err(RepoError::AirportNotFound(airport_id));
    }
    Ok(())
}

fn row_exists(conn: &Connection, sql: &str, id: Uuid) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(sql, [id.to_string()], |row| row.get(0))?;
    Ok(exists == 1)
}

fn touch_airline(tx: &Transaction<'_>, airline_id: AirlineId) -> RepoResult<()> {
    tx.execute(
        "UPDATE airlines
         SET updated_at = (strftime('%s', 'now') * 1000)
         WHERE id = ?1;",
        [airline_id.to_string()],
    )?;
    Ok(())
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(FOUNDATION_DATE_FORMAT).to_string()
}
