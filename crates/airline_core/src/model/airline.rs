//! Airline domain model.
//!
//! # Responsibility
//! - Define the canonical airline record and its input shapes.
//! - Parse and validate caller-provided text before domain logic runs.
//!
//! # Invariants
//! - `name` and `description` are non-blank.
//! - `web_page` is an absolute `http`/`https` URL with a host.
//! - `airports` is a read projection of the join table and is ignored by
//!   airline writes.

use crate::model::airport::{Airport, AirportId};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;
use uuid::Uuid;

/// Stable airline identifier.
pub type AirlineId = Uuid;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failures for airline input and records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirlineValidationError {
    /// Required text field is blank after trim.
    EmptyField(&'static str),
    /// Foundation date is not an ISO 8601 date or timestamp.
    InvalidFoundationDate(String),
    /// Web page is not an absolute http(s) URL.
    InvalidWebPage(String),
}

impl Display for AirlineValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "The airline {field} must not be empty"),
            Self::InvalidFoundationDate(value) => write!(
                f,
                "The airline foundation date must be an ISO 8601 date, got `{value}`"
            ),
            Self::InvalidWebPage(value) => {
                write!(f, "The airline web page must be a valid URL, got `{value}`")
            }
        }
    }
}

impl Error for AirlineValidationError {}

/// Canonical airline record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airline {
    pub id: AirlineId,
    pub name: String,
    pub description: String,
    pub foundation_date: NaiveDate,
    pub web_page: String,
    /// Linked airports sorted by `name ASC, id ASC`. Empty unless loaded.
    #[serde(default)]
    pub airports: Vec<Airport>,
}

impl Airline {
    /// Creates a new airline with a generated stable ID and no airports.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        foundation_date: NaiveDate,
        web_page: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            foundation_date,
            web_page: web_page.into(),
            airports: Vec::new(),
        }
    }

    /// Validates field-level invariants.
    pub fn validate(&self) -> Result<(), AirlineValidationError> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)?;
        validate_web_page(&self.web_page)
    }

    /// Returns whether `airport_id` is in the loaded association collection.
    pub fn has_airport(&self, airport_id: AirportId) -> bool {
        self.airports.iter().any(|airport| airport.id == airport_id)
    }
}

/// Raw airline input as received from a caller.
///
/// Dates and URLs stay textual until [`AirlineDraft::validate`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirlineDraft {
    pub name: String,
    pub description: String,
    pub foundation_date: String,
    pub web_page: String,
}

impl AirlineDraft {
    /// Validates the draft and builds a new airline with a fresh id.
    pub fn validate(&self) -> Result<Airline, AirlineValidationError> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)?;
        require_text("foundation date", &self.foundation_date)?;
        require_text("web page", &self.web_page)?;
        let foundation_date = parse_foundation_date(&self.foundation_date)?;

        let airline = Airline::new(
            self.name.trim(),
            self.description.trim(),
            foundation_date,
            self.web_page.trim(),
        );
        airline.validate()?;
        Ok(airline)
    }
}

/// Partial update for an airline. `None` keeps the persisted value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirlinePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub foundation_date: Option<String>,
    pub web_page: Option<String>,
}

impl AirlinePatch {
    /// Shallow-merges provided fields onto `airline` and re-validates it.
    ///
    /// `airline` is left untouched when the patch itself fails to parse.
    pub fn apply_to(&self, airline: &mut Airline) -> Result<(), AirlineValidationError> {
        let foundation_date = self
            .foundation_date
            .as_deref()
            .map(parse_foundation_date)
            .transpose()?;

        let mut merged = airline.clone();
        if let Some(name) = &self.name {
            merged.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            merged.description = description.trim().to_string();
        }
        if let Some(date) = foundation_date {
            merged.foundation_date = date;
        }
        if let Some(web_page) = &self.web_page {
            merged.web_page = web_page.trim().to_string();
        }
        merged.validate()?;

        *airline = merged;
        Ok(())
    }
}

/// Parses an ISO date (`YYYY-MM-DD`) or an RFC 3339 timestamp.
///
/// Timestamps are truncated to the calendar date in their own offset.
pub fn parse_foundation_date(value: &str) -> Result<NaiveDate, AirlineValidationError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| AirlineValidationError::InvalidFoundationDate(trimmed.to_string()))
}

/// Checks that `value` is an absolute `http`/`https` URL with a host.
pub fn validate_web_page(value: &str) -> Result<(), AirlineValidationError> {
    let invalid = || AirlineValidationError::InvalidWebPage(value.to_string());
    let url = Url::parse(value.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(())
}

fn require_text(field: &'static str, value: &str) -> Result<(), AirlineValidationError> {
    if value.trim().is_empty() {
        return Err(AirlineValidationError::EmptyField(field));
    }
    Ok(())
}
