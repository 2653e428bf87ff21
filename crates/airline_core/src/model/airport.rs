//! Airport domain model.
//!
//! # Responsibility
//! - Define the canonical airport record and its partial-update shape.
//! - Enforce the airport code precondition before persistence.
//!
//! # Invariants
//! - `code` is exactly `AIRPORT_CODE_LEN` characters.
//! - `name`, `country` and `city` are non-blank.
//! - `airline_ids` is derived from the join table and ignored on writes.

use crate::model::airline::AirlineId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable airport identifier.
pub type AirportId = Uuid;

/// Required airport code length, counted in characters.
pub const AIRPORT_CODE_LEN: usize = 3;

/// Validation failures for airport records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirportValidationError {
    /// Required text field is blank after trim.
    EmptyField(&'static str),
    /// Code does not contain exactly three characters.
    InvalidCode { len: usize },
}

impl Display for AirportValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "The airport {field} must not be empty"),
            Self::InvalidCode { .. } => {
                write!(f, "The airport code must contain three characters")
            }
        }
    }
}

impl Error for AirportValidationError {}

/// Canonical airport record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    pub id: AirportId,
    pub name: String,
    /// Exactly three characters, e.g. an IATA code.
    pub code: String,
    pub country: String,
    pub city: String,
    /// Airlines currently linked to this airport.
    #[serde(default)]
    pub airline_ids: Vec<AirlineId>,
}

impl Airport {
    /// Creates a new airport with a generated stable ID.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        country: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), name, code, country, city)
    }

    /// Creates an airport with a caller-provided stable ID.
    ///
    /// Text fields are trimmed.
    pub fn with_id(
        id: AirportId,
        name: impl Into<String>,
        code: impl Into<String>,
        country: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: trimmed(name.into()),
            code: trimmed(code.into()),
            country: trimmed(country.into()),
            city: trimmed(city.into()),
            airline_ids: Vec::new(),
        }
    }

    /// Validates field-level invariants.
    ///
    /// The code check runs first so a bad code is always reported as such.
    pub fn validate(&self) -> Result<(), AirportValidationError> {
        let len = self.code.chars().count();
        if len != AIRPORT_CODE_LEN {
            return Err(AirportValidationError::InvalidCode { len });
        }
        require_text("name", &self.name)?;
        require_text("country", &self.country)?;
        require_text("city", &self.city)?;
        Ok(())
    }
}

/// Partial update for an airport. `None` keeps the persisted value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
}

impl AirportPatch {
    /// Shallow-merges provided fields onto `airport` and re-validates it.
    ///
    /// `airport` is left untouched when the merged record is rejected.
    pub fn apply_to(&self, airport: &mut Airport) -> Result<(), AirportValidationError> {
        let mut merged = airport.clone();
        if let Some(name) = &self.name {
            merged.name = name.trim().to_string();
        }
        if let Some(code) = &self.code {
            merged.code = code.trim().to_string();
        }
        if let Some(country) = &self.country {
            merged.country = country.trim().to_string();
        }
        if let Some(city) = &self.city {
            merged.city = city.trim().to_string();
        }
        merged.validate()?;

        *airport = merged;
        Ok(())
    }
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

fn require_text(field: &'static str, value: &str) -> Result<(), AirportValidationError> {
    if value.trim().is_empty() {
        return Err(AirportValidationError::EmptyField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Airport, AirportPatch, AirportValidationError};

    #[test]
    fn code_length_counts_characters_not_bytes() {
        let airport = Airport::new("Zürich", "ZÜR", "Switzerland", "Zürich");
        assert!(airport.validate().is_ok());
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let mut airport = Airport::new("El Dorado", "BOG", "Colombia", "Bogotá");
        let patch = AirportPatch {
            city: Some("Bogota".to_string()),
            ..AirportPatch::default()
        };
        patch.apply_to(&mut airport).unwrap();
        assert_eq!(airport.code, "BOG");
        assert_eq!(airport.city, "Bogota");
    }

    #[test]
    fn patch_with_bad_code_is_rejected() {
        let mut airport = Airport::new("El Dorado", "BOG", "Colombia", "Bogotá");
        let patch = AirportPatch {
            code: Some("SKBO".to_string()),
            ..AirportPatch::default()
        };
        let err = patch.apply_to(&mut airport).unwrap_err();
        assert_eq!(err, AirportValidationError::InvalidCode { len: 4 });
    }

    #[test]
    fn rejected_patch_leaves_airport_unchanged() {
        let mut airport = Airport::new("El Dorado", "BOG", "Colombia", "Bogotá");
        let before = airport.clone();
        let patch = AirportPatch {
            name: Some("Nuevo Dorado".to_string()),
            city: Some("  ".to_string()),
            ..AirportPatch::default()
        };
        let err = patch.apply_to(&mut airport).unwrap_err();
        assert_eq!(err, AirportValidationError::EmptyField("city"));
        assert_eq!(airport, before);
    }

    #[test]
    fn text_fields_are_trimmed_on_create_and_patch() {
        let mut airport = Airport::new(" El Dorado ", " BOG ", "Colombia\n", " Bogotá");
        assert_eq!(airport.name, "El Dorado");
        assert_eq!(airport.code, "BOG");
        assert_eq!(airport.country, "Colombia");
        assert_eq!(airport.city, "Bogotá");
        assert!(airport.validate().is_ok());

        let patch = AirportPatch {
            code: Some(" CLO ".to_string()),
            ..AirportPatch::default()
        };
        patch.apply_to(&mut airport).unwrap();
        assert_eq!(airport.code, "CLO");
    }
}
