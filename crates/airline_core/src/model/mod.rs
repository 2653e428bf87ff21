//! Registry domain model.
//!
//! # Responsibility
//! - Define canonical airline/airport records used by core business logic.
//! - Own boundary validation for caller-provided input.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID assigned at creation.
//! - Association collections are read projections of the join table;
//!   neither entity owns the other.

pub mod airline;
pub mod airport;
