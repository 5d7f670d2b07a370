//! Domain model for venture records.
//!
//! # Responsibility
//! - Define the canonical venture record and its editable field set.
//! - Keep category and status as closed enumerations at the data boundary.
//!
//! # Invariants
//! - Every record is identified by a stable, non-empty `VentureId`.
//! - Mandatory text fields are never blank once a record is persisted.

pub mod venture;
