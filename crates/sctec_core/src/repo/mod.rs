//! Record store layer.
//!
//! # Responsibility
//! - Own the venture collection and its persistence contract.
//! - Keep key-value and serialization details away from form/service code.
//!
//! # Invariants
//! - Store writes must enforce record validation before persistence.
//! - Store APIs return semantic errors (`NotFound`) in addition to backing
//!   failures.

pub mod venture_store;
