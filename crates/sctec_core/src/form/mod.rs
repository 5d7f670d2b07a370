//! User-intent state machines over the record store.
//!
//! # Responsibility
//! - Drive create/edit submits and the confirmed delete flow.
//! - Keep the store as the only place where the collection is mutated.

pub mod controller;
pub mod delete;
