//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, filter, form and delete flow into UI commands.
//! - Keep FFI/CLI layers decoupled from storage details.

pub mod app_service;
