//! Flutter-facing bindings for the SCTEC venture core.

pub mod api;
