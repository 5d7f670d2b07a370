//! Core domain logic for the SCTEC venture registry.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod config;
pub mod filter;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod storage;
pub mod theme;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AppConfig;
pub use filter::VentureFilter;
pub use form::controller::{FormController, FormError, FormFields, FormMode, SubmitOutcome};
pub use form::delete::{DeleteConfirmation, DeleteError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::venture::{
    Category, ParseLabelError, VentureDraft, VentureField, VentureId, VentureRecord,
    VentureStatus, VentureValidationError,
};
pub use repo::venture_store::{StoreError, StoreResult, VentureStore};
pub use service::app_service::{Feedback, FeedbackKind, VentureApp, View};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use theme::Theme;
pub use view::{render_list, CardView, ListView, VentureStats};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
