//! Application configuration.
//!
//! # Responsibility
//! - Name the persisted entry keys and first-start behavior.
//! - Resolve the SQLite backing path from environment or defaults.
//!
//! # Invariants
//! - Default keys match the entries written by the browser app, so existing
//!   data is picked up unchanged.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_COLLECTION_KEY: &str = "sctec_empreendimentos";
pub const DEFAULT_THEME_KEY: &str = "sctec_theme";
pub const DEFAULT_DB_FILE_NAME: &str = "sctec.sqlite3";

pub const DB_PATH_ENV: &str = "SCTEC_DB_PATH";
pub const SEED_DEMO_ENV: &str = "SCTEC_SEED_DEMO";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Key of the serialized venture collection.
    pub collection_key: String,
    /// Key of the theme token.
    pub theme_key: String,
    /// Insert sample ventures when the collection starts empty.
    pub seed_demo_data: bool,
    /// SQLite file; `None` falls back to the temp directory.
    pub db_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            collection_key: DEFAULT_COLLECTION_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            seed_demo_data: true,
            db_path: None,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `SCTEC_DB_PATH` and `SCTEC_SEED_DEMO`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var(DB_PATH_ENV).ok().as_deref(),
            std::env::var(SEED_DEMO_ENV).ok().as_deref(),
        )
    }

    fn with_overrides(mut self, db_path: Option<&str>, seed_demo: Option<&str>) -> Self {
        if let Some(path) = db_path.map(str::trim).filter(|value| !value.is_empty()) {
            self.db_path = Some(PathBuf::from(path));
        }
        if let Some(flag) = seed_demo.and_then(parse_flag) {
            self.seed_demo_data = flag;
        }
        self
    }

    /// Effective backing path.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
