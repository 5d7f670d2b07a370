//! Light/dark theme preference persisted beside the venture collection.
//!
//! # Invariants
//! - The stored token is exactly `light` or `dark`.
//! - Anything else (absent, unreadable, unknown) reads as `Dark`.

use crate::storage::{KeyValueStore, StorageResult};
use log::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn token(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Label of the theme toggle.
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Modo Claro",
            Self::Dark => "Modo Escuro",
        }
    }
}

/// Reads the saved theme; never fails.
pub fn load_theme<S: KeyValueStore + ?Sized>(backing: &S, key: &str) -> Theme {
    match backing.get(key) {
        Ok(Some(token)) if token == Theme::Light.token() => Theme::Light,
        Ok(_) => Theme::Dark,
        Err(err) => {
            warn!("event=theme_load module=theme status=degraded error={err}");
            Theme::Dark
        }
    }
}

pub fn save_theme<S: KeyValueStore + ?Sized>(
    backing: &mut S,
    key: &str,
    theme: Theme,
) -> StorageResult<()> {
    backing.set(key, theme.token())
}

#[cfg(test)]
mod tests {
    use super::{load_theme, save_theme, Theme};
    use crate::storage::MemoryKeyValueStore;

    #[test]
    fn unknown_or_missing_tokens_read_as_dark() {
        assert_eq!(load_theme(&MemoryKeyValueStore::new(), "t"), Theme::Dark);
        let store = MemoryKeyValueStore::with_entry("t", "sepia");
        assert_eq!(load_theme(&store, "t"), Theme::Dark);
    }

    #[test]
    fn saved_theme_reads_back() {
        let mut store = MemoryKeyValueStore::new();
        save_theme(&mut store, "t", Theme::Light).unwrap();
        assert_eq!(store.raw("t"), Some("light"));
        assert_eq!(load_theme(&store, "t"), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
