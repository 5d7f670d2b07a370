//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose venture list/create/update/delete and theme toggling to Dart.
//! - Keep error semantics to `ok + kind + message` envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each call opens the SQLite backing, runs one command and closes it, so
//!   the Dart side never holds core state.

use sctec_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, CardView, Feedback, FeedbackKind, FormFields, SqliteKeyValueStore, SystemClock,
    ParseLabelError, Theme, VentureApp, VentureId, VentureStatus,
};
use log::warn;
use std::sync::OnceLock;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

const MSG_INVALID_STATUS: &str = "Selecione um status válido.";

type SqliteApp = VentureApp<SqliteKeyValueStore, SystemClock>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One venture card for the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VentureItem {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub municipality: String,
    pub category: String,
    pub category_icon: String,
    pub contact: String,
    pub status: String,
    pub status_marker: String,
    pub status_class: String,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VentureListResponse {
    pub ok: bool,
    /// Visible ventures, newest first.
    pub items: Vec<VentureItem>,
    /// Human-readable message; empty-state text when nothing matches.
    pub message: String,
}

/// Collection counters for the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VentureStatsResponse {
    pub total: u32,
    pub active: u32,
    pub inactive: u32,
}

/// Generic command response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VentureActionResponse {
    pub ok: bool,
    /// `success`, `error` or `info`; drives the toast style.
    pub kind: String,
    pub venture_id: Option<String>,
    pub message: String,
}

impl VentureActionResponse {
    fn from_feedback(feedback: Feedback) -> Self {
        Self {
            ok: feedback.kind != FeedbackKind::Error,
            kind: feedback.kind.as_str().to_string(),
            venture_id: feedback.subject.map(|id| id.to_string()),
            message: feedback.message,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            kind: "error".to_string(),
            venture_id: None,
            message: message.into(),
        }
    }
}

/// Lists ventures matching the list-screen filters.
///
/// `category` and `status` take the select values; empty string means any.
#[flutter_rust_bridge::frb(sync)]
pub fn ventures_list(query: String, category: String, status: String) -> VentureListResponse {
    list_with(app_config(), &query, &category, &status)
}

/// Creates a venture from form input.
///
/// Empty `status` means `Ativo`; any other value must be `Ativo` or
/// `Inativo`.
#[flutter_rust_bridge::frb(sync)]
pub fn venture_create(
    name: String,
    owner: String,
    municipality: String,
    category: String,
    contact: String,
    status: String,
) -> VentureActionResponse {
    match form_fields(name, owner, municipality, category, contact, &status) {
        Ok(fields) => create_with(app_config(), fields),
        Err(err) => invalid_status(&err),
    }
}

/// Replaces every editable field of one venture.
#[flutter_rust_bridge::frb(sync)]
pub fn venture_update(
    id: String,
    name: String,
    owner: String,
    municipality: String,
    category: String,
    contact: String,
    status: String,
) -> VentureActionResponse {
    match form_fields(name, owner, municipality, category, contact, &status) {
        Ok(fields) => update_with(app_config(), &id, fields),
        Err(err) => invalid_status(&err),
    }
}

/// Deletes one venture. The Dart side owns the confirmation dialog and only
/// calls this after the user confirmed.
#[flutter_rust_bridge::frb(sync)]
pub fn venture_delete(id: String) -> VentureActionResponse {
    delete_with(app_config(), &id)
}

#[flutter_rust_bridge::frb(sync)]
pub fn venture_stats() -> VentureStatsResponse {
    stats_with(app_config())
}

/// Returns the saved theme token (`light` or `dark`).
#[flutter_rust_bridge::frb(sync)]
pub fn theme_get() -> String {
    match open_app(app_config()) {
        Ok(app) => app.theme().token().to_string(),
        Err(_) => Theme::default().token().to_string(),
    }
}

/// Flips and persists the theme; returns the new token.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_toggle() -> VentureActionResponse {
    theme_toggle_with(app_config())
}

fn app_config() -> &'static AppConfig {
    APP_CONFIG.get_or_init(AppConfig::from_env)
}

fn open_app(config: &AppConfig) -> Result<SqliteApp, String> {
    let backing = SqliteKeyValueStore::open(config.resolve_db_path()).map_err(|err| {
        warn!("event=ffi_open module=ffi status=error error={err}");
        format!("venture storage open failed: {err}")
    })?;
    Ok(VentureApp::bootstrap(backing, SystemClock, config))
}

fn list_with(config: &AppConfig, query: &str, category: &str, status: &str) -> VentureListResponse {
    let mut app = match open_app(config) {
        Ok(app) => app,
        Err(message) => {
            return VentureListResponse {
                ok: false,
                items: Vec::new(),
                message,
            }
        }
    };
    if let Err(err) = app.set_raw_filter(query, category, status) {
        return VentureListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("ventures_list failed: {err}"),
        };
    }

    let items: Vec<VentureItem> = app.list_view().cards().iter().map(to_item).collect();
    let message = if items.is_empty() {
        "Nenhum empreendimento encontrado.".to_string()
    } else {
        format!("{} empreendimento(s).", items.len())
    };
    VentureListResponse {
        ok: true,
        items,
        message,
    }
}

fn create_with(config: &AppConfig, fields: FormFields) -> VentureActionResponse {
    with_app(config, |app| {
        app.open_create();
        *app.form_mut().fields_mut() = fields;
        app.submit()
    })
}

fn update_with(config: &AppConfig, id: &str, fields: FormFields) -> VentureActionResponse {
    let Ok(id) = VentureId::parse(id) else {
        return VentureActionResponse::failure("venture_update failed: empty id");
    };
    with_app(config, |app| {
        if let Some(feedback) = app.open_edit(&id) {
            return feedback;
        }
        *app.form_mut().fields_mut() = fields;
        app.submit()
    })
}

fn delete_with(config: &AppConfig, id: &str) -> VentureActionResponse {
    let Ok(id) = VentureId::parse(id) else {
        return VentureActionResponse::failure("venture_delete failed: empty id");
    };
    with_app(config, |app| {
        if let Some(feedback) = app.request_delete(&id) {
            return feedback;
        }
        app.confirm_delete()
    })
}

fn stats_with(config: &AppConfig) -> VentureStatsResponse {
    let stats = open_app(config).map(|app| app.stats()).unwrap_or_default();
    VentureStatsResponse {
        total: saturating_u32(stats.total),
        active: saturating_u32(stats.active),
        inactive: saturating_u32(stats.inactive),
    }
}

fn theme_toggle_with(config: &AppConfig) -> VentureActionResponse {
    let mut app = match open_app(config) {
        Ok(app) => app,
        Err(message) => return VentureActionResponse::failure(message),
    };
    match app.toggle_theme() {
        Ok(theme) => VentureActionResponse {
            ok: true,
            kind: "success".to_string(),
            venture_id: None,
            message: theme.token().to_string(),
        },
        Err(feedback) => VentureActionResponse::from_feedback(feedback),
    }
}

fn with_app(
    config: &AppConfig,
    f: impl FnOnce(&mut SqliteApp) -> Feedback,
) -> VentureActionResponse {
    match open_app(config) {
        Ok(mut app) => VentureActionResponse::from_feedback(f(&mut app)),
        Err(message) => VentureActionResponse::failure(message),
    }
}

fn form_fields(
    name: String,
    owner: String,
    municipality: String,
    category: String,
    contact: String,
    status: &str,
) -> Result<FormFields, ParseLabelError> {
    let status = if status.trim().is_empty() {
        None
    } else {
        Some(status.parse::<VentureStatus>()?)
    };
    Ok(FormFields {
        name,
        owner,
        municipality,
        category,
        contact,
        status,
    })
}

fn invalid_status(err: &ParseLabelError) -> VentureActionResponse {
    warn!("event=form_submit module=ffi status=error error={err}");
    VentureActionResponse::failure(MSG_INVALID_STATUS)
}

fn to_item(card: &CardView) -> VentureItem {
    VentureItem {
        id: card.id.to_string(),
        name: card.title.clone(),
        owner: card.owner.clone(),
        municipality: card.municipality.clone(),
        category: card.category_label.to_string(),
        category_icon: card.category_icon.to_string(),
        contact: card.contact.clone(),
        status: card.status_label.to_string(),
        status_marker: card.status_marker.to_string(),
        status_class: card.status_class.to_string(),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, create_with, delete_with, form_fields, init_logging, list_with, ping,
        stats_with, theme_toggle_with, update_with, venture_create, venture_update,
    };
    use sctec_core::AppConfig;
    use tempfile::TempDir;

    fn isolated_config() -> (TempDir, AppConfig) {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = AppConfig {
            db_path: Some(dir.path().join("sctec.sqlite3")),
            seed_demo_data: false,
            ..AppConfig::default()
        };
        (dir, config)
    }

    fn acme(status: &str) -> sctec_core::FormFields {
        form_fields(
            "Acme".to_string(),
            "Jo".to_string(),
            "X".to_string(),
            "Comércio".to_string(),
            "a@a.com".to_string(),
            status,
        )
        .expect("known status label")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn create_then_list_returns_new_venture_first() {
        let (_dir, config) = isolated_config();
        let created = create_with(&config, acme(""));
        assert!(created.ok, "{}", created.message);
        assert_eq!(created.kind, "success");
        let id = created.venture_id.expect("create should return venture_id");

        let listed = list_with(&config, "acme", "", "");
        assert!(listed.ok);
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].id, id);
        assert_eq!(listed.items[0].category_icon, "🛍️");
        assert_eq!(listed.items[0].status, "Ativo");
    }

    #[test]
    fn create_with_blank_field_fails_without_writing() {
        let (_dir, config) = isolated_config();
        let mut fields = acme("Ativo");
        fields.contact = "  ".to_string();

        let response = create_with(&config, fields);
        assert!(!response.ok);
        assert_eq!(response.kind, "error");
        assert_eq!(stats_with(&config).total, 0);
    }

    #[test]
    fn update_and_delete_round_trip() {
        let (_dir, config) = isolated_config();
        let id = create_with(&config, acme("Ativo"))
            .venture_id
            .expect("created id");

        let updated = update_with(&config, &id, acme("Inativo"));
        assert!(updated.ok, "{}", updated.message);
        assert_eq!(stats_with(&config).inactive, 1);

        let deleted = delete_with(&config, &id);
        assert!(deleted.ok);
        assert_eq!(deleted.kind, "info");
        assert_eq!(stats_with(&config).total, 0);

        let missing = delete_with(&config, &id);
        assert_eq!(missing.kind, "info");
        assert_eq!(missing.venture_id.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn unknown_status_label_is_rejected_not_defaulted() {
        let err = form_fields(
            "Acme".to_string(),
            "Jo".to_string(),
            "X".to_string(),
            "Comércio".to_string(),
            "a@a.com".to_string(),
            "Pendente",
        )
        .unwrap_err();
        assert_eq!(err.value, "Pendente");
        assert_eq!(acme("  ").status, None);

        let created = venture_create(
            "Acme".to_string(),
            "Jo".to_string(),
            "X".to_string(),
            "Comércio".to_string(),
            "a@a.com".to_string(),
            "Pendente".to_string(),
        );
        assert!(!created.ok);
        assert_eq!(created.kind, "error");
        assert_eq!(created.message, "Selecione um status válido.");
        assert_eq!(created.venture_id, None);

        let updated = venture_update(
            "some-id".to_string(),
            "Acme".to_string(),
            "Jo".to_string(),
            "X".to_string(),
            "Comércio".to_string(),
            "a@a.com".to_string(),
            "ativo?".to_string(),
        );
        assert!(!updated.ok);
        assert_eq!(updated.message, "Selecione um status válido.");
    }

    #[test]
    fn deleted_seed_data_is_not_restored_on_next_call() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = AppConfig {
            db_path: Some(dir.path().join("sctec.sqlite3")),
            seed_demo_data: true,
            ..AppConfig::default()
        };

        let listed = list_with(&config, "", "", "");
        assert_eq!(listed.items.len(), 5);
        for item in &listed.items {
            assert!(delete_with(&config, &item.id).ok);
        }

        assert_eq!(stats_with(&config).total, 0);
        assert!(list_with(&config, "", "", "").items.is_empty());
    }

    #[test]
    fn list_rejects_unknown_category_filter() {
        let (_dir, config) = isolated_config();
        let response = list_with(&config, "", "Mineração", "");
        assert!(!response.ok);
        assert!(response.items.is_empty());
    }

    #[test]
    fn theme_toggle_alternates_tokens() {
        let (_dir, config) = isolated_config();
        assert_eq!(theme_toggle_with(&config).message, "light");
        assert_eq!(theme_toggle_with(&config).message, "dark");
    }
}
