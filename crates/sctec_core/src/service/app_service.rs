//! Venture application service.
//!
//! # Responsibility
//! - Expose one command handler per user action of the venture UI.
//! - Map every outcome to a short categorized message for the shell.
//!
//! # Invariants
//! - The visible list is always recomputed from the store after a mutation.
//! - Messages never carry raw technical detail; that goes to the log.
//! - A rejected submit keeps the form view and its typed values.

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::filter::VentureFilter;
use crate::form::controller::{FormController, FormError, SubmitOutcome};
use crate::form::delete::{DeleteConfirmation, DeleteError};
use crate::model::venture::{ParseLabelError, VentureId, VentureRecord};
use crate::repo::venture_store::VentureStore;
use crate::seed::seed_if_absent;
use crate::storage::KeyValueStore;
use crate::theme::{load_theme, save_theme, Theme};
use crate::view::{render_list, ListView, VentureStats};
use log::{error, info, warn};

const MSG_CREATED: &str = "Empreendimento cadastrado com sucesso! 🎉";
const MSG_UPDATED: &str = "Empreendimento atualizado com sucesso! ✔";
const MSG_REMOVED: &str = "Empreendimento removido.";
const MSG_REQUIRED: &str = "Preencha todos os campos obrigatórios.";
const MSG_INVALID_SEGMENT: &str = "Selecione um segmento válido.";
const MSG_NOT_FOUND: &str = "Empreendimento não encontrado.";
const MSG_NOTHING_PENDING: &str = "Nenhuma exclusão pendente.";
const MSG_STORAGE: &str = "Não foi possível salvar os dados.";

/// Message category shown by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
    Info,
}

impl FeedbackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// User-facing outcome of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
    /// Venture the command acted on, when there is one.
    pub subject: Option<VentureId>,
}

impl Feedback {
    fn new(kind: FeedbackKind, message: &str, subject: Option<VentureId>) -> Self {
        Self {
            kind,
            message: message.to_string(),
            subject,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == FeedbackKind::Success
    }
}

/// Screen currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    List,
    Form,
}

/// Command surface over store, filters, form and delete flow.
#[derive(Debug)]
pub struct VentureApp<S: KeyValueStore, C: Clock> {
    store: VentureStore<S, C>,
    filter: VentureFilter,
    form: FormController,
    deletion: DeleteConfirmation,
    view: View,
    theme: Theme,
    theme_key: String,
}

impl<S: KeyValueStore, C: Clock> VentureApp<S, C> {
    /// Restores theme and collection. Demo data is written only when
    /// configured and the collection entry was never stored.
    pub fn bootstrap(backing: S, clock: C, config: &AppConfig) -> Self {
        let theme = load_theme(&backing, &config.theme_key);
        let mut store = VentureStore::open(backing, clock, config.collection_key.clone());
        if config.seed_demo_data {
            if let Err(err) = seed_if_absent(&mut store) {
                warn!("event=demo_seed module=service status=error error={err}");
            }
        }
        info!(
            "event=app_bootstrap module=service status=ok count={} theme={}",
            store.len(),
            theme.token()
        );

        Self {
            store,
            filter: VentureFilter::default(),
            form: FormController::new(),
            deletion: DeleteConfirmation::Idle,
            view: View::List,
            theme,
            theme_key: config.theme_key.clone(),
        }
    }

    pub fn store(&self) -> &VentureStore<S, C> {
        &self.store
    }

    pub fn records(&self) -> &[VentureRecord] {
        self.store.records()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn filter(&self) -> &VentureFilter {
        &self.filter
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    pub fn deletion(&self) -> &DeleteConfirmation {
        &self.deletion
    }

    /// Records passing the current filter, in store order.
    pub fn visible(&self) -> Vec<&VentureRecord> {
        self.filter.apply(self.store.records())
    }

    pub fn list_view(&self) -> ListView {
        render_list(self.visible())
    }

    /// Counters over the whole collection, independent of filters.
    pub fn stats(&self) -> VentureStats {
        VentureStats::from_records(self.store.records())
    }

    pub fn set_filter(&mut self, filter: VentureFilter) {
        self.filter = filter;
    }

    /// Applies raw select values; an unknown label keeps the previous filter.
    pub fn set_raw_filter(
        &mut self,
        query: &str,
        category: &str,
        status: &str,
    ) -> Result<(), ParseLabelError> {
        self.filter = VentureFilter::from_raw(query, category, status)?;
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    /// Shows a blank create form.
    pub fn open_create(&mut self) {
        self.form.open_create();
        self.view = View::Form;
    }

    /// Shows the form pre-filled with one venture.
    ///
    /// Returns `None` on success, informational feedback when the venture
    /// is gone.
    pub fn open_edit(&mut self, id: &VentureId) -> Option<Feedback> {
        match self.form.open_edit(&self.store, id) {
            Ok(()) => {
                self.view = View::Form;
                None
            }
            Err(err) => Some(form_failure(err)),
        }
    }

    /// Submits the form; success returns to the list.
    pub fn submit(&mut self) -> Feedback {
        match self.form.submit(&mut self.store) {
            Ok(outcome) => {
                self.view = View::List;
                match outcome {
                    SubmitOutcome::Created(record) => {
                        Feedback::new(FeedbackKind::Success, MSG_CREATED, Some(record.id))
                    }
                    SubmitOutcome::Updated(record) => {
                        Feedback::new(FeedbackKind::Success, MSG_UPDATED, Some(record.id))
                    }
                }
            }
            Err(err) => form_failure(err),
        }
    }

    /// Leaves the form without saving.
    pub fn cancel_form(&mut self) {
        self.form.cancel();
        self.view = View::List;
    }

    /// Opens the delete confirmation for one venture.
    pub fn request_delete(&mut self, id: &VentureId) -> Option<Feedback> {
        match self.deletion.request(&self.store, id) {
            Ok(()) => None,
            Err(err) => Some(delete_failure(err)),
        }
    }

    pub fn cancel_delete(&mut self) {
        self.deletion.cancel();
    }

    /// Deletes the pending venture.
    pub fn confirm_delete(&mut self) -> Feedback {
        match self.deletion.confirm(&mut self.store) {
            Ok(removed) => Feedback::new(FeedbackKind::Info, MSG_REMOVED, Some(removed.id)),
            Err(err) => delete_failure(err),
        }
    }

    /// Escape semantics: drop a pending delete and leave the form.
    pub fn dismiss(&mut self) {
        self.deletion.cancel();
        if self.view == View::Form {
            self.cancel_form();
        }
    }

    /// Switches light/dark and persists the choice.
    ///
    /// On a failed write the theme is left unchanged.
    pub fn toggle_theme(&mut self) -> Result<Theme, Feedback> {
        let next = self.theme.toggled();
        if let Err(err) = save_theme(self.store.backing_mut(), &self.theme_key, next) {
            error!("event=theme_save module=service status=error error={err}");
            return Err(Feedback::new(FeedbackKind::Error, MSG_STORAGE, None));
        }
        self.theme = next;
        Ok(next)
    }
}

fn form_failure(err: FormError) -> Feedback {
    match err {
        FormError::Validation(_) => Feedback::new(FeedbackKind::Error, MSG_REQUIRED, None),
        FormError::InvalidLabel(_) => {
            Feedback::new(FeedbackKind::Error, MSG_INVALID_SEGMENT, None)
        }
        FormError::NotFound(id) => Feedback::new(FeedbackKind::Info, MSG_NOT_FOUND, Some(id)),
        FormError::Store(err) => {
            error!("event=form_submit module=service status=error error={err}");
            Feedback::new(FeedbackKind::Error, MSG_STORAGE, None)
        }
    }
}

fn delete_failure(err: DeleteError) -> Feedback {
    match err {
        DeleteError::NothingPending => {
            Feedback::new(FeedbackKind::Info, MSG_NOTHING_PENDING, None)
        }
        DeleteError::NotFound(id) => Feedback::new(FeedbackKind::Info, MSG_NOT_FOUND, Some(id)),
        DeleteError::Store(err) => {
            error!("event=venture_delete module=service status=error error={err}");
            Feedback::new(FeedbackKind::Error, MSG_STORAGE, None)
        }
    }
}
