//! Create/edit form state machine.
//!
//! # Responsibility
//! - Map a venture to editable fields and back.
//! - Route submit to `create` or `update` depending on the bound identifier.
//!
//! # Invariants
//! - `Create` mode has no bound identifier; `Edit` mode binds exactly one.
//! - A rejected submit leaves mode and fields untouched.
//! - A successful submit, cancel or reset returns to a blank `Create` form.

use crate::clock::Clock;
use crate::model::venture::{
    Category, ParseLabelError, VentureDraft, VentureField, VentureId, VentureRecord,
    VentureStatus, VentureValidationError,
};
use crate::repo::venture_store::{StoreError, VentureStore};
use crate::storage::KeyValueStore;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw field values as typed in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub owner: String,
    pub municipality: String,
    /// Category select value; `""` means nothing selected.
    pub category: String,
    pub contact: String,
    /// `None` when no status radio is checked.
    pub status: Option<VentureStatus>,
}

impl FormFields {
    /// Blank form with the status radio on `Active`.
    pub fn blank() -> Self {
        Self {
            status: Some(VentureStatus::Active),
            ..Self::default()
        }
    }

    pub fn from_record(record: &VentureRecord) -> Self {
        Self {
            name: record.name.clone(),
            owner: record.owner.clone(),
            municipality: record.municipality.clone(),
            category: record.category.label().to_string(),
            contact: record.contact.clone(),
            status: Some(record.status),
        }
    }

    /// Trims and validates the fields into a draft.
    ///
    /// Missing status falls back to `Active`.
    pub fn to_draft(&self) -> Result<VentureDraft, FormError> {
        let name = self.name.trim();
        let owner = self.owner.trim();
        let municipality = self.municipality.trim();
        let category = self.category.trim();
        let contact = self.contact.trim();

        let required = [
            (VentureField::Name, name),
            (VentureField::Owner, owner),
            (VentureField::Municipality, municipality),
            (VentureField::Category, category),
            (VentureField::Contact, contact),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(FormError::Validation(VentureValidationError::BlankField(
                *field,
            )));
        }

        Ok(VentureDraft {
            name: name.to_string(),
            owner: owner.to_string(),
            municipality: municipality.to_string(),
            category: category.parse::<Category>()?,
            contact: contact.to_string(),
            status: self.status.unwrap_or_default(),
        })
    }
}

/// Form mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(VentureId),
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(VentureRecord),
    Updated(VentureRecord),
}

impl SubmitOutcome {
    pub fn record(&self) -> &VentureRecord {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }
}

/// Form-level errors.
#[derive(Debug)]
pub enum FormError {
    /// A mandatory field is blank.
    Validation(VentureValidationError),
    /// Category (or status) value is not a known label.
    InvalidLabel(ParseLabelError),
    /// Edited venture no longer exists.
    NotFound(VentureId),
    /// Store failure other than validation/not-found.
    Store(StoreError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidLabel(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "venture not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidLabel(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ParseLabelError> for FormError {
    fn from(value: ParseLabelError) -> Self {
        Self::InvalidLabel(value)
    }
}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::Validation(err),
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Venture form controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormController {
    mode: FormMode,
    fields: FormFields,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            fields: FormFields::blank(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Mutable field access for the shell's input bindings.
    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// Form heading for the current mode.
    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Novo Empreendimento",
            FormMode::Edit(_) => "Editar Empreendimento",
        }
    }

    /// Submit button caption for the current mode.
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Salvar Empreendimento",
            FormMode::Edit(_) => "Atualizar Empreendimento",
        }
    }

    /// Starts a blank create form.
    pub fn open_create(&mut self) {
        self.reset();
    }

    /// Loads an existing venture into the form.
    ///
    /// # Errors
    /// - `NotFound` when `id` is not in the store; state is unchanged.
    pub fn open_edit<S: KeyValueStore, C: Clock>(
        &mut self,
        store: &VentureStore<S, C>,
        id: &VentureId,
    ) -> Result<(), FormError> {
        let record = store
            .get(id)
            .ok_or_else(|| FormError::NotFound(id.clone()))?;
        self.fields = FormFields::from_record(record);
        self.mode = FormMode::Edit(record.id.clone());
        Ok(())
    }

    /// Validates and persists the form through the store.
    pub fn submit<S: KeyValueStore, C: Clock>(
        &mut self,
        store: &mut VentureStore<S, C>,
    ) -> Result<SubmitOutcome, FormError> {
        let draft = self.fields.to_draft()?;
        let outcome = match &self.mode {
            FormMode::Edit(id) => SubmitOutcome::Updated(store.update(id, draft)?),
            FormMode::Create => SubmitOutcome::Created(store.create(draft)?),
        };
        self.reset();
        Ok(outcome)
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        self.mode = FormMode::Create;
        self.fields = FormFields::blank();
    }
}

#[cfg(test)]
mod tests {
    use super::{FormError, FormFields};
    use crate::model::venture::{Category, VentureField, VentureStatus, VentureValidationError};

    fn filled() -> FormFields {
        FormFields {
            name: "  Acme ".to_string(),
            owner: "Jo".to_string(),
            municipality: "X".to_string(),
            category: "Comércio".to_string(),
            contact: " a@a.com".to_string(),
            status: None,
        }
    }

    #[test]
    fn to_draft_trims_and_defaults_status() {
        let draft = filled().to_draft().unwrap();
        assert_eq!(draft.name, "Acme");
        assert_eq!(draft.contact, "a@a.com");
        assert_eq!(draft.category, Category::Commerce);
        assert_eq!(draft.status, VentureStatus::Active);
    }

    #[test]
    fn to_draft_reports_first_blank_field() {
        let mut fields = filled();
        fields.category = String::new();
        fields.contact = "   ".to_string();
        let err = fields.to_draft().unwrap_err();
        assert!(matches!(
            err,
            FormError::Validation(VentureValidationError::BlankField(VentureField::Category))
        ));
    }

    #[test]
    fn to_draft_rejects_unknown_category() {
        let mut fields = filled();
        fields.category = "Pesca".to_string();
        assert!(matches!(
            fields.to_draft(),
            Err(FormError::InvalidLabel(_))
        ));
    }
}
