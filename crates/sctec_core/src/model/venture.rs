//! Venture domain model.
//!
//! # Responsibility
//! - Define the venture record persisted in the collection entry.
//! - Provide draft normalization and validation shared by every write path.
//!
//! # Invariants
//! - `id` is stable and never reused for another venture.
//! - `created_at` is set once; `updated_at` is never earlier than it.
//! - Wire names (`nome`, `empreendedor`, ...) and enum labels (`Comércio`,
//!   `Ativo`, ...) match collections written by the browser app.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, stable identifier of one venture.
///
/// Older collections carry short time-based ids, so the value is kept as an
/// opaque string rather than a parsed UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VentureId(String);

impl VentureId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wraps caller-provided text as an identifier.
    ///
    /// # Errors
    /// - Returns `VentureValidationError::EmptyId` for blank input.
    pub fn parse(value: impl Into<String>) -> Result<Self, VentureValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(VentureValidationError::EmptyId);
        }
        if trimmed.len() == value.len() {
            return Ok(Self(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VentureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VentureId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Business segment of a venture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Tecnologia")]
    Technology,
    #[serde(rename = "Comércio")]
    Commerce,
    #[serde(rename = "Indústria")]
    Industry,
    #[serde(rename = "Serviços")]
    Services,
    #[serde(rename = "Agronegócio")]
    Agribusiness,
}

impl Category {
    /// All categories in the order the category select lists them.
    pub const ALL: [Self; 5] = [
        Self::Technology,
        Self::Commerce,
        Self::Industry,
        Self::Services,
        Self::Agribusiness,
    ];

    /// Persisted/display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Technology => "Tecnologia",
            Self::Commerce => "Comércio",
            Self::Industry => "Indústria",
            Self::Services => "Serviços",
            Self::Agribusiness => "Agronegócio",
        }
    }

    /// Resolves an exact persisted label.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == value)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s.trim()).ok_or_else(|| ParseLabelError::new("category", s))
    }
}

/// Operating status of a venture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VentureStatus {
    #[default]
    #[serde(rename = "Ativo")]
    Active,
    #[serde(rename = "Inativo")]
    Inactive,
}

impl VentureStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Inactive => "Inativo",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Ativo" => Some(Self::Active),
            "Inativo" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

impl Display for VentureStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VentureStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s.trim()).ok_or_else(|| ParseLabelError::new("status", s))
    }
}

/// Unknown label for a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLabelError {
    /// Which enumeration rejected the value (`category` or `status`).
    pub kind: &'static str,
    pub value: String,
}

impl ParseLabelError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl Display for ParseLabelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} label `{}`", self.kind, self.value)
    }
}

impl Error for ParseLabelError {}

/// Mandatory venture field, named by its wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VentureField {
    Name,
    Owner,
    Municipality,
    Category,
    Contact,
    Status,
}

impl VentureField {
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Name => "nome",
            Self::Owner => "empreendedor",
            Self::Municipality => "municipio",
            Self::Category => "segmento",
            Self::Contact => "contato",
            Self::Status => "status",
        }
    }
}

/// Validation failures for venture records and drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VentureValidationError {
    /// A mandatory field is empty after trimming.
    BlankField(VentureField),
    /// Identifier is empty.
    EmptyId,
}

impl Display for VentureValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "field `{}` must not be blank", field.wire_name()),
            Self::EmptyId => write!(f, "venture id must not be empty"),
        }
    }
}

impl Error for VentureValidationError {}

/// Editable field set of a venture.
///
/// Create and update both take a full draft; there is no partial patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VentureDraft {
    pub name: String,
    pub owner: String,
    pub municipality: String,
    pub category: Category,
    pub contact: String,
    pub status: VentureStatus,
}

impl VentureDraft {
    /// Returns the draft with surrounding whitespace removed from text fields.
    pub fn normalized(self) -> Self {
        Self {
            name: trim_owned(self.name),
            owner: trim_owned(self.owner),
            municipality: trim_owned(self.municipality),
            contact: trim_owned(self.contact),
            ..self
        }
    }

    /// Checks that every mandatory text field is non-blank.
    ///
    /// # Errors
    /// - Returns the first blank field in form order.
    pub fn validate(&self) -> Result<(), VentureValidationError> {
        validate_text_fields(&self.name, &self.owner, &self.municipality, &self.contact)
    }
}

/// Canonical persisted venture record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VentureRecord {
    pub id: VentureId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "empreendedor")]
    pub owner: String,
    #[serde(rename = "municipio")]
    pub municipality: String,
    #[serde(rename = "segmento")]
    pub category: Category,
    #[serde(rename = "contato")]
    pub contact: String,
    pub status: VentureStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl VentureRecord {
    /// Builds a new record; both timestamps are set to `now`.
    pub fn from_draft(id: VentureId, draft: VentureDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            owner: draft.owner,
            municipality: draft.municipality,
            category: draft.category,
            contact: draft.contact,
            status: draft.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every editable field; `id` and `created_at` are untouched.
    pub fn apply_draft(&mut self, draft: VentureDraft, updated_at: DateTime<Utc>) {
        self.name = draft.name;
        self.owner = draft.owner;
        self.municipality = draft.municipality;
        self.category = draft.category;
        self.contact = draft.contact;
        self.status = draft.status;
        self.updated_at = updated_at;
    }

    /// Returns the record with surrounding whitespace removed from text
    /// fields and the identifier.
    pub fn normalized(self) -> Self {
        let id = match VentureId::parse(self.id.as_str()) {
            Ok(id) => id,
            Err(_) => self.id,
        };
        Self {
            id,
            name: trim_owned(self.name),
            owner: trim_owned(self.owner),
            municipality: trim_owned(self.municipality),
            contact: trim_owned(self.contact),
            ..self
        }
    }

    /// Extracts the editable field set.
    pub fn draft(&self) -> VentureDraft {
        VentureDraft {
            name: self.name.clone(),
            owner: self.owner.clone(),
            municipality: self.municipality.clone(),
            category: self.category,
            contact: self.contact.clone(),
            status: self.status,
        }
    }

    /// Checks persisted-state invariants.
    pub fn validate(&self) -> Result<(), VentureValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(VentureValidationError::EmptyId);
        }
        validate_text_fields(&self.name, &self.owner, &self.municipality, &self.contact)
    }
}

fn validate_text_fields(
    name: &str,
    owner: &str,
    municipality: &str,
    contact: &str,
) -> Result<(), VentureValidationError> {
    let fields = [
        (VentureField::Name, name),
        (VentureField::Owner, owner),
        (VentureField::Municipality, municipality),
        (VentureField::Contact, contact),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(VentureValidationError::BlankField(field));
        }
    }
    Ok(())
}

fn trim_owned(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}
