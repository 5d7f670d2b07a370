//! Visible-set derivation for the venture list.
//!
//! # Responsibility
//! - Combine text query, category and status predicates.
//!
//! # Invariants
//! - Filtering never reorders; output keeps collection (newest-first) order.
//! - Unset predicates pass everything through.
//! - Text matching is case-insensitive substring over name, owner,
//!   municipality and contact.

use crate::model::venture::{Category, ParseLabelError, VentureRecord, VentureStatus};

/// Filter criteria selected in the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VentureFilter {
    /// Free-text query; surrounding whitespace is ignored.
    pub query: String,
    pub category: Option<Category>,
    pub status: Option<VentureStatus>,
}

impl VentureFilter {
    pub fn new(
        query: impl Into<String>,
        category: Option<Category>,
        status: Option<VentureStatus>,
    ) -> Self {
        Self {
            query: query.into(),
            category,
            status,
        }
    }

    /// Builds a filter from raw select values, where `""` means "any".
    ///
    /// # Errors
    /// - Returns `ParseLabelError` for labels outside the closed enumerations.
    pub fn from_raw(query: &str, category: &str, status: &str) -> Result<Self, ParseLabelError> {
        Ok(Self {
            query: query.to_string(),
            category: parse_optional(category)?,
            status: parse_optional(status)?,
        })
    }

    /// Whether no predicate is active.
    pub fn is_unrestricted(&self) -> bool {
        self.query.trim().is_empty() && self.category.is_none() && self.status.is_none()
    }

    /// Resets every predicate.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns whether one record passes every predicate.
    pub fn matches(&self, record: &VentureRecord) -> bool {
        self.matches_with(record, self.needle().as_deref())
    }

    /// Returns matching records in input order.
    pub fn apply<'a>(&self, records: &'a [VentureRecord]) -> Vec<&'a VentureRecord> {
        let needle = self.needle();
        records
            .iter()
            .filter(|record| self.matches_with(record, needle.as_deref()))
            .collect()
    }

    fn needle(&self) -> Option<String> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }

    fn matches_with(&self, record: &VentureRecord, needle: Option<&str>) -> bool {
        let text_ok = needle.map_or(true, |needle| {
            [
                &record.name,
                &record.owner,
                &record.municipality,
                &record.contact,
            ]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
        });
        let category_ok = self
            .category
            .map_or(true, |category| record.category == category);
        let status_ok = self.status.map_or(true, |status| record.status == status);

        text_ok && category_ok && status_ok
    }
}

fn parse_optional<T>(raw: &str) -> Result<Option<T>, ParseLabelError>
where
    T: std::str::FromStr<Err = ParseLabelError>,
{
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some)
}
