//! List projection for venture cards.
//!
//! # Responsibility
//! - Map records to display-ready card models, or the empty state.
//! - Derive the active/inactive counters shown next to the list.
//!
//! # Invariants
//! - Rendering is stateless and keeps input order.
//! - Card text is raw; escaping belongs to the markup layer.

use crate::model::venture::{Category, VentureId, VentureRecord, VentureStatus};

/// Display model of one venture card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: VentureId,
    pub title: String,
    pub owner: String,
    pub category: Category,
    pub category_label: &'static str,
    pub category_icon: &'static str,
    pub municipality: String,
    pub status: VentureStatus,
    pub status_label: &'static str,
    pub status_marker: char,
    pub status_class: &'static str,
    pub contact: String,
    /// Zero-based position, used by the shell to stagger card animation.
    pub position: usize,
}

/// Rendered list: either the empty state or the cards to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty,
    Cards(Vec<CardView>),
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn cards(&self) -> &[CardView] {
        match self {
            Self::Empty => &[],
            Self::Cards(cards) => cards,
        }
    }
}

/// Renders records in the order given.
pub fn render_list<'a, I>(records: I) -> ListView
where
    I: IntoIterator<Item = &'a VentureRecord>,
{
    let cards: Vec<CardView> = records
        .into_iter()
        .enumerate()
        .map(|(position, record)| render_card(record, position))
        .collect();

    if cards.is_empty() {
        ListView::Empty
    } else {
        ListView::Cards(cards)
    }
}

pub fn render_card(record: &VentureRecord, position: usize) -> CardView {
    CardView {
        id: record.id.clone(),
        title: record.name.clone(),
        owner: record.owner.clone(),
        category: record.category,
        category_label: record.category.label(),
        category_icon: category_icon(record.category),
        municipality: record.municipality.clone(),
        status: record.status,
        status_label: record.status.label(),
        status_marker: status_marker(record.status),
        status_class: status_class(record.status),
        contact: record.contact.clone(),
        position,
    }
}

pub fn category_icon(category: Category) -> &'static str {
    match category {
        Category::Technology => "💻",
        Category::Commerce => "🛍️",
        Category::Industry => "🏭",
        Category::Services => "🤝",
        Category::Agribusiness => "🌾",
    }
}

pub fn status_marker(status: VentureStatus) -> char {
    match status {
        VentureStatus::Active => '●',
        VentureStatus::Inactive => '○',
    }
}

pub fn status_class(status: VentureStatus) -> &'static str {
    match status {
        VentureStatus::Active => "tag-status-ativo",
        VentureStatus::Inactive => "tag-status-inativo",
    }
}

/// Collection counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VentureStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl VentureStats {
    pub fn from_records(records: &[VentureRecord]) -> Self {
        let total = records.len();
        let active = records
            .iter()
            .filter(|record| record.status.is_active())
            .count();
        Self {
            total,
            active,
            inactive: total - active,
        }
    }
}
