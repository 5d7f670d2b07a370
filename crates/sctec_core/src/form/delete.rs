//! Two-step delete confirmation.
//!
//! # Invariants
//! - Only `confirm` mutates the store, and only for the pending target.
//! - Every `confirm`/`cancel` leaves the machine `Idle`.

use crate::clock::Clock;
use crate::model::venture::{VentureId, VentureRecord};
use crate::repo::venture_store::{StoreError, VentureStore};
use crate::storage::KeyValueStore;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Delete flow state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    /// Waiting for the user to confirm removal of `id`.
    Confirming { id: VentureId, name: String },
}

#[derive(Debug)]
pub enum DeleteError {
    /// `confirm` called without a pending request.
    NothingPending,
    NotFound(VentureId),
    Store(StoreError),
}

impl Display for DeleteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingPending => write!(f, "no delete request pending"),
            Self::NotFound(id) => write!(f, "venture not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DeleteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for DeleteError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl DeleteConfirmation {
    /// Pending target, if any.
    pub fn pending(&self) -> Option<&VentureId> {
        match self {
            Self::Idle => None,
            Self::Confirming { id, .. } => Some(id),
        }
    }

    /// Name shown in the confirmation prompt.
    pub fn pending_name(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Confirming { name, .. } => Some(name),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Asks for confirmation before deleting `id`.
    ///
    /// A request for an unknown venture leaves the machine `Idle`.
    pub fn request<S: KeyValueStore, C: Clock>(
        &mut self,
        store: &VentureStore<S, C>,
        id: &VentureId,
    ) -> Result<(), DeleteError> {
        let Some(record) = store.get(id) else {
            *self = Self::Idle;
            return Err(DeleteError::NotFound(id.clone()));
        };
        *self = Self::Confirming {
            id: record.id.clone(),
            name: record.name.clone(),
        };
        Ok(())
    }

    /// Abandons the pending request; returns the target that was pending.
    pub fn cancel(&mut self) -> Option<VentureId> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Confirming { id, .. } => Some(id),
        }
    }

    /// Deletes the pending target and returns the removed record.
    ///
    /// A target removed in the meantime yields `NotFound` with no mutation.
    pub fn confirm<S: KeyValueStore, C: Clock>(
        &mut self,
        store: &mut VentureStore<S, C>,
    ) -> Result<VentureRecord, DeleteError> {
        let id = self.cancel().ok_or(DeleteError::NothingPending)?;
        Ok(store.delete(&id)?)
    }
}
