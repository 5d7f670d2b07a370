//! Venture record store over a key-value backing.
//!
//! # Responsibility
//! - Own the in-memory venture collection and its persisted entry.
//! - Provide create/update/delete with validation and synchronous persistence.
//!
//! # Invariants
//! - Collection order is newest-first; `create` prepends.
//! - Write paths validate before any mutation.
//! - After every call, memory and backing hold the same collection; a failed
//!   write rolls the in-memory change back.
//! - Unreadable persisted data loads as an empty collection, never an error.

use crate::clock::{Clock, SystemClock};
use crate::model::venture::{VentureDraft, VentureId, VentureRecord, VentureValidationError};
use crate::storage::{KeyValueStore, StorageError};
use chrono::{DateTime, Duration, Utc};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for venture store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Draft or record failed field validation.
    Validation(VentureValidationError),
    /// Target venture does not exist.
    NotFound(VentureId),
    /// Collection handed to `save` repeats an identifier.
    DuplicateId(VentureId),
    /// Collection could not be serialized or parsed.
    Encoding(serde_json::Error),
    /// Backing store failed.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "venture not found: {id}"),
            Self::DuplicateId(id) => write!(f, "duplicate venture id: {id}"),
            Self::Encoding(err) => write!(f, "invalid venture collection data: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Encoding(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<VentureValidationError> for StoreError {
    fn from(value: VentureValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value)
    }
}

/// Owner of the venture collection.
#[derive(Debug)]
pub struct VentureStore<S: KeyValueStore, C: Clock = SystemClock> {
    backing: S,
    clock: C,
    key: String,
    records: Vec<VentureRecord>,
}

impl<S: KeyValueStore, C: Clock> VentureStore<S, C> {
    /// Creates a store bound to `key` and loads the persisted collection.
    pub fn open(backing: S, clock: C, key: impl Into<String>) -> Self {
        let mut store = Self {
            backing,
            clock,
            key: key.into(),
            records: Vec::new(),
        };
        store.load();
        store
    }

    /// Re-reads the persisted collection.
    ///
    /// Absent, unreadable or invalid data yields an empty collection.
    pub fn load(&mut self) -> &[VentureRecord] {
        self.records = match self.backing.get(&self.key) {
            Ok(Some(raw)) => match decode_collection(&raw) {
                Ok(records) => {
                    info!(
                        "event=collection_load module=store status=ok count={}",
                        records.len()
                    );
                    records
                }
                Err(err) => {
                    warn!(
                        "event=collection_load module=store status=degraded reason=corrupt error={err}"
                    );
                    Vec::new()
                }
            },
            Ok(None) => {
                info!("event=collection_load module=store status=ok count=0 reason=absent");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=collection_load module=store status=degraded reason=unavailable error={err}"
                );
                Vec::new()
            }
        };
        &self.records
    }

    /// Replaces the whole persisted collection and adopts it in memory.
    ///
    /// Text fields are trimmed the same way `create` and `update` trim them.
    ///
    /// # Errors
    /// - `Validation` / `DuplicateId` when any record breaks invariants; the
    ///   current collection is left untouched.
    /// - `Storage` when the backing rejects the write.
    pub fn save(&mut self, records: Vec<VentureRecord>) -> StoreResult<()> {
        let records: Vec<VentureRecord> =
            records.into_iter().map(VentureRecord::normalized).collect();
        validate_collection(&records)?;
        let raw = serde_json::to_string(&records)?;
        self.backing.set(&self.key, &raw)?;
        info!(
            "event=collection_save module=store status=ok count={}",
            records.len()
        );
        self.records = records;
        Ok(())
    }

    /// Creates a venture at the head of the collection.
    pub fn create(&mut self, draft: VentureDraft) -> StoreResult<VentureRecord> {
        let draft = draft.normalized();
        draft.validate()?;

        let record = VentureRecord::from_draft(self.fresh_id(), draft, self.clock.now());
        self.records.insert(0, record.clone());
        if let Err(err) = self.persist() {
            self.records.remove(0);
            error!("event=venture_create module=store status=error error={err}");
            return Err(err);
        }

        info!(
            "event=venture_create module=store status=ok id={} count={}",
            record.id,
            self.records.len()
        );
        Ok(record)
    }

    /// Replaces every editable field of an existing venture.
    ///
    /// `id` and `created_at` are preserved; `updated_at` strictly advances.
    pub fn update(&mut self, id: &VentureId, draft: VentureDraft) -> StoreResult<VentureRecord> {
        let draft = draft.normalized();
        draft.validate()?;

        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let previous = self.records[index].clone();
        let stamp = advance_stamp(previous.updated_at, self.clock.now());
        self.records[index].apply_draft(draft, stamp);

        if let Err(err) = self.persist() {
            self.records[index] = previous;
            error!("event=venture_update module=store status=error id={id} error={err}");
            return Err(err);
        }

        info!("event=venture_update module=store status=ok id={id}");
        Ok(self.records[index].clone())
    }

    /// Removes a venture and returns it for confirmation messaging.
    pub fn delete(&mut self, id: &VentureId) -> StoreResult<VentureRecord> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let removed = self.records.remove(index);

        if let Err(err) = self.persist() {
            self.records.insert(index, removed);
            error!("event=venture_delete module=store status=error id={id} error={err}");
            return Err(err);
        }

        info!(
            "event=venture_delete module=store status=ok id={id} count={}",
            self.records.len()
        );
        Ok(removed)
    }

    pub fn get(&self, id: &VentureId) -> Option<&VentureRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Read-only view in store order (newest first).
    pub fn records(&self) -> &[VentureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Key of the collection entry in the backing store.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn backing(&self) -> &S {
        &self.backing
    }

    /// Backing access for sibling entries (theme). Never used for the
    /// collection key.
    pub(crate) fn backing_mut(&mut self) -> &mut S {
        &mut self.backing
    }

    /// Releases the backing store, e.g. to reopen it in a new session.
    pub fn into_backing(self) -> S {
        self.backing
    }

    fn position(&self, id: &VentureId) -> Option<usize> {
        self.records.iter().position(|record| &record.id == id)
    }

    fn fresh_id(&self) -> VentureId {
        loop {
            let id = VentureId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&mut self) -> StoreResult<()> {
        let raw = serde_json::to_string(&self.records)?;
        self.backing.set(&self.key, &raw)?;
        Ok(())
    }
}

/// Parses a persisted collection and checks every record invariant.
pub fn decode_collection(raw: &str) -> StoreResult<Vec<VentureRecord>> {
    let records: Vec<VentureRecord> = serde_json::from_str(raw)?;
    validate_collection(&records)?;
    Ok(records)
}

fn validate_collection(records: &[VentureRecord]) -> StoreResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        record.validate()?;
        if !seen.insert(&record.id) {
            return Err(StoreError::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}

fn advance_stamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::{advance_stamp, decode_collection, StoreError};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn advance_stamp_moves_past_stalled_clock() {
        let previous = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            advance_stamp(previous, previous),
            previous + Duration::milliseconds(1)
        );
        let later = previous + Duration::seconds(5);
        assert_eq!(advance_stamp(previous, later), later);
    }

    #[test]
    fn decode_rejects_non_array_payloads() {
        assert!(matches!(
            decode_collection("{\"nome\":\"x\"}"),
            Err(StoreError::Encoding(_))
        ));
        assert!(decode_collection("[]").unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_blank_fields_and_duplicate_ids() {
        let blank = r#"[{"id":"a","nome":" ","empreendedor":"Jo","municipio":"X",
            "segmento":"Tecnologia","contato":"c","status":"Ativo",
            "createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-01T00:00:00.000Z"}]"#;
        assert!(matches!(
            decode_collection(blank),
            Err(StoreError::Validation(_))
        ));

        let record = r#"{"id":"a","nome":"N","empreendedor":"Jo","municipio":"X",
            "segmento":"Tecnologia","contato":"c","status":"Ativo",
            "createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-01T00:00:00.000Z"}"#;
        let duplicated = format!("[{record},{record}]");
        assert!(matches!(
            decode_collection(&duplicated),
            Err(StoreError::DuplicateId(_))
        ));
    }
}
