//! Sample ventures written on first start.

use crate::clock::Clock;
use crate::model::venture::{Category, VentureDraft, VentureId, VentureRecord, VentureStatus};
use crate::repo::venture_store::{StoreResult, VentureStore};
use crate::storage::KeyValueStore;
use log::info;

const DEMO_VENTURES: [(&str, &str, &str, Category, &str, VentureStatus); 5] = [
    (
        "Tech Floripa",
        "Mariana Siqueira",
        "Florianópolis",
        Category::Technology,
        "contato@techfloripa.com.br",
        VentureStatus::Active,
    ),
    (
        "Agrodigital - Itajaí",
        "Roberto Meira",
        "Blumenau",
        Category::Agribusiness,
        "(47) 99812-4400",
        VentureStatus::Active,
    ),
    (
        "Têxtil Modas",
        "Cintia Hoffmann",
        "Brusque",
        Category::Industry,
        "cintia@brusquemodas.com.br",
        VentureStatus::Inactive,
    ),
    (
        "SG Serviços",
        "André Becker",
        "Joinville",
        Category::Services,
        "(47) 3344-5500",
        VentureStatus::Active,
    ),
    (
        "Mercado São Joaquim",
        "Patrícia Luz",
        "São Joaquim",
        Category::Commerce,
        "mercadosj@email.com",
        VentureStatus::Active,
    ),
];

/// Builds the demo collection stamped with the clock's current time.
pub fn demo_records(clock: &impl Clock) -> Vec<VentureRecord> {
    let now = clock.now();
    DEMO_VENTURES
        .iter()
        .map(|(name, owner, municipality, category, contact, status)| {
            VentureRecord::from_draft(
                VentureId::generate(),
                VentureDraft {
                    name: (*name).to_string(),
                    owner: (*owner).to_string(),
                    municipality: (*municipality).to_string(),
                    category: *category,
                    contact: (*contact).to_string(),
                    status: *status,
                },
                now,
            )
        })
        .collect()
}

/// Writes the demo collection on first start.
///
/// Seeds only when the collection entry has never been written. An entry
/// that exists but is empty (everything deleted) or unreadable is left
/// alone. Returns how many records were inserted.
pub fn seed_if_absent<S: KeyValueStore, C: Clock>(
    store: &mut VentureStore<S, C>,
) -> StoreResult<usize> {
    if store.backing().get(store.key())?.is_some() {
        return Ok(0);
    }
    let records = demo_records(store.clock());
    let count = records.len();
    store.save(records)?;
    info!("event=demo_seed module=seed status=ok count={count}");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::{demo_records, seed_if_absent};
    use crate::clock::SystemClock;
    use crate::model::venture::Category;
    use crate::repo::venture_store::VentureStore;
    use crate::storage::MemoryKeyValueStore;
    use std::collections::HashSet;

    #[test]
    fn demo_records_cover_every_category_with_unique_ids() {
        let records = demo_records(&SystemClock);
        let categories: HashSet<Category> = records.iter().map(|r| r.category).collect();
        assert_eq!(categories.len(), Category::ALL.len());
        let ids: HashSet<_> = records.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn seed_runs_once_and_never_refills_a_cleared_collection() {
        let mut store = VentureStore::open(MemoryKeyValueStore::new(), SystemClock, "k");
        assert_eq!(seed_if_absent(&mut store).unwrap(), 5);
        assert_eq!(seed_if_absent(&mut store).unwrap(), 0);

        let ids: Vec<_> = store.records().iter().map(|r| r.id.clone()).collect();
        for id in &ids {
            store.delete(id).unwrap();
        }
        assert_eq!(seed_if_absent(&mut store).unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn seed_leaves_unreadable_entry_in_place() {
        let backing = MemoryKeyValueStore::with_entry("k", "{broken");
        let mut store = VentureStore::open(backing, SystemClock, "k");
        assert_eq!(seed_if_absent(&mut store).unwrap(), 0);
        assert_eq!(store.backing().raw("k"), Some("{broken"));
    }
}
