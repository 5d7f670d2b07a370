use chrono::{Duration, TimeZone, Utc};
use sctec_core::{
    Category, KeyValueStore, ManualClock, MemoryKeyValueStore, SqliteKeyValueStore, StoreError,
    VentureDraft, VentureField, VentureId, VentureStatus, VentureStore, VentureValidationError,
};

const KEY: &str = "sctec_empreendimentos";

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap())
}

fn draft(name: &str) -> VentureDraft {
    VentureDraft {
        name: name.to_string(),
        owner: "Jo".to_string(),
        municipality: "Joinville".to_string(),
        category: Category::Services,
        contact: "jo@mail.com".to_string(),
        status: VentureStatus::Active,
    }
}

fn memory_store() -> VentureStore<MemoryKeyValueStore, ManualClock> {
    VentureStore::open(MemoryKeyValueStore::new(), clock(), KEY)
}

#[test]
fn create_prepends_trimmed_record_and_persists() {
    let mut store = memory_store();
    store.create(draft("first")).unwrap();

    let mut input = draft("  Acme  ");
    input.contact = " a@a.com ".to_string();
    let created = store.create(input).unwrap();

    assert_eq!(created.name, "Acme");
    assert_eq!(created.contact, "a@a.com");
    assert_eq!(created.created_at, created.updated_at);

    let mut reloaded = VentureStore::open(store.into_backing(), clock(), KEY);
    let records = reloaded.load();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], created);
    assert_eq!(records[1].name, "first");
}

#[test]
fn create_rejects_blank_fields_without_mutation() {
    let mut store = memory_store();
    store.create(draft("kept")).unwrap();

    let mut input = draft("new");
    input.contact = "   ".to_string();
    let err = store.create(input).unwrap_err();

    assert!(matches!(
        err,
        StoreError::Validation(VentureValidationError::BlankField(VentureField::Contact))
    ));
    assert_eq!(store.len(), 1);
}

#[test]
fn update_preserves_identity_and_advances_updated_at() {
    let clock = clock();
    let mut store = VentureStore::open(MemoryKeyValueStore::new(), clock.clone(), KEY);
    let original = store.create(draft("before")).unwrap();
    store.create(draft("other")).unwrap();

    clock.advance(Duration::minutes(5));
    let mut replacement = draft("after");
    replacement.category = Category::Industry;
    replacement.status = VentureStatus::Inactive;
    let updated = store.update(&original.id, replacement).unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);
    assert_eq!(updated.name, "after");
    assert_eq!(updated.category, Category::Industry);
    assert_eq!(updated.status, VentureStatus::Inactive);
    // Updating keeps the record's position.
    assert_eq!(store.records()[1].id, original.id);
}

#[test]
fn update_advances_updated_at_even_when_clock_is_stalled() {
    let mut store = memory_store();
    let created = store.create(draft("same instant")).unwrap();

    let updated = store.update(&created.id, draft("still same")).unwrap();
    assert!(updated.updated_at > created.updated_at);
}

#[test]
fn update_unknown_id_is_not_found() {
    let mut store = memory_store();
    store.create(draft("only")).unwrap();
    let before = store.records().to_vec();

    let missing = VentureId::parse("missing").unwrap();
    let err = store.update(&missing, draft("x")).unwrap_err();

    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
    assert_eq!(store.records(), before.as_slice());
}

#[test]
fn delete_removes_exactly_one_and_keeps_order() {
    let mut store = memory_store();
    let c = store.create(draft("c")).unwrap();
    let b = store.create(draft("b")).unwrap();
    let a = store.create(draft("a")).unwrap();

    let removed = store.delete(&b.id).unwrap();
    assert_eq!(removed.id, b.id);

    let ids: Vec<_> = store.records().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec![a.id, c.id]);

    let err = store.delete(&b.id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn save_then_load_reproduces_collection() {
    let mut store = memory_store();
    store.create(draft("one")).unwrap();
    store.create(draft("two")).unwrap();
    let snapshot = store.records().to_vec();

    let mut target = VentureStore::open(MemoryKeyValueStore::new(), clock(), KEY);
    target.save(snapshot.clone()).unwrap();

    let mut reopened = VentureStore::open(target.into_backing(), clock(), KEY);
    assert_eq!(reopened.load(), snapshot.as_slice());
}

#[test]
fn save_trims_text_fields_like_create() {
    let mut store = memory_store();
    let mut record = store.create(draft("seed")).unwrap();
    record.name = "  Padded  ".to_string();
    record.owner = "Jo ".to_string();
    record.municipality = " Joinville".to_string();
    record.contact = "\tjo@mail.com\n".to_string();

    store.save(vec![record.clone()]).unwrap();

    let saved = &store.records()[0];
    assert_eq!(saved.name, "Padded");
    assert_eq!(saved.owner, "Jo");
    assert_eq!(saved.municipality, "Joinville");
    assert_eq!(saved.contact, "jo@mail.com");
    assert_eq!(saved.id, record.id);

    let reopened = VentureStore::open(store.into_backing(), clock(), KEY);
    assert_eq!(reopened.records()[0].name, "Padded");
}

#[test]
fn save_rejects_duplicate_ids() {
    let mut store = memory_store();
    let record = store.create(draft("dup")).unwrap();

    let err = store.save(vec![record.clone(), record]).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(_)));
    assert_eq!(store.len(), 1);
}

#[test]
fn corrupted_collection_loads_as_empty() {
    for raw in ["not json", "{\"a\":1}", "[{\"id\":\"x\"}]", ""] {
        let backing = MemoryKeyValueStore::with_entry(KEY, raw);
        let store = VentureStore::open(backing, clock(), KEY);
        assert!(store.is_empty(), "payload {raw:?} should load as empty");
    }
}

#[test]
fn loads_collections_written_by_browser_app() {
    let raw = r#"[
        {"id":"lx2k9a3f8q1z","nome":"Tech Floripa","empreendedor":"Mariana Siqueira",
         "municipio":"Florianópolis","segmento":"Tecnologia",
         "contato":"contato@techfloripa.com.br","status":"Ativo",
         "createdAt":"2024-02-10T13:45:12.345Z","updatedAt":"2024-02-11T09:00:00.000Z"},
        {"id":"lx2k9a3f9abc","nome":"Têxtil Modas","empreendedor":"Cintia Hoffmann",
         "municipio":"Brusque","segmento":"Indústria",
         "contato":"cintia@brusquemodas.com.br","status":"Inativo",
         "createdAt":"2024-02-10T13:45:12.345Z","updatedAt":"2024-02-10T13:45:12.345Z"}
    ]"#;
    let store = VentureStore::open(MemoryKeyValueStore::with_entry(KEY, raw), clock(), KEY);

    assert_eq!(store.len(), 2);
    let first = &store.records()[0];
    assert_eq!(first.id.as_str(), "lx2k9a3f8q1z");
    assert_eq!(first.category, Category::Technology);
    assert_eq!(store.records()[1].status, VentureStatus::Inactive);
}

#[test]
fn persisted_json_uses_browser_field_names() {
    let mut store = memory_store();
    let created = store.create(draft("Acme")).unwrap();

    let raw = store.backing().raw(KEY).unwrap().to_string();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["id"], created.id.as_str());
    assert_eq!(json[0]["nome"], "Acme");
    assert_eq!(json[0]["segmento"], "Serviços");
    assert_eq!(json[0]["status"], "Ativo");
    assert!(json[0]["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn failed_write_rolls_back_every_mutation() {
    let mut backing = MemoryKeyValueStore::new();
    backing.set(KEY, "[]").unwrap();
    let mut store = VentureStore::open(backing, clock(), KEY);
    let existing = store.create(draft("existing")).unwrap();
    let persisted = store.backing().raw(KEY).unwrap().to_string();

    let mut backing = store.into_backing();
    backing.set_reject_writes(true);
    let mut store = VentureStore::open(backing, clock(), KEY);

    assert!(matches!(
        store.create(draft("lost")),
        Err(StoreError::Storage(_))
    ));
    assert!(matches!(
        store.update(&existing.id, draft("lost")),
        Err(StoreError::Storage(_))
    ));
    assert!(matches!(
        store.delete(&existing.id),
        Err(StoreError::Storage(_))
    ));

    assert_eq!(store.records(), std::slice::from_ref(&existing));
    assert_eq!(store.backing().raw(KEY), Some(persisted.as_str()));
}

#[test]
fn sqlite_backing_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ventures.sqlite3");

    let created = {
        let backing = SqliteKeyValueStore::open(&path).unwrap();
        let mut store = VentureStore::open(backing, clock(), KEY);
        store.create(draft("durable")).unwrap()
    };

    let backing = SqliteKeyValueStore::open(&path).unwrap();
    let store = VentureStore::open(backing, clock(), KEY);
    assert_eq!(store.records(), std::slice::from_ref(&created));
}
