use forge_core::{
    CardRepository, CardStore, Item, KvCardRepository, LoadWarning, MemoryKvStore, NotFound,
    ServiceError, StoreConfig,
};

type MemoryStore = CardStore<KvCardRepository<MemoryKvStore>>;

fn setup() -> (MemoryStore, MemoryKvStore) {
    let kv = MemoryKvStore::new();
    let config = StoreConfig::default();
    let repo = KvCardRepository::new(kv.clone(), config.storage_key.clone());
    (CardStore::new(repo, config), kv)
}

fn persisted(kv: &MemoryKvStore) -> serde_json::Value {
    serde_json::from_slice(&kv.raw("forgeCards").unwrap()).unwrap()
}

fn reopen(kv: &MemoryKvStore) -> MemoryStore {
    let config = StoreConfig::default();
    let repo = KvCardRepository::new(kv.clone(), config.storage_key.clone());
    let (store, warnings) = CardStore::open(repo, config).unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    store
}

fn fill(store: &mut MemoryStore, index: usize, items: Vec<Item>) {
    let title = store.snapshot()[index].title().to_string();
    store.replace_card(index, &title, items).unwrap();
}

#[test]
fn add_card_appends_empty_card_and_persists() {
    let (mut store, kv) = setup();

    for (expected_len, title) in ["soup", "bread", "soup"].iter().enumerate() {
        let card = store.add_card(title).unwrap();
        assert!(card.items().is_empty());
        assert!(!card.is_done());
        assert_eq!(store.len(), expected_len + 1);
    }

    let json = persisted(&kv);
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[0]["title"], "Soup");
    assert_eq!(json[2]["title"], "Soup");
    assert_eq!(json[0]["isDone"], false);
}

#[test]
fn load_on_absent_state_is_empty() {
    let (mut store, _kv) = setup();
    assert!(store.load().unwrap().is_empty());
    assert!(store.is_empty());
}

#[test]
fn duplicate_resets_completion_and_appends_at_end() {
    let (mut store, _kv) = setup();
    store.add_card("soup").unwrap();
    store.add_card("bread").unwrap();
    fill(
        &mut store,
        0,
        vec![
            Item::with_state("Salt", Some(2.0), true).unwrap(),
            Item::with_state("Water", None, true).unwrap(),
        ],
    );
    assert!(store.snapshot()[0].is_done());

    let copy = store.duplicate_card(0).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.snapshot()[2], copy);
    assert_eq!(copy.title(), "Soup (Copy)");
    assert!(!copy.is_done());

    let source = &store.snapshot()[0];
    assert!(source.is_done());
    for (copied, original) in copy.items().iter().zip(source.items()) {
        assert_eq!(copied.name(), original.name());
        assert_eq!(copied.quantity(), original.quantity());
        assert!(!copied.is_completed());
    }
}

#[test]
fn duplicate_and_delete_reject_out_of_range() {
    let (mut store, kv) = setup();
    store.add_card("soup").unwrap();
    let before = kv.raw("forgeCards");

    assert!(matches!(
        store.duplicate_card(1),
        Err(ServiceError::NotFound(NotFound::Card(1)))
    ));
    assert!(matches!(
        store.delete_card(5),
        Err(ServiceError::NotFound(NotFound::Card(5)))
    ));
    assert_eq!(store.len(), 1);
    assert_eq!(kv.raw("forgeCards"), before);
}

#[test]
fn delete_removes_in_place_preserving_order() {
    let (mut store, kv) = setup();
    for title in ["one", "two", "three"] {
        store.add_card(title).unwrap();
    }

    let removed = store.delete_card(1).unwrap();
    assert_eq!(removed.title(), "Two");

    let titles: Vec<&str> = store.snapshot().iter().map(|card| card.title()).collect();
    assert_eq!(titles, ["One", "Three"]);
    assert_eq!(persisted(&kv).as_array().unwrap().len(), 2);
}

#[test]
fn toggling_every_item_marks_card_done_and_back() {
    let (mut store, kv) = setup();
    store.add_card("soup").unwrap();
    fill(
        &mut store,
        0,
        vec![
            Item::new("Salt", Some(2.0)).unwrap(),
            Item::new("Water", None).unwrap(),
        ],
    );

    assert!(store.toggle_item(0, 0).unwrap());
    assert!(!store.snapshot()[0].is_done());
    assert!(store.toggle_item(0, 1).unwrap());
    assert!(store.snapshot()[0].is_done());
    assert_eq!(persisted(&kv)[0]["isDone"], true);

    assert!(!store.toggle_item(0, 1).unwrap());
    assert!(!store.snapshot()[0].is_done());
    assert_eq!(persisted(&kv)[0]["isDone"], false);
    assert_eq!(persisted(&kv)[0]["items"][1]["checked"], false);
}

#[test]
fn every_mutation_is_persisted_immediately() {
    let (mut store, kv) = setup();
    store.add_card("soup").unwrap();
    fill(&mut store, 0, vec![Item::new("Salt", Some(1.0)).unwrap()]);
    store.toggle_item(0, 0).unwrap();
    store.duplicate_card(0).unwrap();

    let reloaded = reopen(&kv);
    assert_eq!(reloaded.snapshot(), store.snapshot());
}

#[test]
fn failed_save_keeps_in_memory_mutation() {
    let (mut store, kv) = setup();
    store.add_card("soup").unwrap();
    let persisted_before = kv.raw("forgeCards");

    kv.set_fail_writes(true);
    let err = store.add_card("bread").unwrap_err();
    assert!(matches!(err, ServiceError::Persistence(_)));
    assert_eq!(store.len(), 2);
    assert_eq!(kv.raw("forgeCards"), persisted_before);

    kv.set_fail_writes(false);
    store.save().unwrap();
    assert_eq!(reopen(&kv).len(), 2);
}

#[test]
fn load_salvages_partially_corrupt_state() {
    let kv = MemoryKvStore::new();
    let blob = serde_json::json!([
        { "title": "Soup", "isDone": false, "items": [
            { "name": "Salt", "qty": "2", "checked": true }
        ]},
        { "title": 7 },
        { "title": "Bread", "isDone": true, "items": [] }
    ]);
    let mut writer = kv.clone();
    forge_core::KvStore::set(&mut writer, "forgeCards", blob.to_string().as_bytes()).unwrap();

    let config = StoreConfig::default();
    let repo = KvCardRepository::new(kv.clone(), config.storage_key.clone());
    let (store, warnings) = CardStore::open(repo, config).unwrap();

    assert_eq!(store.len(), 2);
    assert!(store.snapshot()[0].is_done());
    assert!(!store.snapshot()[1].is_done(), "empty cards are never done");
    assert_eq!(warnings.len(), 1);
    assert!(matches!(warnings[0], LoadWarning::CardDropped { position: 1, .. }));
}

#[test]
fn mistyped_item_fields_keep_the_card_and_save_back_clean() {
    let kv = MemoryKvStore::new();
    let blob = serde_json::json!([
        { "title": "Soup", "isDone": false, "items": [
            { "name": "Salt", "qty": "2 cups" },
            { "name": "Leek", "qty": "1", "checked": true },
            { "name": "Water", "qty": null },
            { "name": "Stock", "qty": 2, "checked": null }
        ]}
    ]);
    let mut writer = kv.clone();
    forge_core::KvStore::set(&mut writer, "forgeCards", blob.to_string().as_bytes()).unwrap();

    let config = StoreConfig::default();
    let repo = KvCardRepository::new(kv.clone(), config.storage_key.clone());
    let (mut store, warnings) = CardStore::open(repo, config).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.snapshot()[0].items().len(), 4);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        warnings[0],
        LoadWarning::QuantityIgnored { card_position: 0, item_position: 2, .. }
    ));

    store.save().unwrap();
    let stored: serde_json::Value =
        serde_json::from_slice(&kv.raw("forgeCards").unwrap()).unwrap();
    let items = &stored[0]["items"];
    assert_eq!(items[0]["qty"], "2");
    assert_eq!(items[1]["checked"], true);
    assert_eq!(items[2]["qty"], "");
    assert_eq!(items[3]["qty"], "2");
    assert_eq!(items[3]["checked"], false);
}

#[test]
fn unreadable_blob_fails_load_and_keeps_collection() {
    let (mut store, kv) = setup();
    store.add_card("soup").unwrap();

    let mut writer = kv.clone();
    forge_core::KvStore::set(&mut writer, "forgeCards", b"{broken").unwrap();

    assert!(matches!(store.load(), Err(ServiceError::Persistence(_))));
    assert_eq!(store.len(), 1);
}

#[test]
fn clear_empties_collection_and_storage() {
    let (mut store, kv) = setup();
    store.add_card("soup").unwrap();
    store.clear().unwrap();

    assert!(store.is_empty());
    assert_eq!(kv.raw("forgeCards"), None);
    assert!(store.repository().load_cards().unwrap().cards.is_empty());
}

#[test]
fn custom_config_changes_key_and_copy_suffix() {
    let kv = MemoryKvStore::new();
    let config = StoreConfig::default()
        .with_storage_key("pantry")
        .with_copy_suffix(" #2");
    let repo = KvCardRepository::new(kv.clone(), config.storage_key.clone());
    let mut store = CardStore::new(repo, config);

    store.add_card("soup").unwrap();
    let copy = store.duplicate_card(0).unwrap();

    assert_eq!(copy.title(), "Soup #2");
    assert!(kv.raw("pantry").is_some());
    assert_eq!(kv.raw("forgeCards"), None);
}
