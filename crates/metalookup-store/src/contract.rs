//! Behavior every `MetadataStore` backend must share, run against each one.

use crate::error::StoreError;
use crate::repository::MetadataStore;
use metalookup_common::{Metadata, MetadataId, MetadataValue};

fn sample(group: &str, name: &str) -> Metadata {
    Metadata::builder()
        .group(group)
        .name(name)
        .value("key1", "value1")
        .value("key2", ["One", "Two", "Three"])
        .build()
        .unwrap()
}

fn names(items: &[Metadata]) -> Vec<&str> {
    items.iter().map(|m| m.name.as_str()).collect()
}

pub fn save_assigns_id_and_finds(store: &dyn MetadataStore) {
    let saved = store.save(sample("mygroup", "myconfig")).unwrap();
    let id = saved.id.expect("save populates id");

    let by_id = store.find_by_id(&id).unwrap().unwrap();
    assert_eq!(by_id, saved);
    assert_eq!(
        by_id.get("key2").and_then(MetadataValue::as_list).map(<[String]>::len),
        Some(3)
    );

    let by_name = store
        .find_by_group_and_name("mygroup", "myconfig")
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, Some(id));
    let keys: Vec<&str> = by_name.value.keys().map(String::as_str).collect();
    assert_eq!(keys, ["key1", "key2"]);
}

pub fn group_listing_follows_save_order(store: &dyn MetadataStore) {
    store.save(sample("mygroup", "zzz")).unwrap();
    store.save(sample("other", "aaa")).unwrap();
    store.save(sample("mygroup", "aaa")).unwrap();
    store.save(sample("mygroup", "mmm")).unwrap();
    store.save(sample("mygroupextra", "nope")).unwrap();

    let listed = store.find_all_by_group("mygroup").unwrap();
    assert_eq!(names(&listed), ["zzz", "aaa", "mmm"]);
    assert!(listed.iter().all(|m| m.group == "mygroup"));

    assert_eq!(names(&store.find_all_by_group("other").unwrap()), ["aaa"]);
    assert!(store.find_all_by_group("missing").unwrap().is_empty());
}

pub fn unknown_keys_are_absent(store: &dyn MetadataStore) {
    store.save(sample("mygroup", "myconfig")).unwrap();

    assert!(store.find_by_id(&MetadataId::new()).unwrap().is_none());
    assert!(
        store
            .find_by_group_and_name("mygroup", "other")
            .unwrap()
            .is_none()
    );
    assert!(
        store
            .find_by_group_and_name("othergroup", "myconfig")
            .unwrap()
            .is_none()
    );
}

pub fn upsert_keeps_position(store: &dyn MetadataStore) {
    let first = store.save(sample("g", "first")).unwrap();
    store.save(sample("g", "second")).unwrap();

    let mut updated = first.clone();
    updated
        .value
        .insert("key1".to_string(), MetadataValue::from("changed"));
    let saved = store.save(updated).unwrap();
    assert_eq!(saved.id, first.id);

    let listed = store.find_all_by_group("g").unwrap();
    assert_eq!(names(&listed), ["first", "second"]);
    assert_eq!(
        listed[0].get("key1").and_then(MetadataValue::as_scalar),
        Some("changed")
    );
}

pub fn upsert_moves_between_groups(store: &dyn MetadataStore) {
    let saved = store.save(sample("old", "cfg")).unwrap();

    let mut moved = saved.clone();
    moved.group = "new".to_string();
    moved.name = "renamed".to_string();
    store.save(moved).unwrap();

    assert!(store.find_all_by_group("old").unwrap().is_empty());
    assert!(store.find_by_group_and_name("old", "cfg").unwrap().is_none());
    let found = store
        .find_by_group_and_name("new", "renamed")
        .unwrap()
        .unwrap();
    assert_eq!(found.id, saved.id);
    assert_eq!(names(&store.find_all_by_group("new").unwrap()), ["renamed"]);
}

pub fn delete_all_empties_every_index(store: &dyn MetadataStore) {
    let saved = store.save(sample("g", "a")).unwrap();
    store.save(sample("g", "b")).unwrap();

    store.delete_all().unwrap();

    assert!(store.find_by_id(&saved.id.unwrap()).unwrap().is_none());
    assert!(store.find_by_group_and_name("g", "a").unwrap().is_none());
    assert!(store.find_all_by_group("g").unwrap().is_empty());

    // still usable afterwards
    store.save(sample("g", "c")).unwrap();
    assert_eq!(names(&store.find_all_by_group("g").unwrap()), ["c"]);
}

pub fn rejects_invalid_metadata(store: &dyn MetadataStore) {
    let invalid = Metadata {
        id: None,
        group: String::new(),
        name: "n".to_string(),
        value: Default::default(),
    };
    assert!(matches!(store.save(invalid), Err(StoreError::Invalid(_))));
    assert!(store.find_all_by_group("").unwrap().is_empty());
}

pub fn save_with_unknown_id_inserts(store: &dyn MetadataStore) {
    let id = MetadataId::new();
    let mut metadata = sample("g", "preassigned");
    metadata.id = Some(id);

    let saved = store.save(metadata).unwrap();
    assert_eq!(saved.id, Some(id));
    assert_eq!(store.find_by_id(&id).unwrap().unwrap().name, "preassigned");
}

pub fn keys_with_nul_stay_separate(store: &dyn MetadataStore) {
    store.save(sample("g", "a")).unwrap();
    store.save(sample("g\0x", "b")).unwrap();
    store.save(sample("p\0q", "r")).unwrap();

    assert_eq!(names(&store.find_all_by_group("g").unwrap()), ["a"]);
    assert_eq!(names(&store.find_all_by_group("g\0x").unwrap()), ["b"]);
    assert!(store.find_by_group_and_name("p", "q\0r").unwrap().is_none());
    let found = store.find_by_group_and_name("p\0q", "r").unwrap().unwrap();
    assert_eq!(found.group, "p\0q");
}

pub fn duplicate_pair_latest_save_wins(store: &dyn MetadataStore) {
    let older = store.save(sample("g", "n")).unwrap();
    let newer = store.save(sample("g", "n")).unwrap();
    assert_ne!(older.id, newer.id);

    let found = store.find_by_group_and_name("g", "n").unwrap().unwrap();
    assert_eq!(found.id, newer.id);
    assert_eq!(store.find_all_by_group("g").unwrap().len(), 2);

    // re-saving the older one makes it the latest
    store.save(older.clone()).unwrap();
    let found = store.find_by_group_and_name("g", "n").unwrap().unwrap();
    assert_eq!(found.id, older.id);
}

pub fn duplicate_pair_survives_rename(store: &dyn MetadataStore) {
    let first = store.save(sample("g", "n")).unwrap();
    let second = store.save(sample("g", "n")).unwrap();

    let mut renamed = second.clone();
    renamed.name = "m".to_string();
    store.save(renamed).unwrap();

    let found = store.find_by_group_and_name("g", "n").unwrap().unwrap();
    assert_eq!(found.id, first.id);
    let found = store.find_by_group_and_name("g", "m").unwrap().unwrap();
    assert_eq!(found.id, second.id);

    let mut moved = first.clone();
    moved.group = "other".to_string();
    store.save(moved).unwrap();
    assert!(store.find_by_group_and_name("g", "n").unwrap().is_none());
    let found = store.find_by_group_and_name("other", "n").unwrap().unwrap();
    assert_eq!(found.id, first.id);
}
