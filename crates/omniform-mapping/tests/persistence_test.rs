use omniform_mapping::{
    FileStore, KeyValueStore, Mapping, MappingRepository, MemoryStore, PersistenceError,
    generate_mapping, mapping_key,
};
use tempfile::TempDir;

fn sample() -> Mapping {
    generate_mapping(&["#a", "#b"], &["Name", "Email"]).unwrap()
}

#[tokio::test]
async fn test_round_trip_memory_store() {
    let repo = MappingRepository::new(MemoryStore::new());

    repo.save_mapping("signup", &sample()).await.unwrap();
    let loaded = repo.load_mapping("signup").await.unwrap();

    assert_eq!(loaded, Some(sample()));
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let repo = MappingRepository::new(MemoryStore::new());

    assert_eq!(repo.load_mapping("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_invalid_mapping_is_not_written() {
    let store = MemoryStore::new();
    let repo = MappingRepository::new(store.clone());
    let invalid = Mapping::from_pairs([("#a", " ")]).unwrap();

    let result = repo.save_mapping("broken", &invalid).await;

    assert!(matches!(result, Err(PersistenceError::InvalidMapping)));
    assert_eq!(store.get(&mapping_key("broken")).await.unwrap(), None);
}

#[tokio::test]
async fn test_corrupt_records_load_as_not_found() {
    let store = MemoryStore::new();
    let repo = MappingRepository::new(store.clone());

    for (id, raw) in [
        ("garbage", "not json"),
        ("array", r##"["#a", "Name"]"##),
        ("nested", r##"{"#a": {"col": "Name"}}"##),
        ("number", r##"{"#a": 1}"##),
        ("duplicate", r##"{"#a": "Name", "#a": "Name"}"##),
        ("empty", "{}"),
        ("blank", r##"{"#a": ""}"##),
    ] {
        store.set(&mapping_key(id), raw).await.unwrap();
        assert_eq!(repo.load_mapping(id).await.unwrap(), None, "record {}", id);
    }
}

#[tokio::test]
async fn test_last_write_wins() {
    let repo = MappingRepository::new(MemoryStore::new());
    let replacement = generate_mapping(&["#c"], &["Phone"]).unwrap();

    repo.save_mapping("form", &sample()).await.unwrap();
    repo.save_mapping("form", &replacement).await.unwrap();

    assert_eq!(repo.load_mapping("form").await.unwrap(), Some(replacement));
}

#[tokio::test]
async fn test_round_trip_file_store() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("mappings");
    let repo = MappingRepository::new(FileStore::new(&base));

    repo.save_mapping("checkout/v2", &sample()).await.unwrap();

    let path = repo.store().path_for(&mapping_key("checkout/v2"));
    assert!(path.starts_with(&base));
    assert!(path.exists());

    // A fresh repository over the same directory sees the saved record.
    let reopened = MappingRepository::new(FileStore::new(&base));
    assert_eq!(reopened.load_mapping("checkout/v2").await.unwrap(), Some(sample()));
    assert_eq!(reopened.load_mapping("other").await.unwrap(), None);
}
