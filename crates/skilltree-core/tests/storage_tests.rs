use skilltree_core::{FileStore, KeyValueStore, StorageConfig, StorageError};
use tempfile::TempDir;

fn create_test_store() -> (FileStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path().join("data"));
    (store, temp_dir)
}

#[test]
fn test_missing_key_is_none() {
    let (store, _temp) = create_test_store();
    assert_eq!(store.get("skillTreeState").unwrap(), None);
}

#[test]
fn test_set_and_get() {
    let (store, _temp) = create_test_store();

    store.set("skillTreeState", "{\"a\":1}").unwrap();
    assert_eq!(
        store.get("skillTreeState").unwrap(),
        Some("{\"a\":1}".to_string())
    );
    assert!(store.base_path().join("skillTreeState.json").exists());
}

#[test]
fn test_set_overwrites() {
    let (store, _temp) = create_test_store();

    store.set("state", "first").unwrap();
    store.set("state", "second").unwrap();

    assert_eq!(store.get("state").unwrap(), Some("second".to_string()));
    assert!(!store.base_path().join("state.tmp").exists());
}

#[test]
fn test_remove() {
    let (store, _temp) = create_test_store();

    store.set("state", "value").unwrap();
    store.remove("state").unwrap();
    assert_eq!(store.get("state").unwrap(), None);

    // Removing again is fine.
    store.remove("state").unwrap();
}

#[test]
fn test_rejects_path_keys() {
    let (store, _temp) = create_test_store();

    for key in ["", "../escape", "a/b", ".hidden", "with space"] {
        assert!(
            matches!(store.set(key, "x"), Err(StorageError::InvalidKey(_))),
            "{key:?}"
        );
    }
}

#[test]
fn test_with_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = StorageConfig {
        data_dir: temp_dir.path().join("custom").to_string_lossy().to_string(),
        ..StorageConfig::default()
    };

    let store = FileStore::with_config(&config);
    store.set("progress", "{}").unwrap();

    assert!(temp_dir.path().join("custom").join("progress.json").exists());
}
