use std::fs;

use skilltree_core::config::DEFAULT_STATE_KEY;
use skilltree_core::{
    AchievementQueue, Catalog, Config, DefaultCatalog, FileStore, KeyValueStore, MemoryStore,
    Session, SessionError, StorageConfig, UnlockSweep,
};
use tempfile::TempDir;

fn create_test_config(temp_dir: &TempDir) -> Config {
    Config {
        storage: StorageConfig {
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            ..StorageConfig::default()
        },
        ..Config::default()
    }
}

fn open(config: &Config) -> Session<FileStore, DefaultCatalog> {
    Session::open(FileStore::with_config(&config.storage), DefaultCatalog, config)
}

#[test]
fn test_progress_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&temp_dir);
    let mut queue = AchievementQueue::new();

    let mut session = open(&config);
    for _ in 0..5 {
        session.train("java", &mut queue).unwrap();
    }
    assert_eq!(session.state().skills["java"].level, 2);
    let expected = session.state().clone();
    drop(session);

    let reopened = open(&config);
    assert_eq!(reopened.state(), &expected);
}

#[test]
fn test_train_uses_configured_amount() {
    let mut config = Config::default();
    config.progression.exp_per_action = 45;
    let mut session = Session::open(MemoryStore::new(), DefaultCatalog, &config);

    let outcome = session.train("kafka", &mut AchievementQueue::new()).unwrap();

    assert_eq!(outcome.state.skills["kafka"].current_exp, 45);
    assert_eq!(session.exp_per_action(), 45);
}

#[test]
fn test_notifications_in_unlock_order() {
    let mut session = Session::open(MemoryStore::new(), DefaultCatalog, &Config::default());
    let mut queue = AchievementQueue::new();

    session.apply_experience("java", 536, &mut queue).unwrap();
    session.apply_experience("golang", 536, &mut queue).unwrap();

    assert_eq!(queue.drain(), vec!["first-boost", "level-5", "polyglot"]);
    assert_eq!(
        session.state().unlocked_achievements,
        vec!["first-boost", "level-5", "polyglot"]
    );
}

#[test]
fn test_invalid_operation_leaves_state() {
    let mut session = Session::open(MemoryStore::new(), DefaultCatalog, &Config::default());
    let before = session.state().clone();

    let err = session
        .apply_experience("nonexistent-id", 10, &mut AchievementQueue::new())
        .unwrap_err();

    assert!(matches!(err, SessionError::Progression(_)));
    assert_eq!(session.state(), &before);
    assert!(session.store().is_empty());
}

#[test]
fn test_reset_persists_fresh_state() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&temp_dir);

    let mut session = open(&config);
    session
        .apply_experience("redis", 300, &mut AchievementQueue::new())
        .unwrap();
    session.reset().unwrap();
    assert_eq!(session.state(), &DefaultCatalog.initial_state());

    let reopened = open(&config);
    assert_eq!(reopened.state(), &DefaultCatalog.initial_state());
}

#[test]
fn test_corrupt_file_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&temp_dir);
    fs::write(
        temp_dir.path().join(format!("{}.json", DEFAULT_STATE_KEY)),
        "{ this is not json",
    )
    .unwrap();

    let session = open(&config);
    assert_eq!(session.state(), &DefaultCatalog.initial_state());
}

#[test]
fn test_unreadable_key_falls_back() {
    let mut config = Config::default();
    config.storage.state_key = "../outside".to_string();

    let session = Session::open(MemoryStore::new(), DefaultCatalog, &config);
    assert_eq!(session.state(), &DefaultCatalog.initial_state());
}

#[test]
fn test_session_uses_configured_sweep() {
    let mut config = Config::default();
    config.progression.unlock_sweep = UnlockSweep::SinglePass;

    let session = Session::open(MemoryStore::new(), DefaultCatalog, &config);
    assert_eq!(session.engine().sweep(), UnlockSweep::SinglePass);
}

#[test]
fn test_saved_document_is_stamped() {
    let store = MemoryStore::new();
    let mut session = Session::open(&store, DefaultCatalog, &Config::default());
    session
        .apply_experience("git", 10, &mut AchievementQueue::new())
        .unwrap();

    let saved = store.get(DEFAULT_STATE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert!(value["savedAt"].is_string());
    assert_eq!(value["skills"]["git"]["currentExp"], 10);
}
