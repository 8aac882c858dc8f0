//! Data store integration tests against a temporary data directory

use soulframe_atlas::admin::{DataFileName, DataStore};
use soulframe_atlas::core::config::DataConfig;
use soulframe_atlas::core::AtlasError;
use tempfile::TempDir;

fn store() -> (TempDir, DataStore) {
    let dir = tempfile::tempdir().unwrap();
    let config = DataConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    (dir, DataStore::from_config(&config))
}

fn name(s: &str) -> DataFileName {
    DataFileName::parse(s).unwrap()
}

#[tokio::test]
async fn test_save_creates_then_backs_up() {
    let (_dir, store) = store();
    store.ensure_dirs().await.unwrap();
    let weapons = name("weapons.json");

    let first = store.save(&weapons, r#"[{"id": "oathblade"}]"#).await.unwrap();
    assert!(first.created);
    assert!(first.backup.is_none());
    assert!(store.backups_of(&weapons).await.unwrap().is_empty());

    let second = store
        .save(&weapons, r#"[{"id": "oathblade"}, {"id": "stiletto"}]"#)
        .await
        .unwrap();
    assert!(!second.created);
    let backup = second.backup.unwrap();
    assert!(backup.starts_with("weapons.json.bak-"));

    let backups = store.backups_of(&weapons).await.unwrap();
    assert_eq!(backups, vec![backup.clone()]);

    // the backup holds the previous version
    let old = std::fs::read_to_string(store.backup_dir().join(&backup)).unwrap();
    assert_eq!(old, r#"[{"id": "oathblade"}]"#);
    assert_eq!(store.read(&weapons).await.unwrap().item_count, 2);
}

#[tokio::test]
async fn test_save_rejects_invalid_json_without_touching_file() {
    let (_dir, store) = store();
    store.ensure_dirs().await.unwrap();
    let pacts = name("pacts.json");
    store.save(&pacts, "[1, 2, 3]").await.unwrap();

    assert!(matches!(store.save(&pacts, "{broken").await, Err(AtlasError::InvalidJson(_))));
    assert!(matches!(store.save(&pacts, "42").await, Err(AtlasError::InvalidJson(_))));
    assert!(matches!(store.save(&pacts, "   ").await, Err(AtlasError::InvalidJson(_))));

    assert_eq!(store.read(&pacts).await.unwrap().item_count, 3);
    assert!(store.backups_of(&pacts).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_refuses_existing_file() {
    let (_dir, store) = store();
    store.ensure_dirs().await.unwrap();
    let builds = name("builds.json");

    store.upload(&builds, r#"{"builds": []}"#).await.unwrap();
    let err = store.upload(&builds, r#"{"builds": [1]}"#).await.unwrap_err();
    assert!(matches!(err, AtlasError::FileExists(_)));
    assert!(err.to_string().contains("builds.json"));

    assert_eq!(store.read(&builds).await.unwrap().item_count, 0);
}

#[tokio::test]
async fn test_delete_backs_up_then_removes() {
    let (_dir, store) = store();
    store.ensure_dirs().await.unwrap();
    let virtues = name("virtues.json");

    store.save(&virtues, r#"{"items": [1, 2]}"#).await.unwrap();
    store.save(&virtues, r#"{"items": [1, 2, 3]}"#).await.unwrap();

    let backup = store.delete(&virtues).await.unwrap();
    assert!(backup.starts_with("virtues.json.bak-"));
    assert!(matches!(store.read(&virtues).await, Err(AtlasError::FileNotFound(_))));
    assert_eq!(store.backups_of(&virtues).await.unwrap().len(), 2);

    assert!(matches!(store.delete(&virtues).await, Err(AtlasError::FileNotFound(_))));
}

#[tokio::test]
async fn test_list_summarizes_json_files() {
    let (dir, store) = store();
    store.ensure_dirs().await.unwrap();

    store.save(&name("weapons.json"), r#"{"weapons": [1, 2, 3, 4]}"#).await.unwrap();
    store.save(&name("pacts.json"), r#"[{"id": "warden"}]"#).await.unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not data").unwrap();
    std::fs::write(dir.path().join("broken.json"), "{oops").unwrap();
    std::fs::write(dir.path().join("bad name.json"), "[]").unwrap();

    let files = store.list().await.unwrap();
    let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["broken.json", "pacts.json", "weapons.json"]);

    assert_eq!(files[0].record_count, 0);
    assert_eq!(files[1].record_count, 1);
    assert_eq!(files[2].record_count, 4);
    assert!(files.iter().all(|f| f.size > 0 && f.modified.is_some()));
}

#[tokio::test]
async fn test_no_temp_files_left_behind() {
    let (dir, store) = store();
    store.ensure_dirs().await.unwrap();
    store.save(&name("lore.json"), r#"{"a": 1}"#).await.unwrap();
    store.save(&name("lore.json"), r#"{"a": 2}"#).await.unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_all_succeed_with_one_backup_each() {
    let (_dir, store) = store();
    store.ensure_dirs().await.unwrap();
    let weapons = name("weapons.json");

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        let weapons = weapons.clone();
        handles.push(tokio::spawn(async move {
            let content = format!(r#"[{{"id": "w{}"}}]"#, i);
            store.save(&weapons, &content).await
        }));
    }

    let mut created = 0;
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        if outcome.created {
            created += 1;
        }
    }

    // one writer created the file, the other fifteen each backed up what they replaced
    assert_eq!(created, 1);
    assert_eq!(store.backups_of(&weapons).await.unwrap().len(), 15);
    assert_eq!(store.read(&weapons).await.unwrap().item_count, 1);

    let leftovers = std::fs::read_dir(store.data_dir())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .count();
    assert_eq!(leftovers, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_uploads_create_exactly_once() {
    let (_dir, store) = store();
    store.ensure_dirs().await.unwrap();

    for round in 0..10 {
        let fresh = name(&format!("fresh-{}.json", round));
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            let fresh = fresh.clone();
            handles.push(tokio::spawn(async move {
                store.upload(&fresh, &format!("[{}]", i)).await
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => accepted += 1,
                Err(AtlasError::FileExists(_)) => {}
                Err(e) => panic!("unexpected upload error: {}", e),
            }
        }
        assert_eq!(accepted, 1, "round {}", round);
        assert!(store.backups_of(&fresh).await.unwrap().is_empty());
    }
}
