//! 履歴ファイルストアのテスト
//!
//! HistoryCache をファイル保存先で使ったときの永続化を検証

use tempfile::tempdir;
use xray_common::{Disease, Gender, HistoryCache, HistoryRecord, KeyValueStore, HISTORY_KEY};
use xray_detect::history::FileStore;

fn record(name: &str) -> HistoryRecord {
    HistoryRecord {
        date: "18/10/2026, 10:15:00 AM".to_string(),
        patient_name: name.to_string(),
        patient_age: "42".to_string(),
        patient_gender: Gender::Female,
        patient_phone: "+919876543210".to_string(),
        disease: Disease::Pneumonia,
        confidence: 91.2,
    }
}

/// 保存先が空なら空の履歴
#[test]
fn test_empty_store_loads_empty_history() {
    let dir = tempdir().expect("Failed to create temp dir");
    let history = HistoryCache::load(FileStore::new(dir.path()));

    assert!(history.is_empty());
}

/// 追加した履歴は再読み込みで新しい順に戻る
#[test]
fn test_history_survives_reload() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut history = HistoryCache::load(FileStore::new(dir.path()));
    history.append(record("first")).expect("履歴保存失敗");
    history.append(record("second")).expect("履歴保存失敗");

    let reloaded = HistoryCache::load(FileStore::new(dir.path()));
    let names: Vec<&str> = reloaded.records().iter().map(|r| r.patient_name.as_str()).collect();
    assert_eq!(names, vec!["second", "first"]);
}

/// 保存されたJSONに画像データは含まれない
#[test]
fn test_persisted_json_has_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path());

    let mut history = HistoryCache::load(store.clone());
    history.append(record("Asha")).expect("履歴保存失敗");

    let raw = std::fs::read_to_string(store.path_for(HISTORY_KEY)).expect("履歴ファイルが無い");
    assert!(raw.contains("\"patient_name\":\"Asha\""));
    assert!(!raw.contains("input_image"));
    assert!(!raw.contains("gradcam_image"));
}

/// 壊れたファイルは空の履歴として読む
#[test]
fn test_corrupt_file_loads_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path());
    std::fs::write(store.path_for(HISTORY_KEY), "{ not json").unwrap();

    let history = HistoryCache::load(store);
    assert!(history.is_empty());
}

/// 削除でファイルも消える
#[test]
fn test_clear_removes_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path());

    let mut history = HistoryCache::load(store.clone());
    history.append(record("Asha")).expect("履歴保存失敗");
    assert!(store.path_for(HISTORY_KEY).exists());

    history.clear().expect("履歴削除失敗");
    assert!(history.is_empty());
    assert!(!store.path_for(HISTORY_KEY).exists());
    assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
}

/// 上限を超えた分は古い方から落ちる
#[test]
fn test_limit_drops_oldest() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut history = HistoryCache::load_with_limit(FileStore::new(dir.path()), 2);
    for name in ["a", "b", "c"] {
        history.append(record(name)).expect("履歴保存失敗");
    }

    let reloaded = HistoryCache::load_with_limit(FileStore::new(dir.path()), 2);
    let names: Vec<&str> = reloaded.records().iter().map(|r| r.patient_name.as_str()).collect();
    assert_eq!(names, vec!["c", "b"]);
}

/// 存在しないディレクトリは書き込み時に作る
#[test]
fn test_store_creates_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = FileStore::new(dir.path().join("nested").join("data"));

    store.set("darkMode", "true").expect("保存失敗");
    assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));

    store.remove("darkMode").expect("削除失敗");
    store.remove("darkMode").expect("二度目の削除も成功する");
}
