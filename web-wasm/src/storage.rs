//! localStorage による永続化
//!
//! 履歴（`predictionHistory`）とダークモード（`darkMode`）の保存先。

use gloo::storage::{LocalStorage, Storage};
use wasm_bindgen::JsValue;
use xray_common::{Error, KeyValueStore, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

fn storage_error(e: JsValue) -> Error {
    Error::Storage(format!("{:?}", e))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw().get_item(key).map_err(storage_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw().set_item(key, value).map_err(storage_error)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        LocalStorage::raw().remove_item(key).map_err(storage_error)
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use xray_common::{Disease, HistoryCache, HistoryRecord, Gender, HISTORY_KEY};

    wasm_bindgen_test_configure!(run_in_browser);

    fn record(name: &str) -> HistoryRecord {
        HistoryRecord {
            date: "18/10/2026, 10:15:00".to_string(),
            patient_name: name.to_string(),
            patient_age: "30".to_string(),
            patient_gender: Gender::Male,
            patient_phone: "+14155550100".to_string(),
            disease: Disease::Normal,
            confidence: 97.3,
        }
    }

    #[wasm_bindgen_test]
    fn wasm_history_survives_reload() {
        let mut history = HistoryCache::load(LocalStore);
        history.clear().expect("clear failed");
        history.append(record("first")).expect("append failed");
        history.append(record("second")).expect("append failed");

        let reloaded = HistoryCache::load(LocalStore);
        assert_eq!(reloaded.records(), history.records());
        assert_eq!(reloaded.records()[0].patient_name, "second");
    }

    #[wasm_bindgen_test]
    fn wasm_clear_removes_key() {
        let mut history = HistoryCache::load(LocalStore);
        history.append(record("only")).expect("append failed");
        history.clear().expect("clear failed");
        assert_eq!(LocalStore.get(HISTORY_KEY).expect("read failed"), None);
    }
}
