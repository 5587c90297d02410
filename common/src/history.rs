//! 予測履歴キャッシュ
//!
//! 新しい順・最大1000件の履歴を保持し、変更のたびにストレージへ全体を書き戻す。
//! ストレージ書き込みに失敗した場合はメモリ側も変更しない。

use crate::error::Result;
use crate::types::HistoryRecord;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 履歴の保存キー
pub const HISTORY_KEY: &str = "predictionHistory";

/// 保持件数の上限
pub const HISTORY_LIMIT: usize = 1000;

/// キー・バリュー型の永続ストレージ（ブラウザのlocalStorage相当）
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// メモリ上のストレージ（クローンは同じ中身を共有する）
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// 履歴キャッシュ
#[derive(Debug)]
pub struct HistoryCache<S> {
    store: S,
    records: Vec<HistoryRecord>,
    limit: usize,
}

impl<S: KeyValueStore> HistoryCache<S> {
    /// ストレージから読み込み（無い・壊れている場合は空）
    pub fn load(store: S) -> Self {
        Self::load_with_limit(store, HISTORY_LIMIT)
    }

    pub fn load_with_limit(store: S, limit: usize) -> Self {
        let mut records: Vec<HistoryRecord> = match store.get(HISTORY_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_default(),
            _ => Vec::new(),
        };
        records.truncate(limit);

        Self { store, records, limit }
    }

    /// 新しい順の履歴
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 先頭に追加して上限で切り詰め、保存する
    pub fn append(&mut self, record: HistoryRecord) -> Result<()> {
        if self.limit == 0 {
            return Ok(());
        }

        let mut next = Vec::with_capacity(self.limit.min(self.records.len() + 1));
        next.push(record);
        next.extend(self.records.iter().take(self.limit - 1).cloned());

        let json = serde_json::to_string(&next)?;
        self.store.set(HISTORY_KEY, &json)?;
        self.records = next;
        Ok(())
    }

    /// 履歴を全削除（保存済みのデータも削除）
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(HISTORY_KEY)?;
        self.records.clear();
        Ok(())
    }
}
