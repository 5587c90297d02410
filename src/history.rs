//! 履歴の保存先（ファイル）
//!
//! キーごとに `<key>.json` を1ファイルとして保存する。
//! 読めない・壊れたファイルの扱いは共通の HistoryCache 側で吸収する。

use crate::error::{XrayError, Result};
use std::path::PathBuf;
use xray_common::KeyValueStore;

const APP_DIR_NAME: &str = "xray-detect";

/// ディレクトリ配下のJSONファイルをキー・値ストアとして使う
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// ユーザーデータディレクトリ（例: ~/.local/share/xray-detect）
    pub fn open_default() -> Result<Self> {
        let base = dirs::data_dir()
            .ok_or_else(|| XrayError::Config("データディレクトリが見つかりません".into()))?;
        Ok(Self::new(base.join(APP_DIR_NAME)))
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> xray_common::Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> xray_common::Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // 一時ファイルに書いてから置き換える
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> xray_common::Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
