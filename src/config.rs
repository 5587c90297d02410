use crate::error::{XrayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use xray_common::api::{normalize_base_url, BackendConfig, REQUEST_TIMEOUT_SECS};

/// バックエンドURLを上書きする環境変数
pub const BACKEND_URL_ENV: &str = "XRAY_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            timeout_seconds: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| XrayError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("xray-detect").join("config.json"))
    }

    /// 接続設定（環境変数を優先）
    pub fn backend(&self) -> BackendConfig {
        self.backend_with_override(std::env::var(BACKEND_URL_ENV).ok())
    }

    pub fn backend_with_override(&self, env_url: Option<String>) -> BackendConfig {
        let url = env_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.backend_url.clone());

        BackendConfig::new(url.as_deref()).with_timeout_secs(self.timeout_seconds)
    }

    pub fn set_backend_url(&mut self, url: &str) {
        self.backend_url = Some(normalize_base_url(url));
    }
}
