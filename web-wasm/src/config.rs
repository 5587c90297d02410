//! ビルド時設定
//!
//! バックエンドURLはビルド時の環境変数 `XRAY_BACKEND_URL` から取る。

use xray_common::BackendConfig;

/// バックエンド接続設定（未設定なら既定URL）
pub fn backend_config() -> BackendConfig {
    BackendConfig::new(option_env!("XRAY_BACKEND_URL"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config_has_no_trailing_slash() {
        let config = backend_config();
        assert!(!config.base_url().ends_with('/'));
        assert!(config.predict_url().ends_with("/predict"));
        assert_eq!(config.timeout_secs(), 120);
    }
}
