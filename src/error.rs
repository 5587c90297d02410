use thiserror::Error;
use xray_common::api::BACKEND_UNAVAILABLE;
use xray_common::{PredictOutcome, SessionError};

#[derive(Error, Debug)]
pub enum XrayError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("画像変換エラー: {0}")]
    Conversion(String),

    #[error("画像エンコードエラー: {0}")]
    Image(#[from] image::ImageError),

    #[error("{0}")]
    Rejected(String),

    #[error("{}", BACKEND_UNAVAILABLE)]
    BackendUnavailable,

    #[error("HTTPエラー: {0}")]
    HttpStatus(u16),

    #[error("通信エラー: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("レポート取得エラー: {0}")]
    Report(String),

    #[error("{0}")]
    Core(#[from] xray_common::Error),

    #[error("画像データのデコードに失敗: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, XrayError>;

impl XrayError {
    /// 予測が結果を返さなかった場合のエラー
    pub fn from_outcome(outcome: &PredictOutcome) -> Option<Self> {
        match outcome {
            PredictOutcome::Completed(_) => None,
            PredictOutcome::Rejected(message) => Some(XrayError::Rejected(message.clone())),
            PredictOutcome::Unavailable => Some(XrayError::BackendUnavailable),
        }
    }
}
