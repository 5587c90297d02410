//! 予測バックエンドとの通信仕様
//!
//! HTTPクライアント自体はWeb（fetch）とCLI（reqwest）がそれぞれ持つ。
//! ここではURL解決・リクエスト内容・レスポンス解釈だけを扱う。

use crate::error::Result;
use crate::types::{Disease, PatientInfo, PredictionResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// バックエンドURL未設定時の既定値
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// 推論は遅いので長めに待つ
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

pub const PREDICT_PATH: &str = "/predict";
pub const REPORT_PATH: &str = "/download_report";

/// レポートの保存ファイル名
pub const REPORT_FILE_NAME: &str = "ChestXray_Report.pdf";

/// 通信失敗・タイムアウト時の表示メッセージ
pub const BACKEND_UNAVAILABLE: &str = "Backend not running or error occurred";

/// multipartのフィールド名
pub const FIELD_IMAGE: &str = "image";
pub const FIELD_NAME: &str = "patient_name";
pub const FIELD_AGE: &str = "patient_age";
pub const FIELD_GENDER: &str = "patient_gender";
pub const FIELD_PHONE: &str = "patient_phone";

/// バックエンド接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
    timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

impl BackendConfig {
    /// URL未指定・空文字なら既定値を使う
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.unwrap_or_default()),
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn predict_url(&self) -> String {
        format!("{}{}", self.base_url, PREDICT_PATH)
    }

    pub fn report_url(&self) -> String {
        format!("{}{}", self.base_url, REPORT_PATH)
    }
}

/// 末尾のスラッシュを落とす（空なら既定値）
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BACKEND_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// multipartの文字列フィールド（画像以外）
pub fn patient_form_fields(patient: &PatientInfo) -> [(&'static str, String); 4] {
    [
        (FIELD_NAME, patient.name.clone()),
        (FIELD_AGE, patient.age.clone()),
        (FIELD_GENDER, patient.gender.as_str().to_string()),
        (FIELD_PHONE, patient.phone.clone()),
    ]
}

/// /predict のレスポンス
///
/// `error` フィールドがあればそれを優先する。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Failure { error: String },
    Success(PredictionResult),
}

/// レスポンス本文を解釈
pub fn parse_predict_response(body: &str) -> Result<PredictResponse> {
    Ok(serde_json::from_str(body)?)
}

/// 予測処理の結果（通信失敗を含む）
#[derive(Debug, Clone, PartialEq)]
pub enum PredictOutcome {
    /// バックエンドが返したエラー
    Rejected(String),
    Completed(PredictionResult),
    /// 通信失敗・タイムアウト・不正なレスポンス
    Unavailable,
}

impl From<PredictResponse> for PredictOutcome {
    fn from(response: PredictResponse) -> Self {
        match response {
            PredictResponse::Failure { error } => PredictOutcome::Rejected(error),
            PredictResponse::Success(result) => PredictOutcome::Completed(result),
        }
    }
}

impl PredictOutcome {
    /// トランスポート層の結果から変換する
    pub fn from_transport<E>(response: std::result::Result<PredictResponse, E>) -> Self {
        match response {
            Ok(response) => response.into(),
            Err(_) => PredictOutcome::Unavailable,
        }
    }
}

/// /download_report のリクエスト本文
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRequest {
    pub patient_data: PatientInfo,
    pub prediction_data: ReportPrediction,
}

/// レポート用の予測データ（省略可能な項目も必ず載せる）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPrediction {
    pub disease: Disease,
    pub confidence: f64,
    pub input_image: String,
    pub gradcam_image: Option<String>,
    pub ai_response: String,
    pub date_str: String,
    pub time_str: String,
}

impl ReportRequest {
    pub fn new(patient: &PatientInfo, result: &PredictionResult) -> Self {
        Self {
            patient_data: patient.clone(),
            prediction_data: ReportPrediction {
                disease: result.disease.clone(),
                confidence: result.confidence,
                input_image: result.input_image.clone(),
                gradcam_image: result.gradcam_image.clone(),
                ai_response: result.ai_response.clone(),
                date_str: result.date_str.clone().unwrap_or_default(),
                time_str: result.time_str.clone().unwrap_or_default(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
