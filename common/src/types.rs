//! 予測結果・患者情報・履歴の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - PatientInfo: フォームから確定した患者情報
//! - PredictionResult: /predict の成功レスポンス
//! - HistoryRecord: 履歴に残す要約（画像は含まない）

use serde::{Deserialize, Serialize};
use std::fmt;

/// 性別（未選択は空文字でシリアライズ）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    Male,
    Female,
    Other,
}

impl Gender {
    pub const CHOICES: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Unspecified => "",
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// フォーム値から変換（不明な値は未選択扱い）
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            "other" | "o" => Gender::Other,
            _ => Gender::Unspecified,
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Gender::Unspecified)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 診断ラベル
///
/// バックエンドの旧ラベル（`COVID19`, `TURBERCULOSIS`）は正規化して受け取る。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Disease {
    Normal,
    Pneumonia,
    Covid19,
    Tuberculosis,
    Other(String),
}

impl Disease {
    pub fn label(&self) -> &str {
        match self {
            Disease::Normal => "NORMAL",
            Disease::Pneumonia => "PNEUMONIA",
            Disease::Covid19 => "COVID-19",
            Disease::Tuberculosis => "TUBERCULOSIS",
            Disease::Other(label) => label,
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Disease::Normal)
    }

    /// 結果欄の見出し（"Prediction" / "Disease"）
    pub fn caption(&self) -> &'static str {
        if self.is_normal() {
            "Prediction"
        } else {
            "Disease"
        }
    }

    /// 結果欄に表示する文言
    pub fn display_text(&self) -> String {
        if self.is_normal() {
            "NORMAL (Healthy Chest X-ray)".to_string()
        } else {
            self.label().to_string()
        }
    }

    /// 表示用CSSクラス
    pub fn css_class(&self) -> &'static str {
        if self.is_normal() {
            "disease-normal"
        } else {
            "disease-alert"
        }
    }
}

impl From<String> for Disease {
    fn from(label: String) -> Self {
        match label.trim() {
            "NORMAL" => Disease::Normal,
            "PNEUMONIA" => Disease::Pneumonia,
            "COVID-19" | "COVID19" => Disease::Covid19,
            "TUBERCULOSIS" | "TURBERCULOSIS" => Disease::Tuberculosis,
            _ => Disease::Other(label),
        }
    }
}

impl From<&str> for Disease {
    fn from(label: &str) -> Self {
        Disease::from(label.to_string())
    }
}

impl From<Disease> for String {
    fn from(disease: Disease) -> Self {
        match disease {
            Disease::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 患者情報（予測・レポート両リクエストに載る）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInfo {
    #[serde(rename = "patient_name")]
    pub name: String,
    #[serde(rename = "patient_age")]
    pub age: String,
    #[serde(rename = "patient_gender")]
    pub gender: Gender,
    /// 国番号 + 数字（例: "+919876543210"）
    #[serde(rename = "patient_phone")]
    pub phone: String,
}

/// /predict 成功時のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub disease: Disease,
    pub confidence: f64,
    /// Base64エンコードされた入力画像（PNG）
    #[serde(default)]
    pub input_image: String,
    /// Base64エンコードされたGrad-CAM画像（NORMALでは無し）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradcam_image: Option<String>,
    #[serde(default)]
    pub ai_response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_str: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_str: Option<String>,
    /// 信頼度が閾値未満のときにバックエンドが付ける注意文
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_warning: Option<String>,
}

impl PredictionResult {
    /// "87.5%" 形式の信頼度表示
    pub fn confidence_text(&self) -> String {
        format!("{}%", self.confidence)
    }
}

/// 履歴レコード
///
/// 画像フィールドを持たない型なので、履歴に画像データが混入することはない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// "<日付>, <時刻>" 形式の表示用タイムスタンプ
    pub date: String,
    pub patient_name: String,
    pub patient_age: String,
    #[serde(default)]
    pub patient_gender: Gender,
    pub patient_phone: String,
    pub disease: Disease,
    pub confidence: f64,
}

impl HistoryRecord {
    pub fn new(timestamp: impl Into<String>, patient: &PatientInfo, result: &PredictionResult) -> Self {
        Self {
            date: timestamp.into(),
            patient_name: patient.name.clone(),
            patient_age: patient.age.clone(),
            patient_gender: patient.gender,
            patient_phone: patient.phone.clone(),
            disease: result.disease.clone(),
            confidence: result.confidence,
        }
    }

    /// タイムスタンプの日付部分（最初のカンマより前）
    pub fn date_part(&self) -> &str {
        self.date.split(',').next().unwrap_or_default().trim()
    }

    /// タイムスタンプの時刻部分（最初のカンマより後）
    pub fn time_part(&self) -> &str {
        self.date
            .split_once(',')
            .map(|(_, time)| time.trim())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> PredictionResult {
        PredictionResult {
            disease: Disease::Pneumonia,
            confidence: 93.41,
            input_image: "aW1n".to_string(),
            gradcam_image: Some("Y2Ft".to_string()),
            ai_response: "SUMMARY".to_string(),
            date_str: None,
            time_str: None,
            confidence_warning: None,
        }
    }

    #[test]
    fn test_disease_normalizes_backend_aliases() {
        assert_eq!(Disease::from("COVID19"), Disease::Covid19);
        assert_eq!(Disease::from("TURBERCULOSIS"), Disease::Tuberculosis);
        assert_eq!(Disease::from("NORMAL"), Disease::Normal);
        assert_eq!(Disease::from("FIBROSIS"), Disease::Other("FIBROSIS".to_string()));
    }

    #[test]
    fn test_disease_serializes_as_label() {
        let json = serde_json::to_string(&Disease::Covid19).unwrap();
        assert_eq!(json, "\"COVID-19\"");
        let other: Disease = serde_json::from_str("\"EFFUSION\"").unwrap();
        assert_eq!(other.label(), "EFFUSION");
    }

    #[test]
    fn test_disease_display_text() {
        assert_eq!(Disease::Normal.display_text(), "NORMAL (Healthy Chest X-ray)");
        assert_eq!(Disease::Normal.caption(), "Prediction");
        assert_eq!(Disease::Pneumonia.display_text(), "PNEUMONIA");
        assert_eq!(Disease::Pneumonia.css_class(), "disease-alert");
    }

    #[test]
    fn test_gender_parse_and_serialize() {
        assert_eq!(Gender::parse("female"), Gender::Female);
        assert_eq!(Gender::parse(""), Gender::Unspecified);
        assert_eq!(serde_json::to_string(&Gender::Unspecified).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"Male\"");
    }

    #[test]
    fn test_patient_info_uses_wire_field_names() {
        let patient = PatientInfo {
            name: "Asha".to_string(),
            age: "42".to_string(),
            gender: Gender::Female,
            phone: "+919876543210".to_string(),
        };
        let value = serde_json::to_value(&patient).unwrap();
        assert_eq!(value["patient_name"], "Asha");
        assert_eq!(value["patient_age"], "42");
        assert_eq!(value["patient_gender"], "Female");
        assert_eq!(value["patient_phone"], "+919876543210");
    }

    #[test]
    fn test_prediction_result_accepts_extra_fields() {
        let json = r#"{
            "patient_name": "Asha",
            "disease": "COVID19",
            "confidence": 55.2,
            "input_image": "abc",
            "ai_response": "SUMMARY",
            "confidence_warning": "Prediction confidence is low.",
            "pdf_available": true
        }"#;
        let result: PredictionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.disease, Disease::Covid19);
        assert!(result.gradcam_image.is_none());
        assert_eq!(result.confidence_warning.as_deref(), Some("Prediction confidence is low."));
        assert_eq!(result.confidence_text(), "55.2%");
    }

    #[test]
    fn test_history_record_has_no_image_fields() {
        let patient = PatientInfo {
            name: "Ravi".to_string(),
            age: "31".to_string(),
            gender: Gender::Male,
            phone: "+447700900123".to_string(),
        };
        let record = HistoryRecord::new("18/10/2026, 10:15:00", &patient, &sample_result());
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("input_image"));
        assert!(!object.contains_key("gradcam_image"));
        assert!(!object.contains_key("ai_response"));
        assert_eq!(object["disease"], "PNEUMONIA");
    }

    #[test]
    fn test_history_record_timestamp_parts() {
        let record = HistoryRecord::new("18/10/2026, 10:15:00 AM", &PatientInfo::default(), &sample_result());
        assert_eq!(record.date_part(), "18/10/2026");
        assert_eq!(record.time_part(), "10:15:00 AM");

        let bare = HistoryRecord::new("2026-10-18", &PatientInfo::default(), &sample_result());
        assert_eq!(bare.date_part(), "2026-10-18");
        assert_eq!(bare.time_part(), "");
    }
}
