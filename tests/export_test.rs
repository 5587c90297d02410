//! 判定画像保存のテスト

use base64::{engine::general_purpose::STANDARD, Engine};
use tempfile::tempdir;
use xray_common::{Disease, PredictionResult};
use xray_detect::export::{decode_image, save_result_images, GRADCAM_IMAGE_FILE, INPUT_IMAGE_FILE};

fn result(gradcam: Option<&str>) -> PredictionResult {
    PredictionResult {
        disease: Disease::Pneumonia,
        confidence: 87.5,
        input_image: STANDARD.encode(b"input-png"),
        gradcam_image: gradcam.map(str::to_string),
        ai_response: String::new(),
        date_str: None,
        time_str: None,
        confidence_warning: None,
    }
}

/// 入力画像とGrad-CAM画像の両方を保存
#[test]
fn test_save_both_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    let gradcam = STANDARD.encode(b"gradcam-png");

    let saved = save_result_images(&result(Some(&gradcam)), dir.path()).expect("保存失敗");
    assert_eq!(saved.len(), 2);
    assert_eq!(std::fs::read(dir.path().join(INPUT_IMAGE_FILE)).unwrap(), b"input-png");
    assert_eq!(std::fs::read(dir.path().join(GRADCAM_IMAGE_FILE)).unwrap(), b"gradcam-png");
}

/// Grad-CAMが無ければ入力画像のみ
#[test]
fn test_save_without_gradcam() {
    let dir = tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("images");

    let saved = save_result_images(&result(None), &out).expect("保存失敗");
    assert_eq!(saved, vec![out.join(INPUT_IMAGE_FILE)]);
    assert!(!out.join(GRADCAM_IMAGE_FILE).exists());
}

/// Data URL形式も受け付ける
#[test]
fn test_decode_data_url() {
    let data_url = format!("data:image/png;base64,{}", STANDARD.encode(b"abc"));
    assert_eq!(decode_image(&data_url).unwrap(), b"abc");
}

/// 不正なBase64はエラー
#[test]
fn test_invalid_base64_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut bad = result(None);
    bad.input_image = "not base64 !!!".to_string();

    assert!(save_result_images(&bad, dir.path()).is_err());
}
