//! 判定画像の保存（--save-images）

use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::{Path, PathBuf};
use xray_common::image::extract_base64_from_data_url;
use xray_common::PredictionResult;

pub const INPUT_IMAGE_FILE: &str = "input.png";
pub const GRADCAM_IMAGE_FILE: &str = "gradcam.png";

/// Base64（Data URLも可）をデコード
pub fn decode_image(data: &str) -> Result<Vec<u8>> {
    let payload = if data.starts_with("data:") {
        extract_base64_from_data_url(data).unwrap_or_default()
    } else {
        data
    };
    Ok(STANDARD.decode(payload.trim())?)
}

/// 入力画像とGrad-CAM画像（あれば）を書き出し、保存したパスを返す
pub fn save_result_images(result: &PredictionResult, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut saved = Vec::new();
    let images = [
        (INPUT_IMAGE_FILE, Some(result.input_image.as_str())),
        (GRADCAM_IMAGE_FILE, result.gradcam_image.as_deref()),
    ];

    for (file_name, data) in images {
        let Some(data) = data.filter(|d| !d.is_empty()) else {
            continue;
        };
        let path = dir.join(file_name);
        std::fs::write(&path, decode_image(data)?)?;
        saved.push(path);
    }

    Ok(saved)
}
