//! 送信前の画像準備
//!
//! HEIC/HEIF は外部コマンド `heif-convert` でPNGに展開し、JPEG（品質90）に変換する。
//! それ以外の形式はそのまま送る。

use crate::error::{XrayError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use xray_common::image::{converted_file_name, is_heic, JPEG_MIME, JPEG_QUALITY};

/// HEIC展開に使う外部コマンド（libheif付属）
pub const HEIF_CONVERT: &str = "heif-convert";

const FALLBACK_MIME: &str = "application/octet-stream";

/// 送信用に読み込んだ画像
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedImage {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// ファイル名から変換が必要か判定
pub fn needs_conversion(path: &Path) -> bool {
    is_heic("", &file_name_of(path))
}

/// 画像を読み込み、必要ならJPEGに変換
pub async fn prepare_image(path: &Path) -> Result<PreparedImage> {
    if !path.is_file() {
        return Err(XrayError::FileNotFound(path.display().to_string()));
    }

    if needs_conversion(path) {
        return convert_heic(path).await;
    }

    let bytes = tokio::fs::read(path).await?;
    Ok(PreparedImage {
        file_name: file_name_of(path),
        mime: guess_mime(path).to_string(),
        bytes,
    })
}

async fn convert_heic(path: &Path) -> Result<PreparedImage> {
    let png_path = temp_png_path();
    tracing::debug!(src = %path.display(), dst = %png_path.display(), "running {}", HEIF_CONVERT);

    let output = Command::new(HEIF_CONVERT)
        .arg(path)
        .arg(&png_path)
        .output()
        .await
        .map_err(|e| XrayError::Conversion(format!("{} を実行できません: {}", HEIF_CONVERT, e)));

    let decoded = match output {
        Ok(output) if output.status.success() => image::open(&png_path).map_err(XrayError::from),
        Ok(output) => Err(XrayError::Conversion(format!(
            "{} failed (code {:?}): {}",
            HEIF_CONVERT,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        ))),
        Err(e) => Err(e),
    };

    remove_temp_file(&png_path);

    Ok(PreparedImage {
        file_name: converted_file_name(&file_name_of(path)),
        mime: JPEG_MIME.to_string(),
        bytes: encode_jpeg(&decoded?)?,
    })
}

/// 一時ファイルを消す（失敗はログのみ）
fn remove_temp_file(path: &Path) -> bool {
    if !path.exists() {
        return true;
    }
    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove temporary PNG");
            false
        }
    }
}

/// JPEG品質（0〜100）
pub fn jpeg_quality_percent() -> u8 {
    (JPEG_QUALITY * 100.0).round() as u8
}

/// JPEGにエンコード（アルファは落とす）
pub fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, jpeg_quality_percent());
    encoder.encode_image(&rgb)?;
    Ok(buf)
}

fn guess_mime(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn temp_png_path() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("xray-detect-{}-{}.png", std::process::id(), nanos))
}
