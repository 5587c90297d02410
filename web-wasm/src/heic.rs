//! HEIC → JPEG 変換
//!
//! デコードはJS側（heic2any）に委譲する。

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::File;
use xray_common::image::{converted_file_name, JPEG_MIME, JPEG_QUALITY};

/// heic2any に渡すオプション
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct HeicOptions {
    to_type: &'static str,
    quality: f32,
}

#[wasm_bindgen(module = "/js/heic-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = "convertHeic", catch)]
    async fn convert_heic_js(file: &File, file_name: &str, options: JsValue) -> Result<JsValue, JsValue>;
}

/// HEICファイルをJPEGファイルに変換（ファイル名も .jpg にする）
pub async fn convert_to_jpeg(file: &File) -> Result<File, String> {
    let options = serde_wasm_bindgen::to_value(&HeicOptions {
        to_type: JPEG_MIME,
        quality: JPEG_QUALITY,
    })
    .map_err(|e| format!("HEIC options serialization failed: {}", e))?;

    let file_name = converted_file_name(&file.name());
    let converted = convert_heic_js(file, &file_name, options)
        .await
        .map_err(|e| format!("HEIC conversion failed: {:?}", e))?;

    converted
        .dyn_into::<File>()
        .map_err(|_| "HEIC conversion returned no file".to_string())
}
