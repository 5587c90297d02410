//! 画像ファイルの形式判定とファイル名変換
//!
//! HEICの実デコードはWeb側（JSライブラリ）とCLI側（外部コマンド）が行う。

/// 変換後のJPEG品質（0.0〜1.0）
pub const JPEG_QUALITY: f32 = 0.9;

pub const JPEG_MIME: &str = "image/jpeg";

const HEIC_MIMES: [&str; 2] = ["image/heic", "image/heif"];
const HEIC_EXTENSIONS: [&str; 2] = [".heic", ".heif"];

/// HEIC/HEIFかどうか（MIMEタイプまたは拡張子で判定）
pub fn is_heic(mime: &str, file_name: &str) -> bool {
    let mime = mime.trim();
    HEIC_MIMES.iter().any(|m| mime.eq_ignore_ascii_case(m)) || heic_extension_len(file_name).is_some()
}

fn heic_extension_len(file_name: &str) -> Option<usize> {
    HEIC_EXTENSIONS.iter().find_map(|ext| {
        let split = file_name.len().checked_sub(ext.len())?;
        let tail = file_name.get(split..)?;
        tail.eq_ignore_ascii_case(ext).then_some(ext.len())
    })
}

/// 変換後のファイル名（"scan.HEIC" → "scan.jpg"）
pub fn converted_file_name(file_name: &str) -> String {
    match heic_extension_len(file_name) {
        Some(len) => format!("{}.jpg", &file_name[..file_name.len() - len]),
        None => file_name.to_string(),
    }
}

/// Base64 PNGを <img src> 用のData URLにする
pub fn png_data_url(base64_png: &str) -> String {
    format!("data:image/png;base64,{}", base64_png)
}

/// Data URLからBase64データ部分を抽出
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split_once(',').map(|(_, data)| data)
}
