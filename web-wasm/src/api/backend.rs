//! 予測バックエンド連携（fetch）
//!
//! - predict: multipartで画像と患者情報を送り、結果を PredictOutcome にする
//! - download_report: JSONを送ってPDFを受け取り、ダウンロードさせる

use futures::future::{self, Either};
use gloo::timers::future::TimeoutFuture;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, Blob, BlobPropertyBag, File, FormData, HtmlAnchorElement, Request, RequestInit,
    RequestMode, Response, Url,
};
use xray_common::api::{
    parse_predict_response, patient_form_fields, BackendConfig, PredictOutcome, ReportRequest, FIELD_IMAGE,
    REPORT_FILE_NAME,
};
use xray_common::Submission;

/// 予測を実行（通信失敗・タイムアウトは Unavailable）
pub async fn predict(config: &BackendConfig, submission: &Submission<File>) -> PredictOutcome {
    let body = match send_predict(config, submission).await {
        Ok(body) => body,
        Err(e) => {
            gloo::console::error!("Prediction Error:", e);
            return PredictOutcome::Unavailable;
        }
    };

    match parse_predict_response(&body) {
        Ok(response) => response.into(),
        Err(e) => {
            gloo::console::error!("Prediction Error:", e.to_string());
            PredictOutcome::Unavailable
        }
    }
}

async fn send_predict(config: &BackendConfig, submission: &Submission<File>) -> Result<String, JsValue> {
    let form = FormData::new()?;
    form.append_with_blob_and_filename(FIELD_IMAGE, &submission.file, &submission.file.name())?;
    for (name, value) in patient_form_fields(&submission.patient) {
        form.append_with_str(name, &value)?;
    }

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let resp = fetch_with_timeout(&config.predict_url(), &opts, None, config.timeout_secs()).await?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!("API error: {}", resp.status())));
    }

    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("Empty response"))
}

/// レポートPDFを取得してダウンロードさせる
pub async fn download_report(config: &BackendConfig, report: &ReportRequest) -> Result<(), String> {
    let body = report
        .to_json()
        .map_err(|e| format!("Report serialization failed: {}", e))?;

    let pdf = fetch_report(config, &body)
        .await
        .map_err(|e| format!("Report request failed: {:?}", e))?;

    save_blob(&pdf, REPORT_FILE_NAME).map_err(|e| format!("Report download failed: {:?}", e))
}

async fn fetch_report(config: &BackendConfig, body: &str) -> Result<Blob, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let resp = fetch_with_timeout(
        &config.report_url(),
        &opts,
        Some("application/json"),
        config.timeout_secs(),
    )
    .await?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("API error: {}", resp.status())));
    }

    let data = JsFuture::from(resp.blob()?).await?;
    data.dyn_into::<Blob>()
}

/// タイムアウト付きfetch（時間切れなら中断する）
async fn fetch_with_timeout(
    url: &str,
    opts: &RequestInit,
    content_type: Option<&str>,
    timeout_secs: u64,
) -> Result<Response, JsValue> {
    let controller = AbortController::new()?;
    opts.set_signal(Some(&controller.signal()));

    let request = Request::new_with_str_and_init(url, opts)?;
    if let Some(content_type) = content_type {
        request.headers().set("Content-Type", content_type)?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let fetch = JsFuture::from(window.fetch_with_request(&request));
    let timeout_ms = u32::try_from(timeout_secs.saturating_mul(1000)).unwrap_or(u32::MAX);
    let timer = TimeoutFuture::new(timeout_ms);

    match future::select(Box::pin(fetch), Box::pin(timer)).await {
        Either::Left((resp, _)) => resp?.dyn_into::<Response>(),
        Either::Right(_) => {
            controller.abort();
            Err(JsValue::from_str(&format!("request timed out after {}s", timeout_secs)))
        }
    }
}

/// BlobをPDFとして保存させ、オブジェクトURLは直後に解放する
fn save_blob(data: &Blob, file_name: &str) -> Result<(), JsValue> {
    let props = BlobPropertyBag::new();
    props.set_type("application/pdf");
    let pdf = Blob::new_with_blob_sequence_and_options(&Array::of1(data), &props)?;

    let url = Url::create_object_url_with_blob(&pdf)?;
    let clicked = click_download_link(&url, file_name);
    Url::revoke_object_url(&url)?;
    clicked
}

fn click_download_link(url: &str, file_name: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(url);
    link.set_download(file_name);
    link.click();
    Ok(())
}
