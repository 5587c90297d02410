//! バックエンドクライアントのテスト
//!
//! ローカルの使い捨てHTTPサーバーに固定レスポンスを返させて検証

use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use xray_common::{
    BackendConfig, Disease, Gender, PatientInfo, PredictOutcome, PredictionResult, ReportRequest,
    Submission,
};
use xray_detect::client::BackendClient;
use xray_detect::preprocess::PreparedImage;

// =============================================
// テスト用サーバー
// =============================================

/// 1回だけ応答するサーバーを立て、(URL, 受信したリクエスト) を返す
async fn serve_once(status: &'static str, content_type: &'static str, body: Vec<u8>) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind失敗");
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept失敗");
        let request = read_request(&mut socket).await;

        let head = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            content_type,
            body.len()
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&body).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (url, handle)
}

/// 接続を受けたら何も返さずに切るサーバー
async fn serve_hangup() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind失敗");
    let url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let _ = read_request(&mut socket).await;
        }
    });

    url
}

/// ヘッダとContent-Length分の本文を読む
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok());

        let complete = match length {
            Some(length) => buf.len() >= end + 4 + length,
            None => buf.ends_with(b"0\r\n\r\n"),
        };
        if complete {
            break;
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

// =============================================
// テストデータ
// =============================================

fn client(url: &str) -> BackendClient {
    BackendClient::new(BackendConfig::new(Some(url)).with_timeout_secs(5)).expect("クライアント作成失敗")
}

fn patient() -> PatientInfo {
    PatientInfo {
        name: "Asha".to_string(),
        age: "42".to_string(),
        gender: Gender::Female,
        phone: "+919876543210".to_string(),
    }
}

fn submission() -> Submission<PreparedImage> {
    Submission {
        patient: patient(),
        file: PreparedImage {
            file_name: "chest.png".to_string(),
            mime: "image/png".to_string(),
            bytes: b"fake-png-bytes".to_vec(),
        },
    }
}

fn prediction() -> PredictionResult {
    PredictionResult {
        disease: Disease::Pneumonia,
        confidence: 91.2,
        input_image: "aW1n".to_string(),
        gradcam_image: Some("Y2Ft".to_string()),
        ai_response: "SUMMARY\n- Rest".to_string(),
        date_str: None,
        time_str: None,
        confidence_warning: None,
    }
}

const SUCCESS_BODY: &str = r#"{
    "disease": "PNEUMONIA",
    "confidence": 91.2,
    "input_image": "aW1n",
    "gradcam_image": "Y2Ft",
    "ai_response": "SUMMARY\n- Rest"
}"#;

// =============================================
// 予測
// =============================================

/// 画像と患者情報がmultipartで送られ、結果が返る
#[tokio::test]
async fn test_predict_sends_multipart_fields() {
    let (url, server) = serve_once("200 OK", "application/json", SUCCESS_BODY.as_bytes().to_vec()).await;

    let outcome = client(&url).predict(&submission()).await;
    let request = server.await.unwrap();

    match outcome {
        PredictOutcome::Completed(result) => {
            assert_eq!(result.disease, Disease::Pneumonia);
            assert_eq!(result.gradcam_image.as_deref(), Some("Y2Ft"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    assert!(request.starts_with("POST /predict "));
    assert!(request.to_ascii_lowercase().contains("multipart/form-data"));
    assert!(request.contains("name=\"image\""));
    assert!(request.contains("filename=\"chest.png\""));
    assert!(request.contains("fake-png-bytes"));
    for field in ["patient_name", "patient_age", "patient_gender", "patient_phone"] {
        assert!(request.contains(&format!("name=\"{}\"", field)), "missing field {}", field);
    }
    assert!(request.contains("Asha"));
    assert!(request.contains("Female"));
    assert!(request.contains("+919876543210"));
}

/// 200で {error} が返れば Rejected
#[tokio::test]
async fn test_predict_error_body_is_rejected() {
    let (url, server) = serve_once("200 OK", "application/json", br#"{"error": "Invalid image"}"#.to_vec()).await;

    let outcome = client(&url).predict(&submission()).await;
    server.await.unwrap();

    assert_eq!(outcome, PredictOutcome::Rejected("Invalid image".to_string()));
}

/// 2xx以外は Unavailable
#[tokio::test]
async fn test_predict_http_error_is_unavailable() {
    let (url, server) = serve_once(
        "500 Internal Server Error",
        "application/json",
        br#"{"error": "model crashed"}"#.to_vec(),
    )
    .await;

    let outcome = client(&url).predict(&submission()).await;
    server.await.unwrap();

    assert_eq!(outcome, PredictOutcome::Unavailable);
}

/// 解釈できない本文は Unavailable
#[tokio::test]
async fn test_predict_undecodable_body_is_unavailable() {
    let (url, server) = serve_once("200 OK", "text/html", b"<html>gateway</html>".to_vec()).await;

    let outcome = client(&url).predict(&submission()).await;
    server.await.unwrap();

    assert_eq!(outcome, PredictOutcome::Unavailable);
}

/// 接続が切れたら Unavailable
#[tokio::test]
async fn test_predict_dropped_connection_is_unavailable() {
    let url = serve_hangup().await;

    let outcome = client(&url).predict(&submission()).await;
    assert_eq!(outcome, PredictOutcome::Unavailable);
}

// =============================================
// レポート
// =============================================

/// PDFが指定パスに保存される
#[tokio::test]
async fn test_download_report_writes_pdf() {
    let pdf = b"%PDF-1.4 fake report".to_vec();
    let (url, server) = serve_once("200 OK", "application/pdf", pdf.clone()).await;
    let dir = tempdir().expect("Failed to create temp dir");
    let dest = dir.path().join("reports").join("ChestXray_Report.pdf");

    let report = ReportRequest::new(&patient(), &prediction());
    client(&url)
        .download_report(&report, &dest)
        .await
        .expect("レポート取得失敗");
    let request = server.await.unwrap();

    assert_eq!(std::fs::read(&dest).unwrap(), pdf);
    assert!(request.starts_with("POST /download_report "));
    assert!(request.to_ascii_lowercase().contains("application/json"));
    assert!(request.contains("\"patient_data\""));
    assert!(request.contains("\"prediction_data\""));
    assert!(request.contains("\"date_str\":\"\""));
}

/// 2xx以外ならエラーでファイルは作らない
#[tokio::test]
async fn test_download_report_http_error_writes_nothing() {
    let (url, server) = serve_once(
        "500 Internal Server Error",
        "application/json",
        br#"{"error": "PDF generation failed"}"#.to_vec(),
    )
    .await;
    let dir = tempdir().expect("Failed to create temp dir");
    let dest = dir.path().join("ChestXray_Report.pdf");

    let report = ReportRequest::new(&patient(), &prediction());
    let result = client(&url).download_report(&report, &dest).await;
    server.await.unwrap();

    assert!(result.is_err());
    assert!(!dest.exists());
}
