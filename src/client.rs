//! 予測バックエンドのHTTPクライアント（reqwest）

use crate::error::{XrayError, Result};
use crate::preprocess::PreparedImage;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use xray_common::api::{parse_predict_response, patient_form_fields, PredictResponse, FIELD_IMAGE};
use xray_common::{BackendConfig, PredictOutcome, ReportRequest, Submission};

pub struct BackendClient {
    config: BackendConfig,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// 予測を実行（通信失敗・タイムアウト・HTTPエラーは Unavailable）
    pub async fn predict(&self, submission: &Submission<PreparedImage>) -> PredictOutcome {
        let response = self.send_predict(submission).await;
        if let Err(e) = &response {
            tracing::error!(error = %e, url = %self.config.predict_url(), "prediction request failed");
        }
        PredictOutcome::from_transport(response)
    }

    async fn send_predict(&self, submission: &Submission<PreparedImage>) -> Result<PredictResponse> {
        let image = &submission.file;
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;

        let mut form = Form::new().part(FIELD_IMAGE, part);
        for (name, value) in patient_form_fields(&submission.patient) {
            form = form.text(name, value);
        }

        tracing::debug!(url = %self.config.predict_url(), file = %image.file_name, "POST predict");
        let response = self
            .http
            .post(self.config.predict_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(XrayError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(parse_predict_response(&body)?)
    }

    /// レポートPDFを取得して保存
    pub async fn download_report(&self, report: &ReportRequest, dest: &Path) -> Result<()> {
        tracing::debug!(url = %self.config.report_url(), "POST download_report");
        let response = self
            .http
            .post(self.config.report_url())
            .json(report)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(XrayError::Report(format!("HTTP {}: {}", status.as_u16(), body.trim())));
        }

        let pdf = response.bytes().await?;
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, &pdf).await?;
        Ok(())
    }
}
