//! 画面全体の状態
//!
//! フォーム・選択ファイル・予測結果・エラー表示・トースト・処理中フラグ・履歴を
//! ひとつのストアにまとめ、イベントごとの遷移をメソッドとして持つ。
//! 通信や画像変換そのものは呼び出し側（Web/CLI）が行い、結果だけを渡す。

use crate::api::{PredictOutcome, ReportRequest, BACKEND_UNAVAILABLE};
use crate::form::{PatientForm, ValidationError};
use crate::history::{HistoryCache, KeyValueStore};
use crate::types::{HistoryRecord, PatientInfo, PredictionResult};
use std::fmt;
use thiserror::Error;

/// ダークモード設定の保存キー
pub const DARK_MODE_KEY: &str = "darkMode";

/// トーストの表示時間
pub const TOAST_DURATION_MS: u32 = 2500;

pub const MSG_FILE_SELECTED: &str = "File selected successfully";
pub const MSG_HEIC_FAILED: &str = "Unable to process HEIC image.";
pub const MSG_PREDICTION_STARTED: &str = "Prediction started...";
pub const MSG_PREDICTION_DONE: &str = "Prediction completed successfully";
pub const MSG_NO_RESULT: &str = "No prediction result available";
pub const MSG_REPORT_STARTED: &str = "Generating PDF...";
pub const MSG_REPORT_DONE: &str = "PDF downloaded successfully";
pub const MSG_REPORT_FAILED: &str = "PDF download failed";
pub const MSG_HISTORY_CLEARED: &str = "Prediction history cleared";

/// 非同期処理の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Converting,
    Predicting,
    Reporting,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Activity::Converting => "Image conversion",
            Activity::Predicting => "Prediction",
            Activity::Reporting => "Report generation",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("{0} is already in progress")]
    Busy(Activity),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("No prediction result available")]
    NoResult,
}

/// 自動で消える通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// 送信が許可されたときに呼び出し側へ渡す内容
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<F> {
    pub patient: PatientInfo,
    pub file: F,
}

/// 画面状態ストア
///
/// `F` は選択ファイルのハンドル（Webでは `web_sys::File`、CLIでは読み込み済みの画像）。
#[derive(Debug)]
pub struct Session<S, F> {
    form: PatientForm,
    file: Option<F>,
    file_name: Option<String>,
    result: Option<PredictionResult>,
    result_patient: Option<PatientInfo>,
    pending_patient: Option<PatientInfo>,
    error: Option<String>,
    toast: Option<Toast>,
    next_toast_id: u64,
    converting: bool,
    predicting: bool,
    reporting: bool,
    dark_mode: bool,
    history: HistoryCache<S>,
    prefs: S,
}

impl<S, F> Session<S, F>
where
    S: KeyValueStore + Clone,
{
    /// ストレージから履歴とダークモード設定を読み込んで開始
    pub fn new(store: S) -> Self {
        let dark_mode = matches!(store.get(DARK_MODE_KEY), Ok(Some(value)) if value == "true");

        Self {
            form: PatientForm::new(),
            file: None,
            file_name: None,
            result: None,
            result_patient: None,
            pending_patient: None,
            error: None,
            toast: None,
            next_toast_id: 0,
            converting: false,
            predicting: false,
            reporting: false,
            dark_mode,
            history: HistoryCache::load(store.clone()),
            prefs: store,
        }
    }

    // =============================================
    // 読み取り
    // =============================================

    pub fn form(&self) -> &PatientForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PatientForm {
        &mut self.form
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn history(&self) -> &HistoryCache<S> {
        &self.history
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn is_converting(&self) -> bool {
        self.converting
    }

    pub fn is_predicting(&self) -> bool {
        self.predicting
    }

    pub fn is_reporting(&self) -> bool {
        self.reporting
    }

    /// 変換中・予測中は送信できない
    pub fn can_submit(&self) -> bool {
        !self.converting && !self.predicting
    }

    /// 送信ボタンの表示
    pub fn submit_label(&self) -> &'static str {
        if self.converting {
            "Converting..."
        } else if self.predicting {
            "Predicting..."
        } else {
            "Predict"
        }
    }

    // =============================================
    // 通知
    // =============================================

    /// トーストを出す（IDは消去時の照合用）
    pub fn notify(&mut self, message: impl Into<String>) -> u64 {
        self.next_toast_id += 1;
        self.toast = Some(Toast {
            id: self.next_toast_id,
            message: message.into(),
        });
        self.next_toast_id
    }

    /// 指定IDのトーストがまだ表示中なら消す
    pub fn dismiss_toast(&mut self, id: u64) {
        if self.toast.as_ref().is_some_and(|t| t.id == id) {
            self.toast = None;
        }
    }

    // =============================================
    // ファイル選択
    // =============================================

    /// ファイル選択開始。以前の結果・エラー・ファイルは破棄する
    pub fn begin_file_selection(&mut self, file_name: &str, needs_conversion: bool) -> Result<(), SessionError> {
        if self.converting {
            return Err(SessionError::Busy(Activity::Converting));
        }

        self.result = None;
        self.result_patient = None;
        self.error = None;
        self.file = None;
        self.file_name = Some(file_name.to_string());
        self.converting = needs_conversion;
        Ok(())
    }

    /// ファイル確定（変換済みならそのファイル）
    pub fn finish_file_selection(&mut self, file: F, file_name: impl Into<String>) {
        self.converting = false;
        self.file = Some(file);
        self.file_name = Some(file_name.into());
        self.notify(MSG_FILE_SELECTED);
    }

    /// 変換失敗。ファイルは選択されていない状態に戻る
    pub fn fail_file_selection(&mut self) {
        self.converting = false;
        self.file = None;
        self.file_name = None;
        self.error = Some(MSG_HEIC_FAILED.to_string());
        self.notify(MSG_HEIC_FAILED);
    }

    // =============================================
    // 予測
    // =============================================

    /// 送信開始。検証に通れば予測中になり、送信内容を返す
    pub fn begin_submission(&mut self) -> Result<Submission<F>, SessionError>
    where
        F: Clone,
    {
        if self.converting {
            return Err(SessionError::Busy(Activity::Converting));
        }
        if self.predicting {
            return Err(SessionError::Busy(Activity::Predicting));
        }

        let patient = match self.form.validate(self.file.is_some()) {
            Ok(patient) => patient,
            Err(err) => {
                if err.shows_inline() {
                    self.error = Some(err.to_string());
                }
                self.notify(err.to_string());
                return Err(err.into());
            }
        };

        let file = match self.file.clone() {
            Some(file) => file,
            None => return Err(ValidationError::MissingImage.into()),
        };

        self.predicting = true;
        self.pending_patient = Some(patient.clone());
        self.notify(MSG_PREDICTION_STARTED);
        Ok(Submission { patient, file })
    }

    /// 予測完了。成功時のみ履歴に追加する
    pub fn finish_submission(&mut self, outcome: PredictOutcome, timestamp: &str) {
        self.predicting = false;
        let patient = self
            .pending_patient
            .take()
            .unwrap_or_else(|| self.form.snapshot());

        match outcome {
            PredictOutcome::Rejected(error) => {
                self.result = None;
                self.result_patient = None;
                self.error = Some(error.clone());
                self.notify(error);
            }
            PredictOutcome::Completed(result) => {
                let record = HistoryRecord::new(timestamp, &patient, &result);
                self.result = Some(result);
                self.result_patient = Some(patient);
                self.error = None;

                match self.history.append(record) {
                    Ok(()) => self.notify(MSG_PREDICTION_DONE),
                    Err(e) => self.notify(format!("{} (history not saved: {})", MSG_PREDICTION_DONE, e)),
                };
            }
            PredictOutcome::Unavailable => {
                self.error = Some(BACKEND_UNAVAILABLE.to_string());
                self.notify(BACKEND_UNAVAILABLE);
            }
        }
    }

    // =============================================
    // レポート
    // =============================================

    /// レポート要求開始。結果が無ければ通信せずに拒否する
    pub fn begin_report(&mut self) -> Result<ReportRequest, SessionError> {
        if self.reporting {
            return Err(SessionError::Busy(Activity::Reporting));
        }

        let Some(result) = self.result.as_ref() else {
            self.notify(MSG_NO_RESULT);
            return Err(SessionError::NoResult);
        };

        let patient = self
            .result_patient
            .clone()
            .unwrap_or_else(|| self.form.snapshot());
        let request = ReportRequest::new(&patient, result);

        self.reporting = true;
        self.notify(MSG_REPORT_STARTED);
        Ok(request)
    }

    pub fn finish_report<E>(&mut self, outcome: Result<(), E>) {
        self.reporting = false;
        match outcome {
            Ok(()) => self.notify(MSG_REPORT_DONE),
            Err(_) => self.notify(MSG_REPORT_FAILED),
        };
    }

    // =============================================
    // 履歴・表示設定
    // =============================================

    pub fn clear_history(&mut self) {
        match self.history.clear() {
            Ok(()) => self.notify(MSG_HISTORY_CLEARED),
            Err(e) => self.notify(format!("Unable to clear history: {}", e)),
        };
    }

    /// ダークモード切替（保存もする）
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        let value = if self.dark_mode { "true" } else { "false" };
        if let Err(e) = self.prefs.set(DARK_MODE_KEY, value) {
            self.notify(format!("Unable to save display mode: {}", e));
        }
        self.dark_mode
    }
}
