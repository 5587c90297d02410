//! Chest X-ray Client Common Library
//!
//! CLIとWeb(WASM)で共有される型・検証・履歴・表示整形

pub mod types;
pub mod country;
pub mod form;
pub mod image;
pub mod error;
pub mod history;
pub mod api;
pub mod advisory;
pub mod recommendation;
pub mod session;

pub use types::{Disease, Gender, HistoryRecord, PatientInfo, PredictionResult};
pub use country::{CountryPhoneRule, PhoneInput, COUNTRIES};
pub use form::{PatientForm, ValidationError};
pub use error::{Error, Result};
pub use history::{HistoryCache, KeyValueStore, MemoryStore, HISTORY_KEY, HISTORY_LIMIT};
pub use api::{BackendConfig, PredictOutcome, PredictResponse, ReportRequest};
pub use advisory::{format_advisory, AdvisoryLine, Heading};
pub use recommendation::{recommend, DoctorRecommendation};
pub use session::{Activity, Session, SessionError, Submission, Toast};
