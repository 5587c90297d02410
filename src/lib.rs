//! Chest X-ray Disease Detection CLI
//!
//! ブラウザ版と同じ共通ロジック（xray-common）で予測バックエンドを呼び出す。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod preprocess;
pub mod render;
