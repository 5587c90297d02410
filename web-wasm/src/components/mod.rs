//! 画面コンポーネント

pub mod header;
pub mod patient_form;
pub mod upload_area;
pub mod progress_bar;
pub mod result_panel;
pub mod history_modal;
pub mod info_modal;
pub mod toast;
pub mod footer;
