//! バックエンドAPI連携

pub mod backend;
