//! API ルートモジュール
//!
//! # 構成
//!
//! - [`health`] - 健康チェック
//! - [`members`] - 会員 CRUD
//! - [`export`] - 会員データ CSV エクスポート

pub mod export;
pub mod health;
pub mod members;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
