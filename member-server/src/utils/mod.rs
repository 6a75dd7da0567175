//! 工具モジュール - 共通のユーティリティ
//!
//! - [`AppError`] / [`AppResponse`] - エラー型とレスポンス構造
//! - [`validation`] - 入力バリデーション
//! - [`logger`] - ログ設定

pub mod error;
pub mod logger;
pub mod result;
pub mod validation;

pub use error::{AppError, AppResponse};
pub use error::{ok, ok_with_message};
pub use result::AppResult;
