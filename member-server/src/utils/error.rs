//! 統一エラー処理
//!
//! アプリ共通のエラー型とレスポンス構造:
//! - [`AppError`] - アプリケーションエラー列挙
//! - [`AppResponse`] - API レスポンス構造
//!
//! # エラーコード
//!
//! | コード | 分類 |
//! |--------|------|
//! | E0002 | バリデーションエラー |
//! | E0003 | リソース未検出 |
//! | E0005 | 業務ルール違反 |
//! | E9001 | 内部エラー |
//! | E9002 | データベースエラー |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// API 統一レスポンス構造
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// エラーコード (E0000 = 成功)
    pub code: String,
    /// メッセージ
    pub message: String,
    /// レスポンスデータ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// アプリケーションエラー列挙
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    /// リソース未検出 (404)
    NotFound(String),

    #[error("Validation failed: {0}")]
    /// バリデーション失敗 (400)
    Validation(String),

    #[error("Business rule violation: {0}")]
    /// 業務ルール違反 (422)
    BusinessRule(String),

    #[error("Database error: {0}")]
    /// データベースエラー (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部エラー (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.as_str()),
            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "E0005", msg.as_str())
            }
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9002", "Database error")
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error",
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message: message.to_string(),
            data: None,
        });

        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: message.into(),
        data: Some(data),
    })
}
