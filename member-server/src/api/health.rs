//! ヘルスチェックルート
//!
//! | パス | メソッド | 説明 |
//! |------|----------|------|
//! | /health | GET | ヘルスチェック |

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// 状態 (ok | error)
    status: &'static str,
    /// バージョン
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
