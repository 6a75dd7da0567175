//! Export handlers - 会員データ取込用 CSV download
//!
//! One endpoint drives the whole workflow. A request without a decision
//! returns the current record set for the confirmation prompt; "confirm"
//! returns the Shift-JIS artifact as an attachment and purges the store;
//! "cancel" and the empty-set case return a flash-style leveled message.

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::export::workflow::{self, ExportDecision, ExportOutcome, MSG_CANCELLED, MSG_EMPTY};
use crate::utils::{AppError, AppResult};
use shared::models::MemberView;

/// POST /api/export request body
#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    /// null → 確認画面, "confirm" → 実行, "cancel" → 中止
    #[serde(default)]
    pub decision: Option<ExportDecision>,
}

/// JSON response for the non-download outcomes
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportResponse {
    AwaitingConfirmation { members: Vec<MemberView> },
    Cancelled { level: &'static str, message: &'static str },
    EmptySet { level: &'static str, message: &'static str },
}

/// POST /api/export - エクスポート実行・確認・中止
pub async fn export(
    State(state): State<ServerState>,
    payload: Option<Json<ExportRequest>>,
) -> AppResult<Response> {
    let decision = payload.and_then(|Json(req)| req.decision);

    let outcome = workflow::run(
        &state.pool,
        &state.config.export_dir(),
        &state.export_lock,
        decision,
    )
    .await?;

    match outcome {
        ExportOutcome::AwaitingConfirmation(members) => Ok(Json(
            ExportResponse::AwaitingConfirmation {
                members: members.iter().map(|m| m.to_view()).collect(),
            },
        )
        .into_response()),
        ExportOutcome::Cancelled => Ok(Json(ExportResponse::Cancelled {
            level: "info",
            message: MSG_CANCELLED,
        })
        .into_response()),
        ExportOutcome::EmptySet => Ok(Json(ExportResponse::EmptySet {
            level: "warning",
            message: MSG_EMPTY,
        })
        .into_response()),
        ExportOutcome::Exported(artifact) => {
            // ファイル名は取込ツール既定の日本語名 (obs-text は from_bytes 経由)
            let disposition = HeaderValue::from_bytes(
                format!("attachment; filename=\"{}\"", artifact.filename).as_bytes(),
            )
            .map_err(|e| AppError::internal(format!("content-disposition: {e}")))?;

            Ok((
                [
                    (
                        header::CONTENT_TYPE,
                        HeaderValue::from_static("text/csv; charset=Shift_JIS"),
                    ),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                artifact.bytes,
            )
                .into_response())
        }
    }
}
