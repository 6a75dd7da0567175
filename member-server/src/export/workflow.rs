//! Export-and-purge workflow
//!
//! States: `AwaitingConfirmation → {Exporting → Purged} | Cancelled`
//!
//! Without an explicit decision the workflow only surfaces the current
//! record set (idempotent, side-effect free). On confirm, "read current
//! set → build artifact → delete that exact set" runs under an exclusive
//! lock and inside a single transaction, so two concurrent confirmed
//! exports can never both see the same rows. Deletion happens only after
//! the artifact is fully built and persisted; any construction failure
//! rolls back with nothing deleted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::csv::{EXPORT_FILENAME, build_artifact};
use super::ExportError;
use crate::db::repository::member;
use shared::models::Member;

/// 空データ警告メッセージ
pub const MSG_EMPTY: &str = "エクスポートするデータがありません。";
/// キャンセル通知メッセージ
pub const MSG_CANCELLED: &str = "エクスポートをキャンセルしました。";

/// Explicit confirm/cancel signal carried by the export request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportDecision {
    Confirm,
    Cancel,
}

/// The downloadable result of a confirmed export
#[derive(Debug)]
pub struct ExportArtifact {
    pub filename: &'static str,
    /// Shift-JIS bytes (header + data rows)
    pub bytes: Vec<u8>,
    /// Number of records exported and purged
    pub exported: usize,
}

/// Workflow outcome, mapped to an HTTP response by the API layer
#[derive(Debug)]
pub enum ExportOutcome {
    /// No decision yet - full record set for the confirmation prompt
    AwaitingConfirmation(Vec<Member>),
    /// Confirmed: artifact built, records purged
    Exported(ExportArtifact),
    /// Confirmed against an empty store - warning, no side effects
    EmptySet,
    /// Explicit cancel - no side effects
    Cancelled,
}

/// Run one pass of the workflow.
///
/// `lock` serializes confirmed exports; it lives in the server state so
/// every request shares the same one.
pub async fn run(
    pool: &SqlitePool,
    export_dir: &Path,
    lock: &Mutex<()>,
    decision: Option<ExportDecision>,
) -> Result<ExportOutcome, ExportError> {
    match decision {
        None => {
            // 確認画面用の全件読み出し (副作用なし)
            let mut conn = pool.acquire().await?;
            let members = member::find_all_for_export(&mut conn).await?;
            Ok(ExportOutcome::AwaitingConfirmation(members))
        }
        Some(ExportDecision::Cancel) => {
            info!("Member export cancelled by operator");
            Ok(ExportOutcome::Cancelled)
        }
        Some(ExportDecision::Confirm) => {
            let _guard = lock.lock().await;
            let mut tx = pool.begin().await?;

            let members = member::find_all_for_export(&mut tx).await?;
            if members.is_empty() {
                warn!("Member export confirmed against an empty store");
                return Ok(ExportOutcome::EmptySet);
            }

            let today = chrono::Local::now().date_naive();
            let bytes = build_artifact(&members, today)?;

            // Keep a server-side copy; an IO failure here aborts before
            // any deletion.
            std::fs::create_dir_all(export_dir)?;
            std::fs::write(export_dir.join(EXPORT_FILENAME), &bytes)?;

            let ids: Vec<i64> = members.iter().map(|m| m.id).collect();
            let deleted = member::delete_by_ids(&mut tx, &ids).await?;
            tx.commit().await?;

            info!(
                exported = members.len(),
                deleted, "Member export complete, store purged"
            );

            Ok(ExportOutcome::Exported(ExportArtifact {
                filename: EXPORT_FILENAME,
                bytes,
                exported: members.len(),
            }))
        }
    }
}
