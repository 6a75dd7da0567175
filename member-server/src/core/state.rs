//! サーバー状態

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// サーバー状態 - 全ハンドラで共有されるリソース
///
/// | フィールド | 説明 |
/// |-----------|------|
/// | config | 設定 (不変) |
/// | pool | SQLite 接続プール |
/// | export_lock | エクスポート直列化ロック |
///
/// `export_lock` は確定エクスポートを直列化する。読み出しと削除は同一
/// トランザクション内で行われるが、二重エクスポート (同じレコード集合を
/// 二つのリクエストが同時に読む) はロックで防ぐ。
#[derive(Clone)]
pub struct ServerState {
    /// サーバー設定
    pub config: Config,
    /// SQLite 接続プール
    pub pool: SqlitePool,
    /// エクスポート排他ロック
    pub export_lock: Arc<Mutex<()>>,
}

impl ServerState {
    /// サーバー状態を初期化する
    ///
    /// 1. 作業ディレクトリ構造の作成
    /// 2. データベース接続とマイグレーション
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;
        }

        let db = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            export_lock: Arc::new(Mutex::new(())),
        })
    }
}
