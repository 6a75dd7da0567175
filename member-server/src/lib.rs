//! Member Server - 会員登録・CSV エクスポートサービス
//!
//! # 概要
//!
//! 会員情報の登録・検索・編集・削除と、下流の会員管理システムへ取り込む
//! ための CSV エクスポート (Shift-JIS、エクスポート後に該当レコードを
//! 削除) を提供する。
//!
//! # モジュール構成
//!
//! ```text
//! member-server/src/
//! ├── core/     # 設定、状態、サーバー
//! ├── api/      # HTTP ルートとハンドラ
//! ├── db/       # データベース層 (SQLite + リポジトリ)
//! ├── export/   # エクスポート・パージのワークフロー
//! └── utils/    # エラー、ログ、バリデーション
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod export;
pub mod utils;

// Re-export 公共型
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Set up process environment: dotenv, work directories, logging.
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;
    std::fs::create_dir_all(config.export_dir())?;

    let level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(level.as_deref(), log_dir.to_str());

    Ok(())
}
