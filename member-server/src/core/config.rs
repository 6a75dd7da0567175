//! サーバー設定
//!
//! # 環境変数
//!
//! | 環境変数 | デフォルト | 説明 |
//! |----------|-----------|------|
//! | WORK_DIR | ./data | 作業ディレクトリ (DB・ログ・エクスポート) |
//! | HTTP_PORT | 3000 | HTTP サービスポート |
//! | ENVIRONMENT | development | 実行環境 |
//!
//! # 例
//!
//! ```ignore
//! WORK_DIR=/var/lib/member-server HTTP_PORT=8080 cargo run
//! ```

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// 作業ディレクトリ
    pub work_dir: String,
    /// HTTP API ポート
    pub http_port: u16,
    /// 実行環境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 環境変数から設定を読み込む (未設定ならデフォルト値)
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// データベースファイルのパス
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database").join("member.db")
    }

    /// CSV エクスポートの保存先
    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("exports")
    }

    /// ログの保存先
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
