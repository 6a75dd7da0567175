//! コアモジュール - サーバー設定と状態
//!
//! - [`Config`] - サーバー設定
//! - [`ServerState`] - サーバー状態
//! - [`Server`] - HTTP サーバー

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
