use member_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 環境設定 (dotenv, 作業ディレクトリ, ログ)
    setup_environment()?;

    tracing::info!("Member server starting...");

    // 2. 設定読み込み
    let config = Config::from_env();

    // 3. サーバー状態の初期化 (DB 接続・マイグレーション)
    let state = ServerState::initialize(&config)
        .await
        .map_err(|e| anyhow::anyhow!("initialization failed: {e}"))?;

    // 4. HTTP サーバー起動
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
