//! サーバーの実行ロジック
//!
//! 待ち受けソケットで接続を受け付け、接続ごとにハンドラータスクを起動します。

use std::{future::Future, io::Write, sync::Arc};

use tokio::net::TcpListener;

use crate::error::ServerError;

use super::{handler::handle_connection, signal::shutdown_signal, state::AppState};

/// TCP 行プロトコルのチャットサーバー
///
/// インスタンスごとに `AppState` を通じて Account Directory と Channel Directory を
/// 持ち、別のインスタンスと状態を共有することはありません。
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(account_repository, channel_repository);
/// let server = Server::new(Arc::new(state));
/// server.run("127.0.0.1", 6667).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// `host:port` で待ち受け、Ctrl+C / SIGTERM を受けるまで接続を処理する
    ///
    /// 待ち受けを開始すると、実際にバインドしたアドレスを stdout に出力します
    /// （ポート 0 を指定した呼び出し側が割り当てられたポートを知るため）。
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address.
    pub async fn run(self, host: &str, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        println!("{}", local_addr);
        std::io::stdout().flush()?;

        tracing::info!("Chat server listening on {}", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// `shutdown` が完了するまで `listener` で接続を受け付ける
    ///
    /// 実行中の接続タスクの終了は待ちません。
    pub async fn serve(self, listener: TcpListener, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            tracing::warn!("Failed to accept connection: {}", e);
                            continue;
                        }
                    };
                    tracing::debug!("Accepted connection from {}", peer);

                    let state = self.state.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, peer, state).await {
                            tracing::warn!("Connection from {} ended with error: {}", peer, e);
                        }
                    });
                }
            }
        }
    }
}
