//! クライアント接続ハンドラー
//!
//! 接続ごとに 1 タスクです。タスクが `Session` を所有し、ソケットから読んだ行と
//! チャンネルのブロードキャストで inbox に積まれた行の 2 つを多重化します。

use std::{net::SocketAddr, sync::Arc};

use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{net::TcpStream, sync::mpsc};

use crate::{
    domain::{Session, Timestamp},
    infrastructure::{
        dto::Command,
        transport::{LineStream, frame_lines},
    },
    ui::{error::ConnectionError, processor::CommandProcessor, state::AppState},
};
use hiroba_shared::time::{elapsed_millis, get_jst_timestamp, timestamp_to_jst_rfc3339};

/// 切断されるか I/O エラーが起きるまで 1 クライアントを処理する
///
/// 終了理由に関わらず、参加済みの全チャンネルからの退出（切断処理）を行います。
pub async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    state: Arc<AppState>,
) -> Result<(), ConnectionError> {
    // Create a channel for this session to receive broadcasts
    let (tx, mut inbox) = mpsc::unbounded_channel();
    let mut session = Session::new(tx, Timestamp::new(get_jst_timestamp()));
    let processor = CommandProcessor::new(state.clone());
    let mut framed = frame_lines(stream);

    tracing::info!(
        "Session '{}' opened for {} at {}",
        session.id(),
        peer,
        timestamp_to_jst_rfc3339(session.connected_at().value()).unwrap_or_default()
    );

    let result = session_loop(&mut framed, &mut inbox, &mut session, &processor).await;

    let left = state
        .disconnect_session_usecase
        .execute(&mut session)
        .await;
    tracing::info!(
        "Session '{}' closed for {} (left {} channel(s), lifetime {} ms)",
        session.id(),
        peer,
        left,
        elapsed_millis(session.connected_at().value())
    );

    result
}

async fn session_loop(
    framed: &mut LineStream,
    inbox: &mut mpsc::UnboundedReceiver<String>,
    session: &mut Session,
    processor: &CommandProcessor,
) -> Result<(), ConnectionError> {
    loop {
        tokio::select! {
            // Broadcast lines from channels this session has joined
            Some(line) = inbox.recv() => {
                framed.send(line).await?;
            }

            // Lines from the client
            frame = framed.next() => {
                let frame = match frame {
                    Some(frame) => frame?,
                    None => {
                        tracing::debug!("Session '{}' closed by peer", session.id());
                        return Ok(());
                    }
                };

                let command = match frame.and_then(|line| line.parse::<Command>()) {
                    Ok(command) => command,
                    Err(e) => {
                        // Unrecognized lines get no reply
                        tracing::warn!("Session '{}' sent an unrecognized line: {}", session.id(), e);
                        continue;
                    }
                };
                tracing::debug!("Session '{}' issued {}", session.id(), command.name());

                let reply = processor.process(session, command).await;

                // A SAY queues the sender's own RECV before the reply is rendered
                while let Ok(pending) = inbox.try_recv() {
                    framed.feed(pending).await?;
                }
                framed.send(reply.to_string()).await?;
            }
        }
    }
}
