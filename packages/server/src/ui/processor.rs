//! コマンドのディスパッチ
//!
//! 認識されたコマンドは必ず 1 つの `RESULT` 行を返します。
//! 失敗の理由はログにのみ出力し、ワイヤー上では `0` になります。

use std::sync::Arc;

use crate::{
    domain::Session,
    infrastructure::dto::{Command, ReceivedMessage, Reply},
    usecase::SendMessageError,
};

use super::state::AppState;

/// 解析済みのコマンドをサーバーインスタンスのユースケースに振り分ける
#[derive(Clone)]
pub struct CommandProcessor {
    state: Arc<AppState>,
}

impl CommandProcessor {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn process(&self, session: &mut Session, command: Command) -> Reply {
        let command_name = command.name();

        match command {
            Command::Register { username, password } => {
                let result = self
                    .state
                    .register_account_usecase
                    .execute(username, password)
                    .await;
                Reply::Register {
                    success: succeeded(session, command_name, result),
                }
            }
            Command::Login { username, password } => {
                let result = self
                    .state
                    .login_usecase
                    .execute(session, username, password)
                    .await;
                Reply::Login {
                    success: succeeded(session, command_name, result),
                }
            }
            Command::Create { channel } => {
                // 未ログインでも作成できる
                let result = self
                    .state
                    .create_channel_usecase
                    .execute(channel.clone())
                    .await;
                Reply::Create {
                    success: succeeded(session, command_name, result),
                    channel,
                }
            }
            Command::Join { channel } => {
                let result = self
                    .state
                    .join_channel_usecase
                    .execute(session, channel.clone())
                    .await;
                Reply::Join {
                    success: succeeded(session, command_name, result),
                    channel,
                }
            }
            Command::Channels => Reply::Channels {
                channels: self.state.list_channels_usecase.execute().await,
            },
            Command::Say { channel, content } => {
                // RECV 行は DTO 層で組み立ててからユースケースに渡す
                let message = session.username().map(|from| {
                    ReceivedMessage {
                        from,
                        channel: &channel,
                        content: &content,
                    }
                    .to_string()
                });
                let result = match message {
                    Some(message) => {
                        self.state
                            .send_message_usecase
                            .execute(session, &channel, message)
                            .await
                    }
                    None => Err(SendMessageError::NotAuthenticated),
                };
                if let Ok(delivered) = &result {
                    tracing::debug!(
                        "Session '{}' said to '{}' ({} recipients)",
                        session.id(),
                        channel,
                        delivered
                    );
                }
                Reply::Say {
                    success: succeeded(session, command_name, result),
                    channel,
                }
            }
        }
    }
}

fn succeeded<T, E: std::fmt::Display>(
    session: &Session,
    command_name: &str,
    result: Result<T, E>,
) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(
                "{} rejected for session '{}' ({:?}): {}",
                command_name,
                session.id(),
                session.state(),
                e
            );
            false
        }
    }
}
