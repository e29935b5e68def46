//! Server state shared by every connection.

use std::sync::Arc;

use crate::{
    domain::{AccountRepository, ChannelRepository},
    usecase::{
        CreateChannelUseCase, DisconnectSessionUseCase, JoinChannelUseCase, ListChannelsUseCase,
        LoginUseCase, RegisterAccountUseCase, SendMessageUseCase,
    },
};

/// Shared application state
///
/// Account Directory と Channel Directory はサーバーインスタンスごとに 1 つで、
/// 全ての接続タスクがこの構造体を `Arc` で共有します。
pub struct AppState {
    /// RegisterAccountUseCase（アカウント登録のユースケース）
    pub register_account_usecase: Arc<RegisterAccountUseCase>,
    /// LoginUseCase（ログインのユースケース）
    pub login_usecase: Arc<LoginUseCase>,
    /// CreateChannelUseCase（チャンネル作成のユースケース）
    pub create_channel_usecase: Arc<CreateChannelUseCase>,
    /// JoinChannelUseCase（チャンネル参加のユースケース）
    pub join_channel_usecase: Arc<JoinChannelUseCase>,
    /// ListChannelsUseCase（チャンネル一覧取得のユースケース）
    pub list_channels_usecase: Arc<ListChannelsUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// DisconnectSessionUseCase（セッション切断のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
}

impl AppState {
    /// Repository から全てのユースケースを組み立てる
    pub fn new(
        account_repository: Arc<dyn AccountRepository>,
        channel_repository: Arc<dyn ChannelRepository>,
    ) -> Self {
        Self {
            register_account_usecase: Arc::new(RegisterAccountUseCase::new(
                account_repository.clone(),
            )),
            login_usecase: Arc::new(LoginUseCase::new(account_repository)),
            create_channel_usecase: Arc::new(CreateChannelUseCase::new(
                channel_repository.clone(),
            )),
            join_channel_usecase: Arc::new(JoinChannelUseCase::new(channel_repository.clone())),
            list_channels_usecase: Arc::new(ListChannelsUseCase::new(channel_repository.clone())),
            send_message_usecase: Arc::new(SendMessageUseCase::new(channel_repository.clone())),
            disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(
                channel_repository,
            )),
        }
    }
}
