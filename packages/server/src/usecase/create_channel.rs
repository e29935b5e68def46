//! UseCase: チャンネル作成処理

use std::sync::Arc;

use crate::domain::{ChannelName, ChannelRepository};

use super::error::CreateChannelError;

/// チャンネル作成のユースケース
pub struct CreateChannelUseCase {
    /// Repository（Channel Directory の抽象化）
    channel_repository: Arc<dyn ChannelRepository>,
}

impl CreateChannelUseCase {
    pub fn new(channel_repository: Arc<dyn ChannelRepository>) -> Self {
        Self { channel_repository }
    }

    /// チャンネル作成を実行
    ///
    /// ログイン状態に関係なく実行できます。作成者は自動では参加しません。
    pub async fn execute(&self, channel: ChannelName) -> Result<(), CreateChannelError> {
        let name = channel.as_str().to_string();
        if self.channel_repository.create(channel).await {
            Ok(())
        } else {
            Err(CreateChannelError::AlreadyExists(name))
        }
    }
}
