//! UseCase: チャンネル一覧取得処理

use std::sync::Arc;

use crate::domain::{ChannelName, ChannelRepository};

/// チャンネル一覧取得のユースケース
pub struct ListChannelsUseCase {
    /// Repository（Channel Directory の抽象化）
    channel_repository: Arc<dyn ChannelRepository>,
}

impl ListChannelsUseCase {
    pub fn new(channel_repository: Arc<dyn ChannelRepository>) -> Self {
        Self { channel_repository }
    }

    /// 呼び出し時点のチャンネル名一覧を返す（順序は保証しない）
    pub async fn execute(&self) -> Vec<ChannelName> {
        self.channel_repository.list().await
    }
}
