//! UseCase: セッション切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - 切断時に参加済みの全チャンネルからセッションが削除されること
//!
//! ### なぜこのテストが必要か
//! - 切断後のブロードキャストに切断済みセッションが含まれないこと
//! - Session のキャッシュと Channel のメンバー集合の対応が崩れないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数チャンネルに参加したセッションの切断
//! - エッジケース：どのチャンネルにも参加していないセッションの切断

use std::sync::Arc;

use crate::domain::{ChannelRepository, Session};

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Repository（Channel Directory の抽象化）
    channel_repository: Arc<dyn ChannelRepository>,
}

impl DisconnectSessionUseCase {
    pub fn new(channel_repository: Arc<dyn ChannelRepository>) -> Self {
        Self { channel_repository }
    }

    /// セッション切断を実行
    ///
    /// Session のキャッシュを空にし、キャッシュにあった全チャンネルのメンバー集合から
    /// セッションを削除します。
    ///
    /// # Returns
    ///
    /// 実際にメンバー集合から削除されたチャンネル数
    pub async fn execute(&self, session: &mut Session) -> usize {
        let session_id = session.id();
        let mut left = 0;

        for channel_name in session.take_joined_channels() {
            match self.channel_repository.get(&channel_name).await {
                Some(channel) => {
                    if channel.leave(&session_id).await {
                        left += 1;
                    }
                }
                None => {
                    tracing::warn!(
                        "Channel '{}' not found while disconnecting session '{}'",
                        channel_name,
                        session_id
                    );
                }
            }
        }

        left
    }
}
