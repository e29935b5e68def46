//! UseCase: チャンネル参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChannelUseCase::execute() メソッド
//! - Session のキャッシュと Channel のメンバー集合が双方向に更新されること
//!
//! ### なぜこのテストが必要か
//! - 参加の前提条件（ログイン済み・チャンネル存在・未参加）を全て満たした場合のみ成功すること
//! - 二重参加が Session 側と Channel 側の両方で防がれること
//!
//! ### どのような状況を想定しているか
//! - 正常系：ログイン済みセッションの参加
//! - 異常系：未ログイン、存在しないチャンネル、二重参加

use std::sync::Arc;

use crate::domain::{ChannelName, ChannelRepository, Session};

use super::error::JoinError;

/// チャンネル参加のユースケース
pub struct JoinChannelUseCase {
    /// Repository（Channel Directory の抽象化）
    channel_repository: Arc<dyn ChannelRepository>,
}

impl JoinChannelUseCase {
    pub fn new(channel_repository: Arc<dyn ChannelRepository>) -> Self {
        Self { channel_repository }
    }

    /// チャンネル参加を実行
    ///
    /// 1. ログイン済みか確認
    /// 2. Session のキャッシュで未参加か確認
    /// 3. Channel Directory からチャンネルを取得
    /// 4. Channel のメンバー集合に追加（二重参加の第二のガード）
    /// 5. Session のキャッシュに追加
    pub async fn execute(
        &self,
        session: &mut Session,
        channel_name: ChannelName,
    ) -> Result<(), JoinError> {
        if !session.is_authenticated() {
            return Err(JoinError::NotAuthenticated);
        }
        if session.has_joined(&channel_name) {
            return Err(JoinError::AlreadyMember(channel_name.as_str().to_string()));
        }

        let channel = self
            .channel_repository
            .get(&channel_name)
            .await
            .ok_or_else(|| JoinError::ChannelNotFound(channel_name.as_str().to_string()))?;

        if !channel.join(session.id(), session.pusher().clone()).await {
            return Err(JoinError::AlreadyMember(channel_name.as_str().to_string()));
        }
        session.record_join(channel_name);

        Ok(())
    }
}
