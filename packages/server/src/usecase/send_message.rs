//! UseCase: メッセージ送信処理（SAY）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者を含むチャンネルの全メンバーへの RECV のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 参加していないチャンネルへの送信が誰にも届かないこと
//! - 参加判定が Session のキャッシュだけで行われること
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みチャンネルへの送信
//! - 異常系：未ログイン、未参加
//! - エッジケース：キャッシュにはあるが Directory から取得できないチャンネル

use std::sync::Arc;

use crate::domain::{ChannelName, ChannelRepository, Session};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（Channel Directory の抽象化）
    channel_repository: Arc<dyn ChannelRepository>,
}

impl SendMessageUseCase {
    pub fn new(channel_repository: Arc<dyn ChannelRepository>) -> Self {
        Self { channel_repository }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 送信者のセッション
    /// * `channel_name` - 送信先のチャンネル名
    /// * `message` - 配送する行（DTO 層で生成された `RECV` 行）
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 行をキューイングできたメンバー数
    /// * `Err(SendMessageError)` - 前提条件を満たさない
    ///
    /// 結果は前提条件のチェックのみを反映し、各メンバーへの配送の成否は含みません。
    pub async fn execute(
        &self,
        session: &Session,
        channel_name: &ChannelName,
        message: String,
    ) -> Result<usize, SendMessageError> {
        if !session.is_authenticated() {
            return Err(SendMessageError::NotAuthenticated);
        }
        if !session.has_joined(channel_name) {
            return Err(SendMessageError::NotMember(channel_name.as_str().to_string()));
        }

        // Session はチャンネル名だけをキャッシュしているので Directory から参照を引き直す
        let channel = self
            .channel_repository
            .get(channel_name)
            .await
            .ok_or_else(|| SendMessageError::ChannelNotFound(channel_name.as_str().to_string()))?;

        Ok(channel.broadcast(&message, None).await)
    }
}
