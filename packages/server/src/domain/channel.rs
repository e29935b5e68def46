//! Channel エンティティ
//!
//! チャンネルは現在のメンバー集合を自分自身のロックで保護します。
//! `join` / `leave`（書き込み）と `broadcast`（読み込み）は同じチャンネル上で
//! 排他され、ブロードキャストは常に一貫したメンバーのスナップショットに対して行われます。
//! 異なるチャンネル同士がロックを競合することはありません。

use std::collections::{HashMap, hash_map::Entry};

use tokio::sync::{RwLock, mpsc};

use super::{ChannelName, SessionId};

/// Session へメッセージを届けるための送信チャンネル
///
/// 受信側は接続ハンドラーが保持し、ソケットへの書き込みを行います。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 名前付きのブロードキャストグループ
#[derive(Debug)]
pub struct Channel {
    name: ChannelName,
    /// Key: SessionId, Value: そのセッションへの PusherChannel
    members: RwLock<HashMap<SessionId, PusherChannel>>,
}

impl Channel {
    /// 空のチャンネルを作成
    pub fn new(name: ChannelName) -> Self {
        Self {
            name,
            members: RwLock::new(HashMap::new()),
        }
    }

    /// メンバーを追加
    ///
    /// 既にメンバーである場合は何もせず `false` を返します。
    pub async fn join(&self, session_id: SessionId, pusher: PusherChannel) -> bool {
        let mut members = self.members.write().await;
        match members.entry(session_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(pusher);
                true
            }
        }
    }

    /// メンバーを削除（冪等）
    ///
    /// 実際に削除した場合のみ `true` を返します。
    pub async fn leave(&self, session_id: &SessionId) -> bool {
        self.members.write().await.remove(session_id).is_some()
    }

    #[cfg(test)]
    pub(crate) async fn contains(&self, session_id: &SessionId) -> bool {
        self.members.read().await.contains_key(session_id)
    }

    #[cfg(test)]
    pub(crate) async fn member_count(&self) -> usize {
        self.members.read().await.len()
    }

    /// 現在のメンバー全員にメッセージを届ける
    ///
    /// 読み込みロックを保持したまま 1 回のパスで全メンバーに送信します。
    /// 既に切断されたメンバーへの送信失敗はログに残してスキップし、
    /// 残りのメンバーへの配送は継続します。
    ///
    /// 送信は unbounded channel へのキューイングのみで、ソケット書き込みを
    /// 待たないため、遅い受信者がロックを保持し続けることはありません。
    ///
    /// # Returns
    ///
    /// キューイングに成功したメンバー数
    pub async fn broadcast(&self, content: &str, exclude: Option<&SessionId>) -> usize {
        let members = self.members.read().await;
        let mut delivered = 0;

        for (session_id, pusher) in members.iter() {
            if exclude == Some(session_id) {
                continue;
            }
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = pusher.send(content.to_string()) {
                tracing::warn!(
                    "Failed to push message to session '{}' in channel '{}': {}",
                    session_id,
                    self.name,
                    e
                );
            } else {
                delivered += 1;
            }
        }

        tracing::debug!(
            "Broadcasted to {}/{} member(s) of channel '{}'",
            delivered,
            members.len(),
            self.name
        );
        delivered
    }
}
