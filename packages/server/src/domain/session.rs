//! Session エンティティ
//!
//! 1 つの接続に紐づく認証状態とチャンネル参加状態。
//! 接続ハンドラーが排他的に所有し、他のタスクと共有されることはありません。

use std::collections::HashSet;

use super::{ChannelName, PusherChannel, SessionId, Timestamp, Username};

/// プロトコル上の認証状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionState {
    /// 初期状態
    Unauthenticated,
    /// LOGIN 成功後（接続が続く限りこの状態のまま）
    Authenticated,
}

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    username: Option<Username>,
    /// 参加済みチャンネル名のキャッシュ（Channel 側のメンバー集合が正）
    joined_channels: HashSet<ChannelName>,
    /// このセッション宛てのメッセージ送信用チャンネル
    pusher: PusherChannel,
    connected_at: Timestamp,
}

impl Session {
    pub fn new(pusher: PusherChannel, connected_at: Timestamp) -> Self {
        Self {
            id: SessionId::generate(),
            username: None,
            joined_channels: HashSet::new(),
            pusher,
            connected_at,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    pub(crate) fn state(&self) -> SessionState {
        match self.username {
            Some(_) => SessionState::Authenticated,
            None => SessionState::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// ユーザー名を束縛する
    ///
    /// 束縛は一度だけ行われます。既に認証済みの場合は何もせず `false` を返します。
    pub fn bind_username(&mut self, username: Username) -> bool {
        if self.username.is_some() {
            return false;
        }
        self.username = Some(username);
        true
    }

    pub fn has_joined(&self, channel: &ChannelName) -> bool {
        self.joined_channels.contains(channel)
    }

    pub fn record_join(&mut self, channel: ChannelName) -> bool {
        self.joined_channels.insert(channel)
    }

    #[cfg(test)]
    pub(crate) fn joined_channels(&self) -> impl Iterator<Item = &ChannelName> {
        self.joined_channels.iter()
    }

    /// 参加済みチャンネルのキャッシュを空にして中身を返す（切断処理用）
    pub fn take_joined_channels(&mut self) -> HashSet<ChannelName> {
        std::mem::take(&mut self.joined_channels)
    }

    pub fn pusher(&self) -> &PusherChannel {
        &self.pusher
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }
}
