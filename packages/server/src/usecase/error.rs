//! UseCase 層のエラー定義
//!
//! 前提条件を満たさなかった理由を表します。ワイヤー上ではどれも
//! `RESULT ... 0` になり、理由はログにのみ出力されます。

use thiserror::Error;

/// アカウント登録のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("username '{0}' is already registered")]
    UsernameTaken(String),
}

/// ログインのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("session is already logged in as '{0}'")]
    AlreadyAuthenticated(String),

    #[error("invalid username or password")]
    InvalidCredentials,
}

/// チャンネル作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateChannelError {
    #[error("channel '{0}' already exists")]
    AlreadyExists(String),
}

/// チャンネル参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("session is not logged in")]
    NotAuthenticated,

    #[error("channel '{0}' does not exist")]
    ChannelNotFound(String),

    #[error("session is already a member of channel '{0}'")]
    AlreadyMember(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("session is not logged in")]
    NotAuthenticated,

    #[error("session has not joined channel '{0}'")]
    NotMember(String),

    #[error("channel '{0}' does not exist")]
    ChannelNotFound(String),
}
