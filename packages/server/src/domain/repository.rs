//! Repository trait 定義
//!
//! ドメイン層が必要とする共有ディレクトリ（アカウント・チャンネル）への
//! インターフェースを定義します。具体的な実装は Infrastructure 層が提供します。
//!
//! いずれの操作も呼び出し側から見て全域関数です。制約を満たせば `true`
//! （または状態変更）、満たさなければ `false` を返し、エラーは返しません。

use std::sync::Arc;

use async_trait::async_trait;

use super::{Channel, ChannelName, Password, Username};

/// Account Directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// ユーザー名が未登録なら登録して `true`、登録済みなら `false`
    ///
    /// 同じユーザー名に対する並行呼び出しのうち、`true` を観測するのは一つだけです。
    async fn register(&self, username: Username, password: Password) -> bool;

    /// ユーザー名が存在し、パスワードが一致する場合のみ `true`
    async fn authenticate(&self, username: &Username, password: &Password) -> bool;
}

/// Channel Directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// チャンネル名が未使用なら空のチャンネルを作成して `true`、既存なら `false`
    async fn create(&self, name: ChannelName) -> bool;

    async fn exists(&self, name: &ChannelName) -> bool;

    /// チャンネル名から Channel への参照を取得
    async fn get(&self, name: &ChannelName) -> Option<Arc<Channel>>;

    /// 呼び出し時点のチャンネル名一覧（順序は保証しない）
    async fn list(&self) -> Vec<ChannelName>;
}
