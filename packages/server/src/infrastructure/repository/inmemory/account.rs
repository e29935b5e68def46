//! InMemory Account Repository 実装
//!
//! 登録の「存在確認と挿入」は一つの書き込みロックの中で行うため、
//! 同じユーザー名の並行登録で両方が成功することはありません。

use std::collections::{HashMap, hash_map::Entry};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{AccountRepository, Password, Username};

/// インメモリ Account Repository 実装
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    /// Key: username, Value: password
    accounts: RwLock<HashMap<Username, Password>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録済みアカウント数を取得
    #[cfg(test)]
    pub(crate) async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn register(&self, username: Username, password: Password) -> bool {
        let mut accounts = self.accounts.write().await;
        match accounts.entry(username) {
            Entry::Occupied(entry) => {
                tracing::debug!("Username '{}' is already registered", entry.key());
                false
            }
            Entry::Vacant(entry) => {
                tracing::debug!("Registered username '{}'", entry.key());
                entry.insert(password);
                true
            }
        }
    }

    async fn authenticate(&self, username: &Username, password: &Password) -> bool {
        let accounts = self.accounts.read().await;
        accounts
            .get(username)
            .is_some_and(|stored| stored == password)
    }
}
