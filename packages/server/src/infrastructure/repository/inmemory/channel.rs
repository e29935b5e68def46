//! InMemory Channel Repository 実装
//!
//! ディレクトリ全体のロックはチャンネルの作成・検索の間だけ保持します。
//! メンバー集合の操作は各 `Channel` 自身のロックで行われるため、
//! 異なるチャンネル同士は競合しません。

use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Channel, ChannelName, ChannelRepository};

/// インメモリ Channel Repository 実装
#[derive(Debug, Default)]
pub struct InMemoryChannelRepository {
    /// Key: channel name, Value: Channel
    channels: RwLock<HashMap<ChannelName, Arc<Channel>>>,
}

impl InMemoryChannelRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChannelRepository for InMemoryChannelRepository {
    async fn create(&self, name: ChannelName) -> bool {
        let mut channels = self.channels.write().await;
        match channels.entry(name) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                let channel = Arc::new(Channel::new(entry.key().clone()));
                entry.insert(channel);
                true
            }
        }
    }

    async fn exists(&self, name: &ChannelName) -> bool {
        self.channels.read().await.contains_key(name)
    }

    async fn get(&self, name: &ChannelName) -> Option<Arc<Channel>> {
        self.channels.read().await.get(name).cloned()
    }

    async fn list(&self) -> Vec<ChannelName> {
        self.channels.read().await.keys().cloned().collect()
    }
}
