//! Repository 実装
//!
//! - `inmemory`: HashMap を使ったプロセス内ストレージ（再起動で消える）

pub mod inmemory;

pub use inmemory::{InMemoryAccountRepository, InMemoryChannelRepository};
