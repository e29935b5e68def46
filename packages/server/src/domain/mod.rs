//! ドメイン層
//!
//! チャットサーバーの中核となる型を定義します。
//!
//! - Value Object: `Username`, `Password`, `ChannelName`, `MessageContent`, `SessionId`, `Timestamp`
//! - Entity: `Channel`（メンバー集合とブロードキャスト）, `Session`（接続ごとの状態）
//! - Repository trait: `AccountRepository`, `ChannelRepository`
//!
//! 具体的なストレージ実装は Infrastructure 層が提供します（依存性の逆転）。

mod channel;
mod error;
mod repository;
mod session;
mod value_object;

pub use channel::{Channel, PusherChannel};
pub use error::ValueObjectError;
pub use repository::{AccountRepository, ChannelRepository};
#[cfg(test)]
pub use repository::{MockAccountRepository, MockChannelRepository};
pub use session::Session;
pub use value_object::{ChannelName, MessageContent, Password, SessionId, Timestamp, Username};
