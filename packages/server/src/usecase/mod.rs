//! UseCase 層
//!
//! プロトコルの各操作を 1 つのユースケースとして実装します。
//! ユースケースは Repository trait にのみ依存し、具体的な実装には依存しません。

mod create_channel;
mod disconnect_session;
mod error;
mod join_channel;
mod list_channels;
mod login;
mod register_account;
mod send_message;

pub use create_channel::CreateChannelUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{CreateChannelError, JoinError, LoginError, RegisterError, SendMessageError};
pub use join_channel::JoinChannelUseCase;
pub use list_channels::ListChannelsUseCase;
pub use login::LoginUseCase;
pub use register_account::RegisterAccountUseCase;
pub use send_message::SendMessageUseCase;
