//! TCP line-protocol chat server implementation.

mod error;
mod handler;
mod processor;
mod server;
mod signal;
pub mod state;

pub use error::ConnectionError;
pub use processor::CommandProcessor;
pub use server::Server;
pub use state::AppState;
