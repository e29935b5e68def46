//! Data Transfer Objects for the line protocol.
//!
//! - `command`: client → server lines (`REGISTER`, `LOGIN`, `CREATE`, `JOIN`, `CHANNELS`, `SAY`)
//! - `reply`: server → client lines (`RESULT ...`, `RECV ...`)

pub mod command;
pub mod reply;

pub use command::{Command, ProtocolError};
pub use reply::{ReceivedMessage, Reply};
