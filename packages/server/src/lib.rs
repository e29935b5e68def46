//! Hiroba: a line-protocol chat server.
//!
//! Clients register, log in, create or join named channels and broadcast
//! single-line messages to every member of a channel.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub use error::ServerError;
