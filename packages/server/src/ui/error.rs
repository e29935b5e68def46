//! Connection-level errors.

use thiserror::Error;

/// A failure that ends one client connection.
///
/// 認識できない行（長すぎる行・不正な UTF-8 を含む）はここには含まれず、
/// 接続は継続します。
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
