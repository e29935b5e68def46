//! Domain errors.

use thiserror::Error;

/// Value Object の生成に失敗したことを表すエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// 空文字列は許可されない
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// 空白文字・制御文字を含むトークンは許可されない
    #[error("{0} must not contain whitespace or control characters")]
    InvalidCharacter(&'static str),

    /// メッセージ本文は 1 行でなければならない
    #[error("message content must not contain line breaks")]
    LineBreak,
}
