//! Value Objects
//!
//! プロトコルのトークン（ユーザー名・パスワード・チャンネル名）は
//! 空でなく、空白文字・制御文字を含まない文字列として検証されます。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

fn validate_token(kind: &'static str, value: &str) -> Result<(), ValueObjectError> {
    if value.is_empty() {
        return Err(ValueObjectError::Empty(kind));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValueObjectError::InvalidCharacter(kind));
    }
    Ok(())
}

/// Account のユーザー名（一意キー）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_token("username", &value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account のパスワード
///
/// 不透明な秘密値として等値比較のみ行います。ハッシュ化はしません。
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_token("password", &value)?;
        Ok(Self(value))
    }
}

impl TryFrom<String> for Password {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ログにパスワードが出力されないようにする
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// チャンネル名（一意キー）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelName(String);

impl ChannelName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_token("channel name", &value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ChannelName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// SAY で送られるメッセージ本文
///
/// 行の残り全体をそのまま保持します（空白を含んでよく、空でもよい）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.contains(['\n', '\r']) {
            return Err(ValueObjectError::LineBreak);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 接続（Session）の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// UUID v4 で新しい SessionId を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Unix timestamp (JST, milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_accepts_plain_token() {
        // テスト項目: 空白を含まないユーザー名は生成できる
        // given (前提条件):
        let value = "alice".to_string();

        // when (操作):
        let result = Username::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_username_rejects_empty() {
        // テスト項目: 空のユーザー名はエラーになる
        // given (前提条件):
        let value = String::new();

        // when (操作):
        let result = Username::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::Empty("username")));
    }

    #[test]
    fn test_channel_name_rejects_whitespace() {
        // テスト項目: 空白を含むチャンネル名はエラーになる
        // given (前提条件):
        let value = "general chat".to_string();

        // when (操作):
        let result = ChannelName::try_from(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::InvalidCharacter("channel name"))
        );
    }

    #[test]
    fn test_password_rejects_control_characters() {
        // テスト項目: 制御文字を含むパスワードはエラーになる
        // given (前提条件):
        let value = "pw\u{7}".to_string();

        // when (操作):
        let result = Password::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::InvalidCharacter("password"))
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        // テスト項目: パスワードの Debug 出力に平文が含まれない
        // given (前提条件):
        let password = Password::new("hunter2".to_string()).unwrap();

        // when (操作):
        let debug = format!("{:?}", password);

        // then (期待する結果):
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_message_content_keeps_spaces_and_allows_empty() {
        // テスト項目: メッセージ本文は空白をそのまま保持し、空文字列も許可される
        // given (前提条件):
        let with_spaces = "  Here is   the message. ".to_string();

        // when (操作):
        let content = MessageContent::new(with_spaces.clone()).unwrap();
        let empty = MessageContent::new(String::new());

        // then (期待する結果):
        assert_eq!(content.as_str(), with_spaces);
        assert!(empty.is_ok());
    }

    #[test]
    fn test_message_content_rejects_line_break() {
        // テスト項目: 改行を含むメッセージ本文はエラーになる
        // given (前提条件):
        let value = "hello\nRESULT LOGIN 1".to_string();

        // when (操作):
        let result = MessageContent::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::LineBreak));
    }

    #[test]
    fn test_session_id_generate_is_unique() {
        // テスト項目: 生成される SessionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let first = SessionId::generate();
        let second = SessionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
