//! クライアントのコマンド行の解析
//!
//! トークンは空白の連続で区切ります（先頭の空白は無視）。`SAY` のみ例外で、
//! チャンネル名までは他のコマンドと同じ規則で読み、チャンネル名の直後の
//! 空白 1 文字を区切りとして、それ以降の行の残りをメッセージとしてそのまま保持します。
//!
//! - `SAY  general hi` → チャンネル `general`、メッセージ `hi`
//! - `SAY general  hi` → チャンネル `general`、メッセージ ` hi`
//! - `SAY general ` → チャンネル `general`、空のメッセージ
//! - `SAY general` → 区切りが無いため認識されない

use std::str::FromStr;

use thiserror::Error;

use crate::domain::{ChannelName, MessageContent, Password, Username, ValueObjectError};

/// 認識されたクライアントコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register {
        username: Username,
        password: Password,
    },
    Login {
        username: Username,
        password: Password,
    },
    Create {
        channel: ChannelName,
    },
    Join {
        channel: ChannelName,
    },
    Channels,
    Say {
        channel: ChannelName,
        content: MessageContent,
    },
}

/// 行がコマンドとして認識されなかった理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("empty line")]
    EmptyLine,

    #[error("line exceeds {0} bytes")]
    LineTooLong(usize),

    #[error("line is not valid UTF-8")]
    InvalidEncoding,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("{command} expects {expected} argument(s), got {actual}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("SAY expects a channel followed by a message")]
    MissingMessage,

    #[error(transparent)]
    InvalidToken(#[from] ValueObjectError),
}

impl Command {
    /// ワイヤー上のコマンド語
    pub fn name(&self) -> &'static str {
        match self {
            Self::Register { .. } => "REGISTER",
            Self::Login { .. } => "LOGIN",
            Self::Create { .. } => "CREATE",
            Self::Join { .. } => "JOIN",
            Self::Channels => "CHANNELS",
            Self::Say { .. } => "SAY",
        }
    }
}

fn expect_args<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], ProtocolError> {
    <[&'a str; N]>::try_from(args).map_err(|_| ProtocolError::WrongArity {
        command,
        expected: N,
        actual: args.len(),
    })
}

fn parse_say(line: &str) -> Result<Command, ProtocolError> {
    let (_, rest) = line
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or(ProtocolError::MissingMessage)?;
    let (channel, content) = rest
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or(ProtocolError::MissingMessage)?;

    Ok(Command::Say {
        channel: ChannelName::new(channel.to_string())?,
        content: MessageContent::new(content.to_string())?,
    })
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let word = tokens.next().ok_or(ProtocolError::EmptyLine)?;
        if word == "SAY" {
            return parse_say(line);
        }
        let args: Vec<&str> = tokens.collect();

        let command = match word {
            "REGISTER" => {
                let [username, password] = expect_args::<2>("REGISTER", &args)?;
                Self::Register {
                    username: Username::new(username.to_string())?,
                    password: Password::new(password.to_string())?,
                }
            }
            "LOGIN" => {
                let [username, password] = expect_args::<2>("LOGIN", &args)?;
                Self::Login {
                    username: Username::new(username.to_string())?,
                    password: Password::new(password.to_string())?,
                }
            }
            "CREATE" => {
                let [channel] = expect_args::<1>("CREATE", &args)?;
                Self::Create {
                    channel: ChannelName::new(channel.to_string())?,
                }
            }
            "JOIN" => {
                let [channel] = expect_args::<1>("JOIN", &args)?;
                Self::Join {
                    channel: ChannelName::new(channel.to_string())?,
                }
            }
            "CHANNELS" => {
                expect_args::<0>("CHANNELS", &args)?;
                Self::Channels
            }
            other => return Err(ProtocolError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}
