//! サーバーからの応答行
//!
//! 行は末尾の改行なしで出力します。改行は行コーデックが付与します。

use std::fmt;

use crate::domain::{ChannelName, MessageContent, Username};

/// コマンドを発行した接続自身への `RESULT` 行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Register { success: bool },
    Login { success: bool },
    Create { channel: ChannelName, success: bool },
    Join { channel: ChannelName, success: bool },
    Channels { channels: Vec<ChannelName> },
    Say { channel: ChannelName, success: bool },
}

fn status(success: bool) -> u8 {
    u8::from(success)
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register { success } => write!(f, "RESULT REGISTER {}", status(*success)),
            Self::Login { success } => write!(f, "RESULT LOGIN {}", status(*success)),
            Self::Create { channel, success } => {
                write!(f, "RESULT CREATE {} {}", channel, status(*success))
            }
            Self::Join { channel, success } => {
                write!(f, "RESULT JOIN {} {}", channel, status(*success))
            }
            Self::Channels { channels } => {
                f.write_str("RESULT CHANNELS")?;
                for (i, channel) in channels.iter().enumerate() {
                    let separator = if i == 0 { " " } else { ", " };
                    write!(f, "{}{}", separator, channel)?;
                }
                Ok(())
            }
            Self::Say { channel, success } => {
                write!(f, "RESULT SAY {} {}", channel, status(*success))
            }
        }
    }
}

/// チャンネルの全メンバーに配送される `RECV` 行
#[derive(Debug, Clone, Copy)]
pub struct ReceivedMessage<'a> {
    pub from: &'a Username,
    pub channel: &'a ChannelName,
    pub content: &'a MessageContent,
}

impl fmt::Display for ReceivedMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RECV {} {} {}", self.from, self.channel, self.content)
    }
}
