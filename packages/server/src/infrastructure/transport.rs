//! クライアント接続の行フレーミング
//!
//! 1 行が 1 コマンドです。長すぎる行や UTF-8 として読めない行は
//! その行だけの `ProtocolError` として上位に渡し、ストリームは継続します。

use std::io;

use tokio::net::TcpStream;
use tokio_util::{
    bytes::BytesMut,
    codec::{Decoder, Encoder, Framed, LinesCodec, LinesCodecError},
};

use super::dto::ProtocolError;

/// 1 行の最大長（改行を除くバイト数）
pub const MAX_LINE_LENGTH: usize = 8192;

/// 受信した 1 行、またはその行を認識できなかった理由
pub type LineFrame = Result<String, ProtocolError>;

/// 改行区切りの行コーデック
///
/// デコードは `LinesCodec` に委譲します（末尾の `\r` は取り除かれます）。
/// `LinesCodec` は長すぎる行を次の改行まで読み捨て、不正な UTF-8 の行も
/// バッファから取り除いた上でエラーを返すため、どちらもその行限りの
/// エラーとして扱えます。`Framed` はデコーダーがエラーを返すと以降の行を
/// 読まなくなるので、ここでエラーを `Item` 側に移します。
#[derive(Debug)]
pub struct ChatLineCodec {
    inner: LinesCodec,
}

impl ChatLineCodec {
    pub fn new() -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(MAX_LINE_LENGTH),
        }
    }

    fn lift(
        result: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<LineFrame>, io::Error> {
        match result {
            Ok(line) => Ok(line.map(Ok)),
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                Ok(Some(Err(ProtocolError::LineTooLong(MAX_LINE_LENGTH))))
            }
            Err(LinesCodecError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                Ok(Some(Err(ProtocolError::InvalidEncoding)))
            }
            Err(LinesCodecError::Io(e)) => Err(e),
        }
    }
}

impl Default for ChatLineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for ChatLineCodec {
    type Item = LineFrame;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Self::lift(self.inner.decode(src))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Self::lift(self.inner.decode_eof(src))
    }
}

impl Encoder<String> for ChatLineCodec {
    type Error = io::Error;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.inner.encode(line, dst).map_err(|e| match e {
            LinesCodecError::Io(e) => e,
            other => io::Error::other(other),
        })
    }
}

/// 行単位に区切られた TCP ストリーム
pub type LineStream = Framed<TcpStream, ChatLineCodec>;

pub fn frame_lines(stream: TcpStream) -> LineStream {
    Framed::new(stream, ChatLineCodec::new())
}
