//! Infrastructure 層
//!
//! - `repository`: ドメイン層の Repository trait のインメモリ実装
//! - `dto`: ワイヤープロトコル（コマンド行・応答行）の変換
//! - `transport`: TCP ストリームを行単位に区切るコーデック

pub mod dto;
pub mod repository;
pub mod transport;
