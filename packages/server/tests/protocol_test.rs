//! Integration tests for the line-protocol chat server.
//!
//! Each test starts its own in-process server on an ephemeral port and talks
//! to it over real TCP connections.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use hiroba_server::{
    infrastructure::repository::{InMemoryAccountRepository, InMemoryChannelRepository},
    ui::{AppState, Server},
};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines},
    net::{
        TcpListener, TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::oneshot,
    time::timeout,
};

const READ_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_WINDOW: Duration = Duration::from_millis(200);

/// Helper struct to manage server lifecycle
struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Start a server with fresh, empty directories
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let state = AppState::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemoryChannelRepository::new()),
        );
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            Server::new(Arc::new(state))
                .serve(listener, async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        TestServer {
            addr,
            shutdown: Some(shutdown_tx),
        }
    }

    async fn connect(&self) -> TestClient {
        TestClient::connect(self.addr).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Helper struct wrapping one client connection
struct TestClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr)
            .await
            .expect("Failed to connect to test server");
        let (reader, writer) = stream.into_split();
        TestClient {
            lines: BufReader::new(reader).lines(),
            writer,
        }
    }

    async fn send(&mut self, line: &str) {
        self.writer
            .write_all(format!("{}\n", line).as_bytes())
            .await
            .expect("Failed to write line");
    }

    async fn recv(&mut self) -> String {
        timeout(READ_TIMEOUT, self.lines.next_line())
            .await
            .expect("Timed out waiting for a line")
            .expect("Failed to read line")
            .expect("Connection closed unexpectedly")
    }

    /// Send a command and return the next line received
    async fn request(&mut self, line: &str) -> String {
        self.send(line).await;
        self.recv().await
    }

    /// Assert that nothing arrives within a short window
    async fn expect_silence(&mut self) {
        if let Ok(line) = timeout(SILENCE_WINDOW, self.lines.next_line()).await {
            panic!("Expected no line, got {:?}", line);
        }
    }

    /// Register and log in as `username`
    async fn login_as(&mut self, username: &str) {
        assert_eq!(
            self.request(&format!("REGISTER {} pw", username)).await,
            "RESULT REGISTER 1"
        );
        assert_eq!(
            self.request(&format!("LOGIN {} pw", username)).await,
            "RESULT LOGIN 1"
        );
    }
}

#[tokio::test]
async fn test_basic_session_flow() {
    // テスト項目: 1 つの接続で REGISTER → LOGIN → CREATE → JOIN → SAY が全て成功する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;

    // when (操作) / then (期待する結果):
    alice.login_as("alice").await;
    assert_eq!(alice.request("CREATE general").await, "RESULT CREATE general 1");
    assert_eq!(alice.request("JOIN general").await, "RESULT JOIN general 1");
    assert_eq!(alice.request("SAY general hi").await, "RECV alice general hi");
    assert_eq!(alice.recv().await, "RESULT SAY general 1");
}

#[tokio::test]
async fn test_login_without_account_fails() {
    // テスト項目: 未登録のユーザー名でのログインは失敗する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    // when (操作):
    let reply = client.request("LOGIN ghost pw").await;

    // then (期待する結果):
    assert_eq!(reply, "RESULT LOGIN 0");
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    // テスト項目: パスワードが一致しない場合はログインに失敗し、正しいパスワードでは成功する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;
    assert_eq!(client.request("REGISTER alice pw").await, "RESULT REGISTER 1");

    // when (操作) / then (期待する結果):
    assert_eq!(client.request("LOGIN alice nope").await, "RESULT LOGIN 0");
    assert_eq!(client.request("LOGIN alice pw").await, "RESULT LOGIN 1");
}

#[tokio::test]
async fn test_second_login_is_rejected() {
    // テスト項目: ログイン済みの接続での再ログインは失敗する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;
    client.login_as("alice").await;
    assert_eq!(client.request("REGISTER bob pw").await, "RESULT REGISTER 1");

    // when (操作):
    let reply = client.request("LOGIN bob pw").await;

    // then (期待する結果):
    assert_eq!(reply, "RESULT LOGIN 0");
}

#[tokio::test]
async fn test_create_and_channels_without_login() {
    // テスト項目: CREATE と CHANNELS は未ログインでも利用できる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    // when (操作) / then (期待する結果):
    assert_eq!(client.request("CHANNELS").await, "RESULT CHANNELS");
    assert_eq!(client.request("CREATE general").await, "RESULT CREATE general 1");
    assert_eq!(client.request("CHANNELS").await, "RESULT CHANNELS general");
}

#[tokio::test]
async fn test_create_existing_channel_fails() {
    // テスト項目: 既存のチャンネル名での CREATE は失敗する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;
    assert_eq!(client.request("CREATE general").await, "RESULT CREATE general 1");

    // when (操作):
    let reply = client.request("CREATE general").await;

    // then (期待する結果):
    assert_eq!(reply, "RESULT CREATE general 0");
}

#[tokio::test]
async fn test_channels_lists_every_created_channel() {
    // テスト項目: CHANNELS は作成済みの全チャンネルを ", " 区切りで返す（順序は不定）
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;
    for name in ["alpha", "beta", "gamma"] {
        assert_eq!(
            client.request(&format!("CREATE {}", name)).await,
            format!("RESULT CREATE {} 1", name)
        );
    }

    // when (操作):
    let reply = client.request("CHANNELS").await;

    // then (期待する結果):
    let listed = reply
        .strip_prefix("RESULT CHANNELS ")
        .expect("Unexpected CHANNELS reply");
    let mut names: Vec<&str> = listed.split(", ").collect();
    names.sort();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);
}

#[tokio::test]
async fn test_join_failures() {
    // テスト項目: 未ログイン・存在しないチャンネル・二重参加の JOIN は失敗する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;
    assert_eq!(client.request("CREATE general").await, "RESULT CREATE general 1");

    // when (操作) / then (期待する結果):
    assert_eq!(client.request("JOIN general").await, "RESULT JOIN general 0");
    client.login_as("alice").await;
    assert_eq!(client.request("JOIN missing").await, "RESULT JOIN missing 0");
    assert_eq!(client.request("JOIN general").await, "RESULT JOIN general 1");
    assert_eq!(client.request("JOIN general").await, "RESULT JOIN general 0");
}

#[tokio::test]
async fn test_say_without_login_fails() {
    // テスト項目: 未ログインの SAY は失敗する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;
    assert_eq!(client.request("CREATE general").await, "RESULT CREATE general 1");

    // when (操作):
    let reply = client.request("SAY general hi").await;

    // then (期待する結果):
    assert_eq!(reply, "RESULT SAY general 0");
}

#[tokio::test]
async fn test_say_without_join_reaches_nobody() {
    // テスト項目: 未参加チャンネルへの SAY は失敗し、メンバーには何も届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    alice.login_as("alice").await;
    bob.login_as("bob").await;
    assert_eq!(bob.request("CREATE general").await, "RESULT CREATE general 1");
    assert_eq!(bob.request("JOIN general").await, "RESULT JOIN general 1");

    // when (操作):
    let reply = alice.request("SAY general hi").await;

    // then (期待する結果):
    assert_eq!(reply, "RESULT SAY general 0");
    bob.expect_silence().await;
}

#[tokio::test]
async fn test_say_reaches_every_member_once() {
    // テスト項目: 2 人のメンバーがいるチャンネルへの SAY は両者に 1 回ずつ届き、非メンバーには届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    let mut carol = server.connect().await;
    alice.login_as("alice").await;
    bob.login_as("bob").await;
    carol.login_as("carol").await;
    assert_eq!(alice.request("CREATE general").await, "RESULT CREATE general 1");
    assert_eq!(alice.request("JOIN general").await, "RESULT JOIN general 1");
    assert_eq!(bob.request("JOIN general").await, "RESULT JOIN general 1");

    // when (操作):
    alice.send("SAY general hello everyone").await;

    // then (期待する結果):
    assert_eq!(alice.recv().await, "RECV alice general hello everyone");
    assert_eq!(alice.recv().await, "RESULT SAY general 1");
    assert_eq!(bob.recv().await, "RECV alice general hello everyone");
    bob.expect_silence().await;
    carol.expect_silence().await;
}

#[tokio::test]
async fn test_say_after_member_disconnects() {
    // テスト項目: メンバーが切断した後も SAY は成功し、切断したメンバーは集合から外れる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    alice.login_as("alice").await;
    bob.login_as("bob").await;
    assert_eq!(alice.request("CREATE general").await, "RESULT CREATE general 1");
    assert_eq!(alice.request("JOIN general").await, "RESULT JOIN general 1");
    assert_eq!(bob.request("JOIN general").await, "RESULT JOIN general 1");

    // when (操作): bob を切断
    drop(bob);
    tokio::time::sleep(SILENCE_WINDOW).await;

    // then (期待する結果):
    assert_eq!(alice.request("SAY general still here").await, "RECV alice general still here");
    assert_eq!(alice.recv().await, "RESULT SAY general 1");
}

#[tokio::test]
async fn test_account_survives_disconnect() {
    // テスト項目: 登録したアカウントは接続を切っても残り、別の接続からログインできる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut first = server.connect().await;
    assert_eq!(first.request("REGISTER alice pw").await, "RESULT REGISTER 1");
    drop(first);

    // when (操作):
    let mut second = server.connect().await;
    let reply = second.request("LOGIN alice pw").await;

    // then (期待する結果):
    assert_eq!(reply, "RESULT LOGIN 1");
}

#[tokio::test]
async fn test_unrecognized_lines_get_no_reply() {
    // テスト項目: 認識できない行には応答せず、接続はそのまま使える
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    // when (操作):
    for line in ["HELLO", "REGISTER alice", "CHANNELS extra", "SAY general", "", "register a b"] {
        client.send(line).await;
    }

    // then (期待する結果):
    client.expect_silence().await;
    assert_eq!(client.request("REGISTER alice pw").await, "RESULT REGISTER 1");
}

#[tokio::test]
async fn test_say_preserves_message_spacing() {
    // テスト項目: SAY のメッセージ部分は内部の空白を含めてそのまま配送される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    alice.login_as("alice").await;
    assert_eq!(alice.request("CREATE general").await, "RESULT CREATE general 1");
    assert_eq!(alice.request("JOIN general").await, "RESULT JOIN general 1");

    // when (操作):
    let recv = alice.request("SAY general a  b   c").await;

    // then (期待する結果):
    assert_eq!(recv, "RECV alice general a  b   c");
    assert_eq!(alice.recv().await, "RESULT SAY general 1");
}

#[tokio::test]
async fn test_say_with_empty_message() {
    // テスト項目: チャンネル名の後に区切りだけがある SAY は空のメッセージとして配送される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    alice.login_as("alice").await;
    bob.login_as("bob").await;
    assert_eq!(alice.request("CREATE general").await, "RESULT CREATE general 1");
    assert_eq!(alice.request("JOIN general").await, "RESULT JOIN general 1");
    assert_eq!(bob.request("JOIN general").await, "RESULT JOIN general 1");

    // when (操作):
    let recv = alice.request("SAY general ").await;

    // then (期待する結果):
    assert_eq!(recv, "RECV alice general ");
    assert_eq!(alice.recv().await, "RESULT SAY general 1");
    assert_eq!(bob.recv().await, "RECV alice general ");
}

#[tokio::test]
async fn test_say_channel_after_repeated_spaces() {
    // テスト項目: SAY のチャンネル名の前の空白の連続は JOIN と同じく受け付けられる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    alice.login_as("alice").await;
    assert_eq!(alice.request("CREATE general").await, "RESULT CREATE general 1");
    assert_eq!(alice.request("JOIN  general").await, "RESULT JOIN general 1");

    // when (操作):
    let recv = alice.request("SAY  general hi").await;

    // then (期待する結果):
    assert_eq!(recv, "RECV alice general hi");
    assert_eq!(alice.recv().await, "RESULT SAY general 1");
}

#[tokio::test]
async fn test_invalid_utf8_line_keeps_connection_open() {
    // テスト項目: UTF-8 として読めない行には応答せず、接続はそのまま使える
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    // when (操作):
    client.writer.write_all(b"HELLO \xff\xfe\n").await.unwrap();

    // then (期待する結果):
    client.expect_silence().await;
    assert_eq!(client.request("CREATE general").await, "RESULT CREATE general 1");
}

#[tokio::test]
async fn test_over_long_line_keeps_connection_open() {
    // テスト項目: 最大長を超える行は認識されずに読み捨てられ、接続はそのまま使える
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    alice.login_as("alice").await;
    assert_eq!(alice.request("CREATE general").await, "RESULT CREATE general 1");
    assert_eq!(alice.request("JOIN general").await, "RESULT JOIN general 1");

    // when (操作):
    let long_line = format!("SAY general {}", "a".repeat(9000));
    alice.send(&long_line).await;

    // then (期待する結果):
    alice.expect_silence().await;
    assert_eq!(alice.request("CHANNELS").await, "RESULT CHANNELS general");
}

#[tokio::test]
async fn test_crlf_line_endings_are_accepted() {
    // テスト項目: 行末の \r は取り除かれる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    // when (操作):
    client.writer.write_all(b"CREATE general\r\n").await.unwrap();

    // then (期待する結果):
    assert_eq!(client.recv().await, "RESULT CREATE general 1");
}

#[tokio::test]
async fn test_concurrent_register_has_single_winner() {
    // テスト項目: 同じユーザー名への同時 REGISTER はちょうど 1 つだけ成功する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut clients = Vec::new();
    for _ in 0..8 {
        clients.push(server.connect().await);
    }

    // when (操作):
    let handles: Vec<_> = clients
        .into_iter()
        .map(|mut client| tokio::spawn(async move { client.request("REGISTER alice pw").await }))
        .collect();
    let mut replies = Vec::new();
    for handle in handles {
        replies.push(handle.await.unwrap());
    }

    // then (期待する結果):
    let winners = replies.iter().filter(|r| *r == "RESULT REGISTER 1").count();
    let losers = replies.iter().filter(|r| *r == "RESULT REGISTER 0").count();
    assert_eq!(winners, 1);
    assert_eq!(losers, 7);
}

#[tokio::test]
async fn test_servers_do_not_share_state() {
    // テスト項目: 別々のサーバーインスタンスはアカウントもチャンネルも共有しない
    // given (前提条件):
    let first = TestServer::start().await;
    let second = TestServer::start().await;
    let mut a = first.connect().await;
    let mut b = second.connect().await;
    a.login_as("alice").await;
    assert_eq!(a.request("CREATE general").await, "RESULT CREATE general 1");

    // when (操作) / then (期待する結果):
    assert_eq!(b.request("LOGIN alice pw").await, "RESULT LOGIN 0");
    assert_eq!(b.request("CHANNELS").await, "RESULT CHANNELS");
    assert_eq!(b.request("CREATE general").await, "RESULT CREATE general 1");
}
