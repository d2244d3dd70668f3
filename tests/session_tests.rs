//! End-to-end tests: a real server on 127.0.0.1 driven by plain TCP clients.

use memftpd::core_network::network;
use memftpd::Config;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

async fn spawn_server(config: Config) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let vfs = Arc::new(config.build_filesystem().unwrap());
    tokio::spawn(network::serve(listener, Arc::new(config), vfs));
    addr
}

struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: SocketAddr) -> Self {
        let (reader, writer) = TcpStream::connect(addr).await.unwrap().into_split();
        let mut client = Self {
            reader: BufReader::new(reader),
            writer,
        };
        assert!(client.read_reply().await.starts_with("220 "));
        client
    }

    async fn send(&mut self, line: &str) {
        self.writer
            .write_all(format!("{}\r\n", line).as_bytes())
            .await
            .unwrap();
    }

    /// Reads one reply, following dash continuation lines.
    async fn read_reply(&mut self) -> String {
        let mut reply = String::new();
        loop {
            let mut line = String::new();
            let n = timeout(Duration::from_secs(5), self.reader.read_line(&mut line))
                .await
                .unwrap()
                .unwrap();
            assert!(n > 0, "connection closed while waiting for a reply");
            assert!(line.ends_with("\r\n"));
            reply.push_str(&line);
            if line.as_bytes().get(3) == Some(&b' ') {
                return reply;
            }
        }
    }

    async fn command(&mut self, line: &str) -> String {
        self.send(line).await;
        self.read_reply().await
    }

    async fn pasv(&mut self) -> SocketAddr {
        let reply = self.command("PASV").await;
        assert!(reply.starts_with("227 Entering Passive Mode ("));
        let start = reply.find('(').unwrap() + 1;
        let end = reply.find(')').unwrap();
        let nums: Vec<u16> = reply[start..end]
            .split(',')
            .map(|n| n.parse().unwrap())
            .collect();
        assert_eq!(nums.len(), 6);
        let ip = format!("{}.{}.{}.{}", nums[0], nums[1], nums[2], nums[3]);
        SocketAddr::new(ip.parse().unwrap(), nums[4] * 256 + nums[5])
    }

    async fn is_closed(&mut self) -> bool {
        let mut rest = String::new();
        let n = timeout(Duration::from_secs(5), self.reader.read_line(&mut rest))
            .await
            .unwrap()
            .unwrap_or(0);
        n == 0
    }
}

async fn read_data(addr: SocketAddr) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let mut data = Vec::new();
    timeout(Duration::from_secs(5), stream.read_to_end(&mut data))
        .await
        .unwrap()
        .unwrap();
    data
}

#[tokio::test]
async fn test_size_replies() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    assert_eq!(client.command("SIZE /test").await, "213 9\r\n");
    assert_eq!(client.command("SIZE /asdf").await, "213 9\r\n");
    assert_eq!(client.command("SIZE /missing").await, "550 File unavailable.\r\n");
    assert_eq!(client.command("SIZE /dir").await, "550 File unavailable.\r\n");
}

#[tokio::test]
async fn test_cwd_then_pwd() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    assert_eq!(client.command("PWD").await, "257 /\r\n");
    assert_eq!(
        client.command("CWD /dir").await,
        "250 Requested file action okay completed.\r\n"
    );
    assert_eq!(client.command("PWD").await, "257 /dir\r\n");

    assert_eq!(client.command("CWD /dir/file1").await, "550 File unavailable.\r\n");
    assert_eq!(client.command("CWD /nope").await, "550 File unavailable.\r\n");
    assert_eq!(client.command("PWD").await, "257 /dir\r\n");
}

#[tokio::test]
async fn test_login_sequence() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    assert!(client.command("USER anonymous").await.starts_with("331 "));
    assert!(client.command("PASS guest").await.starts_with("230 "));
    assert!(client.command("SYST").await.starts_with("215 "));
    assert!(client.command("TYPE I").await.starts_with("200 "));

    let feat = client.command("FEAT").await;
    assert!(feat.starts_with("211-"));
    assert!(feat.ends_with("211 End\r\n"));
}

#[tokio::test]
async fn test_list_root() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    let data_addr = client.pasv().await;
    client.send("LIST").await;
    let listing = String::from_utf8(read_data(data_addr).await).unwrap();

    assert!(client.read_reply().await.starts_with("150 "));
    assert!(client.read_reply().await.starts_with("226 "));

    let lines: Vec<&str> = listing.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 3);

    let mut names = HashSet::new();
    for line in lines {
        let name = line.rsplit(' ').next().unwrap();
        let expected = if name == "dir" { 'd' } else { '-' };
        assert_eq!(line.chars().next(), Some(expected), "bad entry: {}", line);
        assert!(names.insert(name.to_string()), "duplicate entry: {}", name);
    }
    assert_eq!(
        names,
        HashSet::from(["test".to_string(), "asdf".to_string(), "dir".to_string()])
    );
}

#[tokio::test]
async fn test_list_defaults_to_working_directory() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    client.command("CWD /dir").await;
    let data_addr = client.pasv().await;
    client.send("LIST -la").await;
    let listing = String::from_utf8(read_data(data_addr).await).unwrap();

    assert!(client.read_reply().await.starts_with("150 "));
    assert!(client.read_reply().await.starts_with("226 "));
    assert_eq!(listing.split_terminator("\r\n").count(), 2);
    assert!(listing.contains(" file1\r\n"));
    assert!(listing.contains(" file2\r\n"));
}

#[tokio::test]
async fn test_list_missing_directory() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    let data_addr = client.pasv().await;
    client.send("LIST /test").await;
    assert!(read_data(data_addr).await.is_empty());
    assert_eq!(
        client.read_reply().await,
        "450 Requested file action aborted.\r\n"
    );
}

#[tokio::test]
async fn test_retr_file() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    let data_addr = client.pasv().await;
    client.send("RETR /dir/file1").await;
    assert_eq!(read_data(data_addr).await, b"file1");
    assert!(client.read_reply().await.starts_with("150 "));
    assert_eq!(client.read_reply().await, "226 Closing data connection.\r\n");
}

#[tokio::test]
async fn test_retr_missing_or_directory() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;
    let data_addr = client.pasv().await;

    for path in ["/missing", "/dir"] {
        client.send(&format!("RETR {}", path)).await;
        assert!(read_data(data_addr).await.is_empty());
        assert_eq!(
            client.read_reply().await,
            "450 Requested file action aborted.\r\n"
        );
    }
}

#[tokio::test]
async fn test_data_channel_is_reused_across_transfers() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    let first = client.pasv().await;
    client.send("RETR /test").await;
    assert_eq!(read_data(first).await, b"Test file");
    client.read_reply().await;
    client.read_reply().await;

    let second = client.pasv().await;
    assert_eq!(first, second);
    client.send("RETR asdf").await;
    assert_eq!(read_data(second).await, b"asdf file");
    client.read_reply().await;
    assert!(client.read_reply().await.starts_with("226 "));
}

#[tokio::test]
async fn test_sessions_have_separate_data_channels() {
    let addr = spawn_server(Config::default()).await;
    let mut first = Client::connect(addr).await;
    let mut second = Client::connect(addr).await;

    assert_ne!(first.pasv().await, second.pasv().await);
}

#[tokio::test]
async fn test_unknown_command_keeps_session() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    assert_eq!(client.command("STOR x").await, "502 Command not implemented.\r\n");
    assert_eq!(client.command("pwd").await, "502 Command not implemented.\r\n");
    assert_eq!(client.command("PWD").await, "257 /\r\n");
}

#[tokio::test]
async fn test_accept_timeout_replies_425() {
    let mut config = Config::default();
    config.server.data_timeout_secs = 1;
    let addr = spawn_server(config).await;
    let mut client = Client::connect(addr).await;

    assert_eq!(client.command("LIST").await, "425 Can't open data connection.\r\n");
    assert_eq!(client.command("PWD").await, "257 /\r\n");
}

#[tokio::test]
async fn test_quit_closes_connection() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    assert_eq!(
        client.command("QUIT").await,
        "221 Service closing control connection.\r\n"
    );
    assert!(client.is_closed().await);
}

#[tokio::test]
async fn test_commands_after_quit_are_ignored() {
    let addr = spawn_server(Config::default()).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    stream.write_all(b"QUIT\r\nPWD\r\n").await.unwrap();
    let mut received = Vec::new();
    timeout(Duration::from_secs(5), stream.read_to_end(&mut received))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        String::from_utf8(received).unwrap(),
        "220 Service ready for new user.\r\n221 Service closing control connection.\r\n"
    );
}

#[tokio::test]
async fn test_late_data_connection_is_not_reused() {
    let mut config = Config::default();
    config.server.data_timeout_secs = 1;
    let addr = spawn_server(config).await;
    let mut client = Client::connect(addr).await;

    let data_addr = client.pasv().await;
    assert_eq!(client.command("LIST").await, "425 Can't open data connection.\r\n");

    // Shows up after the server stopped waiting for it.
    drop(TcpStream::connect(data_addr).await.unwrap());
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(client.pasv().await, data_addr);
    client.send("RETR /test").await;
    assert_eq!(read_data(data_addr).await, b"Test file");
    assert!(client.read_reply().await.starts_with("150 "));
    assert!(client.read_reply().await.starts_with("226 "));
}

#[tokio::test]
async fn test_hangup_during_transfer_releases_data_channel() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    let data_addr = client.pasv().await;
    client.send("LIST").await;
    drop(client);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(TcpStream::connect(data_addr).await.is_err());
}

#[tokio::test]
async fn test_overlong_line_closes_connection() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    let line = "A".repeat(network::MAX_COMMAND_LINE * 2);
    client.writer.write_all(line.as_bytes()).await.unwrap();
    assert!(client.is_closed().await);
}

#[tokio::test]
async fn test_line_at_limit_is_accepted() {
    let addr = spawn_server(Config::default()).await;
    let mut client = Client::connect(addr).await;

    let path = format!("/{}", "x".repeat(network::MAX_COMMAND_LINE - "SIZE /\r\n".len()));
    assert_eq!(
        client.command(&format!("SIZE {}", path)).await,
        "550 File unavailable.\r\n"
    );
}

#[tokio::test]
async fn test_idle_timeout_closes_silently() {
    let mut config = Config::default();
    config.server.idle_timeout_secs = 1;
    let addr = spawn_server(config).await;
    let mut client = Client::connect(addr).await;

    assert!(client.is_closed().await);
}

#[tokio::test]
async fn test_configured_filesystem() {
    let config: Config = toml::from_str(
        r#"
        [filesystem.docs]
        "guide.txt" = "read me"
        "#,
    )
    .unwrap();
    let addr = spawn_server(config).await;
    let mut client = Client::connect(addr).await;

    assert_eq!(client.command("SIZE /docs/guide.txt").await, "213 7\r\n");
    assert_eq!(client.command("SIZE /test").await, "550 File unavailable.\r\n");
}
