//! Integration tests for the TCP server.
//!
//! These tests run the full stack over real sockets: listener, codec,
//! per-connection session, and the probing client, the same path a mobile
//! diagnostics app exercises.

use obdemu_network::{Server, ServerConfig, TcpClient, TcpClientConfig};

/// Start a server on an OS-assigned port and return a connected client that
/// has already consumed the boot banner.
async fn connect_client() -> TcpClient {
    let config = ServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        ..ServerConfig::default()
    };

    let server = Server::bind(config).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());

    let mut client = TcpClient::new(TcpClientConfig {
        server_addr: addr,
        ..TcpClientConfig::default()
    });
    client.connect().await.unwrap();

    let banner = client.read_until_prompt().await.unwrap();
    assert_eq!(banner, "ELM327 v1.5\r\n>");

    // Disable echo so subsequent exchanges are exact request/response pairs.
    let response = client.command("ATE0").await.unwrap();
    assert!(response.contains("OK"));

    client
}

#[tokio::test]
async fn test_boot_banner_on_connect() {
    let config = ServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        ..ServerConfig::default()
    };
    let server = Server::bind(config).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());

    let mut client = TcpClient::new(TcpClientConfig {
        server_addr: addr,
        ..TcpClientConfig::default()
    });
    client.connect().await.unwrap();

    let banner = client.read_until_prompt().await.unwrap();
    assert_eq!(banner, "ELM327 v1.5\r\n>");
}

#[tokio::test]
async fn test_full_reset_cycle() {
    let mut client = connect_client().await;

    let version = client.command("ATZ").await.unwrap();
    assert_eq!(version, "ELM327 v1.5\r\n>");

    let ack = client.read_until_prompt().await.unwrap();
    assert_eq!(ack, "OK\r\n>");
}

#[tokio::test]
async fn test_header_toggle_changes_rendering() {
    let mut client = connect_client().await;

    assert_eq!(client.command("0105").await.unwrap(), "78\r\n>");

    assert_eq!(client.command("ATH1").await.unwrap(), "OK\r\n>");
    assert_eq!(client.command("0105").await.unwrap(), "41 05 78\r\n>");

    assert_eq!(client.command("ATH0").await.unwrap(), "OK\r\n>");
    assert_eq!(client.command("0105").await.unwrap(), "78\r\n>");
}

#[tokio::test]
async fn test_unknown_command_answers_question_mark() {
    let mut client = connect_client().await;
    assert_eq!(client.command("ZZZZ").await.unwrap(), "?\r\n>");
}

#[tokio::test]
async fn test_auto_protocol_search_follow_up() {
    let mut client = connect_client().await;

    assert_eq!(client.command("ATSP0").await.unwrap(), "OK\r\n>");

    // The resolved description follows after the pacing delay.
    let description = client.read_until_prompt().await.unwrap();
    assert_eq!(description, "ISO 15765-4 CAN (11 bit, 500 kbaud)\r\n>");
}

#[tokio::test]
async fn test_vin_query_arrives_in_three_parts() {
    let mut client = connect_client().await;

    let mut frames = vec![client.command("0901").await.unwrap()];
    frames.push(client.read_until_prompt().await.unwrap());
    frames.push(client.read_until_prompt().await.unwrap());

    assert_eq!(
        frames,
        vec![
            "49 01 01 31 48 47 43 4D 38 32\r\n>",
            "49 01 02 36 33 33 41 30 30 34\r\n>",
            "49 01 03 33 35 32\r\n>",
        ]
    );
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let config = ServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        ..ServerConfig::default()
    };
    let server = Server::bind(config).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());

    let connect = || async move {
        let mut client = TcpClient::new(TcpClientConfig {
            server_addr: addr,
            ..TcpClientConfig::default()
        });
        client.connect().await.unwrap();
        client.read_until_prompt().await.unwrap();
        client.command("ATE0").await.unwrap();
        client
    };

    let mut first = connect().await;
    let mut second = connect().await;

    // Headers on in the first session must not leak into the second.
    first.command("ATH1").await.unwrap();

    assert_eq!(first.command("0105").await.unwrap(), "41 05 78\r\n>");
    assert_eq!(second.command("0105").await.unwrap(), "78\r\n>");
}

#[tokio::test]
async fn test_oversized_line_is_truncated_not_fatal() {
    let mut client = connect_client().await;

    // Far beyond the 63-byte line buffer; the framer truncates and the
    // leftover is an unrecognized token, never a dropped connection.
    let oversized = "X".repeat(300);
    assert_eq!(client.command(&oversized).await.unwrap(), "?\r\n>");

    // The session is still healthy afterwards.
    assert_eq!(client.command("ATRV").await.unwrap(), "12.6V\r\n>");
}
