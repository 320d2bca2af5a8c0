use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use super::*;

#[test]
fn handshake_lines_are_sent_in_order() {
    let config = ChatConfig::new("bar", "foo", "abc");
    assert_eq!(
        handshake_lines(&config),
        vec![
            "PASS oauth:abc",
            "NICK bar",
            "JOIN #foo",
            "CAP REQ :twitch.tv/membership",
            "CAP REQ :twitch.tv/tags twitch.tv/commands",
        ]
    );
}

#[test]
fn oauth_prefix_is_not_doubled() {
    let config = ChatConfig::new("Bar", "#Foo", "oauth:abc");
    let lines = handshake_lines(&config);
    assert_eq!(lines[0], "PASS oauth:abc");
    assert_eq!(lines[1], "NICK bar");
    assert_eq!(lines[2], "JOIN #foo");
}

#[test]
fn privmsg_targets() {
    let channel = ChatTarget::Channel {
        login: "foo".into(),
    };
    let whisper = ChatTarget::Whisper {
        login: "alice".into(),
    };
    assert_eq!(channel.privmsg("hello"), "PRIVMSG #foo :hello");
    assert_eq!(whisper.privmsg("hi\r\nthere"), "PRIVMSG #jtv :/w alice hi  there");
}

/// Accepts one client, records every text frame until `expected` have
/// arrived, then sends `reply` and closes.
async fn chat_server(expected: usize, reply: &'static str) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        let mut received = Vec::new();
        while received.len() < expected {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => received.push(text.as_str().to_string()),
                Some(Ok(_)) => {}
                _ => break,
            }
        }

        ws.send(Message::Text(reply.into())).await.unwrap();
        let _ = ws.close(None).await;
        received
    });

    (url, handle)
}

#[tokio::test]
async fn connection_handshakes_forwards_lines_and_disconnects() {
    let (url, server) = chat_server(
        6,
        ":tmi.twitch.tv 001 bar :Welcome, GLHF!\r\n:tmi.twitch.tv 002 bar :Your host is tmi.twitch.tv\r\n",
    )
    .await;

    let mut config = ChatConfig::new("bar", "foo", "abc");
    config.url = url;
    let mut conn = ChatConnection::connect(&config, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(conn.channel(), "foo");

    conn.send(
        &ChatTarget::Channel {
            login: "foo".into(),
        },
        "hello chat",
    )
    .await
    .unwrap();

    assert_eq!(
        conn.next_line().await.as_deref(),
        Some(":tmi.twitch.tv 001 bar :Welcome, GLHF!")
    );
    assert_eq!(
        conn.next_line().await.as_deref(),
        Some(":tmi.twitch.tv 002 bar :Your host is tmi.twitch.tv")
    );
    assert_eq!(conn.next_line().await, None);

    let mut state = conn.state_watch();
    state
        .wait_for(|s| *s == ChatState::Disconnected)
        .await
        .unwrap();

    let received = server.await.unwrap();
    assert_eq!(
        received,
        vec![
            "PASS oauth:abc",
            "NICK bar",
            "JOIN #foo",
            "CAP REQ :twitch.tv/membership",
            "CAP REQ :twitch.tv/tags twitch.tv/commands",
            "PRIVMSG #foo :hello chat",
        ]
    );

    assert!(matches!(
        conn.send(&ChatTarget::Channel { login: "foo".into() }, "late").await,
        Err(crate::TwitchError::Closed)
    ));
    conn.close().await;
}

#[tokio::test]
async fn cancellation_stops_the_read_loop() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        // Hold the socket open until the client goes away.
        while let Some(Ok(_)) = ws.next().await {}
    });

    let mut config = ChatConfig::new("bar", "foo", "abc");
    config.url = url;
    let cancel = CancellationToken::new();
    let mut conn = ChatConnection::connect(&config, cancel.clone()).await.unwrap();

    cancel.cancel();
    assert_eq!(conn.next_line().await, None);
    assert_eq!(conn.state(), ChatState::Disconnected);

    conn.close().await;
    server.await.unwrap();
}

#[tokio::test]
async fn close_returns_while_unread_lines_fill_the_buffer() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let (sent_tx, sent_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        for n in 0..LINE_BUFFER + 10 {
            let line = format!(":tmi.twitch.tv NOTICE #foo :line {n}");
            if ws.send(Message::Text(line.into())).await.is_err() {
                break;
            }
        }
        let _ = sent_tx.send(());
        while let Some(Ok(_)) = ws.next().await {}
    });

    let mut config = ChatConfig::new("bar", "foo", "abc");
    config.url = url;
    let conn = ChatConnection::connect(&config, CancellationToken::new())
        .await
        .unwrap();

    let _ = sent_rx.await;
    // Give the read loop time to block on the full line buffer.
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let closed = tokio::time::timeout(std::time::Duration::from_secs(3), conn.close()).await;
    assert!(closed.is_ok());
}

#[tokio::test]
async fn connect_fails_when_nobody_listens() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = ChatConfig::new("bar", "foo", "abc");
    config.url = format!("ws://{addr}");
    assert!(ChatConnection::connect(&config, CancellationToken::new()).await.is_err());
}
