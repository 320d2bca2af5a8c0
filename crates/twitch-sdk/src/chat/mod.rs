//! Minimal Twitch chat connector over a single WebSocket.
//!
//! Performs the fixed login/capability handshake without waiting for any
//! acknowledgement, then forwards raw lines to the caller. There is no
//! command parsing, keep-alive or reconnection: a closed transport ends the
//! connection for good.

mod connection;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use futures_util::stream::SplitSink;
use tokio::net::TcpStream;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

use crate::ChatConfig;

const PASS_PREFIX: &str = "oauth:";
const CAP_MEMBERSHIP: &str = "CAP REQ :twitch.tv/membership";
const CAP_TAGS_COMMANDS: &str = "CAP REQ :twitch.tv/tags twitch.tv/commands";
const LINE_BUFFER: usize = 256;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, tokio_tungstenite::tungstenite::Message>;

/// Lifecycle of a chat connection. Only teardown leads back to
/// `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Disconnected,
    Connecting,
    /// Handshake lines sent; capabilities requested.
    Authenticated,
    Reading,
}

/// Where a chat message goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    Channel { login: String },
    Whisper { login: String },
}

impl ChatTarget {
    /// Single protocol line delivering `text` to this target.
    pub fn privmsg(&self, text: &str) -> String {
        let text = text.replace(['\r', '\n'], " ");
        match self {
            ChatTarget::Channel { login } => format!("PRIVMSG #{login} :{text}"),
            ChatTarget::Whisper { login } => format!("PRIVMSG #jtv :/w {login} {text}"),
        }
    }
}

/// Entities that can receive a chat message.
pub trait Sendable {
    fn chat_target(&self) -> ChatTarget;
}

impl Sendable for ChatTarget {
    fn chat_target(&self) -> ChatTarget {
        self.clone()
    }
}

/// The handshake, in the order it is sent.
pub fn handshake_lines(config: &ChatConfig) -> Vec<String> {
    let token = config.token.trim();
    let pass = if token.starts_with(PASS_PREFIX) {
        token.to_string()
    } else {
        format!("{PASS_PREFIX}{token}")
    };

    vec![
        format!("PASS {pass}"),
        format!("NICK {}", config.nick.trim().to_lowercase()),
        format!("JOIN #{}", config.channel_login()),
        CAP_MEMBERSHIP.to_string(),
        CAP_TAGS_COMMANDS.to_string(),
    ]
}

/// A live chat connection.
///
/// Raw lines arrive through [`ChatConnection::next_line`]; `None` means the
/// transport closed or the connection was torn down.
pub struct ChatConnection {
    writer: Arc<Mutex<WsSink>>,
    lines: mpsc::Receiver<String>,
    state: watch::Receiver<ChatState>,
    cancel: CancellationToken,
    reader: Option<JoinHandle<()>>,
    channel: String,
}
