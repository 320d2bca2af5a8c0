use futures_util::{Sink, SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as Msg;

use super::*;
use crate::TwitchError;

impl ChatConnection {
    /// Connect, send the handshake and start the read loop.
    ///
    /// `cancel` tears the read loop down; pass a child of the owning
    /// client's token so client shutdown reaches it.
    pub async fn connect(
        config: &ChatConfig,
        cancel: CancellationToken,
    ) -> Result<Self, TwitchError> {
        let (state_tx, state_rx) = watch::channel(ChatState::Connecting);
        let channel = config.channel_login();

        tracing::info!(url = %config.url, channel = %channel, "Connecting to Twitch chat");
        let connect = connect_async(config.url.as_str());
        let (ws, _) = tokio::time::timeout(config.connect_timeout, connect)
            .await
            .map_err(|_| TwitchError::Timeout)??;
        let (mut sink, stream) = ws.split();

        send_handshake(&mut sink, &handshake_lines(config)).await?;
        state_tx.send_replace(ChatState::Authenticated);
        tracing::info!(channel = %channel, "Chat handshake sent");

        let (line_tx, line_rx) = mpsc::channel(LINE_BUFFER);
        let reader = tokio::spawn(read_loop(stream, line_tx, state_tx, cancel.clone()));

        Ok(Self {
            writer: Arc::new(Mutex::new(sink)),
            lines: line_rx,
            state: state_rx,
            cancel,
            reader: Some(reader),
            channel,
        })
    }

    /// Next raw line from the server.
    pub async fn next_line(&mut self) -> Option<String> {
        self.lines.recv().await
    }

    pub fn state(&self) -> ChatState {
        *self.state.borrow()
    }

    /// Watch state transitions.
    pub fn state_watch(&self) -> watch::Receiver<ChatState> {
        self.state.clone()
    }

    /// Joined channel login.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Send `text` to a channel or as a whisper.
    pub async fn send(&self, target: &impl Sendable, text: &str) -> Result<(), TwitchError> {
        if self.cancel.is_cancelled() || self.state() == ChatState::Disconnected {
            return Err(TwitchError::Closed);
        }
        let line = target.chat_target().privmsg(text);
        self.writer.lock().await.send(Msg::Text(line.into())).await?;
        Ok(())
    }

    /// Stop reading and close the socket.
    pub async fn close(mut self) {
        self.cancel.cancel();
        self.lines.close();
        if let Err(e) = self.writer.lock().await.close().await {
            tracing::debug!(error = %e, "Chat socket close failed");
        }
        if let Some(reader) = self.reader.take() {
            if let Err(e) = reader.await {
                tracing::debug!(error = %e, "Chat read loop ended abnormally");
            }
        }
        tracing::info!(channel = %self.channel, "Chat connection closed");
    }
}

/// Send each handshake line as its own frame, without awaiting replies.
pub(super) async fn send_handshake<S>(sink: &mut S, lines: &[String]) -> Result<(), TwitchError>
where
    S: Sink<Msg> + Unpin,
    TwitchError: From<S::Error>,
{
    for line in lines {
        sink.send(Msg::Text(line.clone().into())).await?;
    }
    Ok(())
}

async fn read_loop(
    mut stream: futures_util::stream::SplitStream<WsStream>,
    line_tx: mpsc::Sender<String>,
    state_tx: watch::Sender<ChatState>,
    cancel: CancellationToken,
) {
    state_tx.send_replace(ChatState::Reading);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Chat read loop stopped (shutdown)");
                break;
            }
            frame = stream.next() => {
                match frame {
                    Some(Ok(Msg::Text(text))) => {
                        if !forward_lines(&text, &line_tx, &cancel).await {
                            tracing::debug!("Chat line forwarding stopped");
                            break;
                        }
                    }
                    Some(Ok(Msg::Close(_))) | None => {
                        tracing::warn!("Chat socket closed by server");
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Chat socket error");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state_tx.send_replace(ChatState::Disconnected);
}

/// Forward every non-empty line of a frame. Returns `false` once nobody is
/// listening or `cancel` fires while waiting for buffer space.
async fn forward_lines(
    text: &str,
    line_tx: &mpsc::Sender<String>,
    cancel: &CancellationToken,
) -> bool {
    for line in text.lines().filter(|line| !line.is_empty()) {
        tracing::trace!(line, "Chat line");
        let sent = tokio::select! {
            _ = cancel.cancelled() => return false,
            sent = line_tx.send(line.to_string()) => sent,
        };
        if sent.is_err() {
            return false;
        }
    }
    true
}
