// WebSocket transport client with synthetic-data fallback
use std::sync::Arc;

use anyhow::Context;
use futures::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::application::feed::{FeedEvent, LinkState};
use crate::infrastructure::codec::decode_frame;
use crate::infrastructure::synthetic::SyntheticFeed;

/// Owns the single live-feed connection and its synthetic substitute. The
/// lifecycle is published on a watch channel (idle, connecting, connected or
/// synthetic, closed); decoded events arrive on the mpsc sender registered
/// via `connect`, which is also kept as the last-registered handler set for
/// `retry_connection`.
pub struct FeedClient {
    url: String,
    state: Arc<watch::Sender<LinkState>>,
    events: Option<mpsc::Sender<FeedEvent>>,
    reader: Option<JoinHandle<()>>,
    synthetic: SyntheticFeed,
}

impl FeedClient {
    pub fn new(url: String) -> Self {
        let (state, _) = watch::channel(LinkState::Idle);
        Self {
            url,
            state: Arc::new(state),
            events: None,
            reader: None,
            synthetic: SyntheticFeed::default(),
        }
    }

    /// Subscribe to transport lifecycle transitions.
    pub fn link_state(&self) -> watch::Receiver<LinkState> {
        self.state.subscribe()
    }

    /// Dial the push feed, superseding any previous session or synthetic
    /// tick.
    pub fn connect(&mut self, events: mpsc::Sender<FeedEvent>) {
        self.teardown();
        self.events = Some(events.clone());
        self.state.send_replace(LinkState::Connecting);

        let url = self.url.clone();
        let state = self.state.clone();
        self.reader = Some(tokio::spawn(async move {
            if let Err(error) = run_session(&url, &state, &events).await {
                tracing::warn!(url = %url, %error, "live feed failed");
                state.send_replace(LinkState::Idle);
                if events.send(FeedEvent::ConnectionFailed).await.is_err() {
                    tracing::debug!("event channel closed before the failure could be reported");
                }
            }
        }));
    }

    /// Tear down the connection and any timers this client owns. Idempotent.
    pub fn disconnect(&mut self) {
        self.teardown();
        self.state.send_replace(LinkState::Closed);
    }

    /// Drop the current session and dial again with the last-registered
    /// handlers. A retry supersedes synthetic mode: the tick is stopped
    /// before the new session starts.
    pub fn retry_connection(&mut self) {
        let Some(events) = self.events.clone() else {
            tracing::error!("cannot retry connection: no event channel was ever registered");
            return;
        };
        self.connect(events);
    }

    /// Switch to locally generated data so the UI stays populated while the
    /// live feed is down.
    pub fn start_synthetic(&mut self) {
        let Some(events) = self.events.clone() else {
            tracing::error!("cannot start synthetic feed: no event channel was ever registered");
            return;
        };
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        self.state.send_replace(LinkState::Synthetic);
        self.synthetic.start(events);
    }

    fn teardown(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        self.synthetic.stop();
    }
}

impl Drop for FeedClient {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// One feed session from dial to its first failure. Every error return is
/// one failure episode; the caller reports it and the reader stops, so no
/// application updates can follow on a dead connection. Returns Ok only
/// when the event receiver goes away, which is a consumer shutdown rather
/// than a transport failure.
async fn run_session(
    url: &str,
    state: &watch::Sender<LinkState>,
    events: &mpsc::Sender<FeedEvent>,
) -> anyhow::Result<()> {
    let (stream, _) = connect_async(url).await.context("opening feed connection")?;
    state.send_replace(LinkState::Connected);
    let (mut write, mut read) = stream.split();

    while let Some(message) = read.next().await {
        match message.context("reading feed frame")? {
            Message::Text(text) => {
                // A decode failure is a connection failure, not a crash.
                if let Some(event) = decode_frame(&text)? {
                    if events.send(event).await.is_err() {
                        return Ok(());
                    }
                }
            }
            Message::Ping(data) => {
                write
                    .send(Message::Pong(data))
                    .await
                    .context("answering ping")?;
            }
            Message::Close(frame) => {
                anyhow::bail!("feed closed the connection: {frame:?}");
            }
            _ => {}
        }
    }
    anyhow::bail!("feed stream ended unexpectedly")
}
