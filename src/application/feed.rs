// Feed event contract between the transport layer and the controller
use serde::Deserialize;

use crate::domain::notification::Notification;
use crate::domain::signal_history::SignalHistory;
use crate::domain::station::{Station, StationId};

/// Full-state snapshot delivered when a feed session opens.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialSnapshot {
    pub station_a: Station,
    pub station_b: Station,
    pub notifications: Vec<Notification>,
    pub signal_history: SignalHistory,
}

/// Tagged events emitted by the live feed or the synthetic generator.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    Initial(InitialSnapshot),
    Station { id: StationId, data: Station },
    Notifications(Vec<Notification>),
    SignalHistory(SignalHistory),
    /// Emitted exactly once per failure episode; no further application
    /// updates follow on the dead connection.
    ConnectionFailed,
}

/// Transport lifecycle, published on a watch channel by the feed client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Idle,
    Connecting,
    Connected,
    Synthetic,
    Closed,
}
