// Wire codec for the push-feed protocol
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::application::feed::{FeedEvent, InitialSnapshot};
use crate::domain::notification::Notification;
use crate::domain::signal_history::SignalHistory;
use crate::domain::station::{Station, StationId};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed feed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationUpdate {
    station_id: StationId,
    data: Station,
}

/// Decode one feed frame. Unknown tags are ignored with a warning so newer
/// servers stay compatible; a malformed envelope or payload is a decode
/// failure the caller treats as a connection failure.
pub fn decode_frame(text: &str) -> Result<Option<FeedEvent>, DecodeError> {
    let envelope: Envelope = serde_json::from_str(text)?;
    let event = match envelope.kind.as_str() {
        "initial_state" => {
            let snapshot: InitialSnapshot = serde_json::from_value(envelope.payload)?;
            FeedEvent::Initial(snapshot)
        }
        "station_update" => {
            let update: StationUpdate = serde_json::from_value(envelope.payload)?;
            FeedEvent::Station {
                id: update.station_id,
                data: update.data,
            }
        }
        "notifications_update" => {
            let notifications: Vec<Notification> = serde_json::from_value(envelope.payload)?;
            FeedEvent::Notifications(notifications)
        }
        "signal_history_update" => {
            let history: SignalHistory = serde_json::from_value(envelope.payload)?;
            FeedEvent::SignalHistory(history)
        }
        other => {
            tracing::warn!(kind = other, "unknown feed message type, ignoring");
            return Ok(None);
        }
    };
    Ok(Some(event))
}
