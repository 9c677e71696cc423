// Synthetic data generator - local fallback when the live feed is down
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::feed::{FeedEvent, InitialSnapshot};
use crate::domain::notification::{Notification, NotificationKind, Scope, Severity};
use crate::domain::signal_history::{SignalHistory, WINDOW};
use crate::domain::station::{Environment, Station, StationId, StationMode};

/// Interval between fabricated signal updates.
pub const TICK_INTERVAL: Duration = Duration::from_secs(2);

const BASE_SIGNAL_A: f64 = -67.0;
const BASE_SIGNAL_B: f64 = -72.0;

/// Produces a self-consistent fabricated state when the live feed is
/// unreachable. Delivers one initial snapshot, then a periodic tick with a
/// fresh bounded-random signal per station and a lockstep history push.
/// Never performs network I/O.
#[derive(Default)]
pub struct SyntheticFeed {
    tick: Option<JoinHandle<()>>,
}

impl SyntheticFeed {
    /// Deliver the fabricated snapshot and begin the periodic tick. A tick
    /// already running is replaced, never stacked.
    pub fn start(&mut self, events: mpsc::Sender<FeedEvent>) {
        self.stop();

        let snapshot = initial_snapshot();
        let mut station_a = snapshot.station_a.clone();
        let mut station_b = snapshot.station_b.clone();
        let mut history = snapshot.signal_history.clone();

        self.tick = Some(tokio::spawn(async move {
            if events.send(FeedEvent::Initial(snapshot)).await.is_err() {
                return;
            }
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            interval.tick().await; // the first tick completes immediately
            loop {
                interval.tick().await;
                let (signal_a, signal_b) = {
                    let mut rng = rand::thread_rng();
                    (
                        BASE_SIGNAL_A + (rng.r#gen::<f64>() - 0.5) * 6.0,
                        BASE_SIGNAL_B + (rng.r#gen::<f64>() - 0.5) * 8.0,
                    )
                };
                station_a.signal = signal_a;
                station_b.signal = signal_b;
                history.push(signal_a, signal_b);

                let updates = [
                    FeedEvent::Station {
                        id: StationId::A,
                        data: station_a.clone(),
                    },
                    FeedEvent::Station {
                        id: StationId::B,
                        data: station_b.clone(),
                    },
                    FeedEvent::SignalHistory(history.clone()),
                ];
                for event in updates {
                    if events.send(event).await.is_err() {
                        return;
                    }
                }
            }
        }));
    }

    /// Cancel the periodic tick. Idempotent.
    pub fn stop(&mut self) {
        if let Some(tick) = self.tick.take() {
            tick.abort();
        }
    }
}

fn initial_snapshot() -> InitialSnapshot {
    InitialSnapshot {
        station_a: Station {
            azimuth: 245.0,
            elevation: 32.0,
            mode: StationMode::Auto,
            signal: -67.3,
            env: Environment {
                temp: 23.5,
                humidity: 45.0,
                wind: 12.0,
                pressure: 1013.0,
                rain: 0.0,
                visibility: 15.0,
            },
        },
        station_b: Station {
            azimuth: 128.0,
            elevation: 58.0,
            mode: StationMode::Manual,
            signal: -72.8,
            env: Environment {
                temp: 19.2,
                humidity: 68.0,
                wind: 8.0,
                pressure: 1009.0,
                rain: 2.1,
                visibility: 8.5,
            },
        },
        notifications: backlog(),
        signal_history: seeded_history(),
    }
}

fn backlog() -> Vec<Notification> {
    let now = Utc::now();
    vec![
        Notification {
            id: "synthetic-1".to_string(),
            kind: NotificationKind::Warning,
            title: "Signal Degradation".to_string(),
            message: "Station B signal strength is low.".to_string(),
            details: "Station B is experiencing signal degradation and may need realignment."
                .to_string(),
            timestamp: (now - ChronoDuration::minutes(5)).to_rfc3339(),
            station: Scope::B,
            severity: Severity::Medium,
            read: false,
        },
        Notification {
            id: "synthetic-2".to_string(),
            kind: NotificationKind::Info,
            title: "Maintenance Scheduled".to_string(),
            message: "Station A has upcoming maintenance.".to_string(),
            details: "Routine maintenance is scheduled for tomorrow.".to_string(),
            timestamp: (now - ChronoDuration::minutes(10)).to_rfc3339(),
            station: Scope::A,
            severity: Severity::Low,
            read: false,
        },
    ]
}

/// Smooth waveform per station plus bounded jitter, one full window deep.
fn seeded_history() -> SignalHistory {
    let mut rng = rand::thread_rng();
    let mut history = SignalHistory::default();
    for i in 0..WINDOW {
        let t = i as f64;
        history.push(
            BASE_SIGNAL_A + (t * 0.2).sin() * 3.0 + (rng.r#gen::<f64>() - 0.5) * 2.0,
            BASE_SIGNAL_B + (t * 0.15).cos() * 4.0 + (rng.r#gen::<f64>() - 0.5) * 3.0,
        );
    }
    history
}
