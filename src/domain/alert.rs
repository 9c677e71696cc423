// Local operator-feedback alerts for mode changes
use chrono::Local;

use super::station::{StationId, StationMode};

/// How many alerts are retained, most-recent-first.
pub const ALERT_CAPACITY: usize = 5;

/// Ephemeral feedback entry for a local mode-change action. Never persisted
/// and never delivered by the feed; discarded on reload.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub station: StationId,
    pub mode: StationMode,
    pub message: String,
    pub timestamp: String,
}

impl Alert {
    pub fn mode_change(station: StationId, mode: StationMode) -> Self {
        let message = match mode {
            StationMode::Auto => format!("Station {station}: Switched to automatic mode"),
            StationMode::Manual => format!("Station {station}: Manual control activated"),
            StationMode::Maint => format!("Station {station}: Maintenance mode enabled"),
            StationMode::Error => format!("Station {station}: ERROR - System fault detected"),
        };
        Self {
            station,
            mode,
            message,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

/// Capped newest-first alert list.
#[derive(Debug, Clone, Default)]
pub struct AlertLog {
    entries: Vec<Alert>,
}

impl AlertLog {
    pub fn push(&mut self, alert: Alert) {
        self.entries.insert(0, alert);
        self.entries.truncate(ALERT_CAPACITY);
    }

    pub fn entries(&self) -> &[Alert] {
        &self.entries
    }
}
