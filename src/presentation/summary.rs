// Derived header-line state for the renderer
use serde::Serialize;

use crate::domain::notification::Notification;
use crate::domain::station::{Station, StationMode};

/// Worst-mode-wins rollup across both stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemStatus {
    Operational,
    Maintenance,
    Error,
}

impl std::fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SystemStatus::Operational => "OPERATIONAL",
            SystemStatus::Maintenance => "MAINTENANCE",
            SystemStatus::Error => "ERROR",
        };
        f.write_str(name)
    }
}

pub fn system_status(station_a: Option<&Station>, station_b: Option<&Station>) -> SystemStatus {
    let has = |mode: StationMode| {
        [station_a, station_b]
            .into_iter()
            .flatten()
            .any(|station| station.mode == mode)
    };
    if has(StationMode::Error) {
        SystemStatus::Error
    } else if has(StationMode::Maint) {
        SystemStatus::Maintenance
    } else {
        SystemStatus::Operational
    }
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}
