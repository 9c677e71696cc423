// Notification domain models
use serde::{Deserialize, Serialize};

use super::station::StationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Which part of the system a notification concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    A,
    B,
    Both,
    System,
}

impl Scope {
    pub fn station(id: StationId) -> Self {
        match id {
            StationId::A => Scope::A,
            StationId::B => Scope::B,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub details: String,
    /// RFC 3339 creation time, as delivered by the feed.
    pub timestamp: String,
    pub station: Scope,
    pub severity: Severity,
    pub read: bool,
}

/// Partial update for the control surface; only set fields are encoded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
}

impl NotificationUpdate {
    pub fn read(value: bool) -> Self {
        Self { read: Some(value) }
    }
}
