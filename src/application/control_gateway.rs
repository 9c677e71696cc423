// Gateway trait for the outbound control surface
use async_trait::async_trait;

use crate::domain::notification::NotificationUpdate;
use crate::domain::station::{Axis, StationId, StationMode};

/// Outbound command seam. Implemented by the REST gateway and wrapped by the
/// command dispatcher; callers treat every method as fire-and-forget.
#[async_trait]
pub trait ControlGateway: Send + Sync {
    /// Request an operating-mode change for one station.
    async fn set_station_mode(&self, station: StationId, mode: StationMode) -> anyhow::Result<()>;

    /// Command a manual axis value; only meaningful while the station is in
    /// MANUAL mode.
    async fn update_station_value(
        &self,
        station: StationId,
        axis: Axis,
        value: f64,
    ) -> anyhow::Result<()>;

    /// Apply a partial update to one notification.
    async fn update_notification(
        &self,
        id: &str,
        update: &NotificationUpdate,
    ) -> anyhow::Result<()>;

    async fn mark_all_notifications_read(&self) -> anyhow::Result<()>;

    async fn delete_notification(&self, id: &str) -> anyhow::Result<()>;

    async fn clear_all_notifications(&self) -> anyhow::Result<()>;
}
