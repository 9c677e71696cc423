// Command dispatcher - routes confirmed operator intents outward
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::application::control_gateway::ControlGateway;
use crate::application::feed::LinkState;
use crate::domain::notification::NotificationUpdate;
use crate::domain::station::{Axis, StationId, StationMode};

/// Pass-through gateway that consults the transport lifecycle before every
/// command: while the synthetic feed is active, commands are local no-ops
/// that still resolve successfully. No retries, no queuing.
pub struct CommandDispatcher {
    gateway: Arc<dyn ControlGateway>,
    link: watch::Receiver<LinkState>,
}

impl CommandDispatcher {
    pub fn new(gateway: Arc<dyn ControlGateway>, link: watch::Receiver<LinkState>) -> Self {
        Self { gateway, link }
    }

    fn offline(&self, command: &str) -> bool {
        if *self.link.borrow() == LinkState::Synthetic {
            tracing::debug!(command, "synthetic mode active, dropping outbound command");
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl ControlGateway for CommandDispatcher {
    async fn set_station_mode(&self, station: StationId, mode: StationMode) -> anyhow::Result<()> {
        if self.offline("set_station_mode") {
            return Ok(());
        }
        self.gateway.set_station_mode(station, mode).await
    }

    async fn update_station_value(
        &self,
        station: StationId,
        axis: Axis,
        value: f64,
    ) -> anyhow::Result<()> {
        if self.offline("update_station_value") {
            return Ok(());
        }
        self.gateway.update_station_value(station, axis, value).await
    }

    async fn update_notification(
        &self,
        id: &str,
        update: &NotificationUpdate,
    ) -> anyhow::Result<()> {
        if self.offline("update_notification") {
            return Ok(());
        }
        self.gateway.update_notification(id, update).await
    }

    async fn mark_all_notifications_read(&self) -> anyhow::Result<()> {
        if self.offline("mark_all_notifications_read") {
            return Ok(());
        }
        self.gateway.mark_all_notifications_read().await
    }

    async fn delete_notification(&self, id: &str) -> anyhow::Result<()> {
        if self.offline("delete_notification") {
            return Ok(());
        }
        self.gateway.delete_notification(id).await
    }

    async fn clear_all_notifications(&self) -> anyhow::Result<()> {
        if self.offline("clear_all_notifications") {
            return Ok(());
        }
        self.gateway.clear_all_notifications().await
    }
}
