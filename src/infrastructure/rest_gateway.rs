// REST implementation of the outbound control surface
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::control_gateway::ControlGateway;
use crate::domain::notification::NotificationUpdate;
use crate::domain::station::{Axis, StationId, StationMode};

/// `ControlGateway` over the dashboard's REST API. A non-2xx status is an
/// error for the caller to log; there are no retries and no queuing.
#[derive(Debug, Clone)]
pub struct RestControlGateway {
    client: reqwest::Client,
    base_url: String,
}

impl RestControlGateway {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post(&self, path: &str, body: &Value) -> Result<()> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {path}"))?;

        if !response.status().is_success() {
            anyhow::bail!("POST {} failed with status {}", path, response.status());
        }
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await
            .with_context(|| format!("Failed to DELETE {path}"))?;

        if !response.status().is_success() {
            anyhow::bail!("DELETE {} failed with status {}", path, response.status());
        }
        Ok(())
    }
}

#[async_trait]
impl ControlGateway for RestControlGateway {
    async fn set_station_mode(&self, station: StationId, mode: StationMode) -> Result<()> {
        self.post(&format!("/stations/{station}/mode"), &json!({ "mode": mode }))
            .await
    }

    async fn update_station_value(&self, station: StationId, axis: Axis, value: f64) -> Result<()> {
        self.post(
            &format!("/stations/{station}/control"),
            &json!({ "key": axis, "value": value }),
        )
        .await
    }

    async fn update_notification(&self, id: &str, update: &NotificationUpdate) -> Result<()> {
        let body = serde_json::to_value(update).context("encoding notification update")?;
        self.post(&format!("/notifications/{id}"), &body).await
    }

    async fn mark_all_notifications_read(&self) -> Result<()> {
        self.post("/notifications/mark-all-read", &json!({})).await
    }

    async fn delete_notification(&self, id: &str) -> Result<()> {
        self.delete(&format!("/notifications/{id}")).await
    }

    async fn clear_all_notifications(&self) -> Result<()> {
        self.delete("/notifications/all").await
    }
}
