// Main entry point - dependency injection and the dashboard event loop
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::controller::DashboardController;
use crate::application::dispatcher::CommandDispatcher;
use crate::application::feed::FeedEvent;
use crate::domain::station::StationId;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::feed_client::FeedClient;
use crate::infrastructure::rest_gateway::RestControlGateway;
use crate::presentation::summary;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create the transport client (infrastructure layer)
    let mut client = FeedClient::new(config.feed.url);

    // Create the control gateway and dispatcher
    let gateway = Arc::new(RestControlGateway::new(config.control.base_url));
    let dispatcher = Arc::new(CommandDispatcher::new(gateway, client.link_state()));

    // Create the controller (application layer)
    let (prompt_tx, mut prompts) = mpsc::channel(16);
    let mut controller = DashboardController::new(dispatcher, prompt_tx);

    let (event_tx, mut events) = mpsc::channel(64);
    client.connect(event_tx);

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                if matches!(event, FeedEvent::ConnectionFailed) {
                    tracing::warn!("live feed unavailable, falling back to synthetic data");
                    client.start_synthetic();
                }
                controller.apply_feed_event(event);

                let status = summary::system_status(
                    controller.displayed(StationId::A),
                    controller.displayed(StationId::B),
                );
                tracing::debug!(
                    %status,
                    unread = summary::unread_count(controller.notifications()),
                    "view state refreshed"
                );
            }
            prompt = prompts.recv() => {
                let Some(prompt) = prompt else { break };
                // Headless stand-in for the renderer's confirmation modal.
                tracing::info!(title = prompt.title(), "{}", prompt.message());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    controller.shutdown();
    client.disconnect();
    Ok(())
}
