use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub feed: FeedSettings,
    pub control: ControlSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedSettings {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ControlSettings {
    pub base_url: String,
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .set_default("feed.url", "ws://localhost:8000/ws")?
        .set_default("control.base_url", "http://localhost:8000/api")?
        .build()?;

    Ok(settings.try_deserialize()?)
}
