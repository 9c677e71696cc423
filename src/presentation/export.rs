// Client-side report and CSV exports built from current view state
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::notification::Notification;
use crate::domain::signal_history::SignalHistory;
use crate::domain::station::Station;
use crate::presentation::summary::SystemStatus;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport<'a> {
    timestamp: String,
    system_status: SystemStatus,
    station_a: Option<&'a Station>,
    station_b: Option<&'a Station>,
    notifications: &'a [Notification],
}

/// Pretty-printed JSON status report of the current dashboard state.
pub fn status_report(
    now: DateTime<Utc>,
    status: SystemStatus,
    station_a: Option<&Station>,
    station_b: Option<&Station>,
    notifications: &[Notification],
) -> anyhow::Result<String> {
    let report = StatusReport {
        timestamp: now.to_rfc3339(),
        system_status: status,
        station_a,
        station_b,
        notifications,
    };
    serde_json::to_string_pretty(&report).context("serializing status report")
}

pub fn report_file_name(now: DateTime<Utc>) -> String {
    format!("satellite-monitoring-report-{}.json", now.format("%Y-%m-%d"))
}

/// CSV of the rolling signal history, one row per sample. Samples carry a
/// minutes-ago timestamp counted back from `now`, oldest first.
pub fn signal_history_csv(now: DateTime<Utc>, history: &SignalHistory) -> anyhow::Result<String> {
    if history.is_empty() {
        anyhow::bail!("no signal history data available to export");
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Timestamp",
        "Station A Signal (dBm)",
        "Station B Signal (dBm)",
    ])?;

    let len = history.len();
    for (index, (signal_a, signal_b)) in history.a.iter().zip(&history.b).enumerate() {
        let minutes_ago = (len - index) as i64;
        let timestamp = now - Duration::minutes(minutes_ago);
        writer.write_record([
            timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("{signal_a:.2}"),
            format!("{signal_b:.2}"),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| anyhow::anyhow!("finishing csv export: {error}"))?;
    String::from_utf8(bytes).context("csv export was not valid utf-8")
}

pub fn csv_file_name(now: DateTime<Utc>) -> String {
    format!("signal_history_{}.csv", now.format("%Y-%m-%d"))
}
