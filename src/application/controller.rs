// Reconciliation controller - confirmed vs displayed station state and the
// deferred-commit workflow for manual control inputs
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::control_gateway::ControlGateway;
use crate::application::feed::{FeedEvent, InitialSnapshot};
use crate::domain::alert::{Alert, AlertLog};
use crate::domain::notification::{Notification, NotificationUpdate};
use crate::domain::signal_history::SignalHistory;
use crate::domain::station::{Axis, PerStation, Station, StationId, StationMode};

/// Delay between a slider release and the confirmation prompt.
pub const COMMIT_CONFIRM_DELAY: Duration = Duration::from_secs(10);

/// Confirmation requests surfaced to the operator. The renderer owns the
/// modal and answers via `confirm_pending`, `decline_pending` or
/// `confirm_mode_change`.
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorPrompt {
    ManualAdjustment {
        station: StationId,
        axis: Axis,
        value: f64,
    },
    ModeChange {
        station: StationId,
        mode: StationMode,
        critical: bool,
    },
}

impl OperatorPrompt {
    pub fn title(&self) -> &'static str {
        match self {
            OperatorPrompt::ManualAdjustment { .. } => "Confirm Manual Adjustment",
            OperatorPrompt::ModeChange { .. } => "Confirm Mode Change",
        }
    }

    pub fn message(&self) -> String {
        match self {
            OperatorPrompt::ManualAdjustment {
                station,
                axis,
                value,
            } => format!(
                "This will command Station {station} to move. Are you sure you want to set {axis} to {value}°?"
            ),
            OperatorPrompt::ModeChange {
                station,
                mode,
                critical,
            } => {
                let warning = if *critical {
                    " This is a critical operation."
                } else {
                    ""
                };
                format!("Are you sure you want to switch Station {station} to {mode} mode?{warning}")
            }
        }
    }
}

/// An in-flight manual control change awaiting operator confirmation. The
/// countdown task is owned here; cancelling the record aborts it.
struct PendingAdjustment {
    station: StationId,
    axis: Axis,
    value: f64,
    countdown: JoinHandle<()>,
}

/// Owns the renderer-facing view state: confirmed station state as last
/// acknowledged by the feed, displayed state the operator actually sees,
/// plus notifications, signal history and the local alert log. At most one
/// pending manual adjustment exists at a time, system-wide.
pub struct DashboardController {
    gateway: Arc<dyn ControlGateway>,
    prompts: mpsc::Sender<OperatorPrompt>,
    confirmed: PerStation<Option<Station>>,
    displayed: PerStation<Option<Station>>,
    notifications: Vec<Notification>,
    signal_history: SignalHistory,
    alerts: AlertLog,
    pending: Option<PendingAdjustment>,
}

impl DashboardController {
    pub fn new(gateway: Arc<dyn ControlGateway>, prompts: mpsc::Sender<OperatorPrompt>) -> Self {
        Self {
            gateway,
            prompts,
            confirmed: PerStation::default(),
            displayed: PerStation::default(),
            notifications: Vec::new(),
            signal_history: SignalHistory::default(),
            alerts: AlertLog::default(),
            pending: None,
        }
    }

    /// Route one feed event into view state. Connection failures are the
    /// supervisor's concern and are ignored here.
    pub fn apply_feed_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Initial(snapshot) => self.apply_initial(snapshot),
            FeedEvent::Station { id, data } => self.apply_confirmed_update(id, data),
            FeedEvent::Notifications(list) => self.notifications = list,
            FeedEvent::SignalHistory(history) => self.signal_history = history,
            FeedEvent::ConnectionFailed => {}
        }
    }

    pub fn apply_initial(&mut self, snapshot: InitialSnapshot) {
        self.confirmed.a = Some(snapshot.station_a);
        self.confirmed.b = Some(snapshot.station_b);
        self.notifications = snapshot.notifications;
        self.signal_history = snapshot.signal_history;
        self.recompute_displayed();
    }

    /// Overwrite confirmed state for one station and refresh displayed state
    /// for both. A station with an in-flight pending edit keeps its
    /// locally-overridden axis value until the edit resolves.
    pub fn apply_confirmed_update(&mut self, id: StationId, data: Station) {
        *self.confirmed.get_mut(id) = Some(data);
        self.recompute_displayed();
    }

    /// Displayed state is confirmed state with the pending axis value, if
    /// any, overlaid on the pending station.
    fn recompute_displayed(&mut self) {
        self.displayed = self.confirmed.clone();
        if let Some(pending) = &self.pending {
            if let Some(station) = self.displayed.get_mut(pending.station).as_mut() {
                station.set_axis(pending.axis, pending.value);
            }
        }
    }

    /// Optimistically track a slider drag. Only valid in MANUAL mode; never
    /// starts a countdown. Supersedes any pending adjustment system-wide.
    pub fn begin_live_edit(&mut self, id: StationId, axis: Axis, value: f64) {
        if !self.is_manual(id) {
            return;
        }
        if self.cancel_countdown().is_some() {
            self.recompute_displayed();
        }
        if let Some(station) = self.displayed.get_mut(id).as_mut() {
            station.set_axis(axis, axis.constrain(value));
        }
    }

    /// Handle a slider release. An edit that lands back on the confirmed
    /// value is discarded outright; anything else becomes the single pending
    /// adjustment and starts the confirmation countdown.
    pub fn commit_edit(&mut self, id: StationId, axis: Axis, value: f64) {
        if !self.is_manual(id) {
            return;
        }
        self.cancel_countdown();

        let value = axis.constrain(value);
        let confirmed = self.confirmed.get(id).as_ref().map(|s| s.axis(axis));
        if confirmed == Some(value) {
            self.recompute_displayed();
            return;
        }

        let prompts = self.prompts.clone();
        let countdown = tokio::spawn(async move {
            tokio::time::sleep(COMMIT_CONFIRM_DELAY).await;
            let prompt = OperatorPrompt::ManualAdjustment {
                station: id,
                axis,
                value,
            };
            if prompts.send(prompt).await.is_err() {
                tracing::debug!("prompt channel closed before adjustment confirmation");
            }
        });
        self.pending = Some(PendingAdjustment {
            station: id,
            axis,
            value,
            countdown,
        });
        self.recompute_displayed();
    }

    /// Operator approved the pending adjustment: dispatch the command and
    /// clear the record. Displayed state already shows the committed value.
    pub async fn confirm_pending(&mut self) {
        let Some(pending) = self.cancel_countdown() else {
            return;
        };
        if let Err(error) = self
            .gateway
            .update_station_value(pending.station, pending.axis, pending.value)
            .await
        {
            tracing::warn!(
                station = %pending.station,
                axis = %pending.axis,
                %error,
                "manual adjustment dispatch failed"
            );
        }
    }

    /// Operator declined: displayed state reverts to the last confirmed
    /// value for that station.
    pub fn decline_pending(&mut self) {
        if self.cancel_countdown().is_some() {
            self.recompute_displayed();
        }
    }

    /// Request an operating-mode change. Any pending adjustment is cancelled
    /// first (its displayed axis reverts to confirmed), then a confirmation
    /// prompt is raised - flagged critical for MAINT and ERROR.
    pub async fn set_mode(&mut self, id: StationId, mode: StationMode) {
        if self.cancel_countdown().is_some() {
            self.recompute_displayed();
        }
        let prompt = OperatorPrompt::ModeChange {
            station: id,
            mode,
            critical: matches!(mode, StationMode::Maint | StationMode::Error),
        };
        if self.prompts.send(prompt).await.is_err() {
            tracing::warn!("prompt channel closed, dropping mode-change request");
        }
    }

    /// Operator approved the mode change: dispatch it and record a local
    /// alert for the action.
    pub async fn confirm_mode_change(&mut self, id: StationId, mode: StationMode) {
        if let Err(error) = self.gateway.set_station_mode(id, mode).await {
            tracing::warn!(station = %id, %mode, %error, "mode change dispatch failed");
        }
        self.alerts.push(Alert::mode_change(id, mode));
    }

    pub async fn mark_notification_read(&mut self, id: &str) {
        if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) {
            notification.read = true;
        }
        if let Err(error) = self
            .gateway
            .update_notification(id, &NotificationUpdate::read(true))
            .await
        {
            tracing::warn!(notification = id, %error, "notification update dispatch failed");
        }
    }

    pub async fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
        if let Err(error) = self.gateway.mark_all_notifications_read().await {
            tracing::warn!(%error, "mark-all-read dispatch failed");
        }
    }

    pub async fn delete_notification(&mut self, id: &str) {
        self.notifications.retain(|n| n.id != id);
        if let Err(error) = self.gateway.delete_notification(id).await {
            tracing::warn!(notification = id, %error, "notification delete dispatch failed");
        }
    }

    pub async fn clear_all_notifications(&mut self) {
        self.notifications.clear();
        if let Err(error) = self.gateway.clear_all_notifications().await {
            tracing::warn!(%error, "clear-all dispatch failed");
        }
    }

    /// Cancel the outstanding countdown, if any. Called on teardown so an
    /// orphaned pending record cannot fire after the controller is gone.
    pub fn shutdown(&mut self) {
        self.cancel_countdown();
    }

    fn cancel_countdown(&mut self) -> Option<PendingAdjustment> {
        let pending = self.pending.take()?;
        pending.countdown.abort();
        Some(pending)
    }

    fn is_manual(&self, id: StationId) -> bool {
        self.displayed
            .get(id)
            .as_ref()
            .is_some_and(|s| s.mode == StationMode::Manual)
    }

    pub fn displayed(&self, id: StationId) -> Option<&Station> {
        self.displayed.get(id).as_ref()
    }

    pub fn confirmed(&self, id: StationId) -> Option<&Station> {
        self.confirmed.get(id).as_ref()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn signal_history(&self) -> &SignalHistory {
        &self.signal_history
    }

    pub fn alerts(&self) -> &[Alert] {
        self.alerts.entries()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::station::Environment;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::timeout;

    #[derive(Default)]
    struct RecordingGateway {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingGateway {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ControlGateway for RecordingGateway {
        async fn set_station_mode(
            &self,
            station: StationId,
            mode: StationMode,
        ) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(format!("mode {station} {mode}"));
            Ok(())
        }

        async fn update_station_value(
            &self,
            station: StationId,
            axis: Axis,
            value: f64,
        ) -> anyhow::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("control {station} {axis} {value}"));
            Ok(())
        }

        async fn update_notification(
            &self,
            id: &str,
            update: &NotificationUpdate,
        ) -> anyhow::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("notify {id} read={:?}", update.read));
            Ok(())
        }

        async fn mark_all_notifications_read(&self) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("mark-all-read".to_string());
            Ok(())
        }

        async fn delete_notification(&self, id: &str) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(format!("delete {id}"));
            Ok(())
        }

        async fn clear_all_notifications(&self) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("clear-all".to_string());
            Ok(())
        }
    }

    fn station(mode: StationMode) -> Station {
        Station {
            azimuth: 100.0,
            elevation: 45.0,
            mode,
            signal: -70.0,
            env: Environment {
                temp: 20.0,
                humidity: 50.0,
                wind: 10.0,
                pressure: 1013.0,
                rain: 0.0,
                visibility: 10.0,
            },
        }
    }

    fn setup() -> (
        DashboardController,
        mpsc::Receiver<OperatorPrompt>,
        Arc<RecordingGateway>,
    ) {
        let gateway = Arc::new(RecordingGateway::default());
        let (tx, rx) = mpsc::channel(8);
        let mut controller = DashboardController::new(gateway.clone(), tx);
        // Station A manually controllable, station B software-tracked.
        controller.apply_confirmed_update(StationId::A, station(StationMode::Manual));
        controller.apply_confirmed_update(StationId::B, station(StationMode::Auto));
        (controller, rx, gateway)
    }

    #[tokio::test]
    async fn test_displayed_tracks_confirmed_without_pending() {
        let (mut controller, _rx, _gateway) = setup();
        for signal in [-68.0, -74.5, -61.2] {
            let mut update = station(StationMode::Manual);
            update.signal = signal;
            controller.apply_confirmed_update(StationId::A, update);
            assert_eq!(
                controller.displayed(StationId::A),
                controller.confirmed(StationId::A)
            );
            assert_eq!(
                controller.displayed(StationId::B),
                controller.confirmed(StationId::B)
            );
        }
    }

    #[tokio::test]
    async fn test_initial_snapshot_populates_displayed_state() {
        let gateway = Arc::new(RecordingGateway::default());
        let (tx, _rx) = mpsc::channel(8);
        let mut controller = DashboardController::new(gateway, tx);
        assert!(controller.displayed(StationId::A).is_none());

        controller.apply_feed_event(FeedEvent::Initial(InitialSnapshot {
            station_a: station(StationMode::Auto),
            station_b: station(StationMode::Manual),
            notifications: Vec::new(),
            signal_history: SignalHistory::default(),
        }));

        assert!(controller.displayed(StationId::A).is_some());
        assert!(controller.displayed(StationId::B).is_some());
        assert_eq!(
            controller.displayed(StationId::A),
            controller.confirmed(StationId::A)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_edit_does_not_touch_other_station() {
        let (mut controller, _rx, _gateway) = setup();
        controller.begin_live_edit(StationId::A, Axis::Azimuth, 200.0);
        controller.commit_edit(StationId::A, Axis::Azimuth, 200.0);
        assert!(controller.has_pending());

        let mut update = station(StationMode::Auto);
        update.signal = -80.0;
        controller.apply_confirmed_update(StationId::B, update.clone());

        // B refreshes normally; A keeps the operator's azimuth.
        assert_eq!(controller.displayed(StationId::B), Some(&update));
        assert_eq!(controller.displayed(StationId::A).unwrap().azimuth, 200.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_edit_wins_over_same_station_update() {
        let (mut controller, _rx, _gateway) = setup();
        controller.commit_edit(StationId::A, Axis::Azimuth, 200.0);

        let mut update = station(StationMode::Manual);
        update.signal = -62.0;
        update.azimuth = 110.0;
        controller.apply_confirmed_update(StationId::A, update);

        let displayed = controller.displayed(StationId::A).unwrap();
        assert_eq!(displayed.azimuth, 200.0);
        assert_eq!(displayed.signal, -62.0);
        assert_eq!(controller.confirmed(StationId::A).unwrap().azimuth, 110.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_commit_supersedes_first_countdown() {
        let (mut controller, mut rx, _gateway) = setup();
        controller.commit_edit(StationId::A, Axis::Azimuth, 200.0);
        controller.commit_edit(StationId::A, Axis::Elevation, 60.0);

        let prompt = rx.recv().await.unwrap();
        assert_eq!(
            prompt,
            OperatorPrompt::ManualAdjustment {
                station: StationId::A,
                axis: Axis::Elevation,
                value: 60.0,
            }
        );
        // The superseded countdown must never fire.
        assert!(timeout(Duration::from_secs(30), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_at_confirmed_value_is_inert() {
        let (mut controller, mut rx, _gateway) = setup();
        controller.commit_edit(StationId::A, Axis::Azimuth, 100.0);
        assert!(!controller.has_pending());
        assert!(timeout(Duration::from_secs(30), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_decline_restores_confirmed_state() {
        let (mut controller, _rx, _gateway) = setup();
        controller.begin_live_edit(StationId::A, Axis::Azimuth, 250.0);
        controller.commit_edit(StationId::A, Axis::Azimuth, 250.0);
        controller.decline_pending();

        assert!(!controller.has_pending());
        assert_eq!(
            controller.displayed(StationId::A),
            controller.confirmed(StationId::A)
        );
    }

    #[tokio::test]
    async fn test_edit_outside_manual_mode_is_ignored() {
        let (mut controller, _rx, _gateway) = setup();
        let before = controller.displayed(StationId::B).cloned();
        controller.begin_live_edit(StationId::B, Axis::Azimuth, 200.0);
        controller.commit_edit(StationId::B, Axis::Azimuth, 200.0);
        assert_eq!(controller.displayed(StationId::B).cloned(), before);
        assert!(!controller.has_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_dispatches_and_clears_pending() {
        let (mut controller, mut rx, gateway) = setup();
        controller.commit_edit(StationId::A, Axis::Azimuth, 200.0);

        let prompt = rx.recv().await.unwrap();
        assert_eq!(prompt.title(), "Confirm Manual Adjustment");
        controller.confirm_pending().await;

        assert!(!controller.has_pending());
        assert_eq!(gateway.calls(), vec!["control A azimuth 200"]);
        assert_eq!(controller.displayed(StationId::A).unwrap().azimuth, 200.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_mode_cancels_pending_and_prompts() {
        let (mut controller, mut rx, _gateway) = setup();
        controller.commit_edit(StationId::A, Axis::Azimuth, 200.0);
        controller.set_mode(StationId::A, StationMode::Auto).await;

        assert!(!controller.has_pending());
        assert_eq!(
            controller.displayed(StationId::A),
            controller.confirmed(StationId::A)
        );

        let prompt = rx.recv().await.unwrap();
        assert_eq!(
            prompt,
            OperatorPrompt::ModeChange {
                station: StationId::A,
                mode: StationMode::Auto,
                critical: false,
            }
        );
        // The cancelled adjustment countdown must not fire afterwards.
        assert!(timeout(Duration::from_secs(30), rx.recv()).await.is_err());
    }

    #[tokio::test]
    async fn test_error_mode_change_prepends_one_alert() {
        let (mut controller, mut rx, gateway) = setup();
        controller.set_mode(StationId::B, StationMode::Error).await;

        let prompt = rx.recv().await.unwrap();
        assert_eq!(
            prompt,
            OperatorPrompt::ModeChange {
                station: StationId::B,
                mode: StationMode::Error,
                critical: true,
            }
        );

        controller
            .confirm_mode_change(StationId::B, StationMode::Error)
            .await;
        assert_eq!(controller.alerts().len(), 1);
        assert!(controller.alerts()[0].message.contains("ERROR"));
        assert_eq!(controller.alerts()[0].station, StationId::B);
        assert_eq!(gateway.calls(), vec!["mode B ERROR"]);
    }

    #[tokio::test]
    async fn test_notification_mutations_are_optimistic() {
        let (mut controller, _rx, gateway) = setup();
        controller.apply_feed_event(FeedEvent::Notifications(vec![Notification {
            id: "n-1".to_string(),
            kind: crate::domain::notification::NotificationKind::Info,
            title: "t".to_string(),
            message: "m".to_string(),
            details: "d".to_string(),
            timestamp: "2026-08-04T10:00:00Z".to_string(),
            station: crate::domain::notification::Scope::System,
            severity: crate::domain::notification::Severity::Low,
            read: false,
        }]));

        controller.mark_notification_read("n-1").await;
        assert!(controller.notifications()[0].read);

        controller.delete_notification("n-1").await;
        assert!(controller.notifications().is_empty());

        assert_eq!(
            gateway.calls(),
            vec!["notify n-1 read=Some(true)", "delete n-1"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_orphaned_countdown() {
        let (mut controller, mut rx, _gateway) = setup();
        controller.commit_edit(StationId::A, Axis::Azimuth, 200.0);
        // Mode flips away from MANUAL while the countdown is pending.
        controller.apply_confirmed_update(StationId::A, station(StationMode::Auto));
        assert!(controller.has_pending());

        controller.shutdown();
        assert!(!controller.has_pending());
        assert!(timeout(Duration::from_secs(30), rx.recv()).await.is_err());
    }
}
