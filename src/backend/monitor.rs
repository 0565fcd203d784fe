//! # Status Monitor
//!
//! Background task that polls the status endpoint and pushes every snapshot
//! to subscribers of the `status-changed` channel.
//!
//! ## Behaviour
//!
//! - The first poll happens immediately, then every `poll_interval`.
//! - Every successful poll is stored as the last known status and broadcast,
//!   whether or not anything changed.
//! - A change in connectivity (first status ever, or `connected` flipped) is
//!   logged and handed to the configured [`Notifier`] with
//!   `notification_message` as the body.
//! - A failed poll is logged; the last known status is kept and polling goes on.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vpn_status::backend::{DesktopNotifier, StatusChecker, StatusMonitor};
//! use vpn_status::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let mut monitor = StatusMonitor::new(StatusChecker::new(&config)?, &config)
//!     .with_notifier(DesktopNotifier);
//! monitor.start();
//!
//! let mut updates = monitor.handle().events().subscribe();
//! let status = updates.recv().await?;
//! println!("connected: {}", status.connected);
//! # Ok(())
//! # }
//! ```

use crate::backend::checker::StatusChecker;
use crate::backend::error::MonitorError;
use crate::backend::notifier::{Notifier, NOTIFICATION_TITLE};
use crate::shared::status::notification_message;
use crate::shared::{AppConfig, ConnectionStatus};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Result of one successful poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    pub status: ConnectionStatus,
    /// Connectivity differs from the previous poll (or there was none)
    pub connectivity_changed: bool,
    /// Subscribers that received the snapshot
    pub delivered_to: usize,
}

/// Shared view of the monitor: last status plus the broadcast channel.
///
/// Cheap to clone; the bridge holds one to answer commands.
#[derive(Clone)]
pub struct MonitorHandle {
    last_status: Arc<RwLock<Option<ConnectionStatus>>>,
    events: broadcast::Sender<ConnectionStatus>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl fmt::Debug for MonitorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorHandle")
            .field("subscribers", &self.events.receiver_count())
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

impl MonitorHandle {
    pub fn new(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            last_status: Arc::new(RwLock::new(None)),
            events,
            notifier: None,
        }
    }

    /// Announce connectivity changes through `notifier` as well as the log
    pub fn with_notifier(mut self, notifier: impl Notifier) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    /// Last successfully polled status, if any
    pub async fn last_status(&self) -> Option<ConnectionStatus> {
        self.last_status.read().await.clone()
    }

    pub fn events(&self) -> &broadcast::Sender<ConnectionStatus> {
        &self.events
    }

    /// Store `status` and broadcast it
    pub async fn publish(&self, status: ConnectionStatus) -> PollOutcome {
        let connectivity_changed = {
            let mut last = self.last_status.write().await;
            let changed = match last.as_ref() {
                Some(previous) => previous.connected != status.connected,
                None => true,
            };
            *last = Some(status.clone());
            changed
        };

        let delivered_to = match self.events.send(status.clone()) {
            Ok(count) => count,
            Err(_) => {
                tracing::debug!("[Monitor] No subscribers for status update");
                0
            }
        };

        if connectivity_changed {
            let message = notification_message(&status);
            tracing::info!("[Monitor] {}", message);
            if let Some(notifier) = &self.notifier {
                notifier.notify(NOTIFICATION_TITLE, &message);
            }
        }

        PollOutcome {
            status,
            connectivity_changed,
            delivered_to,
        }
    }
}

/// Periodic status poller
#[derive(Debug)]
pub struct StatusMonitor {
    checker: StatusChecker,
    handle: MonitorHandle,
    poll_interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl StatusMonitor {
    pub fn new(checker: StatusChecker, config: &AppConfig) -> Self {
        Self {
            checker,
            handle: MonitorHandle::new(config.event_capacity),
            poll_interval: config.poll_interval(),
            task: None,
        }
    }

    /// Set the notifier before `start()`; handles taken earlier keep theirs
    pub fn with_notifier(mut self, notifier: impl Notifier) -> Self {
        self.handle = self.handle.clone().with_notifier(notifier);
        self
    }

    pub fn handle(&self) -> MonitorHandle {
        self.handle.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Start polling in the background. Calling it again is a no-op.
    pub fn start(&mut self) {
        if self.task.is_some() {
            tracing::warn!("[Monitor] Already running");
            return;
        }

        let checker = self.checker.clone();
        let handle = self.handle.clone();
        let poll_interval = self.poll_interval;

        tracing::info!(
            "[Monitor] Polling {} every {:?}",
            checker.url(),
            poll_interval
        );

        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if let Err(e) = Self::poll(&checker, &handle).await {
                    tracing::error!("[Monitor] Failed to check VPN status: {}", e);
                }
            }
        }));
    }

    /// Stop polling; the last known status stays available
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::info!("[Monitor] Stopped");
        }
    }

    /// Run a single poll cycle now
    pub async fn poll_once(&self) -> Result<PollOutcome, MonitorError> {
        Self::poll(&self.checker, &self.handle).await
    }

    async fn poll(
        checker: &StatusChecker,
        handle: &MonitorHandle,
    ) -> Result<PollOutcome, MonitorError> {
        let status = checker.check().await?;
        tracing::debug!(
            "[Monitor] Polled status: connected={} ip={:?}",
            status.connected,
            status.ip
        );
        Ok(handle.publish(status).await)
    }
}

impl Drop for StatusMonitor {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
