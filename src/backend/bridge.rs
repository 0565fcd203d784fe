/**
 * In-process Bridge
 *
 * Serves the command/event boundary from inside the same process: commands
 * are answered from the monitor's last status and the autostart registry,
 * and the push channel is a subscription to the monitor's broadcast.
 *
 * # Lagging subscribers
 *
 * A subscriber that falls more than the channel capacity behind skips the
 * snapshots it missed. Since every snapshot is complete, the next one it does
 * receive is still a valid current status.
 */
use crate::backend::autostart::AutostartRegistry;
use crate::backend::monitor::MonitorHandle;
use crate::shared::command::QUERY_STATUS;
use crate::shared::event::STATUS_CHANGED;
use crate::shared::{BridgeError, ConnectionStatus, StatusCommands, StatusEvents, Subscription};
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Commands and events backed by a running `StatusMonitor`
#[derive(Debug)]
pub struct LocalBridge<A> {
    monitor: MonitorHandle,
    autostart: Arc<A>,
}

impl<A: AutostartRegistry> LocalBridge<A> {
    pub fn new(monitor: MonitorHandle, autostart: A) -> Self {
        Self {
            monitor,
            autostart: Arc::new(autostart),
        }
    }
}

impl<A: AutostartRegistry> StatusCommands for LocalBridge<A> {
    async fn query_status(&self) -> Result<ConnectionStatus, BridgeError> {
        tracing::debug!("[Bridge] {}", QUERY_STATUS);
        self.monitor
            .last_status()
            .await
            .ok_or_else(|| BridgeError::unavailable("Status not available yet"))
    }

    async fn read_autostart(&self) -> Result<bool, BridgeError> {
        let registry = Arc::clone(&self.autostart);
        run_blocking(move || registry.is_enabled().map_err(|e| e.into_bridge(None))).await
    }

    async fn write_autostart(&self, enable: bool) -> Result<(), BridgeError> {
        let registry = Arc::clone(&self.autostart);
        run_blocking(move || {
            registry
                .set_enabled(enable)
                .map_err(|e| e.into_bridge(Some(enable)))
        })
        .await
    }
}

impl<A: AutostartRegistry> StatusEvents for LocalBridge<A> {
    async fn subscribe(&self) -> Result<Subscription, BridgeError> {
        let rx = self.monitor.events().subscribe();
        tracing::info!("[Bridge] Subscribed to {}", STATUS_CHANGED);

        let events = stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(status) => return Some((status, rx)),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "[Bridge] Subscriber lagged, skipped {} status updates",
                            skipped
                        );
                        continue;
                    }
                    Err(RecvError::Closed) => {
                        tracing::debug!("[Bridge] {} channel closed", STATUS_CHANGED);
                        return None;
                    }
                }
            }
        })
        .boxed();

        Ok(Subscription::new(
            events,
            Box::new(|| tracing::info!("[Bridge] Unsubscribed from {}", STATUS_CHANGED)),
        ))
    }
}

/// Registry calls touch the filesystem; keep them off the async workers
async fn run_blocking<T, F>(f: F) -> Result<T, BridgeError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, BridgeError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BridgeError::command("autostart", format!("task failed: {}", e)))?
}
