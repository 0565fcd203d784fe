//! # Status Synchronization
//!
//! Keeps the single current `ConnectionStatus` for the view, fed by two
//! independent producers:
//!
//! - a one-shot **initial fetch** (`query-status`), which also owns the
//!   `loading` flag: it is cleared when the fetch settles, success or not, so
//!   the view never waits forever on a failed fetch;
//! - the **push channel** (`status-changed`), whose snapshots replace the
//!   stored status wholesale, every time, with no ordering check.
//!
//! ## Ordering
//!
//! Both producers start together and write the same slot unordered. If a push
//! arrives before a slow fetch resolves, the (older) fetch result lands last
//! and wins. The next push corrects it.
//!
//! ## Teardown
//!
//! `stop()` does not abort the in-flight fetch; its result is dropped instead
//! of being applied. A subscription that opens after `stop()` is unsubscribed
//! as soon as it arrives.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut sync = StatusSync::new(bridge);
//! sync.start();
//!
//! // each frame
//! let view = sync.view();
//! if view.loading { /* spinner */ }
//!
//! // on unmount
//! sync.stop();
//! ```

use crate::shared::{ConnectionStatus, StatusCommands, StatusEvents};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Where the push subscription is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubscriptionState {
    /// `start()` has not been called
    #[default]
    Idle,
    /// Waiting for `subscribe()` to resolve
    Opening,
    /// Receiving snapshots
    Open,
    /// `subscribe()` failed; status keeps its last known value
    Failed(String),
    /// Unsubscribed, or closed by the producer
    Closed,
}

/// Everything the status views render
#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    /// Last known status; `None` until a producer reports one
    pub status: Option<ConnectionStatus>,
    /// True until the initial fetch settles
    pub loading: bool,
    pub subscription: SubscriptionState,
    /// Why the initial fetch failed, if it did
    pub fetch_error: Option<String>,
    /// When `status` was last replaced
    pub updated_at: Option<DateTime<Utc>>,
    /// Snapshots applied from the push channel
    pub pushes_applied: u64,
}

impl Default for StatusView {
    fn default() -> Self {
        Self {
            status: None,
            loading: true,
            subscription: SubscriptionState::Idle,
            fetch_error: None,
            updated_at: None,
            pushes_applied: 0,
        }
    }
}

impl StatusView {
    /// Connectivity to display; unknown counts as disconnected
    pub fn connected(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.connected)
    }

    /// Status the card renders: `None` only while the initial fetch is
    /// outstanding, disconnected once it settled without a status
    pub fn shown_status(&self) -> Option<ConnectionStatus> {
        match &self.status {
            Some(status) => Some(status.clone()),
            None if self.loading => None,
            None => Some(ConnectionStatus::disconnected()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Running,
    Stopped,
}

/// Owner of the connection status for one mounted view
pub struct StatusSync<B> {
    bridge: Arc<B>,
    view: Arc<watch::Sender<StatusView>>,
    teardown: watch::Sender<bool>,
    lifecycle: Lifecycle,
    tasks: Vec<JoinHandle<()>>,
}

impl<B: StatusCommands + StatusEvents> StatusSync<B> {
    pub fn new(bridge: Arc<B>) -> Self {
        let (view, _) = watch::channel(StatusView::default());
        let (teardown, _) = watch::channel(false);
        Self {
            bridge,
            view: Arc::new(view),
            teardown,
            lifecycle: Lifecycle::Created,
            tasks: Vec::new(),
        }
    }

    /// Snapshot of the current view state
    pub fn view(&self) -> StatusView {
        self.view.borrow().clone()
    }

    pub fn status(&self) -> Option<ConnectionStatus> {
        self.view.borrow().status.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.view.borrow().loading
    }

    /// Receiver notified on every view change
    pub fn watch(&self) -> watch::Receiver<StatusView> {
        self.view.subscribe()
    }

    /// Kick off the initial fetch and open the push subscription.
    ///
    /// Must run inside a Tokio runtime. Only the first call has an effect.
    pub fn start(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            tracing::warn!("[StatusSync] start() ignored, already {:?}", self.lifecycle);
            return;
        }
        self.lifecycle = Lifecycle::Running;
        tracing::info!("[StatusSync] Starting initial fetch and subscription");

        self.view
            .send_modify(|v| v.subscription = SubscriptionState::Opening);

        self.tasks.push(tokio::spawn(fetch_initial(
            Arc::clone(&self.bridge),
            Arc::clone(&self.view),
            self.teardown.subscribe(),
        )));
        self.tasks.push(tokio::spawn(follow_updates(
            Arc::clone(&self.bridge),
            Arc::clone(&self.view),
            self.teardown.subscribe(),
        )));
    }

    /// Tear down: stop applying results and release the subscription
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Stopped {
            return;
        }
        self.lifecycle = Lifecycle::Stopped;
        raise_teardown(&self.view, &self.teardown);
        tracing::info!("[StatusSync] Stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.lifecycle == Lifecycle::Stopped
    }

    /// Wait for both background tasks to finish.
    ///
    /// The subscription task only finishes after `stop()` or when the
    /// producer closes the channel.
    pub async fn join(&mut self) {
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                tracing::error!("[StatusSync] Background task failed: {}", e);
            }
        }
    }
}

impl<B> Drop for StatusSync<B> {
    fn drop(&mut self) {
        raise_teardown(&self.view, &self.teardown);
    }
}

async fn fetch_initial<B: StatusCommands>(
    bridge: Arc<B>,
    view: Arc<watch::Sender<StatusView>>,
    teardown: watch::Receiver<bool>,
) {
    let result = bridge.query_status().await;

    let applied = match result {
        Ok(status) => {
            tracing::debug!("[StatusSync] Initial status: connected={}", status.connected);
            apply_live(&view, &teardown, |v| {
                v.status = Some(status);
                v.updated_at = Some(Utc::now());
                v.loading = false;
            })
        }
        Err(e) => {
            tracing::error!("[StatusSync] Failed to fetch VPN status: {}", e);
            apply_live(&view, &teardown, |v| {
                v.fetch_error = Some(e.to_string());
                v.loading = false;
            })
        }
    };

    if !applied {
        tracing::debug!("[StatusSync] View torn down, dropped initial fetch result");
    }
}

/// Apply `update` unless the view has been torn down.
///
/// The flag is read under the view's write lock, and `stop()` raises it under
/// the same lock, so nothing is applied once `stop()` has returned.
fn apply_live(
    view: &watch::Sender<StatusView>,
    teardown: &watch::Receiver<bool>,
    update: impl FnOnce(&mut StatusView),
) -> bool {
    view.send_if_modified(|v| {
        if *teardown.borrow() {
            return false;
        }
        update(v);
        true
    })
}

fn raise_teardown(view: &watch::Sender<StatusView>, teardown: &watch::Sender<bool>) {
    view.send_if_modified(|_| {
        teardown.send_replace(true);
        false
    });
}

async fn follow_updates<B: StatusEvents>(
    bridge: Arc<B>,
    view: Arc<watch::Sender<StatusView>>,
    mut teardown: watch::Receiver<bool>,
) {
    let mut subscription = match bridge.subscribe().await {
        Ok(subscription) => subscription,
        Err(e) => {
            tracing::error!("[StatusSync] Failed to subscribe to status updates: {}", e);
            apply_live(&view, &teardown, |v| {
                v.subscription = SubscriptionState::Failed(e.to_string())
            });
            return;
        }
    };

    if *teardown.borrow() {
        tracing::debug!("[StatusSync] Subscription opened after teardown, unsubscribing");
        subscription.unsubscribe();
        return;
    }

    view.send_modify(|v| v.subscription = SubscriptionState::Open);

    loop {
        tokio::select! {
            biased;

            changed = teardown.changed() => {
                if changed.is_err() || *teardown.borrow() {
                    break;
                }
            }
            next = subscription.next() => match next {
                Some(status) => {
                    tracing::debug!("[StatusSync] Push update: connected={}", status.connected);
                    let applied = apply_live(&view, &teardown, |v| {
                        v.status = Some(status);
                        v.updated_at = Some(Utc::now());
                        v.pushes_applied += 1;
                    });
                    if !applied {
                        break;
                    }
                }
                None => {
                    tracing::warn!("[StatusSync] Status channel closed by producer");
                    break;
                }
            }
        }
    }

    subscription.unsubscribe();
    view.send_modify(|v| v.subscription = SubscriptionState::Closed);
}
