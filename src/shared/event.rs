/**
 * Push Event Channel
 *
 * This module defines the event side of the boundary between the status
 * producer and the views: a subscription delivers `ConnectionStatus`
 * snapshots any number of times, at any time, until it is unsubscribed.
 *
 * # Lifecycle
 *
 * Opening a subscription is itself asynchronous (`StatusEvents::subscribe`).
 * The unsubscribe hook only exists once that call resolves, so callers that
 * tear down early have to hold on to the intent and apply it when the
 * subscription arrives.
 */
use crate::shared::error::BridgeError;
use crate::shared::status::ConnectionStatus;
use futures_util::stream::{BoxStream, StreamExt};
use std::future::Future;

/// Channel carrying status snapshots from the producer
pub const STATUS_CHANGED: &str = "status-changed";

/// Hook run exactly once when a subscription ends
pub type Unsubscribe = Box<dyn FnOnce() + Send + 'static>;

/// Producer of push updates
pub trait StatusEvents: Send + Sync + 'static {
    /// Open the `status-changed` channel
    fn subscribe(&self) -> impl Future<Output = Result<Subscription, BridgeError>> + Send;
}

/// An open push channel
///
/// Dropping a subscription unsubscribes it.
pub struct Subscription {
    events: Option<BoxStream<'static, ConnectionStatus>>,
    unsubscribe: Option<Unsubscribe>,
}

impl Subscription {
    /// Wrap a stream of snapshots and the hook that releases it upstream
    pub fn new(events: BoxStream<'static, ConnectionStatus>, unsubscribe: Unsubscribe) -> Self {
        Self {
            events: Some(events),
            unsubscribe: Some(unsubscribe),
        }
    }

    /// Wait for the next snapshot.
    ///
    /// Returns `None` once the producer closes the channel or after
    /// `unsubscribe` has run.
    pub async fn next(&mut self) -> Option<ConnectionStatus> {
        match self.events.as_mut() {
            Some(events) => events.next().await,
            None => None,
        }
    }

    /// Stop receiving snapshots and release the channel
    pub fn unsubscribe(&mut self) {
        self.events = None;
        if let Some(hook) = self.unsubscribe.take() {
            hook();
        }
    }

    pub fn is_active(&self) -> bool {
        self.events.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
