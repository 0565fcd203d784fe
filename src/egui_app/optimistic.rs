//! # Optimistic Preference Toggle
//!
//! A boolean preference whose source of truth lives outside the app (an OS
//! setting such as launch-on-boot), shown with immediate feedback.
//!
//! ## Features
//!
//! - **Immediate UI Updates**: the displayed value flips before the write
//!   is confirmed
//! - **Rollback Support**: a failed write restores the value captured just
//!   before the flip, not the negation of the requested value
//! - **One write in flight**: a toggle while a write is pending, or before the
//!   initial read has settled, is rejected rather than queued
//! - **Teardown**: results that arrive after `detach()` are discarded
//!
//! No write is ever retried automatically.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let toggle = OptimisticToggle::new(AutostartPreference::new(bridge));
//! toggle.initialize().await;
//!
//! // UI thread: apply now, confirm in the background
//! let confirmation = toggle.spawn_toggle(&runtime, true)?;
//! ```

use crate::shared::{BridgeError, StatusCommands};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// External store behind an optimistic preference
pub trait PreferenceBackend: Send + Sync + 'static {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn read(&self) -> impl Future<Output = Result<bool, BridgeError>> + Send;

    fn write(&self, value: bool) -> impl Future<Output = Result<(), BridgeError>> + Send;
}

/// Launch-on-boot, read and written through the command boundary
#[derive(Debug)]
pub struct AutostartPreference<C> {
    commands: Arc<C>,
}

impl<C> AutostartPreference<C> {
    pub fn new(commands: Arc<C>) -> Self {
        Self { commands }
    }
}

impl<C: StatusCommands> PreferenceBackend for AutostartPreference<C> {
    fn name(&self) -> &'static str {
        "autostart"
    }

    fn read(&self) -> impl Future<Output = Result<bool, BridgeError>> + Send {
        self.commands.read_autostart()
    }

    fn write(&self, value: bool) -> impl Future<Output = Result<(), BridgeError>> + Send {
        self.commands.write_autostart(value)
    }
}

/// Displayed state of the preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceState {
    /// Value shown to the user
    pub value: bool,
    /// A write is in flight
    pub pending: bool,
    /// The initial read has not settled yet
    pub loading: bool,
}

impl Default for PreferenceState {
    fn default() -> Self {
        Self {
            value: false,
            pending: false,
            loading: true,
        }
    }
}

impl PreferenceState {
    /// Whether the control should accept input
    pub fn interactive(&self) -> bool {
        !self.loading && !self.pending
    }
}

/// A write that has been applied optimistically and not yet confirmed.
///
/// The toggle stays `pending` until this is handed to
/// [`OptimisticToggle::complete`]; dropping it leaves the control disabled.
#[must_use = "pass the write to `complete`, or the toggle stays pending"]
#[derive(Debug, PartialEq, Eq)]
pub struct PendingWrite {
    pub id: Uuid,
    /// Value displayed immediately before the flip
    pub previous: bool,
    pub next: bool,
    pub started_at: DateTime<Utc>,
}

/// How a write ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Write succeeded; the optimistic value stands
    Confirmed,
    /// Write failed; the previous value was restored
    Reverted { error: BridgeError },
    /// The view was torn down before the write finished
    Discarded,
}

/// Why a toggle was not started
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToggleError {
    #[error("preference is still loading")]
    Loading,
    #[error("a write is already in flight")]
    Busy,
    #[error("preference view has been torn down")]
    Detached,
}

/// Optimistically toggled preference
pub struct OptimisticToggle<P> {
    backend: Arc<P>,
    state: Arc<watch::Sender<PreferenceState>>,
    detached: Arc<AtomicBool>,
}

impl<P> Clone for OptimisticToggle<P> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            state: Arc::clone(&self.state),
            detached: Arc::clone(&self.detached),
        }
    }
}

impl<P> OptimisticToggle<P> {
    pub fn state(&self) -> PreferenceState {
        *self.state.borrow()
    }

    pub fn value(&self) -> bool {
        self.state.borrow().value
    }

    pub fn watch(&self) -> watch::Receiver<PreferenceState> {
        self.state.subscribe()
    }

    /// Stop applying results; in-flight calls still run to completion
    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }
}

impl<P: PreferenceBackend> OptimisticToggle<P> {
    pub fn new(backend: P) -> Self {
        let (state, _) = watch::channel(PreferenceState::default());
        Self {
            backend: Arc::new(backend),
            state: Arc::new(state),
            detached: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Read the external value and open the control.
    ///
    /// On failure the value stays at its default (`false`); the control is
    /// opened either way.
    pub async fn initialize(&self) {
        let result = self.backend.read().await;
        if self.is_detached() {
            tracing::debug!("[Preference:{}] Detached, dropping initial read", self.backend.name());
            return;
        }

        let value = match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(
                    "[Preference:{}] Failed to read current value: {}",
                    self.backend.name(),
                    e
                );
                None
            }
        };

        self.state.send_modify(|s| {
            if let Some(value) = value {
                s.value = value;
            }
            s.loading = false;
        });
    }

    /// Show `next` right away and mark a write as in flight.
    ///
    /// The returned `PendingWrite` must be passed to [`complete`](Self::complete).
    pub fn begin(&self, next: bool) -> Result<PendingWrite, ToggleError> {
        if self.is_detached() {
            return Err(ToggleError::Detached);
        }

        let mut previous = Err(ToggleError::Loading);
        self.state.send_if_modified(|s| {
            if s.loading {
                previous = Err(ToggleError::Loading);
                return false;
            }
            if s.pending {
                previous = Err(ToggleError::Busy);
                return false;
            }
            previous = Ok(s.value);
            s.value = next;
            s.pending = true;
            true
        });

        let write = PendingWrite {
            id: Uuid::new_v4(),
            previous: previous?,
            next,
            started_at: Utc::now(),
        };
        tracing::debug!(
            "[Preference:{}] Write {} started: {} -> {}",
            self.backend.name(),
            write.id,
            write.previous,
            write.next
        );
        Ok(write)
    }

    /// `begin` now, then `complete` on `runtime`.
    ///
    /// Callable from a thread outside the runtime, such as the UI thread.
    pub fn spawn_toggle(
        &self,
        runtime: &Handle,
        next: bool,
    ) -> Result<JoinHandle<ToggleOutcome>, ToggleError> {
        let write = self.begin(next)?;
        let toggle = self.clone();
        Ok(runtime.spawn(async move { toggle.complete(write).await }))
    }

    /// Issue the external write for `write` and settle the displayed value
    pub async fn complete(&self, write: PendingWrite) -> ToggleOutcome {
        let result = self.backend.write(write.next).await;

        if self.is_detached() {
            tracing::debug!(
                "[Preference:{}] Detached, dropping outcome of write {}",
                self.backend.name(),
                write.id
            );
            return ToggleOutcome::Discarded;
        }

        match result {
            Ok(()) => {
                self.state.send_modify(|s| s.pending = false);
                tracing::info!(
                    "[Preference:{}] Set to {} (write {})",
                    self.backend.name(),
                    write.next,
                    write.id
                );
                ToggleOutcome::Confirmed
            }
            Err(error) => {
                tracing::error!(
                    "[Preference:{}] Failed to set {}: {}; reverting to {}",
                    self.backend.name(),
                    write.next,
                    error,
                    write.previous
                );
                self.state.send_modify(|s| {
                    s.value = write.previous;
                    s.pending = false;
                });
                ToggleOutcome::Reverted { error }
            }
        }
    }

    /// `begin` followed by `complete`
    pub async fn toggle(&self, next: bool) -> Result<ToggleOutcome, ToggleError> {
        let write = self.begin(next)?;
        Ok(self.complete(write).await)
    }
}
