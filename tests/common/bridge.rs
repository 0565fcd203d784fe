//! Scripted bridge
//!
//! Every response of [`ScriptedBridge`] is decided by the test: query results
//! and subscription opening can be held back and released later, which is
//! how the fetch/push races are reproduced deterministically.

use futures_util::stream::{self, StreamExt};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use vpn_status::shared::{
    BridgeError, ConnectionStatus, StatusCommands, StatusEvents, Subscription,
};

pub type QueryResult = Result<ConnectionStatus, BridgeError>;

pub struct ScriptedBridge {
    query: Mutex<Option<oneshot::Receiver<QueryResult>>>,
    subscribe_gate: Mutex<Option<oneshot::Receiver<()>>>,
    events_tx: Mutex<Option<mpsc::UnboundedSender<ConnectionStatus>>>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<ConnectionStatus>>>,
    autostart: AtomicBool,
    read_fails: AtomicBool,
    write_results: Mutex<VecDeque<Result<(), BridgeError>>>,
    write_gate: Mutex<Option<oneshot::Receiver<()>>>,
    writes: Mutex<Vec<bool>>,
    unsubscribes: Arc<AtomicUsize>,
}

impl Default for ScriptedBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedBridge {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            query: Mutex::new(None),
            subscribe_gate: Mutex::new(None),
            events_tx: Mutex::new(Some(tx)),
            events_rx: Mutex::new(Some(rx)),
            autostart: AtomicBool::new(false),
            read_fails: AtomicBool::new(false),
            write_results: Mutex::new(VecDeque::new()),
            write_gate: Mutex::new(None),
            writes: Mutex::new(Vec::new()),
            unsubscribes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answer `query-status` immediately
    pub fn respond_with(self, result: QueryResult) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        *self.query.lock().unwrap() = Some(rx);
        self
    }

    /// Hold `query-status` until the returned sender is used
    pub fn respond_later(&self) -> oneshot::Sender<QueryResult> {
        let (tx, rx) = oneshot::channel();
        *self.query.lock().unwrap() = Some(rx);
        tx
    }

    /// Hold `subscribe()` until the returned sender fires
    pub fn hold_subscribe(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.subscribe_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn push(&self, status: ConnectionStatus) {
        if let Some(tx) = self.events_tx.lock().unwrap().as_ref() {
            let _ = tx.send(status);
        }
    }

    /// Producer side goes away; open streams end
    pub fn close_events(&self) {
        self.events_tx.lock().unwrap().take();
    }

    pub fn with_autostart(self, enabled: bool) -> Self {
        self.autostart.store(enabled, Ordering::SeqCst);
        self
    }

    pub fn failing_reads(self) -> Self {
        self.read_fails.store(true, Ordering::SeqCst);
        self
    }

    pub fn reject_next_write(&self, message: &str) {
        self.write_results
            .lock()
            .unwrap()
            .push_back(Err(BridgeError::command("write-autostart", message)));
    }

    /// Hold the next `write-autostart` until the returned sender fires
    pub fn hold_write(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.write_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn autostart(&self) -> bool {
        self.autostart.load(Ordering::SeqCst)
    }

    /// Values passed to `write-autostart`, in call order
    pub fn writes(&self) -> Vec<bool> {
        self.writes.lock().unwrap().clone()
    }

    pub fn unsubscribes(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }
}

impl StatusCommands for ScriptedBridge {
    async fn query_status(&self) -> Result<ConnectionStatus, BridgeError> {
        let pending = self.query.lock().unwrap().take();
        match pending {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(BridgeError::unavailable("query abandoned"))),
            None => Err(BridgeError::unavailable("Status not available yet")),
        }
    }

    async fn read_autostart(&self) -> Result<bool, BridgeError> {
        if self.read_fails.load(Ordering::SeqCst) {
            return Err(BridgeError::command("read-autostart", "registry unreadable"));
        }
        Ok(self.autostart())
    }

    async fn write_autostart(&self, enable: bool) -> Result<(), BridgeError> {
        self.writes.lock().unwrap().push(enable);
        let gate = self.write_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let scripted = self.write_results.lock().unwrap().pop_front();
        let result = scripted.unwrap_or(Ok(()));
        if result.is_ok() {
            self.autostart.store(enable, Ordering::SeqCst);
        }
        result
    }
}

impl StatusEvents for ScriptedBridge {
    async fn subscribe(&self) -> Result<Subscription, BridgeError> {
        let gate = self.subscribe_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let rx = self
            .events_rx
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| BridgeError::subscription("status-changed", "already subscribed"))?;
        let events = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|status| (status, rx))
        })
        .boxed();

        let unsubscribes = Arc::clone(&self.unsubscribes);
        Ok(Subscription::new(
            events,
            Box::new(move || {
                unsubscribes.fetch_add(1, Ordering::SeqCst);
            }),
        ))
    }
}
