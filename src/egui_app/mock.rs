//! In-memory bridge for unit tests

use crate::shared::{BridgeError, ConnectionStatus, StatusCommands, StatusEvents, Subscription};
use futures_util::stream::{self, StreamExt};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub struct MockBridge {
    status: Mutex<VecDeque<Result<ConnectionStatus, BridgeError>>>,
    query_gate: Mutex<Option<oneshot::Receiver<()>>>,
    subscribe_error: Option<BridgeError>,
    autostart: AtomicBool,
    read_error: Option<BridgeError>,
    write_errors: Mutex<VecDeque<BridgeError>>,
    write_gate: Mutex<Option<oneshot::Receiver<()>>>,
    query_calls: AtomicUsize,
    subscribe_calls: AtomicUsize,
    unsubscribe_calls: Arc<AtomicUsize>,
    write_calls: AtomicUsize,
}

impl MockBridge {
    pub fn new() -> Self {
        Self {
            status: Mutex::new(VecDeque::new()),
            query_gate: Mutex::new(None),
            subscribe_error: None,
            autostart: AtomicBool::new(false),
            read_error: None,
            write_errors: Mutex::new(VecDeque::new()),
            write_gate: Mutex::new(None),
            query_calls: AtomicUsize::new(0),
            subscribe_calls: AtomicUsize::new(0),
            unsubscribe_calls: Arc::new(AtomicUsize::new(0)),
            write_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_status(self, result: Result<ConnectionStatus, BridgeError>) -> Self {
        self.status.lock().unwrap().push_back(result);
        self
    }

    pub fn with_subscribe_error(mut self, error: BridgeError) -> Self {
        self.subscribe_error = Some(error);
        self
    }

    /// Hold `query_status()` until the returned sender fires
    pub fn gate_query(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.query_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn with_autostart(self, enabled: bool) -> Self {
        self.autostart.store(enabled, Ordering::SeqCst);
        self
    }

    pub fn with_read_error(mut self, error: BridgeError) -> Self {
        self.read_error = Some(error);
        self
    }

    pub fn fail_next_write(&self, error: BridgeError) {
        self.write_errors.lock().unwrap().push_back(error);
    }

    /// Hold the next `write_autostart()` until the returned sender fires
    pub fn gate_write(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.write_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn autostart(&self) -> bool {
        self.autostart.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribe_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }
}

impl StatusCommands for MockBridge {
    async fn query_status(&self) -> Result<ConnectionStatus, BridgeError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.query_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let next = self.status.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(BridgeError::unavailable("Status not available yet")))
    }

    async fn read_autostart(&self) -> Result<bool, BridgeError> {
        match &self.read_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.autostart()),
        }
    }

    async fn write_autostart(&self, enable: bool) -> Result<(), BridgeError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.write_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let error = self.write_errors.lock().unwrap().pop_front();
        match error {
            Some(error) => Err(error),
            None => {
                self.autostart.store(enable, Ordering::SeqCst);
                Ok(())
            }
        }
    }
}

impl StatusEvents for MockBridge {
    async fn subscribe(&self) -> Result<Subscription, BridgeError> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.subscribe_error {
            return Err(error.clone());
        }

        // Open and silent until unsubscribed
        let events = stream::pending::<ConnectionStatus>().boxed();

        let unsubscribed = Arc::clone(&self.unsubscribe_calls);
        Ok(Subscription::new(
            events,
            Box::new(move || {
                unsubscribed.fetch_add(1, Ordering::SeqCst);
            }),
        ))
    }
}
