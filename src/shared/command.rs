//! Command Boundary
//!
//! Request/response commands the views issue to the status producer. Every
//! command is asynchronous and may fail with a [`BridgeError`]; callers decide
//! how to recover (see `egui_app::status_sync` and `egui_app::optimistic`).

use crate::shared::error::BridgeError;
use crate::shared::status::ConnectionStatus;
use std::future::Future;

/// Returns the latest `ConnectionStatus` snapshot
pub const QUERY_STATUS: &str = "query-status";

/// Returns whether the app is registered to launch on boot
pub const READ_AUTOSTART: &str = "read-autostart";

/// Registers or unregisters launch on boot
pub const WRITE_AUTOSTART: &str = "write-autostart";

/// Commands answered by the status producer
pub trait StatusCommands: Send + Sync + 'static {
    fn query_status(&self) -> impl Future<Output = Result<ConnectionStatus, BridgeError>> + Send;

    fn read_autostart(&self) -> impl Future<Output = Result<bool, BridgeError>> + Send;

    /// Apply `enable`; success carries no payload
    fn write_autostart(&self, enable: bool) -> impl Future<Output = Result<(), BridgeError>> + Send;
}
