/**
 * Backend Error Types
 *
 * Errors raised by the status producer. None of them are fatal: the monitor
 * logs a failed poll and tries again on the next tick, and the bridge turns
 * them into `BridgeError`s for the views.
 */
use crate::shared::command::{READ_AUTOSTART, WRITE_AUTOSTART};
use crate::shared::BridgeError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while probing the VPN status endpoint
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Request failed or timed out
    #[error("status request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("status endpoint returned {0}")]
    Status(reqwest::StatusCode),

    /// Response body did not match the expected shape
    #[error("invalid status response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Failure while reading or changing launch-on-boot registration
#[derive(Debug, Error)]
pub enum AutostartError {
    /// No per-user config directory on this platform
    #[error("no user config directory available")]
    NoConfigDir,

    #[error("autostart entry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AutostartError {
    /// Convert for the command that was being served
    pub fn into_bridge(self, enable: Option<bool>) -> BridgeError {
        let command = if enable.is_some() {
            WRITE_AUTOSTART
        } else {
            READ_AUTOSTART
        };
        BridgeError::command(command, self.to_string())
    }
}
