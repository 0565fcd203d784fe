//! Shared Error Types
//!
//! This module defines the error returned across the command/event boundary
//! between the status producer and the desktop views.
//!
//! # Error Categories
//!
//! - `Command` - a command was invoked and its handler reported a failure
//! - `Unavailable` - the producer has nothing to answer with yet
//! - `Subscription` - the push channel could not be opened
//!
//! # Usage
//!
//! ```rust
//! use vpn_status::shared::error::BridgeError;
//!
//! let error = BridgeError::command("write-autostart", "permission denied");
//! assert!(error.to_string().contains("write-autostart"));
//! ```
//!
//! # Thread Safety
//!
//! `BridgeError` is `Send + Sync + Clone` so one failure can be logged and
//! stored in view state at the same time.
use thiserror::Error;

/// Failure reported by the command/event boundary
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// A command handler rejected the call
    #[error("Command '{command}' failed: {message}")]
    Command {
        /// Name of the command that failed
        command: &'static str,
        /// Human-readable error message
        message: String,
    },

    /// The producer has no value to report yet
    #[error("{0}")]
    Unavailable(String),

    /// The push channel could not be opened
    #[error("Subscription to '{channel}' failed: {message}")]
    Subscription {
        /// Channel that was being opened
        channel: &'static str,
        /// Human-readable error message
        message: String,
    },
}

impl BridgeError {
    /// Create a new command error
    pub fn command(command: &'static str, message: impl Into<String>) -> Self {
        Self::Command {
            command,
            message: message.into(),
        }
    }

    /// Create a new unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Create a new subscription error
    pub fn subscription(channel: &'static str, message: impl Into<String>) -> Self {
        Self::Subscription {
            channel,
            message: message.into(),
        }
    }
}
