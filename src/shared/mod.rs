//! Shared Module
//!
//! This module contains the types that cross the boundary between the status
//! producer (`backend`) and the desktop views (`egui_app`).
//!
//! # Overview
//!
//! The shared module is platform-agnostic: it knows nothing about HTTP, egui
//! or the operating system. Producers implement the command and event traits,
//! views consume them.

/// Connection status snapshot and display helpers
pub mod status;

/// Request/response commands
pub mod command;

/// Push channel for status snapshots
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use status::{ConnectionStatus, DetailRow};
pub use command::StatusCommands;
pub use event::{StatusEvents, Subscription, Unsubscribe};
pub use error::BridgeError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
