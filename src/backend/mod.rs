//! Status producer
//!
//! Everything behind the command/event boundary: probing the VPN status over
//! HTTP, polling it in the background, registering launch-on-boot, and
//! serving all of that to the views through [`LocalBridge`].
//!
//! # Structure
//!
//! - **`checker`** - one HTTP status query
//! - **`monitor`** - periodic polling, last status, `status-changed` broadcast
//! - **`notifier`** - desktop notification on connectivity change
//! - **`autostart`** - launch-on-boot registry
//! - **`bridge`** - in-process `StatusCommands` / `StatusEvents`
//! - **`error`** - producer-side error types

pub mod autostart;
pub mod bridge;
pub mod checker;
pub mod error;
pub mod monitor;
pub mod notifier;

pub use autostart::{AutostartRegistry, DesktopEntryAutostart, MemoryAutostart};
pub use bridge::LocalBridge;
pub use checker::StatusChecker;
pub use error::{AutostartError, MonitorError};
pub use monitor::{MonitorHandle, PollOutcome, StatusMonitor};
pub use notifier::{DesktopNotifier, Notifier, NOTIFICATION_TITLE};
