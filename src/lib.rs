//! VPN Status - Main Library
//!
//! Desktop status indicator for a VPN connection: it shows whether traffic is
//! routed through the VPN, the exit details (IP, location, server, protocol),
//! and two preferences, launch-on-boot and dark mode.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that cross the command/event boundary
//!   - `ConnectionStatus` snapshots and their display helpers
//!   - `StatusCommands` / `StatusEvents` traits, `Subscription`
//!   - Error and configuration types
//!
//! - **`backend`** - The status producer (only compiled with the `monitor` feature)
//!   - HTTP status checker and periodic monitor
//!   - Autostart registry
//!   - In-process bridge implementing the boundary traits
//!
//! - **`egui_app`** - Native desktop views (egui/eframe)
//!   - `StatusSync`: initial fetch reconciled with push updates
//!   - `OptimisticToggle`: externally stored preference with rollback
//!   - `PersistedFlag`: locally stored preference (dark mode)
//!
//! # Feature Flags
//!
//! - **`monitor`** (default) - builds the HTTP-backed producer and the binary
//!
//! # Concurrency
//!
//! View state lives in `tokio::sync::watch` channels: writers are the tasks
//! spawned by `StatusSync` / `OptimisticToggle`, readers are the egui frame
//! loop (`borrow`) and tests (`wait_for`). No lock is held across an await.

/// Shared types and data structures
pub mod shared;

/// Status producer
#[cfg(feature = "monitor")]
pub mod backend;

/// egui native desktop app
pub mod egui_app;
