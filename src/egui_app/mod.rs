//! egui Native Desktop App Module
//!
//! The view side of the status indicator. It talks to the producer only
//! through the `StatusCommands` / `StatusEvents` boundary.
//!
//! # Architecture
//!
//! - **`status_sync`** - Initial fetch plus `status-changed` subscription
//! - **`optimistic`** - Externally stored preference with optimistic updates
//! - **`persisted_flag`** - Locally stored preference (dark mode)
//! - **`settings_store`** - Key-value settings (memory / JSON file)
//! - **`state`** - `AppState` composing the three for one window
//! - **`views`** - Status card, connection details, settings panel
//! - **`theme`** - Light and dark palettes, frame builders
//! - **`config`** - Config directory and environment overrides
//! - **`main`** - Main application entry point (binary)
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs            - Module exports and documentation
//! ├── main.rs           - Main application entry point
//! ├── config.rs         - Configuration management
//! ├── status_sync.rs    - Connection status reconciliation
//! ├── optimistic.rs     - Optimistic toggle with rollback
//! ├── persisted_flag.rs - Dark mode flag
//! ├── settings_store.rs - Local settings storage
//! ├── state/            - Application state
//! ├── theme/            - Colors and styles
//! └── views/            - egui views
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! // Run the desktop app:
//! // cargo run --bin vpn_status_app
//! ```

pub mod config;
pub mod optimistic;
pub mod persisted_flag;
pub mod settings_store;
pub mod state;
pub mod status_sync;
pub mod theme;
pub mod views;

#[cfg(test)]
mod mock;

// Re-export commonly used types
pub use config::Config;
pub use optimistic::{
    AutostartPreference, OptimisticToggle, PendingWrite, PreferenceBackend, PreferenceState,
    ToggleError, ToggleOutcome,
};
pub use persisted_flag::{read_flag, PersistedFlag, PresentationMarker, DARK_MODE_KEY};
pub use settings_store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use state::AppState;
pub use status_sync::{StatusSync, StatusView, SubscriptionState};
