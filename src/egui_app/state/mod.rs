use std::sync::Arc;
use tokio::runtime::Handle;

use crate::egui_app::optimistic::{
    AutostartPreference, OptimisticToggle, PreferenceState, ToggleError, ToggleOutcome,
};
use crate::egui_app::persisted_flag::{PersistedFlag, PresentationMarker};
use crate::egui_app::settings_store::KeyValueStore;
use crate::egui_app::status_sync::{StatusSync, StatusView};
use crate::egui_app::Config;
use crate::shared::status::tray_tooltip;
use crate::shared::{StatusCommands, StatusEvents};

pub type DarkModeFlag = PersistedFlag<Box<dyn KeyValueStore>, Box<dyn PresentationMarker>>;

/// Central application state shared across egui views.
///
/// Owns the status sync, the autostart toggle and the dark mode flag for the
/// lifetime of the window. Background work runs on `runtime`; the views only
/// read snapshots.
pub struct AppState<B> {
    pub config: Config,
    runtime: Handle,
    status: StatusSync<B>,
    autostart: OptimisticToggle<AutostartPreference<B>>,
    dark_mode: DarkModeFlag,
    pub details_expanded: bool,
}

impl<B: StatusCommands + StatusEvents> AppState<B> {
    /// Mount: resolve dark mode, start the status sync and read autostart
    pub fn new(
        config: Config,
        runtime: Handle,
        bridge: Arc<B>,
        store: Box<dyn KeyValueStore>,
        marker: Box<dyn PresentationMarker>,
    ) -> Self {
        let dark_mode = PersistedFlag::dark_mode(store, marker);

        let mut status = StatusSync::new(Arc::clone(&bridge));
        let autostart = OptimisticToggle::new(AutostartPreference::new(bridge));
        {
            let _guard = runtime.enter();
            status.start();
        }

        let initializing = autostart.clone();
        runtime.spawn(async move { initializing.initialize().await });

        tracing::info!("[AppState] Mounted (dark mode: {})", dark_mode.value());

        Self {
            config,
            runtime,
            status,
            autostart,
            dark_mode,
            details_expanded: true,
        }
    }

    pub fn status_view(&self) -> StatusView {
        self.status.view()
    }

    pub fn autostart(&self) -> PreferenceState {
        self.autostart.state()
    }

    /// Flip autostart now; the write is confirmed or reverted in the background
    pub fn set_autostart(&self, enable: bool) -> Result<(), ToggleError> {
        let confirmation = self.autostart.spawn_toggle(&self.runtime, enable)?;
        self.runtime.spawn(async move {
            if let Ok(ToggleOutcome::Reverted { error }) = confirmation.await {
                tracing::warn!("[AppState] Autostart change reverted: {}", error);
            }
        });
        Ok(())
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode.value()
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode.toggle()
    }

    /// Window title, mirroring the tray tooltip
    pub fn window_title(&self) -> &'static str {
        tray_tooltip(self.status.view().connected())
    }

    /// Unmount: stop applying background results
    pub fn shutdown(&mut self) {
        if self.status.is_stopped() {
            return;
        }
        self.status.stop();
        self.autostart.detach();
        tracing::info!("[AppState] Unmounted");
    }
}

impl<B> Drop for AppState<B> {
    fn drop(&mut self) {
        // StatusSync signals its own teardown on drop
        self.autostart.detach();
    }
}
