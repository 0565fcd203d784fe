/**
 * egui Native Desktop App - Main Entry Point
 *
 * Starts the status monitor on a background Tokio runtime, wires it to the
 * views through the in-process bridge, and runs the eframe window.
 */
use eframe::egui;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vpn_status::backend::{
    AutostartRegistry, DesktopEntryAutostart, DesktopNotifier, LocalBridge, MemoryAutostart,
    StatusChecker, StatusMonitor,
};
use vpn_status::egui_app::config::APP_NAME;
use vpn_status::egui_app::settings_store::{JsonFileStore, KeyValueStore, MemoryStore};
use vpn_status::egui_app::theme::EguiThemeMarker;
use vpn_status::egui_app::{views, AppState, Config};

type Bridge = LocalBridge<Box<dyn AutostartRegistry>>;

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn autostart_registry() -> Box<dyn AutostartRegistry> {
    let exec = std::env::current_exe().unwrap_or_else(|_| APP_NAME.into());
    match DesktopEntryAutostart::for_current_user(APP_NAME, exec) {
        Ok(registry) => Box::new(registry),
        Err(e) => {
            tracing::warn!("[Main] {}; launch-on-boot will not persist", e);
            Box::new(MemoryAutostart::default())
        }
    }
}

fn settings_store(config: &Config) -> Box<dyn KeyValueStore> {
    match config.settings_path() {
        Some(path) => Box::new(JsonFileStore::open_or_empty(path)),
        None => {
            tracing::warn!("[Main] No config directory; settings will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing(&config.app().log_filter);
    tracing::info!("[Main] Status endpoint: {}", config.status_api_url());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;
    let _enter = runtime.enter();

    let mut monitor = StatusMonitor::new(StatusChecker::new(config.app())?, config.app())
        .with_notifier(DesktopNotifier);
    monitor.start();
    let bridge: Arc<Bridge> = Arc::new(LocalBridge::new(monitor.handle(), autostart_registry()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 560.0])
            .with_min_inner_size([360.0, 420.0]),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    let result = eframe::run_native(
        "VPN Status",
        options,
        Box::new(move |cc| {
            let store = settings_store(&config);
            let marker = Box::new(EguiThemeMarker::new(cc.egui_ctx.clone()));
            let state = AppState::new(config, handle, bridge, store, marker);
            Ok(Box::new(StatusApp::new(state)))
        }),
    );

    monitor.stop();
    result?;
    Ok(())
}

struct StatusApp {
    state: AppState<Bridge>,
    title: &'static str,
}

impl StatusApp {
    fn new(state: AppState<Bridge>) -> Self {
        Self { state, title: "" }
    }
}

impl eframe::App for StatusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let title = self.state.window_title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.to_string()));
            self.title = title;
        }

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);

        // Background tasks update state without a UI event
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl Drop for StatusApp {
    fn drop(&mut self) {
        self.state.shutdown();
    }
}
