use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{styles, Palette};
use crate::shared::{StatusCommands, StatusEvents};

pub fn render<B>(ui: &mut egui::Ui, palette: &Palette, state: &mut AppState<B>)
where
    B: StatusCommands + StatusEvents,
{
    styles::card_frame(palette).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("Settings").strong());
        ui.add_space(6.0);

        let autostart = state.autostart();
        let mut enabled = autostart.value;
        ui.horizontal(|ui| {
            let response = ui
                .add_enabled(autostart.interactive(), egui::Checkbox::new(&mut enabled, "Launch on startup"))
                .on_hover_text("Start VPN Status when you log in");
            if response.changed() {
                if let Err(e) = state.set_autostart(enabled) {
                    tracing::debug!("[Settings] Autostart change ignored: {}", e);
                }
            }
            if autostart.loading || autostart.pending {
                ui.spinner();
            }
        });

        let mut dark = state.dark_mode();
        if ui.checkbox(&mut dark, "Dark mode").changed() {
            state.toggle_dark_mode();
        }
    });
}
