use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::{StatusCommands, StatusEvents};

pub mod settings_view;
pub mod status_view;

pub fn render_top_bar<B>(ctx: &egui::Context, state: &mut AppState<B>)
where
    B: StatusCommands + StatusEvents,
{
    let palette = colors::palette(state.dark_mode());

    egui::TopBottomPanel::top("top_panel")
        .frame(styles::header_frame(&palette))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(
                    colors::ACCENT,
                    egui::RichText::new("🛡 VPN Status").size(18.0).strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = if state.dark_mode() { "☀" } else { "🌙" };
                    if ui
                        .button(icon)
                        .on_hover_text("Toggle dark mode")
                        .clicked()
                    {
                        state.toggle_dark_mode();
                    }
                });
            });
        });
}

pub fn render_main_panel<B>(ctx: &egui::Context, state: &mut AppState<B>)
where
    B: StatusCommands + StatusEvents,
{
    let palette = colors::palette(state.dark_mode());
    let view = state.status_view();

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add_space(8.0);
            status_view::render_card(ui, &palette, &view);

            if let Some(status) = &view.status {
                ui.add_space(12.0);
                status_view::render_details(ui, &palette, status, &mut state.details_expanded);
            }

            ui.add_space(12.0);
            settings_view::render(ui, &palette, state);
        });
    });
}
