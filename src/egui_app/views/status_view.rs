use eframe::egui;

use crate::egui_app::status_sync::{StatusView, SubscriptionState};
use crate::egui_app::theme::{colors, status_color, styles, Palette};
use crate::shared::ConnectionStatus;

/// Connected / disconnected card, with a spinner until the initial fetch settles
pub fn render_card(ui: &mut egui::Ui, palette: &Palette, view: &StatusView) {
    styles::card_frame(palette).show(ui, |ui| {
        ui.set_width(ui.available_width());

        match view.shown_status() {
            None => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.colored_label(palette.text_secondary, "Checking VPN status...");
                });
            }
            Some(status) => render_status_line(ui, palette, &status),
        }

        if let SubscriptionState::Failed(reason) = &view.subscription {
            ui.add_space(6.0);
            ui.colored_label(colors::DISCONNECTED, "Live updates unavailable")
                .on_hover_text(reason.as_str());
        }
        if let Some(updated_at) = view.updated_at {
            ui.add_space(6.0);
            ui.colored_label(
                palette.text_secondary,
                egui::RichText::new(format!(
                    "Updated {}",
                    updated_at.with_timezone(&chrono::Local).format("%H:%M:%S")
                ))
                .small(),
            );
        }
    });
}

fn render_status_line(ui: &mut egui::Ui, palette: &Palette, status: &ConnectionStatus) {
    ui.horizontal(|ui| {
        ui.colored_label(
            status_color(status.connected),
            egui::RichText::new("●").size(28.0),
        );
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(status.headline()).size(20.0).strong());
            ui.colored_label(palette.text_secondary, status.subtitle());
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            styles::badge_frame(status.connected).show(ui, |ui| {
                ui.colored_label(
                    egui::Color32::WHITE,
                    egui::RichText::new(status.badge()).small().strong(),
                );
            });
        });
    });
}

/// Connection details; nothing is shown while disconnected
pub fn render_details(
    ui: &mut egui::Ui,
    palette: &Palette,
    status: &ConnectionStatus,
    expanded: &mut bool,
) {
    let Some(rows) = status.detail_rows() else {
        return;
    };

    styles::card_frame(palette).show(ui, |ui| {
        ui.set_width(ui.available_width());

        let header = if *expanded { "▾ Connection Details" } else { "▸ Connection Details" };
        if ui
            .add(egui::Label::new(egui::RichText::new(header).strong()).sense(egui::Sense::click()))
            .clicked()
        {
            *expanded = !*expanded;
        }
        if !*expanded {
            return;
        }

        ui.add_space(6.0);
        egui::Grid::new("connection_details")
            .num_columns(2)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                for row in rows {
                    ui.colored_label(palette.text_secondary, row.label);
                    ui.label(egui::RichText::new(row.value).monospace());
                    ui.end_row();
                }
            });
    });
}
