//! Theme Styling Functions
//!
//! Global visuals for light/dark mode and frame builders for the cards.

use super::colors::{self, Palette};
use crate::egui_app::persisted_flag::PresentationMarker;
use eframe::egui::{self, CornerRadius, Stroke};

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context, dark: bool) {
    let palette = colors::palette(dark);
    let mut visuals = if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    visuals.panel_fill = palette.background;
    visuals.window_fill = palette.card;
    visuals.window_stroke = Stroke::new(1.0, palette.card_border);
    visuals.override_text_color = Some(palette.text_primary);

    // Switches use the accent when on
    visuals.selection.bg_fill = colors::ACCENT;
    visuals.selection.stroke = Stroke::new(1.0, palette.text_primary);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.separator);

    ctx.set_theme(if dark {
        egui::Theme::Dark
    } else {
        egui::Theme::Light
    });
    ctx.set_visuals(visuals);
}

/// Switches egui visuals when the dark mode flag changes
#[derive(Clone)]
pub struct EguiThemeMarker {
    ctx: egui::Context,
}

impl EguiThemeMarker {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl PresentationMarker for EguiThemeMarker {
    fn set_marker(&mut self, enabled: bool) {
        apply_global_theme(&self.ctx, enabled);
        self.ctx.request_repaint();
    }
}

/// Frame for a content card
pub fn card_frame(palette: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(palette.card)
        .stroke(Stroke::new(1.0, palette.card_border))
        .corner_radius(CornerRadius::same(12))
        .inner_margin(egui::Margin::same(16))
}

/// Frame for the header bar
pub fn header_frame(palette: &Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(palette.card)
        .inner_margin(egui::Margin::symmetric(16, 10))
}

/// Frame for the ACTIVE / INACTIVE badge
pub fn badge_frame(connected: bool) -> egui::Frame {
    let fill = if connected {
        colors::CONNECTED
    } else {
        colors::DISCONNECTED
    };
    egui::Frame::new()
        .fill(fill)
        .corner_radius(CornerRadius::same(10))
        .inner_margin(egui::Margin::symmetric(10, 3))
}
