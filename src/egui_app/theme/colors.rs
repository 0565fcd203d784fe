//! Color Constants
//!
//! Brand colors plus a light and a dark palette. Views take a [`Palette`]
//! instead of referring to light or dark constants directly.

use eframe::egui::Color32;

/// Connected / protected - Green
pub const CONNECTED: Color32 = Color32::from_rgb(0x44, 0xAD, 0x4D);

/// Disconnected / unprotected - Red
pub const DISCONNECTED: Color32 = Color32::from_rgb(0xE3, 0x40, 0x39);

/// Brand accent - Navy blue
pub const ACCENT: Color32 = Color32::from_rgb(0x29, 0x4D, 0x73);

/// Colors that change with dark mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color32,
    pub card: Color32,
    pub card_border: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub separator: Color32,
}

pub const LIGHT: Palette = Palette {
    background: Color32::from_rgb(0xF3, 0xF4, 0xF6),
    card: Color32::from_rgb(0xFF, 0xFF, 0xFF),
    card_border: Color32::from_rgb(0xE5, 0xE7, 0xEB),
    text_primary: Color32::from_rgb(0x11, 0x18, 0x27),
    text_secondary: Color32::from_rgb(0x6B, 0x72, 0x80),
    separator: Color32::from_rgb(0xE5, 0xE7, 0xEB),
};

pub const DARK: Palette = Palette {
    background: Color32::from_rgb(0x19, 0x2E, 0x45),
    card: Color32::from_rgb(0x29, 0x4D, 0x73),
    card_border: Color32::from_rgb(0x35, 0x5E, 0x8A),
    text_primary: Color32::from_rgb(0xF9, 0xFA, 0xFB),
    text_secondary: Color32::from_rgb(0xB8, 0xC4, 0xD2),
    separator: Color32::from_rgb(0x35, 0x5E, 0x8A),
};

pub fn palette(dark: bool) -> Palette {
    if dark {
        DARK
    } else {
        LIGHT
    }
}

/// Indicator color for a status
pub fn status_color(connected: bool) -> Color32 {
    if connected {
        CONNECTED
    } else {
        DISCONNECTED
    }
}
