//! Theme Module
//!
//! Color scheme and styling for the status window:
//!
//! - Brand colors and light/dark palettes
//! - Global visuals, switched by the dark mode flag through [`EguiThemeMarker`]
//! - Frame builders for cards, header and badge
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx, dark_mode);
//!
//! let palette = colors::palette(dark_mode);
//! styles::card_frame(&palette).show(ui, |ui| {
//!     // Card content
//! });
//! ```

pub mod colors;
pub mod styles;

pub use colors::{palette, status_color, Palette};
pub use styles::{apply_global_theme, EguiThemeMarker};
