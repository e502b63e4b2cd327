//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Priority;

/// Header and banner accent (indigo).
pub const INDIGO: Color = Color::Rgb(79, 70, 229);
/// Secondary accent (violet).
pub const VIOLET: Color = Color::Rgb(124, 58, 237);
/// Completion banner and highlights (pink).
pub const PINK: Color = Color::Rgb(236, 72, 153);
/// Card backgrounds (slate).
pub const SLATE: Color = Color::Rgb(30, 41, 59);
/// Used for High priority
pub const DARK_RED: Color = Color::Rgb(185, 28, 28);
/// Used for Medium priority
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for Low priority
pub const DARK_GREEN: Color = Color::Rgb(21, 128, 61);

/// Colour a priority is rendered in.
pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => DARK_RED,
        Priority::Medium => GOLD,
        Priority::Low => DARK_GREEN,
    }
}
