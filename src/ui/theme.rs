//! Color palettes for the two themes the toggle switches between.

use colored::Color;

pub struct Palette {
    pub user: Color,
    pub assistant: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,
    pub accent: Color,
}

/// Palette for the session's current theme flag.
pub fn palette(dark_mode: bool) -> Palette {
    if dark_mode {
        Palette {
            user: Color::BrightCyan,
            assistant: Color::White,
            info: Color::BrightBlack,
            warning: Color::Yellow,
            error: Color::BrightRed,
            accent: Color::BrightBlue,
        }
    } else {
        Palette {
            user: Color::Blue,
            assistant: Color::Black,
            info: Color::Cyan,
            warning: Color::Magenta,
            error: Color::Red,
            accent: Color::Blue,
        }
    }
}
