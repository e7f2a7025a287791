//! One palette for the whole CLI.

use colored::Color;

pub const PRIMARY: Color = Color::BrightCyan;
pub const ACCENT: Color = Color::BrightYellow;
pub const TEXT_DEFAULT: Color = Color::TrueColor {
    r: 192,
    g: 192,
    b: 192,
};
pub const SEPARATOR: Color = Color::BrightBlack;

pub const SAFE: Color = Color::Green;
pub const DANGER: Color = Color::Yellow;
pub const DISABLED: Color = Color::BrightBlack;
pub const FEE: Color = Color::Red;
