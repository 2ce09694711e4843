use colored::Color;

pub const PRIMARY: Color = Color::BrightCyan;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const MUTED: Color = Color::BrightBlack;
pub const CHIP: Color = Color::BrightMagenta;
pub const LINK: Color = Color::BrightBlue;
pub const FEE: Color = Color::BrightGreen;
