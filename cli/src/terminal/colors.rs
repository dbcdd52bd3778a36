use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 138, g: 190, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 196, b: 87 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const PORT_OPEN: Color = Color::TrueColor { r: 80, g: 220, b: 120 };
pub const PORT_CLOSED: Color = Color::TrueColor { r: 150, g: 150, b: 150 };
pub const ERROR_CODE: Color = Color::TrueColor { r: 235, g: 100, b: 90 };
