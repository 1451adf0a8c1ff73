use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(12, 16, 22);
pub const SURFACE: Color = Color::Rgb(18, 24, 32);
pub const BORDER: Color = Color::Rgb(38, 52, 68);
pub const BORDER_FOCUS: Color = Color::Rgb(110, 168, 196);
pub const TEXT: Color = Color::Rgb(204, 218, 230);
pub const TEXT_DIM: Color = Color::Rgb(100, 116, 132);
pub const ICE: Color = Color::Rgb(110, 168, 196);
pub const GREEN: Color = Color::Rgb(92, 158, 110);
pub const AMBER: Color = Color::Rgb(206, 150, 72);
pub const RED: Color = Color::Rgb(186, 88, 70);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn ice() -> Style {
    Style::default().fg(ICE)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUS)
    } else {
        Style::default().fg(BORDER)
    }
}
