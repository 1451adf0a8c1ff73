use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, quote: Option<(&str, &str)>) {
    let today = Local::now();
    let date_str = today.format("%A, %b %d, %Y").to_string();

    let title_line = Line::from(vec![
        Span::styled("  ❄  ", theme::ice().add_modifier(Modifier::BOLD)),
        Span::styled("brisk", theme::ice().add_modifier(Modifier::BOLD)),
        Span::styled("  —  cold shower tracker", theme::dim()),
    ]);

    let second_line = match quote {
        Some((text, author)) => Line::from(vec![
            Span::styled(format!("“{}”", text), theme::amber()),
            Span::styled(format!("  — {}  ·  ", author), theme::dim()),
            Span::styled(date_str, theme::dim()),
        ]),
        None => Line::from(Span::styled(date_str, theme::dim())),
    };

    let text = vec![title_line, Line::from(""), second_line];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::ice().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
