use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::models::Streak;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, streak: &Streak, weekly: &[bool]) {
    let block = Block::default()
        .title(Span::styled(" Streak ", theme::ice()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // big number
            Constraint::Length(1), // weekly dots
            Constraint::Length(1), // best line
        ])
        .split(inner);

    // The day count, large
    let big = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(theme::ice().add_modifier(Modifier::BOLD))
        .lines(vec![format!("{}", streak.current).into()])
        .build();
    frame.render_widget(big, chunks[0]);

    // One dot per day of the trailing week
    let mut dot_spans = vec![Span::styled("  ", theme::dim())];
    for done in weekly {
        let (dot, style) = if *done {
            ("●", theme::green().add_modifier(Modifier::BOLD))
        } else {
            ("○", theme::dim())
        };
        dot_spans.push(Span::styled(dot, style));
        dot_spans.push(Span::styled("  ", theme::dim()));
    }
    frame.render_widget(Paragraph::new(Line::from(dot_spans)), chunks[1]);

    let completed_this_week = weekly.iter().filter(|d| **d).count();
    let meta_line = Line::from(Span::styled(
        format!(
            "  days  ·  Best: {}  ·  Week: {}/7",
            streak.best, completed_this_week
        ),
        theme::dim(),
    ));
    frame.render_widget(Paragraph::new(meta_line), chunks[2]);
}
