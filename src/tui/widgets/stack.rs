use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};
use std::collections::HashMap;

use crate::models::{HabitStack, StackStep};
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    stack: Option<&HabitStack>,
    steps: &[StackStep],
    log: &HashMap<i64, bool>,
    focused_idx: usize,
    focused: bool,
) {
    let title = match stack {
        Some(s) => format!(" Stack · {} ", s.name),
        None => " Stack ".to_string(),
    };

    let block = Block::default()
        .title(Span::styled(title, theme::ice()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    if stack.is_none() {
        let hint = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No active stack — `brisk stack list`",
                theme::dim(),
            )),
        ];
        frame.render_widget(ratatui::widgets::Paragraph::new(hint).block(block), area);
        return;
    }

    let items: Vec<ListItem> = steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let is_focused = focused && i == focused_idx;
            let done = log.get(&step.id).copied().unwrap_or(false);

            let (icon, icon_style) = if done {
                ("✓", theme::green())
            } else {
                ("○", theme::dim())
            };

            let name_style = if is_focused {
                theme::ice().add_modifier(Modifier::BOLD)
            } else if done {
                theme::dim()
            } else {
                theme::bold()
            };

            let tail = if step.required {
                format!("{}m · {}", step.duration_minutes, step.phase.as_str())
            } else {
                format!("{}m · {} · optional", step.duration_minutes, step.phase.as_str())
            };

            let line = Line::from(vec![
                Span::styled(format!("  {} ", icon), icon_style),
                Span::styled(format!("{:<22}", step.name), name_style),
                Span::styled(tail, theme::dim()),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
