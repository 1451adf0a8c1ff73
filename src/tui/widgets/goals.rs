use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::DailyGoal;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, goals: &[DailyGoal], focused_idx: usize, focused: bool) {
    let block = Block::default()
        .title(Span::styled(" Goals ", theme::ice()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    let items: Vec<ListItem> = goals
        .iter()
        .enumerate()
        .map(|(i, goal)| {
            let is_focused = focused && i == focused_idx;

            let (icon, icon_style) = if goal.completed {
                ("✓", theme::green())
            } else {
                ("○", theme::dim())
            };

            let title_style = if is_focused {
                theme::ice().add_modifier(Modifier::BOLD)
            } else if goal.completed {
                theme::dim()
            } else {
                theme::bold()
            };

            let line = Line::from(vec![
                Span::styled(format!("  {} ", icon), icon_style),
                Span::styled(goal.title.clone(), title_style),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
