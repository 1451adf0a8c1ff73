use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::TrackedDay;
use crate::tui::theme;
use crate::utils::format::format_duration_secs;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    today: Option<&TrackedDay>,
    duration_target_seconds: i64,
) {
    let block = Block::default()
        .title(Span::styled(" Today ", theme::ice()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let completed = today.map(|d| d.completed).unwrap_or(false);

    let status_line = if completed {
        Line::from(vec![
            Span::styled("  ● ", theme::green().add_modifier(Modifier::BOLD)),
            Span::styled("Cold shower done", theme::green().add_modifier(Modifier::BOLD)),
        ])
    } else {
        Line::from(vec![
            Span::styled("  ○ ", theme::dim()),
            Span::styled("Not yet — press ", theme::dim()),
            Span::styled("[c]", theme::ice()),
            Span::styled(" when you're out", theme::dim()),
        ])
    };

    let mut detail_spans = vec![Span::styled("  ", theme::dim())];
    if let Some(day) = today {
        if day.extra_cold {
            detail_spans.push(Span::styled("❄ extra cold  ", theme::ice()));
        }
        if day.felt_great {
            detail_spans.push(Span::styled("★ felt great  ", theme::amber()));
        }
        match day.duration_seconds {
            Some(secs) => {
                let style = if secs >= duration_target_seconds {
                    theme::green()
                } else {
                    theme::amber()
                };
                detail_spans.push(Span::styled(
                    format!(
                        "⏱ {} / {}",
                        format_duration_secs(secs),
                        format_duration_secs(duration_target_seconds)
                    ),
                    style,
                ));
            }
            None => {
                detail_spans.push(Span::styled(
                    format!("⏱ -:-- / {}", format_duration_secs(duration_target_seconds)),
                    theme::dim(),
                ));
            }
        }
    } else {
        detail_spans.push(Span::styled(
            format!("⏱ -:-- / {}", format_duration_secs(duration_target_seconds)),
            theme::dim(),
        ));
    }

    let mood_line = match today.and_then(|d| d.mood_before.zip(d.mood_after)) {
        Some((before, after)) => {
            let arrow_style = if after > before {
                theme::green()
            } else if after < before {
                theme::red()
            } else {
                theme::dim()
            };
            Line::from(vec![
                Span::styled("  Mood ", theme::dim()),
                Span::styled(format!("{}", before), theme::bold()),
                Span::styled(" → ", arrow_style),
                Span::styled(format!("{}", after), theme::bold()),
            ])
        }
        None => Line::from(vec![
            Span::styled("  Mood not logged — ", theme::dim()),
            Span::styled("[m]", theme::ice()),
        ]),
    };

    let text = vec![
        Line::from(""),
        status_line,
        Line::from(""),
        Line::from(detail_spans),
        mood_line,
    ];
    frame.render_widget(Paragraph::new(text).block(block), area);
}
