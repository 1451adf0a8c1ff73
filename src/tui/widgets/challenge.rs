use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::ChallengeRun;
use crate::tui::theme;
use crate::utils::format::progress_bar;

pub fn render(frame: &mut Frame, area: Rect, challenge: Option<&(ChallengeRun, u32)>) {
    let block = Block::default()
        .title(Span::styled(" Challenge ", theme::ice()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let Some((run, progress)) = challenge else {
        let hint = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  None running — `brisk challenge list`",
                theme::dim(),
            )),
        ];
        frame.render_widget(Paragraph::new(hint).block(block), area);
        return;
    };

    let Some(kind) = run.kind() else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let name_line = Line::from(vec![
        Span::styled("  ", theme::dim()),
        Span::styled(kind.name, theme::bold()),
        Span::styled(
            format!("  {} / {} days", progress, kind.duration_days),
            theme::dim(),
        ),
    ]);

    let bar_line = Line::from(vec![
        Span::styled("  ", theme::dim()),
        Span::styled(
            progress_bar(*progress, kind.duration_days, 20),
            if run.completed {
                theme::green().add_modifier(Modifier::BOLD)
            } else {
                theme::ice()
            },
        ),
    ]);

    let milestone_spans: Vec<Span> = {
        let mut spans = vec![Span::styled("  ", theme::dim())];
        for m in kind.milestones {
            let (txt, style) = if progress >= m {
                (format!("●{} ", m), theme::green())
            } else {
                (format!("○{} ", m), theme::dim())
            };
            spans.push(Span::styled(txt, style));
        }
        spans
    };

    let text = vec![
        Line::from(""),
        name_line,
        bar_line,
        Line::from(milestone_spans),
    ];
    frame.render_widget(Paragraph::new(text).block(block), area);
}
