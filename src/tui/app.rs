use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;
use std::collections::HashMap;

use crate::config::AppConfig;
use crate::content::quotes::quote_of_the_day;
use crate::db::repository::{ChallengeRepo, DayRepo, GoalRepo, ReadingRepo, StackRepo};
use crate::models::{
    Aggregate, ChallengeRun, DailyGoal, HabitStack, StackStep, Streak, TrackedDay, Window,
    STREAK_BUCKETS, WEEKDAYS,
};
use crate::stats::{compute_aggregate, compute_streaks};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{challenge, goals, header, reading, stack, statusbar, streak, today};
use crate::utils::format::{format_duration_secs, format_percent};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Stats,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FocusSection {
    Goals,
    Stack,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Duration,
    Reading,
    Mood,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub focus_section: FocusSection,
    pub focus_idx: usize,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub input_error: Option<String>,
    pub window: Window,

    // Cached state (refreshed on action)
    pub today_str: String,
    pub days: Vec<TrackedDay>,
    pub today_rec: Option<TrackedDay>,
    pub goals: Vec<DailyGoal>,
    pub stack: Option<HabitStack>,
    pub steps: Vec<StackStep>,
    pub step_log: HashMap<i64, bool>,
    pub challenge: Option<(ChallengeRun, u32)>,
    pub reading_today: f64,
    pub reading_week: f64,
    pub streak: Streak,
    pub aggregate: Aggregate,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let today = Local::now().date_naive();
        let today_str = today.format("%Y-%m-%d").to_string();
        let aggregate = compute_aggregate(&[], Window::Month, today);

        App {
            view: View::Dashboard,
            config,
            focus_section: FocusSection::Goals,
            focus_idx: 0,
            should_quit: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            input_error: None,
            window: Window::Month,
            today_str,
            days: Vec::new(),
            today_rec: None,
            goals: Vec::new(),
            stack: None,
            steps: Vec::new(),
            step_log: HashMap::new(),
            challenge: None,
            reading_today: 0.0,
            reading_week: 0.0,
            streak: Streak::default(),
            aggregate,
        }
    }

    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        let today = Local::now().date_naive();

        self.days = DayRepo::get_all(conn)?;
        self.today_rec = self.days.iter().find(|d| d.date == self.today_str).cloned();
        self.goals = GoalRepo::get_for_date(conn, &self.today_str)?;

        self.stack = StackRepo::active(conn)?;
        match &self.stack {
            Some(stack) => {
                self.steps = StackRepo::steps(conn, stack.id)?;
                self.step_log = StackRepo::log_for_date(conn, stack.id, &self.today_str)?;
            }
            None => {
                self.steps.clear();
                self.step_log.clear();
            }
        }

        self.challenge = ChallengeRepo::refresh(conn, today)?;

        self.reading_today = ReadingRepo::get_today(conn, &self.today_str)?;
        let week_start = (today - chrono::Duration::days(6))
            .format("%Y-%m-%d")
            .to_string();
        self.reading_week = ReadingRepo::get_week_total(conn, &week_start, &self.today_str)?;

        self.streak = compute_streaks(&self.days, today);
        self.aggregate = compute_aggregate(&self.days, self.window, today);

        Ok(())
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent, conn: &Connection) {
        // Only handle actual key presses — ignore release/repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key, conn),
            _ => self.handle_input_key(key, conn),
        }
    }

    fn handle_normal_key(&mut self, key: crossterm::event::KeyEvent, conn: &Connection) {
        match self.view {
            View::Dashboard => self.handle_dashboard_key(key, conn),
            View::Stats => self.handle_stats_key(key, conn),
            View::Help => self.handle_help_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: crossterm::event::KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('s') => {
                self.view = View::Stats;
            }
            KeyCode::Char('c') => {
                self.mark_shower_done(conn);
            }
            KeyCode::Char('u') => {
                let _ = DayRepo::clear_completed(conn, &self.today_str);
                let _ = self.load(conn);
            }
            KeyCode::Char('d') => {
                self.open_input(InputMode::Duration);
            }
            KeyCode::Char('r') => {
                if self.config.reading.enabled {
                    self.open_input(InputMode::Reading);
                }
            }
            KeyCode::Char('m') => {
                self.open_input(InputMode::Mood);
            }
            KeyCode::Up => {
                if self.focus_idx > 0 {
                    self.focus_idx -= 1;
                }
            }
            KeyCode::Down => {
                let max = match self.focus_section {
                    FocusSection::Goals => self.goals.len().saturating_sub(1),
                    FocusSection::Stack => self.steps.len().saturating_sub(1),
                };
                if self.focus_idx < max {
                    self.focus_idx += 1;
                }
            }
            KeyCode::Tab => {
                self.focus_section = match self.focus_section {
                    FocusSection::Goals => FocusSection::Stack,
                    FocusSection::Stack => FocusSection::Goals,
                };
                self.focus_idx = 0;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.toggle_focused(conn);
            }
            _ => {}
        }
    }

    fn handle_stats_key(&mut self, key: crossterm::event::KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('s') => {
                self.view = View::Dashboard;
            }
            // Cycle the aggregation window
            KeyCode::Char('w') => {
                self.window = match self.window {
                    Window::Week => Window::Month,
                    Window::Month => Window::All,
                    Window::All => Window::Week,
                };
                let _ = self.load(conn);
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: crossterm::event::KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                self.view = View::Dashboard;
            }
            _ => {}
        }
    }

    fn open_input(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input_buffer.clear();
        self.input_error = None;
    }

    fn handle_input_key(&mut self, key: crossterm::event::KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.input_error = None;
            }
            KeyCode::Enter => {
                self.submit_input(conn);
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.input_error = None;
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == ' ' => {
                self.input_buffer.push(c);
                self.input_error = None;
            }
            _ => {}
        }
    }

    fn submit_input(&mut self, conn: &Connection) {
        let trimmed = self.input_buffer.trim().to_string();
        if trimmed.is_empty() {
            self.input_error = Some(match self.input_mode {
                InputMode::Mood => "Enter two numbers 1-5, e.g. 2 4".to_string(),
                _ => "Enter a number first".to_string(),
            });
            return;
        }

        let outcome = match self.input_mode {
            InputMode::Duration => match trimmed.parse::<i64>() {
                Ok(secs) if secs > 0 => {
                    DayRepo::set_duration(conn, &self.today_str, secs).err()
                }
                _ => {
                    self.input_error = Some(format!("'{}' is not a number of seconds", trimmed));
                    return;
                }
            },
            InputMode::Reading => match trimmed.parse::<f64>() {
                Ok(minutes) if minutes > 0.0 => {
                    ReadingRepo::log_minutes(conn, &self.today_str, minutes).err()
                }
                _ => {
                    self.input_error = Some(format!("'{}' is not a number of minutes", trimmed));
                    return;
                }
            },
            InputMode::Mood => {
                let parts: Vec<i32> = trimmed
                    .split_whitespace()
                    .filter_map(|p| p.parse().ok())
                    .collect();
                match parts.as_slice() {
                    [before, after]
                        if (1..=5).contains(before) && (1..=5).contains(after) =>
                    {
                        DayRepo::set_mood(conn, &self.today_str, *before, *after).err()
                    }
                    _ => {
                        self.input_error =
                            Some("Need two numbers 1-5, e.g. 2 4".to_string());
                        return;
                    }
                }
            }
            InputMode::Normal => None,
        };

        if let Some(err) = outcome {
            self.input_error = Some(err.to_string());
            return;
        }

        let _ = self.load(conn);
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.input_error = None;
    }

    fn mark_shower_done(&mut self, conn: &Connection) {
        let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let _ = DayRepo::mark_completed(conn, &self.today_str, false, false, Some(&now));
        let _ = self.load(conn);
    }

    fn toggle_focused(&mut self, conn: &Connection) {
        match self.focus_section {
            FocusSection::Goals => {
                if let Some(goal) = self.goals.get(self.focus_idx) {
                    let _ = GoalRepo::toggle(conn, &self.today_str, goal.slot);
                }
            }
            FocusSection::Stack => {
                if let Some(step) = self.steps.get(self.focus_idx) {
                    let done = self.step_log.get(&step.id).copied().unwrap_or(false);
                    let _ = StackRepo::mark_step(conn, step.id, &self.today_str, !done);
                }
            }
        }
        let _ = self.load(conn);
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::Stats => self.draw_stats(frame),
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }

        if self.input_mode != InputMode::Normal {
            self.draw_input_popup(frame);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let quote = quote_of_the_day(Local::now().date_naive());
        let quote_ref = self
            .config
            .tracker
            .show_quotes
            .then_some((quote.text, quote.author));
        header::render(frame, outer_chunks[0], quote_ref);

        statusbar::render(frame, outer_chunks[2]);

        let body = outer_chunks[1];
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body);

        let left = columns[0];
        let right = columns[1];

        // Left column: Today + Goals + Stack
        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Length(6),
                Constraint::Min(0),
            ])
            .split(left);

        let focused_goals = self.focus_section == FocusSection::Goals;
        let focused_stack = self.focus_section == FocusSection::Stack;

        today::render(
            frame,
            left_chunks[0],
            self.today_rec.as_ref(),
            self.config.tracker.duration_target_seconds,
        );
        goals::render(frame, left_chunks[1], &self.goals, self.focus_idx, focused_goals);
        stack::render(
            frame,
            left_chunks[2],
            self.stack.as_ref(),
            &self.steps,
            &self.step_log,
            self.focus_idx,
            focused_stack,
        );

        // Right column: Streak + Challenge + Reading
        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Length(4),
            ])
            .split(right);

        streak::render(
            frame,
            right_chunks[0],
            &self.streak,
            &self.aggregate.weekly_trend,
        );
        challenge::render(frame, right_chunks[1], self.challenge.as_ref());
        if self.config.reading.enabled {
            reading::render(
                frame,
                right_chunks[2],
                self.reading_today,
                self.reading_week,
                self.config.reading.daily_target_minutes,
            );
        }
    }

    fn draw_stats(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let agg = &self.aggregate;

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("  Analytics — {}  ", self.window.label()),
                theme::ice().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  [w] window  [Esc] back", theme::dim()),
        ]));
        frame.render_widget(title, chunks[0]);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Streak:       ", theme::dim()),
                Span::styled(
                    format!("{} current", self.streak.current),
                    theme::green().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  ·  {} best", self.streak.best), theme::green()),
            ]),
            Line::from(vec![
                Span::styled("  Completed:    ", theme::dim()),
                Span::styled(
                    format!(
                        "{} / {} days  ({})",
                        agg.total_completions,
                        agg.total_days,
                        format_percent(agg.completion_rate)
                    ),
                    theme::bold(),
                ),
            ]),
        ];

        if agg.average_duration_seconds > 0.0 {
            lines.push(Line::from(vec![
                Span::styled("  Avg shower:   ", theme::dim()),
                Span::styled(
                    format_duration_secs(agg.average_duration_seconds.round() as i64),
                    theme::bold(),
                ),
            ]));
        }
        if agg.average_mood_before > 0.0 {
            lines.push(Line::from(vec![
                Span::styled("  Mood:         ", theme::dim()),
                Span::styled(
                    format!("{:.1} → {:.1}", agg.average_mood_before, agg.average_mood_after),
                    theme::bold(),
                ),
            ]));
        }
        if let Some(bucket) = agg.best_time_of_day {
            lines.push(Line::from(vec![
                Span::styled("  Best time:    ", theme::dim()),
                Span::styled(bucket.display_name(), theme::bold()),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Weekday success", theme::ice())));
        lines.push(Line::from(""));
        for (i, name) in WEEKDAYS.iter().enumerate() {
            let rate = agg.weekday_completion[i];
            let filled = (rate / 100.0 * 20.0).round() as usize;
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<5}", name), theme::dim()),
                Span::styled("█".repeat(filled), theme::ice()),
                Span::styled("░".repeat(20 - filled.min(20)), theme::dim()),
                Span::styled(format!("  {:>4}", format_percent(rate)), theme::dim()),
            ]));
        }

        let total_runs: u32 = agg.streak_distribution.iter().sum();
        if total_runs > 0 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("  Streak lengths", theme::ice())));
            lines.push(Line::from(""));
            for (i, label) in STREAK_BUCKETS.iter().enumerate() {
                let count = agg.streak_distribution[i];
                if count > 0 {
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {:<7}", label), theme::dim()),
                        Span::styled("▪".repeat(count as usize), theme::green()),
                        Span::styled(format!("  {}", count), theme::dim()),
                    ]));
                }
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Last 12 weeks", theme::ice())));
        lines.push(Line::from(""));
        let mut trend_spans = vec![Span::styled("  ", theme::dim())];
        for count in &agg.twelve_week_trend {
            let glyph = match count {
                0 => "▁",
                1..=2 => "▃",
                3..=4 => "▅",
                5..=6 => "▆",
                _ => "█",
            };
            let style = if *count >= 5 { theme::green() } else { theme::ice() };
            trend_spans.push(Span::styled(glyph, style));
            trend_spans.push(Span::styled(" ", theme::dim()));
        }
        lines.push(Line::from(trend_spans));

        frame.render_widget(Paragraph::new(lines), chunks[1]);
        statusbar::render(frame, chunks[2]);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).min(16),
        };

        frame.render_widget(Clear, popup_area);

        let entries = [
            ("[c]", "Mark today's shower done"),
            ("[u]", "Undo today"),
            ("[d]", "Log shower duration"),
            ("[m]", "Log mood (before after)"),
            ("[r]", "Log reading minutes"),
            ("[Space]", "Toggle focused goal / step"),
            ("[Tab]", "Switch focus section"),
            ("[↑ ↓]", "Navigate items"),
            ("[s]", "Analytics view"),
            ("[w]", "Cycle analytics window"),
            ("[?]", "Toggle help"),
            ("[Esc]", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::ice().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in entries {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<9}", key), theme::ice()),
                Span::styled(label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::ice()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::ice())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }

    fn draw_input_popup(&self, frame: &mut Frame) {
        let area = frame.area();
        let height = if self.input_error.is_some() { 7 } else { 5 };

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 2 - 3,
            width: area.width / 2,
            height,
        };

        frame.render_widget(Clear, popup_area);

        let (title, label) = match self.input_mode {
            InputMode::Duration => (" Log Duration ", "Seconds under the water: "),
            InputMode::Reading => (" Log Reading ", "Minutes read today: "),
            InputMode::Mood => (" Log Mood ", "Before and after (1-5 1-5): "),
            InputMode::Normal => (" Input ", ""),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {}", label), theme::dim()),
                Span::styled(
                    self.input_buffer.as_str(),
                    theme::ice().add_modifier(Modifier::BOLD),
                ),
                Span::styled("█", theme::amber()), // block cursor
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  [Enter] save  ·  [Esc] cancel",
                theme::dim(),
            )),
        ];

        if let Some(err) = &self.input_error {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::red())));
        }

        let border_style = if self.input_error.is_some() {
            theme::red()
        } else {
            theme::amber()
        };

        let block = Block::default()
            .title(Span::styled(title, theme::ice()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(theme::surface());

        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig) -> Result<()> {
    let mut app = App::new(config);
    app.load(&conn)?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(500);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key, &conn);
                if app.should_quit {
                    break;
                }
            }
            Event::Tick => {}
        }
    }

    ratatui::restore();
    Ok(())
}
