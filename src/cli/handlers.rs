use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::args::{ChallengeCommands, GoalCommands, StackCommands};
use crate::config::AppConfig;
use crate::content::quotes::quote_of_the_day;
use crate::db::repository::{ChallengeRepo, DayRepo, GoalRepo, MetaRepo, ReadingRepo, StackRepo};
use crate::export::{ExportBundle, ExportFormat};
use crate::models::{Window, CHALLENGE_CATALOG, MONTHS, STREAK_BUCKETS, WEEKDAYS};
use crate::stats::{compute_aggregate, compute_streaks};
use crate::utils::format::{
    format_duration_long, format_duration_secs, format_minutes, format_percent, pad_cell,
    progress_bar,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const CYAN: &str = "\x1b[38;2;110;168;196m";

fn today_date() -> NaiveDate {
    Local::now().date_naive()
}

fn resolve_date(date: &Option<String>) -> Result<String> {
    match date {
        None => Ok(today_date().format("%Y-%m-%d").to_string()),
        Some(s) => {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| anyhow!("Invalid date '{}'. Use YYYY-MM-DD", s))?;
            Ok(s.clone())
        }
    }
}

// ─── Setup ───────────────────────────────────────────────────────────────────

pub fn handle_setup(conn: &Connection, config: &mut AppConfig, reset: bool) -> Result<()> {
    if !reset {
        if let Some(done) = MetaRepo::get(conn, "setup_done")? {
            if done == "1" {
                println!("brisk is already configured. Use --reset to reconfigure.");
                return Ok(());
            }
        }
    }
    crate::cli::setup::run_setup(conn, config)
}

// ─── Log / undo ──────────────────────────────────────────────────────────────

pub fn handle_log(
    conn: &Connection,
    date: &Option<String>,
    extra_cold: bool,
    felt_great: bool,
    duration: Option<i64>,
    note: &Option<String>,
) -> Result<()> {
    let date_str = resolve_date(date)?;
    let today_str = today_date().format("%Y-%m-%d").to_string();

    // Stamp the completion time only when logging the current day — a
    // backfilled date has no trustworthy time of day.
    let completed_at = if date_str == today_str {
        Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
    } else {
        None
    };

    DayRepo::mark_completed(conn, &date_str, extra_cold, felt_great, completed_at.as_deref())?;
    if let Some(secs) = duration {
        if secs < 0 {
            return Err(anyhow!("Duration must be a non-negative number of seconds"));
        }
        DayRepo::set_duration(conn, &date_str, secs)?;
    }
    if let Some(text) = note {
        DayRepo::set_note(conn, &date_str, text)?;
    }

    let mut extras = Vec::new();
    if extra_cold {
        extras.push("extra cold");
    }
    if felt_great {
        extras.push("felt great");
    }
    let suffix = if extras.is_empty() {
        String::new()
    } else {
        format!("  ({})", extras.join(", "))
    };
    println_colored!(GREEN, "  ✓ {} logged{}", date_str, suffix);

    let days = DayRepo::get_all(conn)?;
    let streak = compute_streaks(&days, today_date());
    if streak.current > 1 {
        println_colored!(CYAN, "  ❄ {} day streak — keep going", streak.current);
    }

    // A log may have pushed the active challenge over the line.
    if let Some((run, progress)) = ChallengeRepo::refresh(conn, today_date())? {
        if run.completed {
            let name = run.kind().map(|k| k.name).unwrap_or(run.kind_id.as_str());
            println_colored!(BOLD, "  🏆 Challenge complete: {} ({} days)", name, progress);
        }
    }
    Ok(())
}

pub fn handle_undo(conn: &Connection, date: &Option<String>) -> Result<()> {
    let date_str = resolve_date(date)?;
    if DayRepo::clear_completed(conn, &date_str)? {
        println_colored!(AMBER, "  {} unmarked", date_str);
    } else {
        println_colored!(DIM, "  Nothing logged on {}", date_str);
    }
    Ok(())
}

// ─── Mood / reading ──────────────────────────────────────────────────────────

pub fn handle_mood(
    conn: &Connection,
    before: i32,
    after: i32,
    date: &Option<String>,
    note: &Option<String>,
) -> Result<()> {
    for (label, value) in [("before", before), ("after", after)] {
        if !(1..=5).contains(&value) {
            return Err(anyhow!("Mood {} must be between 1 and 5, got {}", label, value));
        }
    }

    let date_str = resolve_date(date)?;
    DayRepo::set_mood(conn, &date_str, before, after)?;
    if let Some(text) = note {
        DayRepo::set_note(conn, &date_str, text)?;
    }

    let arrow = if after > before {
        format!("{}↑\x1b[0m", GREEN)
    } else if after < before {
        format!("{}↓\x1b[0m", RED)
    } else {
        format!("{}→\x1b[0m", DIM)
    };
    println_colored!(GREEN, "  ✓ Mood {} → {} {} recorded for {}", before, after, arrow, date_str);
    Ok(())
}

pub fn handle_reading(conn: &Connection, config: &AppConfig, minutes: f64) -> Result<()> {
    if minutes <= 0.0 {
        return Err(anyhow!("Minutes must be greater than 0"));
    }
    let today_str = today_date().format("%Y-%m-%d").to_string();
    ReadingRepo::log_minutes(conn, &today_str, minutes)?;
    let total = ReadingRepo::get_today(conn, &today_str)?;
    let target = config.reading.daily_target_minutes;
    let status = if total >= target { GREEN } else { AMBER };
    println_colored!(
        status,
        "  ✓ Logged {}m — today's total: {}m / {}m",
        format_minutes(minutes),
        format_minutes(total),
        format_minutes(target)
    );
    Ok(())
}

// ─── Goals ───────────────────────────────────────────────────────────────────

pub fn handle_goals(
    conn: &Connection,
    date: &Option<String>,
    action: &Option<GoalCommands>,
) -> Result<()> {
    match action {
        None => {
            let date_str = resolve_date(date)?;
            let goals = GoalRepo::get_for_date(conn, &date_str)?;
            println!();
            println_colored!(CYAN, "  Goals — {}", date_str);
            println!();
            for goal in &goals {
                let icon = if goal.completed {
                    format!("{}✓\x1b[0m", GREEN)
                } else {
                    format!("{}○\x1b[0m", DIM)
                };
                println!("  {}. {} {}", goal.slot, icon, goal.title);
            }
            println!();
        }
        Some(GoalCommands::Toggle { slot, date }) => {
            let date_str = resolve_date(date)?;
            let now_done = GoalRepo::toggle(conn, &date_str, *slot)?;
            if now_done {
                println_colored!(GREEN, "  ✓ Goal #{} done", slot);
            } else {
                println_colored!(DIM, "  ○ Goal #{} unmarked", slot);
            }
        }
        Some(GoalCommands::Add { title, date }) => {
            let date_str = resolve_date(date)?;
            let slot = GoalRepo::add(conn, &date_str, title)?;
            println_colored!(GREEN, "  ✓ Added goal #{}: {}", slot, title);
        }
    }
    Ok(())
}

// ─── Challenges ──────────────────────────────────────────────────────────────

pub fn handle_challenge(conn: &Connection, action: &ChallengeCommands) -> Result<()> {
    match action {
        ChallengeCommands::List => {
            let finished: Vec<String> = ChallengeRepo::history(conn)?
                .into_iter()
                .filter(|run| run.completed)
                .map(|run| run.kind_id)
                .collect();

            println!();
            println_colored!(CYAN, "  Challenge Catalog");
            println!();
            for kind in &CHALLENGE_CATALOG {
                let marker = if finished.iter().any(|id| id == kind.id) {
                    format!("{}✓\x1b[0m", GREEN)
                } else if kind.recommended {
                    format!("{}★\x1b[0m", AMBER)
                } else {
                    " ".to_string()
                };
                println!(
                    "  {} {} {:>3} days  {}{:<13}\x1b[0m {}",
                    marker,
                    pad_cell(kind.id, 22),
                    kind.duration_days,
                    DIM,
                    kind.difficulty.as_str(),
                    kind.description
                );
            }
            println!();
            println_colored!(DIM, "  Start one with: brisk challenge start <id>");
            println!();
        }
        ChallengeCommands::Start { id } => {
            let kind = crate::models::challenge::find_kind(id)
                .ok_or_else(|| anyhow!("Unknown challenge '{}'. See: brisk challenge list", id))?;
            let run = ChallengeRepo::start(conn, kind, today_date())?;
            println_colored!(GREEN, "  ✓ Started {} — finish by {}", kind.name, run.target_date);
        }
        ChallengeCommands::Status => {
            match ChallengeRepo::refresh(conn, today_date())? {
                None => {
                    println_colored!(DIM, "  No active challenge. See: brisk challenge list");
                }
                Some((run, progress)) => {
                    let Some(kind) = run.kind() else {
                        return Err(anyhow!("Challenge kind '{}' no longer exists", run.kind_id));
                    };
                    println!();
                    println_colored!(BOLD, "  {} — {} / {} days", kind.name, progress, kind.duration_days);
                    println!(
                        "  {}  {}",
                        progress_bar(progress, kind.duration_days, 24),
                        format_percent(progress as f64 / kind.duration_days as f64 * 100.0)
                    );
                    println!();
                    let reached: Vec<String> = kind
                        .milestones
                        .iter()
                        .map(|m| {
                            if progress >= *m {
                                format!("{}●{}\x1b[0m", GREEN, m)
                            } else {
                                format!("{}○{}\x1b[0m", DIM, m)
                            }
                        })
                        .collect();
                    println!("  Milestones: {}", reached.join("  "));
                    if run.completed {
                        println_colored!(GREEN, "  🏆 Completed!");
                    } else {
                        println_colored!(DIM, "  Started {} · ends {}", run.started, run.target_date);
                    }
                    println!();
                }
            }
        }
    }
    Ok(())
}

// ─── Stacks ──────────────────────────────────────────────────────────────────

pub fn handle_stack(conn: &Connection, action: &StackCommands) -> Result<()> {
    let today_str = today_date().format("%Y-%m-%d").to_string();

    match action {
        StackCommands::List => {
            let stacks = StackRepo::list(conn)?;
            println!();
            println_colored!(CYAN, "  Habit Stacks");
            println!();
            for stack in &stacks {
                let marker = if stack.active {
                    format!("{}●\x1b[0m", GREEN)
                } else {
                    format!("{}○\x1b[0m", DIM)
                };
                println!(
                    "  {} [{}] {} {}{}\x1b[0m",
                    marker, stack.id, pad_cell(&stack.name, 22), DIM, stack.description
                );
            }
            println!();
            println_colored!(DIM, "  Activate one with: brisk stack use <id>");
            println!();
        }
        StackCommands::Use { id } => {
            StackRepo::set_active(conn, *id)?;
            let name = StackRepo::list(conn)?
                .into_iter()
                .find(|s| s.id == *id)
                .map(|s| s.name)
                .unwrap_or_default();
            println_colored!(GREEN, "  ✓ Active stack: {}", name);
        }
        StackCommands::Show => {
            let Some(stack) = StackRepo::active(conn)? else {
                println_colored!(DIM, "  No active stack. See: brisk stack list");
                return Ok(());
            };
            let steps = StackRepo::steps(conn, stack.id)?;
            let log = StackRepo::log_for_date(conn, stack.id, &today_str)?;
            println!();
            println_colored!(CYAN, "  {} — today", stack.name);
            println!();
            for step in &steps {
                let done = log.get(&step.id).copied().unwrap_or(false);
                let icon = if done {
                    format!("{}✓\x1b[0m", GREEN)
                } else {
                    format!("{}○\x1b[0m", DIM)
                };
                let optional = if step.required { "" } else { " (optional)" };
                println!(
                    "  {}. {} {} {}{}m · {}{}\x1b[0m",
                    step.position, icon, pad_cell(&step.name, 22), DIM,
                    step.duration_minutes, step.phase.as_str(), optional
                );
            }
            if StackRepo::completed_on(conn, stack.id, &today_str)? {
                println!();
                println_colored!(GREEN, "  ✓ Stack complete for today");
            }
            println!();
        }
        StackCommands::Mark { step, undo } => {
            let Some(stack) = StackRepo::active(conn)? else {
                return Err(anyhow!("No active stack. See: brisk stack list"));
            };
            let steps = StackRepo::steps(conn, stack.id)?;
            let target = steps
                .iter()
                .find(|s| s.position == *step)
                .ok_or_else(|| anyhow!("No step #{} in {}", step, stack.name))?;
            StackRepo::mark_step(conn, target.id, &today_str, !undo)?;
            if *undo {
                println_colored!(DIM, "  ○ {} unmarked", target.name);
            } else {
                println_colored!(GREEN, "  ✓ {} done", target.name);
                if StackRepo::completed_on(conn, stack.id, &today_str)? {
                    println_colored!(BOLD, "  Stack complete for today!");
                }
            }
        }
    }
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(conn: &Connection, window_str: &str, grid: bool) -> Result<()> {
    let window = Window::from_str(window_str)?;
    let today = today_date();
    let days = DayRepo::get_all(conn)?;

    let streak = compute_streaks(&days, today);
    let agg = compute_aggregate(&days, window, today);

    println!();
    println_colored!(CYAN, "  Statistics — {}", window.label());
    println!();
    println_colored!(
        BOLD,
        "  Streak:      {} days current  |  {} days best",
        streak.current,
        streak.best
    );
    println!(
        "  Completed:   {} / {} days  ({})",
        agg.total_completions,
        agg.total_days,
        format_percent(agg.completion_rate)
    );
    if agg.average_duration_seconds > 0.0 {
        println!(
            "  Avg shower:  {}",
            format_duration_secs(agg.average_duration_seconds.round() as i64)
        );
        let total_cold: i64 = days
            .iter()
            .filter(|d| d.completed)
            .filter_map(|d| d.duration_seconds)
            .sum();
        println!("  Total cold:  {}", format_duration_long(total_cold));
    }
    if agg.average_mood_before > 0.0 {
        println!(
            "  Mood:        {:.1} → {:.1}",
            agg.average_mood_before, agg.average_mood_after
        );
    }
    if let Some(bucket) = agg.best_time_of_day {
        println!("  Best time:   {}", bucket.display_name());
    }
    if let Some((day, rate)) = agg.best_weekday() {
        println!("  Best day:    {} ({})", day, format_percent(rate));
    }

    println!();
    println_colored!(DIM, "  Weekday success");
    for (i, name) in WEEKDAYS.iter().enumerate() {
        let rate = agg.weekday_completion[i];
        println!(
            "  {:<4} {}  {:>4}",
            name,
            progress_bar(rate.round() as u32, 100, 20),
            format_percent(rate)
        );
    }

    if window == Window::All {
        let active_months: Vec<(usize, f64)> = agg
            .month_completion
            .iter()
            .enumerate()
            .filter(|(_, r)| **r > 0.0)
            .map(|(i, r)| (i, *r))
            .collect();
        if !active_months.is_empty() {
            println!();
            println_colored!(DIM, "  Monthly success");
            for (i, rate) in active_months {
                println!(
                    "  {:<4} {}  {:>4}",
                    MONTHS[i],
                    progress_bar(rate.round() as u32, 100, 20),
                    format_percent(rate)
                );
            }
        }
    }

    let total_runs: u32 = agg.streak_distribution.iter().sum();
    if total_runs > 0 {
        println!();
        println_colored!(DIM, "  Streak lengths");
        for (i, label) in STREAK_BUCKETS.iter().enumerate() {
            let count = agg.streak_distribution[i];
            if count > 0 {
                println!("  {:<6} {}", label, "▪".repeat(count as usize));
            }
        }
    }

    if grid {
        println!();
        println_colored!(DIM, "  Last 7 days  (● done, ○ missed)");
        print!("  ");
        for done in &agg.weekly_trend {
            if *done {
                print!("{}●\x1b[0m ", GREEN);
            } else {
                print!("{}○\x1b[0m ", DIM);
            }
        }
        println!();
    }

    println!();
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(conn: &Connection, format: &str, out: &Option<PathBuf>) -> Result<()> {
    let format = ExportFormat::from_str(format)?;
    let days = DayRepo::get_all(conn)?;
    let bundle = ExportBundle::build(
        days,
        today_date(),
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    );

    let content = match format {
        ExportFormat::Json => bundle.to_json()?,
        ExportFormat::Csv => bundle.to_csv()?,
    };

    match out {
        None => println!("{}", content),
        Some(path) => {
            std::fs::write(path, &content)?;
            println_colored!(
                GREEN,
                "  ✓ Exported {} days to {}",
                bundle.total_days,
                path.display()
            );
        }
    }
    Ok(())
}

// ─── Quote ───────────────────────────────────────────────────────────────────

pub fn handle_quote() -> Result<()> {
    let quote = quote_of_the_day(today_date());
    println!();
    println_colored!(BOLD, "  “{}”", quote.text);
    println_colored!(DIM, "     — {}", quote.author);
    println!();
    Ok(())
}
