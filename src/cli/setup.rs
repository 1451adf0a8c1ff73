use anyhow::Result;
use rusqlite::Connection;
use std::io::{self, BufRead, Write};

use crate::config::AppConfig;
use crate::db::repository::MetaRepo;

/// Line-prompt first-run wizard. Empty answers keep the defaults shown in
/// brackets.
pub fn run_setup(conn: &Connection, config: &mut AppConfig) -> Result<()> {
    println!();
    println!("  brisk setup");
    println!("  ───────────");
    println!();

    let duration = prompt(&format!(
        "  Duration target in seconds [{}]: ",
        config.tracker.duration_target_seconds
    ))?;
    if !duration.is_empty() {
        match duration.parse::<i64>() {
            Ok(secs) if secs > 0 => config.tracker.duration_target_seconds = secs,
            _ => eprintln!("  Not a positive number — keeping {}", config.tracker.duration_target_seconds),
        }
    }

    let reading = prompt(&format!(
        "  Track daily reading minutes? (y/n) [{}]: ",
        if config.reading.enabled { "y" } else { "n" }
    ))?;
    if !reading.is_empty() {
        config.reading.enabled = reading.eq_ignore_ascii_case("y");
    }

    if config.reading.enabled {
        let target = prompt(&format!(
            "  Daily reading target in minutes [{}]: ",
            config.reading.daily_target_minutes
        ))?;
        if !target.is_empty() {
            match target.parse::<f64>() {
                Ok(minutes) if minutes > 0.0 => config.reading.daily_target_minutes = minutes,
                _ => eprintln!("  Not a positive number — keeping {}", config.reading.daily_target_minutes),
            }
        }
    }

    config.save()?;
    MetaRepo::set(conn, "setup_done", "1")?;

    println!();
    println!("  ✓ Setup complete. Run `brisk` for the dashboard or `brisk log` after your next shower.");
    println!();
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}
