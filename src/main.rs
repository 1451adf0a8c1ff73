use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use brisk::cli::args::{Cli, Commands};
use brisk::cli::handlers;
use brisk::config::AppConfig;
use brisk::db::migrations::run_migrations;
use brisk::db::repository::MetaRepo;
use brisk::tui;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;
    log::debug!("database ready at {:?}", db_path);

    match cli.command {
        // Setup wizard
        Some(Commands::Setup { reset }) => {
            handlers::handle_setup(&conn, &mut config, reset)?;
        }

        // Explicit subcommands — check setup first
        Some(cmd) => {
            ensure_setup(&conn, &mut config)?;
            match cmd {
                Commands::Log {
                    date,
                    extra_cold,
                    felt_great,
                    duration,
                    note,
                } => {
                    handlers::handle_log(&conn, &date, extra_cold, felt_great, duration, &note)?;
                }
                Commands::Undo { date } => {
                    handlers::handle_undo(&conn, &date)?;
                }
                Commands::Mood {
                    before,
                    after,
                    date,
                    note,
                } => {
                    handlers::handle_mood(&conn, before, after, &date, &note)?;
                }
                Commands::Reading { minutes } => {
                    handlers::handle_reading(&conn, &config, minutes)?;
                }
                Commands::Goals { date, action } => {
                    handlers::handle_goals(&conn, &date, &action)?;
                }
                Commands::Challenge { action } => {
                    handlers::handle_challenge(&conn, &action)?;
                }
                Commands::Stack { action } => {
                    handlers::handle_stack(&conn, &action)?;
                }
                Commands::Stats { window, grid } => {
                    handlers::handle_stats(&conn, &window, grid)?;
                }
                Commands::Export { format, out } => {
                    handlers::handle_export(&conn, &format, &out)?;
                }
                Commands::Quote => {
                    handlers::handle_quote()?;
                }
                Commands::Setup { .. } => unreachable!(),
            }
        }

        // No subcommand → launch TUI
        None => {
            ensure_setup(&conn, &mut config)?;
            tui::app::run(conn, config)?;
        }
    }

    Ok(())
}

/// Check if setup has been done; if not, run the wizard automatically.
fn ensure_setup(conn: &Connection, config: &mut AppConfig) -> Result<()> {
    let done = MetaRepo::get(conn, "setup_done")?;
    if done.as_deref() != Some("1") {
        eprintln!("No configuration found. Running setup...");
        eprintln!();
        handlers::handle_setup(conn, config, false)?;
    }
    Ok(())
}
