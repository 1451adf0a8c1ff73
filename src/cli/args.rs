use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "brisk", version, author, about = "A terminal companion for cold shower habit tracking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// First-run setup wizard (duration target, reading goal)
    Setup {
        /// Reset existing configuration
        #[arg(long)]
        reset: bool,
    },
    /// Mark a day's cold shower as done
    Log {
        /// Date to log (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// The water was colder than usual
        #[arg(long)]
        extra_cold: bool,
        /// Felt great afterwards
        #[arg(long)]
        felt_great: bool,
        /// Session length in seconds
        #[arg(long)]
        duration: Option<i64>,
        /// Attach a note to the day
        #[arg(long)]
        note: Option<String>,
    },
    /// Clear a day's completed flag, keeping its other attributes
    Undo {
        /// Date to clear (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Record how you felt before and after (1-5 each)
    Mood {
        /// Mood before the shower
        before: i32,
        /// Mood after the shower
        after: i32,
        /// Date (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Attach a note to the day
        #[arg(long)]
        note: Option<String>,
    },
    /// Log reading minutes for today
    Reading {
        /// Minutes read
        minutes: f64,
    },
    /// Daily goal checklist
    Goals {
        /// Date (defaults to today)
        #[arg(long)]
        date: Option<String>,
        #[command(subcommand)]
        action: Option<GoalCommands>,
    },
    /// Challenge management
    Challenge {
        #[command(subcommand)]
        action: ChallengeCommands,
    },
    /// Habit stack management
    Stack {
        #[command(subcommand)]
        action: StackCommands,
    },
    /// Show streaks and analytics
    Stats {
        /// Window: week, month, or all
        #[arg(long, default_value = "month")]
        window: String,
        /// Show the last-7-days dot row
        #[arg(long)]
        grid: bool,
    },
    /// Export all tracked data
    Export {
        /// Format: json or csv
        #[arg(long, default_value = "json")]
        format: String,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print today's motivational quote
    Quote,
}

#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Toggle a goal by its number
    Toggle {
        /// Goal number as shown by `brisk goals`
        slot: i32,
        /// Date (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Add a custom goal for a date
    Add {
        /// Goal title
        title: String,
        /// Date (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChallengeCommands {
    /// Show the challenge catalog
    List,
    /// Start a challenge by id (e.g. week-warrior)
    Start {
        /// Challenge id from `brisk challenge list`
        id: String,
    },
    /// Show the active challenge and its progress
    Status,
}

#[derive(Subcommand, Debug)]
pub enum StackCommands {
    /// List habit stacks
    List,
    /// Activate a stack by id
    Use {
        /// Stack id from `brisk stack list`
        id: i64,
    },
    /// Show the active stack and today's step progress
    Show,
    /// Tick a step of the active stack for today
    Mark {
        /// Step number as shown by `brisk stack show`
        step: i32,
        /// Untick instead
        #[arg(long)]
        undo: bool,
    },
}
