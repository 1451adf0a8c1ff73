//! brisk library root: models, pure stats core, storage, CLI, and TUI.

pub mod cli;
pub mod config;
pub mod content;
pub mod db;
pub mod export;
pub mod models;
pub mod stats;
pub mod tui;
pub mod utils;
