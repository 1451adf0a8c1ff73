//! Data export: the full day collection plus summary statistics, as JSON
//! or CSV.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Streak, TrackedDay};
use crate::stats::compute_streaks;

pub const EXPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Debug, Error)]
#[error("unsupported export format '{0}' (use json or csv)")]
pub struct UnknownFormat(String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBundle {
    pub exported_at: String,
    pub version: String,
    pub total_days: u32,
    pub completed_days: u32,
    pub streak: Streak,
    pub tracked_days: Vec<TrackedDay>,
}

impl ExportBundle {
    pub fn build(days: Vec<TrackedDay>, today: NaiveDate, exported_at: String) -> Self {
        let streak = compute_streaks(&days, today);
        let completed_days = days.iter().filter(|d| d.completed).count() as u32;
        ExportBundle {
            exported_at,
            version: EXPORT_VERSION.to_string(),
            total_days: days.len() as u32,
            completed_days,
            streak,
            tracked_days: days,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Serializing export")
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "Date",
            "Completed",
            "Extra Cold",
            "Felt Great",
            "Duration (seconds)",
            "Mood Before",
            "Mood After",
            "Notes",
        ])?;

        for day in &self.tracked_days {
            writer.write_record([
                day.date.clone(),
                yes_no(day.completed),
                yes_no(day.extra_cold),
                yes_no(day.felt_great),
                day.duration_seconds.map(|d| d.to_string()).unwrap_or_default(),
                day.mood_before.map(|m| m.to_string()).unwrap_or_default(),
                day.mood_after.map(|m| m.to_string()).unwrap_or_default(),
                day.note.clone().unwrap_or_default(),
            ])?;
        }

        let bytes = writer.into_inner().context("Flushing CSV")?;
        String::from_utf8(bytes).context("CSV is not valid UTF-8")
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}
