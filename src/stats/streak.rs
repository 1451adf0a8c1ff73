//! Streak computation over a day-record snapshot.
//!
//! This is the single source of truth for streaks — the CLI stats view,
//! the dashboard, challenge progress, and the export summary all call in
//! here rather than carrying their own copies.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::{Streak, TrackedDay};

/// Compute the current and best streak for a record snapshot.
///
/// The current streak walks backward from `today` and stops at the first
/// date with no record or an incomplete record — a streak must include
/// today to count as current. The best streak is the longest run of
/// consecutive completed calendar days anywhere in history.
pub fn compute_streaks(days: &[TrackedDay], today: NaiveDate) -> Streak {
    if days.is_empty() {
        return Streak::default();
    }

    let completed_by_date: HashMap<NaiveDate, bool> = days
        .iter()
        .filter_map(|d| parse_date(&d.date).map(|date| (date, d.completed)))
        .collect();

    let mut current = 0u32;
    let mut cursor = today;
    while completed_by_date.get(&cursor) == Some(&true) {
        current += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }

    let mut dates: Vec<NaiveDate> = completed_by_date
        .iter()
        .filter(|(_, done)| **done)
        .map(|(date, _)| *date)
        .collect();
    dates.sort();

    Streak {
        current,
        best: best_run(&dates),
    }
}

/// Longest run of consecutive dates in an ascending-sorted list.
fn best_run(sorted: &[NaiveDate]) -> u32 {
    if sorted.is_empty() {
        return 0;
    }

    let mut best = 1u32;
    let mut run = 1u32;
    for i in 1..sorted.len() {
        if Some(sorted[i]) == sorted[i - 1].succ_opt() {
            run += 1;
        } else {
            run = 1;
        }
        best = best.max(run);
    }
    best
}

/// Every maximal run length in an ascending-sorted list, in order.
pub(crate) fn all_runs(sorted: &[NaiveDate]) -> Vec<u32> {
    let mut runs = Vec::new();
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for date in sorted {
        if prev.and_then(|p| p.succ_opt()) == Some(*date) {
            run += 1;
        } else {
            if run > 0 {
                runs.push(run);
            }
            run = 1;
        }
        prev = Some(*date);
    }
    if run > 0 {
        runs.push(run);
    }
    runs
}

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
