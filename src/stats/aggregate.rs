//! Windowed aggregation over a day-record snapshot: completion rates,
//! weekday/month breakdowns, duration and mood averages, time-of-day
//! buckets, and the streak-length histogram.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::models::{Aggregate, TimeBucket, TrackedDay, Window};
use crate::stats::streak::{all_runs, parse_date};

/// Compute the full aggregate for one window. The window filter is a pure
/// pre-filter: everything below the trends is derived from the filtered
/// snapshot only. The 7-day and 12-week trends are fixed-horizon roll-ups
/// and always look at the whole collection.
pub fn compute_aggregate(days: &[TrackedDay], window: Window, today: NaiveDate) -> Aggregate {
    let dated: Vec<(NaiveDate, &TrackedDay)> = days
        .iter()
        .filter_map(|d| parse_date(&d.date).map(|date| (date, d)))
        .collect();

    let filtered: Vec<(NaiveDate, &TrackedDay)> = match window {
        Window::All => dated.clone(),
        Window::Week => in_range(&dated, today - Duration::days(6), today),
        Window::Month => in_range(&dated, today - Duration::days(29), today),
    };

    let total_days = match window {
        Window::Week => 7,
        Window::Month => 30,
        Window::All => filtered.len() as u32,
    };

    let completed: Vec<(NaiveDate, &TrackedDay)> = filtered
        .iter()
        .filter(|(_, d)| d.completed)
        .cloned()
        .collect();
    let total_completions = completed.len() as u32;

    // Weekday and month success rates count every record in the window,
    // completed or not.
    let mut weekday_done = [0u32; 7];
    let mut weekday_total = [0u32; 7];
    let mut month_done = [0u32; 12];
    let mut month_total = [0u32; 12];
    for (date, d) in &filtered {
        let wd = date.weekday().num_days_from_sunday() as usize;
        let mo = date.month0() as usize;
        weekday_total[wd] += 1;
        month_total[mo] += 1;
        if d.completed {
            weekday_done[wd] += 1;
            month_done[mo] += 1;
        }
    }

    let mut weekday_completion = [0.0f64; 7];
    for i in 0..7 {
        weekday_completion[i] = percent(weekday_done[i], weekday_total[i]);
    }
    let mut month_completion = [0.0f64; 12];
    for i in 0..12 {
        month_completion[i] = percent(month_done[i], month_total[i]);
    }

    // Duration: completed records with a duration; missing durations are
    // excluded from both sides of the mean, not treated as zero.
    let durations: Vec<i64> = completed
        .iter()
        .filter_map(|(_, d)| d.duration_seconds)
        .collect();
    let average_duration_seconds = mean(&durations);

    let moods_before: Vec<i64> = filtered
        .iter()
        .filter_map(|(_, d)| d.mood_before.map(i64::from))
        .collect();
    let moods_after: Vec<i64> = filtered
        .iter()
        .filter_map(|(_, d)| d.mood_after.map(i64::from))
        .collect();

    Aggregate {
        window,
        total_days,
        total_completions,
        completion_rate: percent(total_completions, total_days),
        weekday_completion,
        month_completion,
        average_duration_seconds,
        average_mood_before: mean(&moods_before),
        average_mood_after: mean(&moods_after),
        best_time_of_day: best_time_of_day(&completed),
        streak_distribution: streak_distribution(&completed),
        weekly_trend: weekly_trend(&dated, today),
        twelve_week_trend: twelve_week_trend(&dated, today),
    }
}

fn in_range<'a>(
    dated: &[(NaiveDate, &'a TrackedDay)],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<(NaiveDate, &'a TrackedDay)> {
    dated
        .iter()
        .filter(|(date, _)| *date >= start && *date <= end)
        .cloned()
        .collect()
}

fn percent(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<i64>() as f64 / values.len() as f64
    }
}

/// Bucket with the most completions. Completions without a parseable
/// timestamp, or outside 05:00-23:00, count toward no bucket; a tie goes
/// to the earliest bucket in enumeration order.
fn best_time_of_day(completed: &[(NaiveDate, &TrackedDay)]) -> Option<TimeBucket> {
    let mut counts = [0u32; 6];
    for (_, d) in completed {
        let Some(ts) = &d.completed_at else { continue };
        let Ok(dt) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S") else {
            continue;
        };
        if let Some(bucket) = TimeBucket::from_hour(dt.hour()) {
            counts[bucket as usize] += 1;
        }
    }

    let mut best: Option<TimeBucket> = None;
    let mut best_count = 0u32;
    for bucket in TimeBucket::ALL {
        let count = counts[bucket as usize];
        if count > best_count {
            best_count = count;
            best = Some(bucket);
        }
    }
    best
}

/// Histogram of every maximal completed run in the window, bucketed into
/// 1-3, 4-7, 8-14, 15-30, 30+.
fn streak_distribution(completed: &[(NaiveDate, &TrackedDay)]) -> [u32; 5] {
    let mut dates: Vec<NaiveDate> = completed.iter().map(|(date, _)| *date).collect();
    dates.sort();

    let mut histogram = [0u32; 5];
    for run in all_runs(&dates) {
        let bucket = match run {
            0..=3 => 0,
            4..=7 => 1,
            8..=14 => 2,
            15..=30 => 3,
            _ => 4,
        };
        histogram[bucket] += 1;
    }
    histogram
}

/// Completion flag for each of the last 7 days, oldest first.
fn weekly_trend(dated: &[(NaiveDate, &TrackedDay)], today: NaiveDate) -> Vec<bool> {
    (0..7)
        .rev()
        .map(|offset| {
            let target = today - Duration::days(offset);
            dated
                .iter()
                .any(|(date, d)| *date == target && d.completed)
        })
        .collect()
}

/// Completions per week for the last 12 weeks, oldest first.
fn twelve_week_trend(dated: &[(NaiveDate, &TrackedDay)], today: NaiveDate) -> Vec<u32> {
    (0..12)
        .rev()
        .map(|week| {
            let end = today - Duration::days(week * 7);
            let start = end - Duration::days(6);
            dated
                .iter()
                .filter(|(date, d)| *date >= start && *date <= end && d.completed)
                .count() as u32
        })
        .collect()
}
