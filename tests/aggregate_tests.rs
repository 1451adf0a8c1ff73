use chrono::NaiveDate;

use brisk::models::{TimeBucket, TrackedDay, Window};
use brisk::stats::compute_aggregate;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn done(s: &str) -> TrackedDay {
    TrackedDay::completed_on(s)
}

fn not_done(s: &str) -> TrackedDay {
    TrackedDay::new(s)
}

fn done_at(s: &str, timestamp: &str) -> TrackedDay {
    let mut day = TrackedDay::completed_on(s);
    day.completed_at = Some(timestamp.to_string());
    day
}

#[test]
fn empty_collection_reports_zero_not_nan() {
    for window in [Window::Week, Window::Month, Window::All] {
        let agg = compute_aggregate(&[], window, date("2024-01-31"));
        assert_eq!(agg.completion_rate, 0.0);
        assert_eq!(agg.total_completions, 0);
        assert!(agg.weekday_completion.iter().all(|r| *r == 0.0));
        assert_eq!(agg.average_duration_seconds, 0.0);
        assert_eq!(agg.best_time_of_day, None);
    }
}

#[test]
fn full_week_is_one_hundred_percent() {
    let days: Vec<TrackedDay> = (25..=31)
        .map(|d| done(&format!("2024-01-{:02}", d)))
        .collect();
    let agg = compute_aggregate(&days, Window::Week, date("2024-01-31"));
    assert_eq!(agg.total_days, 7);
    assert_eq!(agg.total_completions, 7);
    assert_eq!(agg.completion_rate, 100.0);
}

#[test]
fn all_window_denominator_is_distinct_date_count() {
    let days = vec![
        done("2024-01-01"),
        done("2024-01-10"),
        not_done("2024-01-20"),
    ];
    let agg = compute_aggregate(&days, Window::All, date("2024-06-01"));
    assert_eq!(agg.total_days, 3);
    assert_eq!(agg.total_completions, 2);
    assert!((agg.completion_rate - 200.0 / 3.0).abs() < 1e-9);
}

#[test]
fn week_window_spans_exactly_seven_days() {
    let days = vec![
        done("2024-01-24"), // 8 days before the 31st — outside
        done("2024-01-25"), // exactly 7 days window start — inside
        done("2024-01-31"),
    ];
    let agg = compute_aggregate(&days, Window::Week, date("2024-01-31"));
    assert_eq!(agg.total_completions, 2);
}

#[test]
fn weekday_rates_count_incomplete_records_in_denominators() {
    // 2024-01-01 and 2024-01-08 are both Mondays
    let days = vec![done("2024-01-01"), not_done("2024-01-08")];
    let agg = compute_aggregate(&days, Window::All, date("2024-01-31"));

    let monday = agg.weekday_completion[1];
    assert!((monday - 50.0).abs() < 1e-9);
    // Weekdays with no records report 0, not NaN
    assert_eq!(agg.weekday_completion[3], 0.0);
}

#[test]
fn duration_average_skips_records_without_one() {
    let mut with_duration = done("2024-01-01");
    with_duration.duration_seconds = Some(120);
    let mut longer = done("2024-01-02");
    longer.duration_seconds = Some(60);
    let without = done("2024-01-03");
    // Incomplete records never count, even with a duration
    let mut incomplete = not_done("2024-01-04");
    incomplete.duration_seconds = Some(600);

    let days = vec![with_duration, longer, without, incomplete];
    let agg = compute_aggregate(&days, Window::All, date("2024-01-31"));
    assert!((agg.average_duration_seconds - 90.0).abs() < 1e-9);
}

#[test]
fn mood_averages_skip_missing_values() {
    let mut first = done("2024-01-01");
    first.mood_before = Some(2);
    first.mood_after = Some(4);
    let mut second = not_done("2024-01-02");
    second.mood_before = Some(4);
    second.mood_after = Some(4);
    let third = done("2024-01-03");

    let days = vec![first, second, third];
    let agg = compute_aggregate(&days, Window::All, date("2024-01-31"));
    assert!((agg.average_mood_before - 3.0).abs() < 1e-9);
    assert!((agg.average_mood_after - 4.0).abs() < 1e-9);
}

#[test]
fn best_time_of_day_picks_highest_bucket() {
    let days = vec![
        done_at("2024-01-01", "2024-01-01 06:30:00"),
        done_at("2024-01-02", "2024-01-02 06:45:00"),
        done_at("2024-01-03", "2024-01-03 18:00:00"),
    ];
    let agg = compute_aggregate(&days, Window::All, date("2024-01-31"));
    assert_eq!(agg.best_time_of_day, Some(TimeBucket::EarlyMorning));
}

#[test]
fn best_time_of_day_tie_resolves_to_earliest_bucket() {
    let days = vec![
        done_at("2024-01-01", "2024-01-01 21:00:00"),
        done_at("2024-01-02", "2024-01-02 09:00:00"),
    ];
    let agg = compute_aggregate(&days, Window::All, date("2024-01-31"));
    assert_eq!(agg.best_time_of_day, Some(TimeBucket::Morning));
}

#[test]
fn best_time_of_day_is_none_without_timestamps() {
    let days = vec![done("2024-01-01"), done("2024-01-02")];
    let agg = compute_aggregate(&days, Window::All, date("2024-01-31"));
    assert_eq!(agg.best_time_of_day, None);

    // Hours outside the 05-23 span count toward no bucket either
    let night_owl = vec![done_at("2024-01-01", "2024-01-01 03:00:00")];
    let agg = compute_aggregate(&night_owl, Window::All, date("2024-01-31"));
    assert_eq!(agg.best_time_of_day, None);
}

#[test]
fn streak_distribution_buckets_every_maximal_run() {
    // A 2-day run and a 5-day run, separated by a gap
    let days = vec![
        done("2024-01-01"),
        done("2024-01-02"),
        done("2024-01-10"),
        done("2024-01-11"),
        done("2024-01-12"),
        done("2024-01-13"),
        done("2024-01-14"),
    ];
    let agg = compute_aggregate(&days, Window::All, date("2024-01-31"));
    assert_eq!(agg.streak_distribution, [1, 1, 0, 0, 0]);
}

#[test]
fn streak_distribution_uses_calendar_adjacency_not_record_order() {
    // Two completed records with an incomplete one between them on the
    // calendar: still two separate 1-day runs
    let days = vec![
        done("2024-01-01"),
        not_done("2024-01-02"),
        done("2024-01-03"),
    ];
    let agg = compute_aggregate(&days, Window::All, date("2024-01-31"));
    assert_eq!(agg.streak_distribution, [2, 0, 0, 0, 0]);
}

#[test]
fn weekly_trend_flags_the_last_seven_days_oldest_first() {
    let days = vec![done("2024-01-31"), done("2024-01-29")];
    let agg = compute_aggregate(&days, Window::All, date("2024-01-31"));
    assert_eq!(agg.weekly_trend.len(), 7);
    assert_eq!(
        agg.weekly_trend,
        vec![false, false, false, false, true, false, true]
    );
}

#[test]
fn twelve_week_trend_counts_completions_per_week() {
    // 3 completions in the current week, 1 twelve weeks back
    let days = vec![
        done("2024-03-25"),
        done("2024-03-26"),
        done("2024-03-27"),
        done("2024-01-05"),
    ];
    let agg = compute_aggregate(&days, Window::All, date("2024-03-27"));
    assert_eq!(agg.twelve_week_trend.len(), 12);
    assert_eq!(agg.twelve_week_trend[11], 3);
    assert_eq!(agg.twelve_week_trend.iter().sum::<u32>(), 4);
}

#[test]
fn month_completion_buckets_by_calendar_month() {
    let days = vec![
        done("2024-01-10"),
        not_done("2024-01-11"),
        done("2024-02-01"),
    ];
    let agg = compute_aggregate(&days, Window::All, date("2024-06-01"));
    assert!((agg.month_completion[0] - 50.0).abs() < 1e-9);
    assert!((agg.month_completion[1] - 100.0).abs() < 1e-9);
    assert_eq!(agg.month_completion[5], 0.0);
}
