use chrono::NaiveDate;

use brisk::models::TrackedDay;
use brisk::stats::compute_streaks;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn done(s: &str) -> TrackedDay {
    TrackedDay::completed_on(s)
}

fn not_done(s: &str) -> TrackedDay {
    TrackedDay::new(s)
}

#[test]
fn empty_collection_yields_zero_streaks() {
    let streak = compute_streaks(&[], date("2024-01-15"));
    assert_eq!(streak.current, 0);
    assert_eq!(streak.best, 0);
}

#[test]
fn contiguous_run_ending_today_counts_fully() {
    let days = vec![
        done("2024-01-11"),
        done("2024-01-12"),
        done("2024-01-13"),
        done("2024-01-14"),
        done("2024-01-15"),
    ];
    let streak = compute_streaks(&days, date("2024-01-15"));
    assert_eq!(streak.current, 5);
    assert_eq!(streak.best, 5);
}

#[test]
fn gap_splits_run_and_best_reports_longer_side() {
    // 4 completed days, then a gap, then 2 ending today
    let days = vec![
        done("2024-01-08"),
        done("2024-01-09"),
        done("2024-01-10"),
        done("2024-01-11"),
        done("2024-01-14"),
        done("2024-01-15"),
    ];
    let streak = compute_streaks(&days, date("2024-01-15"));
    assert_eq!(streak.current, 2);
    assert_eq!(streak.best, 4);
}

#[test]
fn incomplete_record_breaks_the_chain_like_a_missing_day() {
    // Concrete scenario: 01..04 with 03 incomplete, today = 04
    let days = vec![
        done("2024-01-01"),
        done("2024-01-02"),
        not_done("2024-01-03"),
        done("2024-01-04"),
    ];
    let streak = compute_streaks(&days, date("2024-01-04"));
    assert_eq!(streak.current, 1);
    assert_eq!(streak.best, 2);
}

#[test]
fn streak_must_include_today_to_be_current() {
    // Run ended yesterday; nothing logged today
    let days = vec![done("2024-01-13"), done("2024-01-14")];
    let streak = compute_streaks(&days, date("2024-01-15"));
    assert_eq!(streak.current, 0);
    assert_eq!(streak.best, 2);
}

#[test]
fn single_completed_day_has_best_of_one() {
    let days = vec![done("2024-01-15")];
    let streak = compute_streaks(&days, date("2024-01-15"));
    assert_eq!(streak.current, 1);
    assert_eq!(streak.best, 1);
}

#[test]
fn incomplete_records_with_attributes_never_contribute() {
    let mut day = TrackedDay::new("2024-01-15");
    day.duration_seconds = Some(90);
    day.mood_before = Some(2);
    day.mood_after = Some(4);

    let streak = compute_streaks(&[day], date("2024-01-15"));
    assert_eq!(streak.current, 0);
    assert_eq!(streak.best, 0);
}

#[test]
fn best_is_never_less_than_current() {
    let cases: Vec<Vec<TrackedDay>> = vec![
        vec![],
        vec![done("2024-01-15")],
        vec![done("2024-01-14"), done("2024-01-15")],
        vec![
            done("2024-01-01"),
            done("2024-01-02"),
            done("2024-01-03"),
            done("2024-01-15"),
        ],
        vec![not_done("2024-01-15"), done("2024-01-14")],
    ];
    for days in cases {
        let streak = compute_streaks(&days, date("2024-01-15"));
        assert!(
            streak.best >= streak.current,
            "best {} < current {} for {:?}",
            streak.best,
            streak.current,
            days
        );
    }
}

#[test]
fn unsorted_input_is_handled() {
    let days = vec![
        done("2024-01-15"),
        done("2024-01-13"),
        done("2024-01-14"),
    ];
    let streak = compute_streaks(&days, date("2024-01-15"));
    assert_eq!(streak.current, 3);
    assert_eq!(streak.best, 3);
}
