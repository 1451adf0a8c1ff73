use chrono::NaiveDate;
use rusqlite::Connection;

use brisk::db::migrations::run_migrations;
use brisk::db::repository::{
    ChallengeRepo, DayRepo, GoalRepo, MetaRepo, ReadingRepo, StackRepo,
};
use brisk::models::challenge::find_kind;
use brisk::models::default_goals;

fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    conn
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// ─── Tracked days ────────────────────────────────────────────────────────────

#[test]
fn mark_completed_creates_and_merges() {
    let conn = test_conn();
    DayRepo::mark_completed(&conn, "2024-01-01", false, false, None).unwrap();

    let day = DayRepo::get_by_date(&conn, "2024-01-01").unwrap().unwrap();
    assert!(day.completed);
    assert!(!day.extra_cold);

    // Second log of the same date merges flags in
    DayRepo::mark_completed(&conn, "2024-01-01", true, false, None).unwrap();
    let day = DayRepo::get_by_date(&conn, "2024-01-01").unwrap().unwrap();
    assert!(day.extra_cold);
    assert!(!day.felt_great);

    assert_eq!(DayRepo::get_all(&conn).unwrap().len(), 1);
}

#[test]
fn mood_write_does_not_clobber_completion() {
    let conn = test_conn();
    DayRepo::mark_completed(&conn, "2024-01-01", false, true, Some("2024-01-01 07:00:00"))
        .unwrap();
    DayRepo::set_mood(&conn, "2024-01-01", 2, 4).unwrap();

    let day = DayRepo::get_by_date(&conn, "2024-01-01").unwrap().unwrap();
    assert!(day.completed);
    assert!(day.felt_great);
    assert_eq!(day.mood_before, Some(2));
    assert_eq!(day.mood_after, Some(4));
    assert_eq!(day.completed_at.as_deref(), Some("2024-01-01 07:00:00"));
}

#[test]
fn mood_alone_creates_an_incomplete_record() {
    let conn = test_conn();
    DayRepo::set_mood(&conn, "2024-01-01", 3, 3).unwrap();

    let day = DayRepo::get_by_date(&conn, "2024-01-01").unwrap().unwrap();
    assert!(!day.completed);
    assert_eq!(day.mood_before, Some(3));
}

#[test]
fn duration_last_write_wins() {
    let conn = test_conn();
    DayRepo::set_duration(&conn, "2024-01-01", 60).unwrap();
    DayRepo::set_duration(&conn, "2024-01-01", 150).unwrap();

    let day = DayRepo::get_by_date(&conn, "2024-01-01").unwrap().unwrap();
    assert_eq!(day.duration_seconds, Some(150));
}

#[test]
fn clear_completed_keeps_other_attributes() {
    let conn = test_conn();
    DayRepo::mark_completed(&conn, "2024-01-01", true, false, Some("2024-01-01 07:00:00"))
        .unwrap();
    DayRepo::set_duration(&conn, "2024-01-01", 90).unwrap();

    assert!(DayRepo::clear_completed(&conn, "2024-01-01").unwrap());

    let day = DayRepo::get_by_date(&conn, "2024-01-01").unwrap().unwrap();
    assert!(!day.completed);
    assert!(day.extra_cold);
    assert_eq!(day.duration_seconds, Some(90));
    assert_eq!(day.completed_at, None);

    // Clearing a date with no row is a no-op
    assert!(!DayRepo::clear_completed(&conn, "2024-02-01").unwrap());
}

#[test]
fn get_range_is_inclusive_and_ordered() {
    let conn = test_conn();
    for d in ["2024-01-03", "2024-01-01", "2024-01-05", "2024-01-02"] {
        DayRepo::mark_completed(&conn, d, false, false, None).unwrap();
    }

    let days = DayRepo::get_range(&conn, "2024-01-01", "2024-01-03").unwrap();
    let dates: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
}

// ─── Reading log ─────────────────────────────────────────────────────────────

#[test]
fn reading_minutes_accumulate() {
    let conn = test_conn();
    ReadingRepo::log_minutes(&conn, "2024-01-01", 10.0).unwrap();
    ReadingRepo::log_minutes(&conn, "2024-01-01", 5.5).unwrap();

    assert_eq!(ReadingRepo::get_today(&conn, "2024-01-01").unwrap(), 15.5);
    assert_eq!(ReadingRepo::get_today(&conn, "2024-01-02").unwrap(), 0.0);

    ReadingRepo::log_minutes(&conn, "2024-01-03", 4.5).unwrap();
    let total = ReadingRepo::get_week_total(&conn, "2024-01-01", "2024-01-07").unwrap();
    assert_eq!(total, 20.0);
}

// ─── Daily goals ─────────────────────────────────────────────────────────────

#[test]
fn fresh_date_reports_default_goals() {
    let conn = test_conn();
    let goals = GoalRepo::get_for_date(&conn, "2024-01-01").unwrap();
    assert_eq!(goals, default_goals());
}

#[test]
fn toggle_materializes_defaults_then_flips() {
    let conn = test_conn();
    assert!(GoalRepo::toggle(&conn, "2024-01-01", 2).unwrap());

    let goals = GoalRepo::get_for_date(&conn, "2024-01-01").unwrap();
    assert_eq!(goals.len(), 3);
    assert!(goals[1].completed);
    assert!(!goals[0].completed);

    // Flips back
    assert!(!GoalRepo::toggle(&conn, "2024-01-01", 2).unwrap());
}

#[test]
fn custom_goals_append_after_defaults() {
    let conn = test_conn();
    let slot = GoalRepo::add(&conn, "2024-01-01", "Journal for 5 minutes").unwrap();
    assert_eq!(slot, 4);

    let goals = GoalRepo::get_for_date(&conn, "2024-01-01").unwrap();
    assert_eq!(goals.len(), 4);
    assert_eq!(goals[3].title, "Journal for 5 minutes");
}

#[test]
fn toggling_unknown_slot_errors() {
    let conn = test_conn();
    assert!(GoalRepo::toggle(&conn, "2024-01-01", 9).is_err());
}

// ─── Challenges ──────────────────────────────────────────────────────────────

#[test]
fn challenge_start_and_status() {
    let conn = test_conn();
    let kind = find_kind("week-warrior").unwrap();
    let run = ChallengeRepo::start(&conn, kind, date("2024-01-01")).unwrap();
    assert_eq!(run.started, "2024-01-01");
    assert_eq!(run.target_date, "2024-01-07");

    let active = ChallengeRepo::active(&conn).unwrap().unwrap();
    assert_eq!(active.kind_id, "week-warrior");

    // A second open run is rejected
    assert!(ChallengeRepo::start(&conn, kind, date("2024-01-02")).is_err());
}

#[test]
fn challenge_completes_when_every_day_is_logged() {
    let conn = test_conn();
    let kind = find_kind("week-warrior").unwrap();
    ChallengeRepo::start(&conn, kind, date("2024-01-01")).unwrap();

    for d in 1..=6 {
        DayRepo::mark_completed(&conn, &format!("2024-01-{:02}", d), false, false, None)
            .unwrap();
    }
    let (run, progress) = ChallengeRepo::refresh(&conn, date("2024-01-06")).unwrap().unwrap();
    assert_eq!(progress, 6);
    assert!(!run.completed);

    DayRepo::mark_completed(&conn, "2024-01-07", false, false, None).unwrap();
    let (run, progress) = ChallengeRepo::refresh(&conn, date("2024-01-07")).unwrap().unwrap();
    assert_eq!(progress, 7);
    assert!(run.completed);

    // Once completed, no run is active
    assert!(ChallengeRepo::active(&conn).unwrap().is_none());
}

// ─── Habit stacks ────────────────────────────────────────────────────────────

#[test]
fn presets_are_seeded_once() {
    let conn = test_conn();
    let stacks = StackRepo::list(&conn).unwrap();
    assert_eq!(stacks.len(), 3);
    assert!(stacks.iter().all(|s| !s.active));

    // Migrations are idempotent
    run_migrations(&conn).unwrap();
    assert_eq!(StackRepo::list(&conn).unwrap().len(), 3);

    let steps = StackRepo::steps(&conn, stacks[0].id).unwrap();
    assert_eq!(steps.len(), 5);
    assert_eq!(steps[0].position, 1);
}

#[test]
fn activating_a_stack_deactivates_the_rest() {
    let conn = test_conn();
    let stacks = StackRepo::list(&conn).unwrap();
    StackRepo::set_active(&conn, stacks[0].id).unwrap();
    StackRepo::set_active(&conn, stacks[1].id).unwrap();

    let active = StackRepo::active(&conn).unwrap().unwrap();
    assert_eq!(active.id, stacks[1].id);

    assert!(StackRepo::set_active(&conn, 999).is_err());
}

#[test]
fn stack_completion_needs_only_required_steps() {
    let conn = test_conn();
    let stacks = StackRepo::list(&conn).unwrap();
    let stack = &stacks[0];
    let steps = StackRepo::steps(&conn, stack.id).unwrap();

    assert!(!StackRepo::completed_on(&conn, stack.id, "2024-01-01").unwrap());

    for step in steps.iter().filter(|s| s.required) {
        StackRepo::mark_step(&conn, step.id, "2024-01-01", true).unwrap();
    }
    assert!(StackRepo::completed_on(&conn, stack.id, "2024-01-01").unwrap());

    // Unticking a required step takes it back
    let first_required = steps.iter().find(|s| s.required).unwrap();
    StackRepo::mark_step(&conn, first_required.id, "2024-01-01", false).unwrap();
    assert!(!StackRepo::completed_on(&conn, stack.id, "2024-01-01").unwrap());
}

// ─── App meta ────────────────────────────────────────────────────────────────

#[test]
fn meta_roundtrip_and_overwrite() {
    let conn = test_conn();
    assert_eq!(MetaRepo::get(&conn, "setup_done").unwrap(), None);

    MetaRepo::set(&conn, "setup_done", "1").unwrap();
    assert_eq!(MetaRepo::get(&conn, "setup_done").unwrap().as_deref(), Some("1"));

    MetaRepo::set(&conn, "setup_done", "0").unwrap();
    assert_eq!(MetaRepo::get(&conn, "setup_done").unwrap().as_deref(), Some("0"));

    // schema_version is stamped by migrations
    assert!(MetaRepo::get(&conn, "schema_version").unwrap().is_some());
}
