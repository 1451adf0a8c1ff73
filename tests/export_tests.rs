use chrono::NaiveDate;
use std::str::FromStr;

use brisk::export::{ExportBundle, ExportFormat};
use brisk::models::TrackedDay;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn sample_days() -> Vec<TrackedDay> {
    let mut first = TrackedDay::completed_on("2024-01-01");
    first.extra_cold = true;
    first.duration_seconds = Some(120);
    first.mood_before = Some(2);
    first.mood_after = Some(4);
    first.note = Some("brutal, but worth it".to_string());
    first.completed_at = Some("2024-01-01 07:12:00".to_string());

    let mut second = TrackedDay::new("2024-01-02");
    second.mood_before = Some(3);
    second.mood_after = Some(3);

    vec![first, second, TrackedDay::completed_on("2024-01-03")]
}

#[test]
fn json_roundtrip_preserves_every_day() {
    let bundle = ExportBundle::build(sample_days(), date("2024-01-03"), "2024-01-03 08:00:00".into());
    let json = bundle.to_json().unwrap();

    let parsed: ExportBundle = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.tracked_days, sample_days());
    assert_eq!(parsed.total_days, 3);
    assert_eq!(parsed.completed_days, 2);
    assert_eq!(parsed.streak, bundle.streak);
}

#[test]
fn summary_uses_the_shared_streak_calculator() {
    let bundle = ExportBundle::build(sample_days(), date("2024-01-03"), "now".into());
    // 01-01 done, 01-02 not, 01-03 done
    assert_eq!(bundle.streak.current, 1);
    assert_eq!(bundle.streak.best, 1);
}

#[test]
fn csv_has_header_and_one_row_per_day() {
    let bundle = ExportBundle::build(sample_days(), date("2024-01-03"), "now".into());
    let csv = bundle.to_csv().unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Date,Completed,Extra Cold"));
    assert_eq!(
        lines[1],
        "2024-01-01,Yes,Yes,No,120,2,4,\"brutal, but worth it\""
    );
    assert_eq!(lines[2], "2024-01-02,No,No,No,,3,3,");
    assert_eq!(lines[3], "2024-01-03,Yes,No,No,,,,");
}

#[test]
fn csv_can_be_written_to_disk() {
    let bundle = ExportBundle::build(sample_days(), date("2024-01-03"), "now".into());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");

    std::fs::write(&path, bundle.to_csv().unwrap()).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("2024-01-02,No,No,No"));
}

#[test]
fn format_parsing_is_case_insensitive_and_strict() {
    assert_eq!(ExportFormat::from_str("JSON").unwrap(), ExportFormat::Json);
    assert_eq!(ExportFormat::from_str("csv").unwrap(), ExportFormat::Csv);
    assert!(ExportFormat::from_str("pdf").is_err());
}

#[test]
fn empty_collection_exports_cleanly() {
    let bundle = ExportBundle::build(Vec::new(), date("2024-01-03"), "now".into());
    assert_eq!(bundle.total_days, 0);
    assert_eq!(bundle.streak.current, 0);

    let csv = bundle.to_csv().unwrap();
    assert_eq!(csv.lines().count(), 1);
}
