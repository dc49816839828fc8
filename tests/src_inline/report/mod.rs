use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::input::schema::MetricsSchema;
use crate::input::parse_metrics;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("proddash_report_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample_table() -> MetricsTable {
    let text = "date,hours,focus,breaks\n\
                2024-01-01,8,5,2\n\
                2024-01-02,6,4,1\n\
                2024-01-03,7\n\
                2024-01-04,4,2,0\n";
    parse_metrics(text, &MetricsSchema::default()).unwrap()
}

#[test]
fn test_quantiles() {
    let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(median(&v), 3.0);
    assert_eq!(p90(&v), 5.0);
    assert_eq!(quantile_indexed(&[], 0.5), 0.0);
}

#[test]
fn test_summarize_counts_and_stats() {
    let table = sample_table();
    let summary = summarize(&table, "assets/data.csv");
    assert_eq!(summary.n_records, 3);
    assert_eq!(summary.n_scored, 3);
    assert_eq!(summary.n_row_errors, 1);
    // scores: 104, 79.5, 50
    assert_eq!(summary.scores.min, 50.0);
    assert_eq!(summary.scores.max, 104.0);
    assert_eq!(summary.scores.median, 79.5);
    assert!((summary.scores.mean - 233.5 / 3.0).abs() < 1e-9);
    assert_eq!(summary.row_errors, vec!["line 4: expected 4 fields, found 2".to_string()]);
}

#[test]
fn test_summarize_empty_table() {
    let summary = summarize(&MetricsTable::default(), "none");
    assert_eq!(summary.n_scored, 0);
    assert_eq!(summary.scores.mean, 0.0);
    assert_eq!(summary.scores.max, 0.0);
}

#[test]
fn test_summary_json_fields() {
    let table = sample_table();
    let summary = summarize(&table, "assets/data.csv");
    let json = json::render_summary_json(&summary).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["n_records"], 3);
    assert_eq!(v["scores"]["max"], 104.0);
    assert_eq!(v["tool"], "proddash");
}

#[test]
fn test_table_json_includes_scores() {
    let table = sample_table();
    let summary = summarize(&table, "assets/data.csv");
    let json = json::render_table_json(&summary, &table).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    let records = v["records"].as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["date"], "2024-01-01");
    assert_eq!(records[0]["hours"], 8.0);
    assert_eq!(records[1]["derived_score"], 79.5);
    assert_eq!(records[2]["line"], 5);
}

#[test]
fn test_report_text_lists_days_and_rejections() {
    let table = sample_table();
    let summary = summarize(&table, "assets/data.csv");
    let report = text::render_report_text(&summary, &table);
    assert!(report.contains("2024-01-01: hours=8 focus=5 breaks=2 score=104.00"));
    assert!(report.contains("2024-01-02: hours=6 focus=4 breaks=1 score=79.50"));
    assert!(report.contains("line 4: expected 4 fields, found 2"));
}

#[test]
fn test_write_reports_outputs() {
    let table = sample_table();
    let summary = summarize(&table, "assets/data.csv");
    let dir = make_temp_dir();
    write_reports(&table, &summary, &dir).unwrap();

    let scored = std::fs::read_to_string(dir.join("scored.csv")).unwrap();
    let lines: Vec<&str> = scored.lines().collect();
    assert_eq!(lines[0], "date,hours,focus,breaks,derived_score");
    assert_eq!(lines[1], "2024-01-01,8,5,2,104");
    assert_eq!(lines[2], "2024-01-02,6,4,1,79.5");
    assert_eq!(lines.len(), 4);

    assert!(dir.join("summary.json").exists());
    assert!(dir.join("report.txt").exists());
}
