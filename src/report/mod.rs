use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::input::{MetricsTable, encode_record};
use crate::model::score_record;

pub mod json;
pub mod text;

pub const SCORE_COLUMN: &str = "derived_score";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreStats {
    pub mean: f64,
    pub median: f64,
    pub p90: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub tool: String,
    pub version: String,
    pub source: String,
    pub n_records: usize,
    pub n_scored: usize,
    pub n_row_errors: usize,
    pub scores: ScoreStats,
    pub row_errors: Vec<String>,
}

pub fn summarize(table: &MetricsTable, source: &str) -> ScoreSummary {
    let scores: Vec<f64> = table.records.iter().filter_map(score_record).collect();

    ScoreSummary {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: source.to_string(),
        n_records: table.records.len(),
        n_scored: scores.len(),
        n_row_errors: table.row_errors.len(),
        scores: score_stats(&scores),
        row_errors: table.row_errors.iter().map(|e| e.to_string()).collect(),
    }
}

fn score_stats(values: &[f64]) -> ScoreStats {
    if values.is_empty() {
        return ScoreStats {
            mean: 0.0,
            median: 0.0,
            p90: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }
    let sum: f64 = values.iter().sum();
    ScoreStats {
        mean: sum / values.len() as f64,
        median: median(values),
        p90: p90(values),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

/// Writes `scored.csv`, `summary.json` and `report.txt` into `out_dir`.
pub fn write_reports(
    table: &MetricsTable,
    summary: &ScoreSummary,
    out_dir: &Path,
) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    write_scored_csv(table, &out_dir.join("scored.csv"))?;

    let json = json::render_summary_json(summary).map_err(std::io::Error::other)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    let report = text::render_report_text(summary, table);
    write_text(&out_dir.join("report.txt"), &report)?;

    tracing::info!(out_dir = %out_dir.display(), "reports written");
    Ok(())
}

fn write_scored_csv(table: &MetricsTable, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let mut header = table.header.clone();
    header.push(SCORE_COLUMN.to_string());
    writeln!(w, "{}", header.join(","))?;

    for record in &table.records {
        let score = score_record(record).map(|s| s.to_string()).unwrap_or_default();
        writeln!(w, "{},{}", encode_record(&table.header, record), score)?;
    }
    w.flush()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
