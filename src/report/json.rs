use serde::Serialize;

use crate::input::MetricsTable;
use crate::model::{MetricRecord, score_record};
use crate::report::ScoreSummary;

pub fn render_summary_json(summary: &ScoreSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

#[derive(Serialize)]
struct ScoredRow<'a> {
    line: usize,
    #[serde(flatten)]
    record: &'a MetricRecord,
    derived_score: Option<f64>,
}

#[derive(Serialize)]
struct TableDocument<'a> {
    summary: &'a ScoreSummary,
    header: &'a [String],
    records: Vec<ScoredRow<'a>>,
}

/// Summary plus every record with its derived score, for the `json` output format.
pub fn render_table_json(summary: &ScoreSummary, table: &MetricsTable) -> serde_json::Result<String> {
    let records = table
        .records
        .iter()
        .map(|record| ScoredRow {
            line: record.line,
            record,
            derived_score: score_record(record),
        })
        .collect();
    serde_json::to_string_pretty(&TableDocument {
        summary,
        header: &table.header,
        records,
    })
}
