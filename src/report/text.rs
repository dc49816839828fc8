use crate::input::MetricsTable;
use crate::model::score_record;
use crate::report::{ScoreSummary, format_f64_2};

pub fn render_report_text(summary: &ScoreSummary, table: &MetricsTable) -> String {
    let mut out = String::new();

    out.push_str("Productivity Report\n");
    out.push_str("===================\n\n");
    out.push_str(&format!("Source: {}\n", summary.source));
    out.push_str(&format!(
        "Records: {} ({} scored, {} rejected)\n\n",
        summary.n_records, summary.n_scored, summary.n_row_errors
    ));

    out.push_str("1. Daily scores\n");
    if table.records.is_empty() {
        out.push_str("No records loaded.\n");
    }
    for record in &table.records {
        let label = record
            .text("date")
            .map(str::to_string)
            .unwrap_or_else(|| format!("line {}", record.line));
        let score = score_record(record)
            .map(format_f64_2)
            .unwrap_or_else(|| "n/a".to_string());
        out.push_str(&format!(
            "{}: hours={} focus={} breaks={} score={}\n",
            label,
            field(record.number("hours")),
            field(record.number("focus")),
            field(record.number("breaks")),
            score
        ));
    }
    out.push('\n');

    out.push_str("2. Score distribution\n");
    let stats = &summary.scores;
    out.push_str(&format!(
        "mean={} median={} p90={} min={} max={}\n\n",
        format_f64_2(stats.mean),
        format_f64_2(stats.median),
        format_f64_2(stats.p90),
        format_f64_2(stats.min),
        format_f64_2(stats.max)
    ));

    out.push_str("3. Rejected rows\n");
    if summary.row_errors.is_empty() {
        out.push_str("None.\n");
    }
    for err in &summary.row_errors {
        out.push_str(&format!("{err}\n"));
    }

    out
}

fn field(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| "-".to_string())
}
