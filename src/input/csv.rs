use std::collections::{BTreeMap, BTreeSet};

use crate::input::schema::{ColumnType, MetricsSchema, coerce};
use crate::input::{LoadError, MetricsTable, RowError, RowErrorKind};
use crate::model::MetricRecord;

/// Parses comma-delimited text whose first non-blank line is the header.
///
/// Header problems fail the whole load. Rows with the wrong field count or an
/// uncoercible value are collected into `row_errors` and left out of `records`.
/// Blank lines and a leading byte-order mark are skipped. Fields are not
/// quoted; a comma always separates.
pub fn parse_metrics(text: &str, schema: &MetricsSchema) -> Result<MetricsTable, LoadError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let normalized = normalize_line_endings(text);
    let body = normalized.trim();
    if body.is_empty() {
        return Err(LoadError::Schema("resource is empty; no header".to_string()));
    }

    let leading = normalized.len() - normalized.trim_start().len();
    let line_offset = normalized[..leading].matches('\n').count();

    let mut lines = body.split('\n');
    let header_line = lines.next().unwrap_or_default();
    let header = parse_header(header_line)?;
    let kinds = schema.resolve(&header);

    let mut table = MetricsTable {
        header,
        records: Vec::new(),
        row_errors: Vec::new(),
    };

    for (idx, line) in lines.enumerate() {
        // header is line 1, first data line is 2
        let line_no = line_offset + idx + 2;
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line, line_no, &table.header, &kinds) {
            Ok(record) => table.records.push(record),
            Err(kind) => {
                let err = RowError {
                    line: line_no,
                    kind,
                };
                tracing::warn!("skipping row: {err}");
                table.row_errors.push(err);
            }
        }
    }

    Ok(table)
}

fn parse_header(line: &str) -> Result<Vec<String>, LoadError> {
    let header: Vec<String> = line.split(',').map(|s| s.trim().to_string()).collect();
    let mut seen = BTreeSet::new();
    for (idx, name) in header.iter().enumerate() {
        if name.is_empty() {
            return Err(LoadError::Schema(format!(
                "header column {} is empty",
                idx + 1
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(LoadError::Schema(format!(
                "duplicate header column `{name}`"
            )));
        }
    }
    Ok(header)
}

fn parse_row(
    line: &str,
    line_no: usize,
    header: &[String],
    kinds: &[ColumnType],
) -> Result<MetricRecord, RowErrorKind> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != header.len() {
        return Err(RowErrorKind::FieldCount {
            expected: header.len(),
            found: fields.len(),
        });
    }

    let mut values = BTreeMap::new();
    for ((name, &kind), raw) in header.iter().zip(kinds).zip(&fields) {
        let value = coerce(raw, kind).ok_or_else(|| RowErrorKind::Parse {
            column: name.clone(),
            value: raw.trim().to_string(),
            expected: kind,
        })?;
        values.insert(name.clone(), value);
    }

    Ok(MetricRecord {
        line: line_no,
        values,
    })
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Joins a record's values in `header` order. Missing columns encode as empty.
pub fn encode_record(header: &[String], record: &MetricRecord) -> String {
    header
        .iter()
        .map(|name| {
            record
                .get(name)
                .map(|v| v.to_string())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/csv.rs"]
mod tests;
