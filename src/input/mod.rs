use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

pub mod csv;
pub mod fetch;
pub mod schema;

use crate::model::MetricRecord;
use schema::{ColumnType, MetricsSchema};

pub use csv::{encode_record, parse_metrics};
pub use fetch::retrieve_text;

/// Asset names tried in order when no explicit asset path is configured.
pub const DEFAULT_ASSETS: &[&str] = &["assets/productivity_metrics.csv", "assets/data.csv"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseLocation {
    Local(PathBuf),
    Remote(String),
}

impl fmt::Display for BaseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseLocation::Local(dir) => write!(f, "{}", dir.display()),
            BaseLocation::Remote(url) => f.write_str(url),
        }
    }
}

impl BaseLocation {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            BaseLocation::Remote(raw.to_string())
        } else {
            BaseLocation::Local(PathBuf::from(raw))
        }
    }
}

/// Base plus relative asset path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation {
    pub base: BaseLocation,
    pub asset: String,
}

impl ResourceLocation {
    pub fn new(base: BaseLocation, asset: impl Into<String>) -> Self {
        Self {
            base,
            asset: asset.into(),
        }
    }

    pub fn is_gzip(&self) -> bool {
        self.asset.ends_with(".gz")
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            BaseLocation::Local(dir) => write!(f, "{}", dir.join(&self.asset).display()),
            BaseLocation::Remote(url) => write!(f, "{}", fetch::join_url(url, &self.asset)),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to retrieve {location}: {reason}")]
    Retrieval { location: String, reason: String },
    #[error("schema error: {0}")]
    Schema(String),
}

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowErrorKind {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("column `{column}`: cannot read {value:?} as {expected}")]
    Parse {
        column: String,
        value: String,
        expected: ColumnType,
    },
}

/// A failure scoped to one input line. The row is left out of the table.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("line {line}: {kind}")]
pub struct RowError {
    pub line: usize,
    pub kind: RowErrorKind,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsTable {
    pub header: Vec<String>,
    pub records: Vec<MetricRecord>,
    pub row_errors: Vec<RowError>,
}

impl MetricsTable {
    pub fn is_clean(&self) -> bool {
        self.row_errors.is_empty()
    }
}

pub async fn load_metrics(
    location: &ResourceLocation,
    schema: &MetricsSchema,
) -> Result<MetricsTable, LoadError> {
    let text = retrieve_text(location).await?;
    parse_loaded(location, &text, schema)
}

fn parse_loaded(
    location: &ResourceLocation,
    text: &str,
    schema: &MetricsSchema,
) -> Result<MetricsTable, LoadError> {
    let table = parse_metrics(text, schema)?;
    tracing::info!(
        location = %location,
        records = table.records.len(),
        row_errors = table.row_errors.len(),
        "loaded productivity metrics"
    );
    Ok(table)
}

/// Loads the first asset in `candidates` that can be retrieved.
pub async fn load_first_available(
    base: &BaseLocation,
    candidates: &[&str],
    schema: &MetricsSchema,
) -> Result<(ResourceLocation, MetricsTable), LoadError> {
    let mut last_err = None;
    for asset in candidates {
        let location = ResourceLocation::new(base.clone(), *asset);
        match retrieve_text(&location).await {
            Ok(text) => {
                let table = parse_loaded(&location, &text, schema)?;
                return Ok((location, table));
            }
            Err(err) => {
                tracing::debug!(location = %location, error = %err, "asset not available");
                last_err = Some(err);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| LoadError::Retrieval {
        location: base.to_string(),
        reason: "no candidate assets configured".to_string(),
    }))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
