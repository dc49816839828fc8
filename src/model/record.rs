use std::collections::BTreeMap;

use serde::Serialize;

use crate::input::schema::Value;

/// One data row, keyed by trimmed header name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    /// 1-based line in the source text; the header is line 1.
    #[serde(skip)]
    pub line: usize,
    #[serde(flatten)]
    pub values: BTreeMap<String, Value>,
}

impl MetricRecord {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.values.get(column).and_then(Value::as_f64)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.values.get(column).and_then(Value::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
