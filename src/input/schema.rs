use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Integer,
    Float,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Text => write!(f, "text"),
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Float => write!(f, "float"),
        }
    }
}

/// A coerced cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{v}"),
            // `{}` on f64 prints the shortest text that parses back to the same bits.
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnType,
}

const PRODUCTIVITY_COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        name: "date",
        kind: ColumnType::Text,
    },
    ColumnDef {
        name: "hours",
        kind: ColumnType::Float,
    },
    ColumnDef {
        name: "focus",
        kind: ColumnType::Float,
    },
    ColumnDef {
        name: "breaks",
        kind: ColumnType::Float,
    },
    ColumnDef {
        name: "productivity_score",
        kind: ColumnType::Float,
    },
];

/// Declared column types. Columns absent from the table are read as text.
#[derive(Debug, Clone)]
pub struct MetricsSchema {
    columns: BTreeMap<String, ColumnType>,
}

impl Default for MetricsSchema {
    fn default() -> Self {
        Self::from_defs(PRODUCTIVITY_COLUMNS)
    }
}

impl MetricsSchema {
    pub fn from_defs(defs: &[ColumnDef]) -> Self {
        let columns = defs
            .iter()
            .map(|def| (def.name.to_string(), def.kind))
            .collect();
        Self { columns }
    }

    pub fn with_column(mut self, name: &str, kind: ColumnType) -> Self {
        self.columns.insert(name.to_string(), kind);
        self
    }

    pub fn column_type(&self, name: &str) -> ColumnType {
        self.columns.get(name).copied().unwrap_or(ColumnType::Text)
    }

    /// Resolves the type of each header position once, before any row is read.
    pub fn resolve(&self, header: &[String]) -> Vec<ColumnType> {
        header.iter().map(|name| self.column_type(name)).collect()
    }
}

/// Coerces one trimmed cell. Returns `None` when the text does not fit `kind`.
pub fn coerce(raw: &str, kind: ColumnType) -> Option<Value> {
    let trimmed = raw.trim();
    match kind {
        ColumnType::Text => Some(Value::Text(trimmed.to_string())),
        ColumnType::Integer => trimmed.parse::<i64>().ok().map(Value::Integer),
        ColumnType::Float => {
            let v = trimmed.parse::<f64>().ok()?;
            if v.is_finite() {
                Some(Value::Float(v))
            } else {
                None
            }
        }
    }
}
