//! Loads daily productivity metrics from CSV and derives a composite score per day.

pub mod config;
pub mod input;
pub mod logging;
pub mod model;
pub mod report;

pub use input::schema::{ColumnType, MetricsSchema, Value};
pub use input::{
    BaseLocation, LoadError, MetricsTable, ResourceLocation, RowError, RowErrorKind, load_metrics,
    parse_metrics,
};
pub use model::{MetricRecord, calculate_productivity, score_record};
