use crate::model::record::MetricRecord;

pub const HOURS_WEIGHT: f64 = 10.0;
pub const FOCUS_WEIGHT: f64 = 5.0;
pub const BREAKS_WEIGHT: f64 = 0.5;

/// `hours * 10 + focus * 5 - breaks * 0.5`. No clamping; NaN propagates.
pub fn calculate_productivity(hours: f64, focus: f64, breaks: f64) -> f64 {
    hours * HOURS_WEIGHT + focus * FOCUS_WEIGHT - breaks * BREAKS_WEIGHT
}

/// Scores a record from its `hours`, `focus` and `breaks` columns.
pub fn score_record(record: &MetricRecord) -> Option<f64> {
    let hours = record.number("hours")?;
    let focus = record.number("focus")?;
    let breaks = record.number("breaks")?;
    Some(calculate_productivity(hours, focus, breaks))
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/score.rs"]
mod tests;
