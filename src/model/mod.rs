pub mod record;
pub mod score;

pub use record::MetricRecord;
pub use score::{calculate_productivity, score_record};
