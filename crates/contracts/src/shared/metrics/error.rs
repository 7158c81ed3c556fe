use thiserror::Error;

/// Errors raised by the metrics core.
///
/// `UnknownMetric` and `InvalidWeekCount` signal programming errors in the
/// caller (malformed keys, empty week lists), not data conditions. Missing
/// goals and zero denominators are never errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("unknown metric type: {0}")]
    UnknownMetric(String),

    #[error("invalid week count: {0} (must be greater than zero)")]
    InvalidWeekCount(i64),

    #[error("invalid period: {year}-{month:02}")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("invalid goal value: {0} (must be a finite number >= 0)")]
    InvalidGoalValue(f64),

    #[error("invalid date range: {start} > {end}")]
    InvalidRange { start: String, end: String },

    #[error("dashboard state error: {0}")]
    State(String),
}
