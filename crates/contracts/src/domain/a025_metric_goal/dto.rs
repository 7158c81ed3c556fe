use serde::{Deserialize, Serialize};

/// Create or replace the goal of one metric for one month.
///
/// `type` is kept as a raw key so unknown metrics can be reported as a
/// validation error instead of a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricGoalDto {
    #[serde(rename = "type")]
    pub metric_type: String,
    pub month: u32,
    pub year: i32,
    pub value: f64,
}

/// GET /api/a025/metric_goal?year=2025&month=3
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricGoalListRequest {
    pub year: i32,
    pub month: u32,
}
