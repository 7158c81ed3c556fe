use serde::{Deserialize, Serialize};

use crate::shared::metrics::{
    AchievementStatus, CoverageIssue, MetricIcon, MetricType, ProgressBand, RawPeriodCounters,
    Unit, WeekWindow,
};

/// Request for the weekly goal-tracking table.
///
/// `weeks` overrides the default month split; it is checked for gaps and
/// overlaps but used as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalTrackingRequest {
    pub year: i32,
    pub month: u32,
    /// Funnel name; `None` means all funnels.
    #[serde(default)]
    pub funnel: Option<String>,
    #[serde(default)]
    pub weeks: Option<Vec<WeekWindow>>,
    /// Restrict the table to these metrics (default: the whole catalog).
    #[serde(default)]
    pub metrics: Option<Vec<MetricType>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalTrackingResponse {
    /// "YYYY-MM"
    pub period: String,
    pub funnel: Option<String>,
    pub weeks: Vec<WeekWindow>,
    pub rows: Vec<MetricRow>,
    /// Problems with the week windows (empty for the default split).
    pub coverage_issues: Vec<CoverageIssue>,
}

/// Raw counters of one week window, as fetched from the metrics source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekCounters {
    pub window: WeekWindow,
    pub counters: RawPeriodCounters,
}

/// Realized value of one metric in one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekCell {
    pub label: String,
    pub realized: f64,
    pub realized_display: String,
    /// `None` when no goal is set.
    pub achieved: Option<bool>,
}

/// One row of the goal-tracking table. Rebuilt on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub icon: MetricIcon,
    pub label: String,
    pub unit: Unit,
    pub smaller_is_better: bool,
    pub monthly_goal: Option<f64>,
    pub monthly_goal_display: String,
    pub weekly_goal: Option<f64>,
    pub weekly_goal_display: String,
    pub weeks: Vec<WeekCell>,
    pub total: f64,
    pub total_display: String,
    pub total_achieved: Option<bool>,
    pub percent_of_goal: Option<f64>,
    pub status: AchievementStatus,
    pub band: ProgressBand,
    pub caption: String,
}
