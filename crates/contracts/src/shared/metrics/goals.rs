use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::catalog::MetricType;
use super::error::MetricsError;

/// Calendar month a goal applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalPeriod {
    pub month: u32,
    pub year: i32,
}

impl GoalPeriod {
    pub fn new(month: u32, year: i32) -> Result<Self, MetricsError> {
        if !(1..=12).contains(&month) {
            return Err(MetricsError::InvalidPeriod { year, month });
        }
        Ok(Self { month, year })
    }

    /// "YYYY-MM"
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// A monthly goal for one metric, as supplied by the goal store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub period: GoalPeriod,
    pub value: f64,
}

/// Goal values must be finite and non-negative.
pub fn validate_goal_value(value: f64) -> Result<f64, MetricsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(MetricsError::InvalidGoalValue(value))
    }
}

/// Split a monthly goal evenly across `week_count` weeks.
///
/// `None` means no goal was set and stays `None`; it is never turned into 0.
pub fn allocate_weekly(
    monthly_goal: Option<f64>,
    week_count: i64,
) -> Result<Option<f64>, MetricsError> {
    if week_count <= 0 {
        return Err(MetricsError::InvalidWeekCount(week_count));
    }
    Ok(monthly_goal.map(|goal| goal / week_count as f64))
}

/// Goals of a single month, indexed by metric.
#[derive(Debug, Clone, Default)]
pub struct GoalSet {
    period: Option<GoalPeriod>,
    by_metric: HashMap<MetricType, f64>,
}

impl GoalSet {
    /// Keep only the records for `period`. When a metric has several records
    /// the last one wins.
    pub fn for_period(period: GoalPeriod, records: &[GoalRecord]) -> Self {
        let by_metric = records
            .iter()
            .filter(|r| r.period == period)
            .map(|r| (r.metric_type, r.value))
            .collect();

        Self {
            period: Some(period),
            by_metric,
        }
    }

    pub fn period(&self) -> Option<GoalPeriod> {
        self.period
    }

    pub fn monthly_goal(&self, metric: MetricType) -> Option<f64> {
        self.by_metric.get(&metric).copied()
    }

    pub fn len(&self) -> usize {
        self.by_metric.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_metric.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(metric: MetricType, month: u32, value: f64) -> GoalRecord {
        GoalRecord {
            id: format!("{metric}-{month}"),
            metric_type: metric,
            period: GoalPeriod { month, year: 2025 },
            value,
        }
    }

    #[test]
    fn test_allocate_weekly() {
        assert_eq!(allocate_weekly(None, 4), Ok(None));
        assert_eq!(allocate_weekly(Some(1000.0), 4), Ok(Some(250.0)));
        assert_eq!(allocate_weekly(Some(0.0), 5), Ok(Some(0.0)));
        assert_eq!(
            allocate_weekly(Some(1000.0), 0),
            Err(MetricsError::InvalidWeekCount(0))
        );
        assert_eq!(
            allocate_weekly(None, -2),
            Err(MetricsError::InvalidWeekCount(-2))
        );
    }

    #[test]
    fn test_goal_value_validation() {
        assert_eq!(validate_goal_value(0.0), Ok(0.0));
        assert!(validate_goal_value(-1.0).is_err());
        assert!(validate_goal_value(f64::NAN).is_err());
    }

    #[test]
    fn test_goal_period_validation() {
        assert!(GoalPeriod::new(0, 2025).is_err());
        assert!(GoalPeriod::new(13, 2025).is_err());
        assert_eq!(GoalPeriod::new(3, 2025).unwrap().key(), "2025-03");
    }

    #[test]
    fn test_goal_set_filters_period_and_last_wins() {
        let period = GoalPeriod { month: 3, year: 2025 };
        let records = vec![
            record(MetricType::Leads, 3, 300.0),
            record(MetricType::Leads, 4, 999.0),
            record(MetricType::Cpl, 3, 40.0),
            record(MetricType::Cpl, 3, 35.0),
        ];

        let set = GoalSet::for_period(period, &records);
        assert_eq!(set.len(), 2);
        assert_eq!(set.monthly_goal(MetricType::Leads), Some(300.0));
        assert_eq!(set.monthly_goal(MetricType::Cpl), Some(35.0));
        assert_eq!(set.monthly_goal(MetricType::Vendas), None);
    }

    #[test]
    fn test_goal_record_wire_shape() {
        let json = serde_json::json!({
            "id": "g1",
            "type": "cpmql",
            "period": { "month": 5, "year": 2025 },
            "value": 120.0
        });
        let rec: GoalRecord = serde_json::from_value(json).unwrap();
        assert_eq!(rec.metric_type, MetricType::Cpmql);
        assert_eq!(rec.period.month, 5);
    }
}
