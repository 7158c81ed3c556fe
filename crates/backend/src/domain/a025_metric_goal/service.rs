use contracts::domain::a025_metric_goal::dto::MetricGoalDto;
use contracts::shared::metrics::{validate_goal_value, GoalPeriod, GoalRecord, MetricType};
use sea_orm::DatabaseConnection;

use super::repository;

/// Validate and store a monthly goal. Validation failures are returned as
/// `MetricsError` inside the `anyhow::Error`.
pub async fn save(db: &DatabaseConnection, dto: MetricGoalDto) -> anyhow::Result<GoalRecord> {
    let metric: MetricType = dto.metric_type.trim().parse()?;
    let period = GoalPeriod::new(dto.month, dto.year)?;
    let value = validate_goal_value(dto.value)?;

    let record = repository::upsert_goal(db, metric, period, value).await?;
    tracing::info!(
        "a025: goal {} for {} set to {}",
        record.metric_type,
        period.key(),
        record.value
    );
    Ok(record)
}

pub async fn list(db: &DatabaseConnection, month: u32, year: i32) -> anyhow::Result<Vec<GoalRecord>> {
    let period = GoalPeriod::new(month, year)?;
    Ok(repository::list_goals(db, period.month, period.year).await?)
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> anyhow::Result<bool> {
    Ok(repository::delete_goal(db, id).await?)
}
