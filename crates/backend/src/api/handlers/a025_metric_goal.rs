use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::domain::a025_metric_goal::dto::{MetricGoalDto, MetricGoalListRequest};
use contracts::shared::metrics::GoalRecord;

use super::status_for;
use crate::domain::a025_metric_goal::service;
use crate::shared::data::db::get_connection;

/// GET /api/a025/metric_goal?year=2025&month=3
pub async fn list(
    Query(req): Query<MetricGoalListRequest>,
) -> Result<Json<Vec<GoalRecord>>, StatusCode> {
    match service::list(get_connection(), req.month, req.year).await {
        Ok(goals) => Ok(Json(goals)),
        Err(e) => {
            tracing::error!("a025: failed to list goals for {}-{:02}: {e:#}", req.year, req.month);
            Err(status_for(&e))
        }
    }
}

/// POST /api/a025/metric_goal
pub async fn upsert(Json(dto): Json<MetricGoalDto>) -> Result<Json<GoalRecord>, StatusCode> {
    match service::save(get_connection(), dto).await {
        Ok(record) => Ok(Json(record)),
        Err(e) => {
            tracing::error!("a025: failed to save goal: {e:#}");
            Err(status_for(&e))
        }
    }
}

/// DELETE /api/a025/metric_goal/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    match service::delete(get_connection(), &id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("a025: failed to delete goal {}: {e:#}", id);
            Err(status_for(&e))
        }
    }
}
