use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d410_goal_tracking::{GoalTrackingRequest, GoalTrackingResponse};
use serde::Deserialize;

use super::status_for;
use crate::dashboards::d410_goal_tracking::service;
use crate::domain::a025_metric_goal::SqliteGoalStore;
use crate::projections::p910_funnel_counters::SqliteMetricsSource;
use crate::shared::config;
use crate::shared::data::db::get_connection;

#[derive(Debug, Deserialize)]
pub struct GoalTrackingParams {
    pub year: i32,
    pub month: u32,
    pub funnel: Option<String>,
}

/// GET /api/d410/goal_tracking?year=2025&month=3&funnel=inbound
pub async fn get_goal_tracking(
    Query(params): Query<GoalTrackingParams>,
) -> Result<Json<GoalTrackingResponse>, StatusCode> {
    run(GoalTrackingRequest {
        year: params.year,
        month: params.month,
        funnel: params.funnel,
        weeks: None,
        metrics: None,
    })
    .await
}

/// POST /api/d410/goal_tracking
///
/// Same as GET, with optional custom week windows and metric list in the body.
pub async fn post_goal_tracking(
    Json(request): Json<GoalTrackingRequest>,
) -> Result<Json<GoalTrackingResponse>, StatusCode> {
    run(request).await
}

async fn run(request: GoalTrackingRequest) -> Result<Json<GoalTrackingResponse>, StatusCode> {
    tracing::info!(
        "D410 Dashboard: goal tracking for {}-{:02} (funnel: {})",
        request.year,
        request.month,
        request.funnel.as_deref().unwrap_or("all")
    );

    let db = get_connection();
    let goals = SqliteGoalStore::new(db);
    let source = SqliteMetricsSource::new(db);
    let locale = config::number_locale();

    match service::get_goal_tracking(&goals, &source, request, &locale).await {
        Ok(response) => {
            tracing::info!(
                "D410 Dashboard: returning {} rows over {} weeks",
                response.rows.len(),
                response.weeks.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D410 Dashboard: failed to build goal tracking: {e:#}");
            Err(status_for(&e))
        }
    }
}
