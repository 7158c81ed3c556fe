use axum::{http::StatusCode, Json};
use contracts::projections::p910_funnel_counters::dto::FunnelDayDto;

use crate::projections::p910_funnel_counters::repository;
use crate::shared::data::db::get_connection;

/// POST /api/p910/funnel_counters
///
/// Replaces the counters of one funnel on one day.
pub async fn upsert_day(Json(day): Json<FunnelDayDto>) -> Result<(), StatusCode> {
    if day.funnel.trim().is_empty() {
        tracing::warn!("p910: rejected counters for {} without funnel", day.date);
        return Err(StatusCode::BAD_REQUEST);
    }

    repository::upsert_day(get_connection(), &day)
        .await
        .map_err(|e| {
            tracing::error!("p910: failed to upsert {} / {}: {e:#}", day.date, day.funnel);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// GET /api/p910/funnels
pub async fn list_funnels() -> Result<Json<Vec<String>>, StatusCode> {
    match repository::list_funnels(get_connection()).await {
        Ok(funnels) => Ok(Json(funnels)),
        Err(e) => {
            tracing::error!("p910: failed to list funnels: {e:#}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
