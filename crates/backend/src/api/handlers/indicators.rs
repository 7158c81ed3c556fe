use axum::{http::StatusCode, Json};
use contracts::shared::dashboard_state::DateRange;
use contracts::shared::indicators::*;

use crate::projections::p910_funnel_counters::SqliteMetricsSource;
use crate::shared::config;
use crate::shared::data::db::get_connection;
use crate::shared::indicators::{metadata, registry};

/// POST /api/indicators/compute
///
/// Batch-computes a set of indicators for the given context (period, funnel).
pub async fn compute_indicators(
    Json(req): Json<ComputeIndicatorsRequest>,
) -> Result<Json<ComputeIndicatorsResponse>, StatusCode> {
    tracing::info!(
        "Indicators: computing {} indicators for period {}..{}",
        req.indicator_ids.len(),
        req.context.date_from,
        req.context.date_to,
    );

    if let Err(e) = DateRange::new(req.context.date_from, req.context.date_to) {
        tracing::warn!("Indicators: {e}");
        return Err(StatusCode::BAD_REQUEST);
    }

    let source = SqliteMetricsSource::new(get_connection());
    let values = registry::compute(
        &source,
        &req.indicator_ids,
        &req.context,
        &config::number_locale(),
    )
    .await;

    tracing::info!("Indicators: returning {} values", values.len());
    Ok(Json(ComputeIndicatorsResponse { values }))
}

/// GET /api/indicators/meta
///
/// Returns the full catalogue of available indicators and sets.
pub async fn get_indicator_catalog() -> Json<IndicatorCatalogResponse> {
    Json(metadata::build_catalog())
}
