use axum::http::StatusCode;
use contracts::shared::metrics::MetricsError;

pub mod a025_metric_goal;
pub mod d410_goal_tracking;
pub mod indicators;
pub mod metrics_catalog;
pub mod p910_funnel_counters;

/// Validation failures from the metrics core are the caller's fault; anything
/// else is ours.
pub(crate) fn status_for(e: &anyhow::Error) -> StatusCode {
    if e.downcast_ref::<MetricsError>().is_some() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
