use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // DASHBOARDS
        // ========================================
        // D410 Goal Tracking Dashboard
        .route(
            "/api/d410/goal_tracking",
            get(handlers::d410_goal_tracking::get_goal_tracking)
                .post(handlers::d410_goal_tracking::post_goal_tracking),
        )
        // ========================================
        // GOALS & COUNTERS
        // ========================================
        // A025 Metric Goal handlers
        .route(
            "/api/a025/metric_goal",
            get(handlers::a025_metric_goal::list).post(handlers::a025_metric_goal::upsert),
        )
        .route(
            "/api/a025/metric_goal/:id",
            axum::routing::delete(handlers::a025_metric_goal::delete),
        )
        // P910 Funnel Counters handlers
        .route(
            "/api/p910/funnel_counters",
            post(handlers::p910_funnel_counters::upsert_day),
        )
        .route(
            "/api/p910/funnels",
            get(handlers::p910_funnel_counters::list_funnels),
        )
        // ========================================
        // INDICATORS & CATALOG
        // ========================================
        .route(
            "/api/indicators/meta",
            get(handlers::indicators::get_indicator_catalog),
        )
        .route(
            "/api/indicators/compute",
            post(handlers::indicators::compute_indicators),
        )
        .route("/api/metrics/catalog", get(handlers::metrics_catalog::list))
}
