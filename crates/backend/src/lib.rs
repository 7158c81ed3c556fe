//! Funnel goals service: goal storage, daily funnel counters, the weekly
//! goal-tracking dashboard and KPI indicators over HTTP.

pub mod api;
pub mod dashboards;
pub mod domain;
pub mod projections;
pub mod routes;
pub mod shared;
