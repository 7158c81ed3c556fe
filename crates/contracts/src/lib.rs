//! Shared types and pure computations for the funnel goals dashboard.
//!
//! Consumed by the backend service and by any UI that renders its JSON.

pub mod dashboards;
pub mod domain;
pub mod projections;
pub mod shared;
