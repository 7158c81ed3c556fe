pub mod dashboard_state;
pub mod indicators;
pub mod metrics;
