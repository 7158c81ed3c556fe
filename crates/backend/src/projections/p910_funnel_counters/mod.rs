pub mod repository;
pub mod source;

pub use source::{InMemoryMetricsSource, MetricsSource, SqliteMetricsSource};
