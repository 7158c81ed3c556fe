//! Goal-vs-actual metrics core: catalog, derived ratios, goal allocation,
//! achievement classification and value formatting. Everything here is pure.

pub mod achievement;
pub mod catalog;
pub mod derived;
pub mod error;
pub mod format;
pub mod goals;
pub mod weeks;

pub use achievement::{classify, is_achieved, percent_of_goal, AchievementStatus, ProgressBand};
pub use catalog::{definition_of, definition_of_key, MetricDefinition, MetricIcon, MetricType, Unit};
pub use derived::{aggregate, compute_derived, DerivedMetrics, RawPeriodCounters};
pub use error::MetricsError;
pub use format::{format_value, format_value_with, NumberLocale};
pub use goals::{allocate_weekly, validate_goal_value, GoalPeriod, GoalRecord, GoalSet};
pub use weeks::{check_coverage, default_weeks, CoverageIssue, WeekWindow};
