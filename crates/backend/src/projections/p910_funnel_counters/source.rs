use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::projections::p910_funnel_counters::dto::FunnelDayDto;
use contracts::shared::metrics::RawPeriodCounters;
use sea_orm::DatabaseConnection;

use super::repository;

/// Raw funnel counters summed over an inclusive date range. Funnel names are
/// compared without surrounding whitespace.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// `funnel: None` means all funnels.
    async fn raw_counters(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        funnel: Option<&str>,
    ) -> anyhow::Result<RawPeriodCounters>;
}

pub struct SqliteMetricsSource<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SqliteMetricsSource<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MetricsSource for SqliteMetricsSource<'_> {
    async fn raw_counters(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        funnel: Option<&str>,
    ) -> anyhow::Result<RawPeriodCounters> {
        repository::sum_counters(self.db, start, end, funnel).await
    }
}

/// Daily rows kept in memory; sums like the SQLite source.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetricsSource {
    days: Vec<FunnelDayDto>,
}

impl InMemoryMetricsSource {
    pub fn new(days: Vec<FunnelDayDto>) -> Self {
        Self { days }
    }

    pub fn push(&mut self, day: FunnelDayDto) {
        self.days.push(day);
    }
}

#[async_trait]
impl MetricsSource for InMemoryMetricsSource {
    async fn raw_counters(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        funnel: Option<&str>,
    ) -> anyhow::Result<RawPeriodCounters> {
        Ok(self
            .days
            .iter()
            .filter(|d| d.date >= start && d.date <= end)
            .filter(|d| funnel.map_or(true, |f| d.funnel.trim() == f.trim()))
            .map(|d| d.counters.sanitized())
            .sum())
    }
}
