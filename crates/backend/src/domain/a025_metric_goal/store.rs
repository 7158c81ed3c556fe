use async_trait::async_trait;
use contracts::shared::metrics::{GoalPeriod, GoalRecord};
use sea_orm::DatabaseConnection;

use super::repository;

/// Source of monthly goals for the goal-tracking dashboard.
#[async_trait]
pub trait GoalStore: Send + Sync {
    async fn list_goals(&self, month: u32, year: i32) -> anyhow::Result<Vec<GoalRecord>>;
}

pub struct SqliteGoalStore<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SqliteGoalStore<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GoalStore for SqliteGoalStore<'_> {
    async fn list_goals(&self, month: u32, year: i32) -> anyhow::Result<Vec<GoalRecord>> {
        Ok(repository::list_goals(self.db, month, year).await?)
    }
}

/// Fixed list of goals, filtered by period on read.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGoalStore {
    records: Vec<GoalRecord>,
}

impl InMemoryGoalStore {
    pub fn new(records: Vec<GoalRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl GoalStore for InMemoryGoalStore {
    async fn list_goals(&self, month: u32, year: i32) -> anyhow::Result<Vec<GoalRecord>> {
        let period = GoalPeriod { month, year };
        Ok(self
            .records
            .iter()
            .filter(|r| r.period == period)
            .cloned()
            .collect())
    }
}
