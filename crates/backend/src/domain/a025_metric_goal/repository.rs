use chrono::Utc;
use contracts::shared::metrics::{GoalPeriod, GoalRecord, MetricType};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

mod metric_goal {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a025_metric_goal")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub metric_type: String,
        pub month: i32,
        pub year: i32,
        pub value: f64,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Rows written by an older catalogue may carry keys we no longer know, and
/// hand-edited rows may carry a month outside 1..=12. Both are dropped here
/// rather than failing the whole month.
fn to_record(m: metric_goal::Model) -> Option<GoalRecord> {
    let metric_type = match m.metric_type.parse::<MetricType>() {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!("a025: skipping goal {}: {}", m.id, e);
            return None;
        }
    };

    let period = u32::try_from(m.month)
        .ok()
        .and_then(|month| GoalPeriod::new(month, m.year).ok());
    let period = match period {
        Some(p) => p,
        None => {
            tracing::warn!(
                "a025: skipping goal {}: invalid period {}-{}",
                m.id,
                m.year,
                m.month
            );
            return None;
        }
    };

    Some(GoalRecord {
        id: m.id,
        metric_type,
        period,
        value: m.value,
    })
}

// ============================================================================
// Repository functions
// ============================================================================

/// Goals of one month, ordered by last update so later records win.
pub async fn list_goals(
    db: &DatabaseConnection,
    month: u32,
    year: i32,
) -> Result<Vec<GoalRecord>, DbErr> {
    let models = metric_goal::Entity::find()
        .filter(metric_goal::Column::Month.eq(month as i32))
        .filter(metric_goal::Column::Year.eq(year))
        .order_by_asc(metric_goal::Column::UpdatedAt)
        .all(db)
        .await?;

    Ok(models.into_iter().filter_map(to_record).collect())
}

pub async fn find_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<GoalRecord>, DbErr> {
    let model = metric_goal::Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.and_then(to_record))
}

/// Insert or replace the goal for `(metric, period)`. The id of an existing
/// record is kept.
pub async fn upsert_goal(
    db: &DatabaseConnection,
    metric: MetricType,
    period: GoalPeriod,
    value: f64,
) -> Result<GoalRecord, DbErr> {
    let now = Utc::now();

    let existing = metric_goal::Entity::find()
        .filter(metric_goal::Column::MetricType.eq(metric.as_str()))
        .filter(metric_goal::Column::Month.eq(period.month as i32))
        .filter(metric_goal::Column::Year.eq(period.year))
        .one(db)
        .await?;

    let id = match existing {
        Some(model) => {
            let id = model.id.clone();
            let mut active: metric_goal::ActiveModel = model.into();
            active.value = Set(value);
            active.updated_at = Set(Some(now));
            active.update(db).await?;
            id
        }
        None => {
            let id = Uuid::new_v4().to_string();
            let active = metric_goal::ActiveModel {
                id: Set(id.clone()),
                metric_type: Set(metric.as_str().to_string()),
                month: Set(period.month as i32),
                year: Set(period.year),
                value: Set(value),
                created_at: Set(Some(now)),
                updated_at: Set(Some(now)),
            };
            active.insert(db).await?;
            id
        }
    };

    Ok(GoalRecord {
        id,
        metric_type: metric,
        period,
        value,
    })
}

/// Returns `false` when no record had this id.
pub async fn delete_goal(db: &DatabaseConnection, id: &str) -> Result<bool, DbErr> {
    let res = metric_goal::Entity::delete_by_id(id.to_string())
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}
