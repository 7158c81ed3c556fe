use anyhow::Result;
use chrono::{NaiveDate, Utc};
use contracts::projections::p910_funnel_counters::dto::FunnelDayDto;
use contracts::shared::metrics::RawPeriodCounters;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, FromQueryResult, QueryOrder, QuerySelect, Set, Statement};

/// Daily raw counters per funnel. Dates are stored as `YYYY-MM-DD` text so
/// range filters compare lexicographically.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "p910_funnel_counters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub date: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub funnel: String,
    pub leads: f64,
    pub mqls: f64,
    pub agendamentos: f64,
    pub reunioes: f64,
    pub vendas: f64,
    pub investimento: f64,
    pub faturamento: f64,
    pub cash_collect: f64,
    #[sea_orm(nullable)]
    pub updated_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, FromQueryResult)]
struct CountersSum {
    leads: f64,
    mqls: f64,
    agendamentos: f64,
    reunioes: f64,
    vendas: f64,
    investimento: f64,
    faturamento: f64,
    cash_collect: f64,
}

impl From<CountersSum> for RawPeriodCounters {
    fn from(s: CountersSum) -> Self {
        RawPeriodCounters {
            leads: s.leads,
            mqls: s.mqls,
            agendamentos: s.agendamentos,
            reunioes: s.reunioes,
            vendas: s.vendas,
            investimento: s.investimento,
            faturamento: s.faturamento,
            cash_collect: s.cash_collect,
        }
    }
}

fn date_key(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Upsert one day using INSERT ... ON CONFLICT(date, funnel) DO UPDATE SET ...
///
/// Negative or non-finite counters are stored as 0.
pub async fn upsert_day(db: &DatabaseConnection, day: &FunnelDayDto) -> Result<()> {
    let c = day.counters.sanitized();

    let model = ActiveModel {
        date: Set(date_key(day.date)),
        funnel: Set(day.funnel.trim().to_string()),
        leads: Set(c.leads),
        mqls: Set(c.mqls),
        agendamentos: Set(c.agendamentos),
        reunioes: Set(c.reunioes),
        vendas: Set(c.vendas),
        investimento: Set(c.investimento),
        faturamento: Set(c.faturamento),
        cash_collect: Set(c.cash_collect),
        updated_at: Set(Some(Utc::now().to_rfc3339())),
    };

    Entity::insert(model)
        .on_conflict(
            OnConflict::columns([Column::Date, Column::Funnel])
                .update_columns([
                    Column::Leads,
                    Column::Mqls,
                    Column::Agendamentos,
                    Column::Reunioes,
                    Column::Vendas,
                    Column::Investimento,
                    Column::Faturamento,
                    Column::CashCollect,
                    Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(())
}

/// Sum of all counters over `[start, end]` (inclusive). `None` funnel sums
/// every funnel. An empty range yields all zeros.
pub async fn sum_counters(
    db: &DatabaseConnection,
    start: NaiveDate,
    end: NaiveDate,
    funnel: Option<&str>,
) -> Result<RawPeriodCounters> {
    let mut sql = String::from(
        r#"
        SELECT
            CAST(COALESCE(SUM(leads), 0) AS REAL)        AS leads,
            CAST(COALESCE(SUM(mqls), 0) AS REAL)         AS mqls,
            CAST(COALESCE(SUM(agendamentos), 0) AS REAL) AS agendamentos,
            CAST(COALESCE(SUM(reunioes), 0) AS REAL)     AS reunioes,
            CAST(COALESCE(SUM(vendas), 0) AS REAL)       AS vendas,
            CAST(COALESCE(SUM(investimento), 0) AS REAL) AS investimento,
            CAST(COALESCE(SUM(faturamento), 0) AS REAL)  AS faturamento,
            CAST(COALESCE(SUM(cash_collect), 0) AS REAL) AS cash_collect
        FROM p910_funnel_counters
        WHERE date >= ? AND date <= ?
    "#,
    );

    let mut params: Vec<sea_orm::Value> = vec![date_key(start).into(), date_key(end).into()];

    if let Some(f) = funnel {
        sql.push_str(" AND funnel = ?");
        params.push(f.trim().to_string().into());
    }

    let stmt = Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, &sql, params);
    let row = CountersSum::find_by_statement(stmt).one(db).await?;

    Ok(row.map(RawPeriodCounters::from).unwrap_or_default())
}

/// Distinct funnel names, alphabetically.
pub async fn list_funnels(db: &DatabaseConnection) -> Result<Vec<String>> {
    let funnels = Entity::find()
        .select_only()
        .column(Column::Funnel)
        .distinct()
        .order_by_asc(Column::Funnel)
        .into_tuple::<String>()
        .all(db)
        .await?;

    Ok(funnels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    fn day(date: &str, funnel: &str, leads: f64, investimento: f64) -> FunnelDayDto {
        FunnelDayDto {
            date: date.parse().unwrap(),
            funnel: funnel.to_string(),
            counters: RawPeriodCounters {
                leads,
                investimento,
                ..Default::default()
            },
        }
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_sum_is_inclusive_and_filters_funnel() {
        let db = connect_in_memory().await.unwrap();
        upsert_day(&db, &day("2025-03-01", "inbound", 10.0, 100.0)).await.unwrap();
        upsert_day(&db, &day("2025-03-07", "inbound", 5.0, 50.0)).await.unwrap();
        upsert_day(&db, &day("2025-03-08", "inbound", 7.0, 70.0)).await.unwrap();
        upsert_day(&db, &day("2025-03-03", "outbound", 2.0, 20.0)).await.unwrap();

        let week = sum_counters(&db, d("2025-03-01"), d("2025-03-07"), None).await.unwrap();
        assert_eq!(week.leads, 17.0);
        assert_eq!(week.investimento, 170.0);

        let inbound = sum_counters(&db, d("2025-03-01"), d("2025-03-07"), Some("inbound"))
            .await
            .unwrap();
        assert_eq!(inbound.leads, 15.0);
    }

    #[tokio::test]
    async fn test_funnel_names_are_trimmed_on_write_and_read() {
        let db = connect_in_memory().await.unwrap();
        upsert_day(&db, &day("2025-03-01", " inbound ", 10.0, 100.0)).await.unwrap();

        let sum = sum_counters(&db, d("2025-03-01"), d("2025-03-31"), Some("inbound  "))
            .await
            .unwrap();
        assert_eq!(sum.leads, 10.0);
        assert_eq!(list_funnels(&db).await.unwrap(), vec!["inbound"]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_day_and_empty_range_is_zero() {
        let db = connect_in_memory().await.unwrap();
        upsert_day(&db, &day("2025-03-02", "inbound", 10.0, 100.0)).await.unwrap();
        upsert_day(&db, &day("2025-03-02", "inbound", 12.0, -5.0)).await.unwrap();

        let sum = sum_counters(&db, d("2025-03-02"), d("2025-03-02"), None).await.unwrap();
        assert_eq!(sum.leads, 12.0);
        assert_eq!(sum.investimento, 0.0);

        let empty = sum_counters(&db, d("2024-01-01"), d("2024-01-31"), None).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_list_funnels() {
        let db = connect_in_memory().await.unwrap();
        upsert_day(&db, &day("2025-03-01", "outbound", 1.0, 0.0)).await.unwrap();
        upsert_day(&db, &day("2025-03-02", "inbound", 1.0, 0.0)).await.unwrap();
        upsert_day(&db, &day("2025-03-03", "inbound", 1.0, 0.0)).await.unwrap();

        assert_eq!(list_funnels(&db).await.unwrap(), vec!["inbound", "outbound"]);
    }
}
