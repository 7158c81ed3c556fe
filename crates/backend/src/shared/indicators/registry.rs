use anyhow::Result;
use contracts::shared::dashboard_state::DateRange;
use contracts::shared::indicators::*;
use contracts::shared::metrics::format::NO_DATA;
use contracts::shared::metrics::{compute_derived, DerivedMetrics, MetricType, NumberLocale};

use super::compute::funnel;
use crate::projections::p910_funnel_counters::MetricsSource;

/// Compute a batch of indicators. Ids that are not metric keys are skipped.
/// Counters for the current and the previous period are fetched once for the
/// whole batch.
pub async fn compute<M>(
    source: &M,
    ids: &[IndicatorId],
    ctx: &IndicatorContext,
    locale: &NumberLocale,
) -> Vec<IndicatorValue>
where
    M: MetricsSource + ?Sized,
{
    let wanted: Vec<(&IndicatorId, MetricType)> = ids
        .iter()
        .filter_map(|id| match id.metric() {
            Some(m) => Some((id, m)),
            None => {
                tracing::warn!("indicator {} is not a known metric", id.0);
                None
            }
        })
        .collect();

    if wanted.is_empty() {
        return Vec::new();
    }

    match fetch_periods(source, ctx).await {
        Ok((current, previous)) => wanted
            .into_iter()
            .map(|(_, m)| funnel::compute_indicator(m, &current, &previous, locale))
            .collect(),
        Err(e) => {
            tracing::warn!("indicators compute error: {e:#}");
            wanted
                .into_iter()
                .map(|(id, _)| IndicatorValue {
                    id: id.clone(),
                    value: None,
                    display: NO_DATA.into(),
                    previous_value: None,
                    change_percent: None,
                    status: IndicatorStatus::Neutral,
                    subtitle: Some(format!("Erro: {e}")),
                })
                .collect()
        }
    }
}

/// Derived metrics for the context range and for the equally long range
/// right before it.
async fn fetch_periods<M>(
    source: &M,
    ctx: &IndicatorContext,
) -> Result<(DerivedMetrics, DerivedMetrics)>
where
    M: MetricsSource + ?Sized,
{
    let range = DateRange::new(ctx.date_from, ctx.date_to)?;
    let prev = range.previous();
    let funnel = ctx.funnel.as_deref();

    let current = source.raw_counters(range.start, range.end, funnel).await?;
    let previous = source.raw_counters(prev.start, prev.end, funnel).await?;

    Ok((compute_derived(&current), compute_derived(&previous)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projections::p910_funnel_counters::InMemoryMetricsSource;
    use contracts::projections::p910_funnel_counters::dto::FunnelDayDto;
    use contracts::shared::metrics::RawPeriodCounters;

    fn day(date: &str, leads: f64, investimento: f64) -> FunnelDayDto {
        FunnelDayDto {
            date: date.parse().unwrap(),
            funnel: "inbound".into(),
            counters: RawPeriodCounters {
                leads,
                investimento,
                ..Default::default()
            },
        }
    }

    fn ctx(from: &str, to: &str) -> IndicatorContext {
        IndicatorContext {
            date_from: from.parse().unwrap(),
            date_to: to.parse().unwrap(),
            funnel: None,
        }
    }

    #[tokio::test]
    async fn test_compares_with_previous_period_of_same_length() {
        let source = InMemoryMetricsSource::new(vec![
            day("2025-03-01", 40.0, 2000.0),
            day("2025-03-08", 50.0, 2000.0),
            day("2025-03-15", 100.0, 3000.0),
        ]);

        let values = compute(
            &source,
            &[IndicatorId::new("leads"), IndicatorId::new("cpl")],
            &ctx("2025-03-08", "2025-03-14"),
            &NumberLocale::default(),
        )
        .await;

        assert_eq!(values.len(), 2);
        assert_eq!(values[0].value, Some(50.0));
        assert_eq!(values[0].previous_value, Some(40.0));
        assert_eq!(values[0].change_percent, Some(25.0));
        assert_eq!(values[0].status, IndicatorStatus::Good);
        assert_eq!(values[1].value, Some(40.0));
        assert_eq!(values[1].status, IndicatorStatus::Good);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_skipped() {
        let values = compute(
            &InMemoryMetricsSource::default(),
            &[IndicatorId::new("sales_revenue"), IndicatorId::new("roas")],
            &ctx("2025-03-01", "2025-03-31"),
            &NumberLocale::default(),
        )
        .await;

        assert_eq!(values.len(), 1);
        assert_eq!(values[0].id.0, "roas");
        assert_eq!(values[0].change_percent, None);
        assert_eq!(values[0].status, IndicatorStatus::Neutral);
    }

    #[tokio::test]
    async fn test_errors_become_neutral_values() {
        let values = compute(
            &InMemoryMetricsSource::default(),
            &[IndicatorId::new("cpa")],
            &ctx("2025-03-31", "2025-03-01"),
            &NumberLocale::default(),
        )
        .await;

        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value, None);
        assert_eq!(values[0].status, IndicatorStatus::Neutral);
        assert!(values[0].subtitle.as_deref().unwrap().starts_with("Erro:"));
    }
}
