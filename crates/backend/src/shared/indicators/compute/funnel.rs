use contracts::shared::indicators::*;
use contracts::shared::metrics::{format_value_with, DerivedMetrics, MetricType, NumberLocale};

/// Change in percent relative to `prev`; `None` when `prev` is ~0.
pub fn pct_change(cur: f64, prev: f64) -> Option<f64> {
    if prev.abs() < 0.01 {
        None
    } else {
        Some(((cur - prev) / prev.abs()) * 100.0)
    }
}

/// Changes within ±5% are Neutral. For cost metrics a rise is Bad.
pub fn status_by_change(change: Option<f64>, smaller_is_better: bool) -> IndicatorStatus {
    match change {
        Some(c) if c > 5.0 => {
            if smaller_is_better {
                IndicatorStatus::Bad
            } else {
                IndicatorStatus::Good
            }
        }
        Some(c) if c < -5.0 => {
            if smaller_is_better {
                IndicatorStatus::Good
            } else {
                IndicatorStatus::Bad
            }
        }
        _ => IndicatorStatus::Neutral,
    }
}

/// One KPI card for `metric`, current period against the previous one.
pub fn compute_indicator(
    metric: MetricType,
    current: &DerivedMetrics,
    previous: &DerivedMetrics,
    locale: &NumberLocale,
) -> IndicatorValue {
    let def = metric.definition();
    let cur = current.value_of(metric);
    let prev = previous.value_of(metric);
    let change = pct_change(cur, prev);

    IndicatorValue {
        id: metric.into(),
        value: Some(cur),
        display: format_value_with(Some(cur), def.unit, locale),
        previous_value: Some(prev),
        change_percent: change,
        status: status_by_change(change, def.smaller_is_better),
        subtitle: Some(format!(
            "Anterior: {}",
            format_value_with(Some(prev), def.unit, locale)
        )),
    }
}
