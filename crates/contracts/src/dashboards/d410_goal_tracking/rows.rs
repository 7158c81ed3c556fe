use crate::shared::metrics::{
    aggregate, allocate_weekly, compute_derived, format_value_with, is_achieved, percent_of_goal,
    GoalSet, MetricType, MetricsError, NumberLocale, ProgressBand,
};

use super::dto::{MetricRow, WeekCell, WeekCounters};

/// Build the goal-tracking rows for `metrics` over the given weeks.
///
/// Each week is compared with the weekly share of the monthly goal; the total
/// is derived from the summed counters of all weeks and compared with the
/// monthly goal.
pub fn build_metric_rows(
    metrics: &[MetricType],
    goals: &GoalSet,
    weeks: &[WeekCounters],
    locale: &NumberLocale,
) -> Result<Vec<MetricRow>, MetricsError> {
    if weeks.is_empty() {
        return Err(MetricsError::InvalidWeekCount(0));
    }

    let weekly_derived: Vec<_> = weeks.iter().map(|w| compute_derived(&w.counters)).collect();
    let total_derived = aggregate(weeks.iter().map(|w| &w.counters));

    metrics
        .iter()
        .map(|&metric| -> Result<MetricRow, MetricsError> {
            let def = metric.definition();
            let monthly_goal = goals.monthly_goal(metric);
            let weekly_goal = allocate_weekly(monthly_goal, weeks.len() as i64)?;

            let cells = weeks
                .iter()
                .zip(&weekly_derived)
                .map(|(week, derived)| {
                    let realized = derived.value_of(metric);
                    WeekCell {
                        label: week.window.label.clone(),
                        realized,
                        realized_display: format_value_with(Some(realized), def.unit, locale),
                        achieved: is_achieved(realized, weekly_goal, def.smaller_is_better),
                    }
                })
                .collect();

            let total = total_derived.value_of(metric);
            let percent = percent_of_goal(total, monthly_goal);
            let band = ProgressBand::from_percent(percent, def.smaller_is_better);

            Ok(MetricRow {
                metric_type: metric,
                icon: metric.icon(),
                label: metric.label().to_string(),
                unit: def.unit,
                smaller_is_better: def.smaller_is_better,
                monthly_goal,
                monthly_goal_display: format_value_with(monthly_goal, def.unit, locale),
                weekly_goal,
                weekly_goal_display: format_value_with(weekly_goal, def.unit, locale),
                weeks: cells,
                total,
                total_display: format_value_with(Some(total), def.unit, locale),
                total_achieved: is_achieved(total, monthly_goal, def.smaller_is_better),
                percent_of_goal: percent,
                status: band.status(),
                band,
                caption: band.caption().to_string(),
            })
        })
        .collect()
}
