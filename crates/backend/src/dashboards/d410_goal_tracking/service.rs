use anyhow::Result;
use contracts::dashboards::d410_goal_tracking::{
    build_metric_rows, GoalTrackingRequest, GoalTrackingResponse, WeekCounters,
};
use contracts::shared::metrics::{
    check_coverage, default_weeks, GoalPeriod, GoalSet, MetricType, MetricsError, NumberLocale,
};

use crate::domain::a025_metric_goal::GoalStore;
use crate::projections::p910_funnel_counters::MetricsSource;

/// Build the weekly goal-tracking table for one month.
///
/// Custom week windows are used as given; gaps and overlaps are reported in
/// `coverage_issues` and logged, not rejected.
pub async fn get_goal_tracking<G, M>(
    goals: &G,
    source: &M,
    request: GoalTrackingRequest,
    locale: &NumberLocale,
) -> Result<GoalTrackingResponse>
where
    G: GoalStore + ?Sized,
    M: MetricsSource + ?Sized,
{
    let period = GoalPeriod::new(request.month, request.year)?;
    let funnel = request
        .funnel
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string);

    let weeks = match request.weeks {
        Some(weeks) if weeks.is_empty() => return Err(MetricsError::InvalidWeekCount(0).into()),
        Some(weeks) => weeks,
        None => default_weeks(period.year, period.month)?,
    };

    let coverage_issues = check_coverage(&weeks, period.year, period.month)?;
    if !coverage_issues.is_empty() {
        tracing::warn!(
            "D410: week windows for {} do not tile the month: {:?}",
            period.key(),
            coverage_issues
        );
    }

    let records = goals.list_goals(period.month, period.year).await?;
    let goal_set = GoalSet::for_period(period, &records);

    let mut week_counters = Vec::with_capacity(weeks.len());
    for window in &weeks {
        let counters = source
            .raw_counters(window.start, window.end, funnel.as_deref())
            .await?;
        week_counters.push(WeekCounters {
            window: window.clone(),
            counters,
        });
    }

    let metrics = request
        .metrics
        .unwrap_or_else(|| MetricType::all().to_vec());
    let rows = build_metric_rows(&metrics, &goal_set, &week_counters, locale)?;

    tracing::debug!(
        "D410: {} rows, {} goals, {} weeks for {}",
        rows.len(),
        goal_set.len(),
        weeks.len(),
        period.key()
    );

    Ok(GoalTrackingResponse {
        period: period.key(),
        funnel,
        weeks,
        rows,
        coverage_issues,
    })
}
