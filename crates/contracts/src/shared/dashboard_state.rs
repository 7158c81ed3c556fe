//! Dashboard filter state (date range, preset, funnel).
//!
//! The state is a plain value owned by the caller. Syncing it to the URL or to
//! local storage goes through the pure conversion functions below; when to
//! call them is the caller's decision.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::shared::metrics::weeks::{first_day_of_month, last_day_of_month};
use crate::shared::metrics::MetricsError;

/// Storage key under which the state is persisted.
pub const STATE_STORAGE_KEY: &str = "dashboard-state";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePreset {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    Custom,
}

impl DatePreset {
    pub fn display_name(&self) -> &'static str {
        match self {
            DatePreset::Today => "Hoje",
            DatePreset::Yesterday => "Ontem",
            DatePreset::Last7Days => "Últimos 7 dias",
            DatePreset::Last30Days => "Últimos 30 dias",
            DatePreset::ThisWeek => "Esta semana",
            DatePreset::LastWeek => "Semana passada",
            DatePreset::ThisMonth => "Este mês",
            DatePreset::LastMonth => "Mês passado",
            DatePreset::Custom => "Personalizado",
        }
    }

    pub fn all() -> &'static [DatePreset] {
        &[
            DatePreset::Today,
            DatePreset::Yesterday,
            DatePreset::Last7Days,
            DatePreset::Last30Days,
            DatePreset::ThisWeek,
            DatePreset::LastWeek,
            DatePreset::ThisMonth,
            DatePreset::LastMonth,
            DatePreset::Custom,
        ]
    }

    /// Concrete range for `today`. `Custom` has none. Weeks start on Monday.
    pub fn resolve(&self, today: NaiveDate) -> Option<DateRange> {
        let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        let range = match self {
            DatePreset::Today => DateRange::new_unchecked(today, today),
            DatePreset::Yesterday => {
                let y = today - Duration::days(1);
                DateRange::new_unchecked(y, y)
            }
            DatePreset::Last7Days => DateRange::new_unchecked(today - Duration::days(6), today),
            DatePreset::Last30Days => DateRange::new_unchecked(today - Duration::days(29), today),
            DatePreset::ThisWeek => DateRange::new_unchecked(monday, today),
            DatePreset::LastWeek => DateRange::new_unchecked(
                monday - Duration::days(7),
                monday - Duration::days(1),
            ),
            DatePreset::ThisMonth => DateRange::new_unchecked(today.with_day(1)?, today),
            DatePreset::LastMonth => {
                let (y, m) = if today.month() == 1 {
                    (today.year() - 1, 12)
                } else {
                    (today.year(), today.month() - 1)
                };
                DateRange::new_unchecked(
                    first_day_of_month(y, m).ok()?,
                    last_day_of_month(y, m).ok()?,
                )
            }
            DatePreset::Custom => return None,
        };
        Some(range)
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, MetricsError> {
        if start > end {
            return Err(MetricsError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    fn new_unchecked(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Range of equal length that ends the day before this one starts.
    pub fn previous(&self) -> Self {
        let len = Duration::days(self.days());
        Self {
            start: self.start - len,
            end: self.end - len,
        }
    }
}

/// Filters shared by every panel of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    pub preset: DatePreset,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funnel: Option<String>,
}

impl DashboardState {
    /// Default state: current month, all funnels.
    pub fn new(today: NaiveDate) -> Self {
        let mut state = Self {
            preset: DatePreset::ThisMonth,
            start: today,
            end: today,
            funnel: None,
        };
        state.apply_preset(DatePreset::ThisMonth, today);
        state
    }

    pub fn range(&self) -> DateRange {
        DateRange::new_unchecked(self.start, self.end)
    }

    pub fn apply_preset(&mut self, preset: DatePreset, today: NaiveDate) {
        self.preset = preset;
        if let Some(range) = preset.resolve(today) {
            self.start = range.start;
            self.end = range.end;
        }
    }

    pub fn set_custom_range(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), MetricsError> {
        let range = DateRange::new(start, end)?;
        self.preset = DatePreset::Custom;
        self.start = range.start;
        self.end = range.end;
        Ok(())
    }

    /// Empty or blank names clear the filter.
    pub fn set_funnel(&mut self, funnel: Option<&str>) {
        self.funnel = funnel
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string);
    }

    /// Re-resolve a relative preset against `today`, so a state loaded from
    /// storage on a later day does not keep a stale range.
    pub fn refresh(&mut self, today: NaiveDate) {
        if self.preset != DatePreset::Custom {
            self.apply_preset(self.preset, today);
        }
    }

    fn validated(self) -> Result<Self, MetricsError> {
        DateRange::new(self.start, self.end)?;
        Ok(self)
    }

    // -----------------------------------------------------------------------
    // Boundary conversions
    // -----------------------------------------------------------------------

    pub fn to_query_string(&self) -> Result<String, MetricsError> {
        serde_qs::to_string(self).map_err(|e| MetricsError::State(e.to_string()))
    }

    pub fn from_query_string(query: &str) -> Result<Self, MetricsError> {
        let query = query.trim_start_matches('?');
        serde_qs::from_str::<Self>(query)
            .map_err(|e| MetricsError::State(e.to_string()))?
            .validated()
    }

    pub fn to_storage_json(&self) -> Result<String, MetricsError> {
        serde_json::to_string(self).map_err(|e| MetricsError::State(e.to_string()))
    }

    pub fn from_storage_json(json: &str) -> Result<Self, MetricsError> {
        serde_json::from_str::<Self>(json)
            .map_err(|e| MetricsError::State(e.to_string()))?
            .validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_presets_resolve() {
        // Wednesday
        let today = d(2025, 3, 12);
        let r = |p: DatePreset| p.resolve(today).unwrap();

        assert_eq!(r(DatePreset::Today), DateRange { start: today, end: today });
        assert_eq!(r(DatePreset::Last7Days).start, d(2025, 3, 6));
        assert_eq!(r(DatePreset::Last30Days).days(), 30);
        assert_eq!(r(DatePreset::ThisWeek).start, d(2025, 3, 10));
        assert_eq!(
            r(DatePreset::LastWeek),
            DateRange { start: d(2025, 3, 3), end: d(2025, 3, 9) }
        );
        assert_eq!(r(DatePreset::ThisMonth).start, d(2025, 3, 1));
        assert_eq!(DatePreset::Custom.resolve(today), None);
    }

    #[test]
    fn test_last_month_crosses_year() {
        let r = DatePreset::LastMonth.resolve(d(2025, 1, 15)).unwrap();
        assert_eq!(r, DateRange { start: d(2024, 12, 1), end: d(2024, 12, 31) });
    }

    #[test]
    fn test_previous_range() {
        let r = DateRange::new(d(2025, 3, 1), d(2025, 3, 31)).unwrap();
        let p = r.previous();
        assert_eq!(p.end, d(2025, 2, 28));
        assert_eq!(p.days(), 31);
    }

    #[test]
    fn test_custom_range_rejects_inverted() {
        let mut state = DashboardState::new(d(2025, 3, 12));
        assert!(state.set_custom_range(d(2025, 3, 10), d(2025, 3, 1)).is_err());
        assert_eq!(state.preset, DatePreset::ThisMonth);

        state.set_custom_range(d(2025, 2, 1), d(2025, 2, 10)).unwrap();
        assert_eq!(state.preset, DatePreset::Custom);
        state.refresh(d(2025, 6, 1));
        assert_eq!(state.start, d(2025, 2, 1));
    }

    #[test]
    fn test_refresh_moves_relative_presets() {
        let mut state = DashboardState::new(d(2025, 3, 12));
        state.refresh(d(2025, 4, 2));
        assert_eq!(state.start, d(2025, 4, 1));
        assert_eq!(state.end, d(2025, 4, 2));
    }

    #[test]
    fn test_funnel_filter() {
        let mut state = DashboardState::new(d(2025, 3, 12));
        state.set_funnel(Some("  Inbound "));
        assert_eq!(state.funnel.as_deref(), Some("Inbound"));
        state.set_funnel(Some("   "));
        assert_eq!(state.funnel, None);
    }

    #[test]
    fn test_url_and_storage_sync() {
        let mut state = DashboardState::new(d(2025, 3, 12));
        state.set_funnel(Some("Outbound"));

        let qs = state.to_query_string().unwrap();
        assert!(qs.contains("preset=this_month"));
        assert!(qs.contains("funnel=Outbound"));
        assert_eq!(DashboardState::from_query_string(&format!("?{qs}")).unwrap(), state);

        let json = state.to_storage_json().unwrap();
        assert_eq!(DashboardState::from_storage_json(&json).unwrap(), state);
    }

    #[test]
    fn test_loading_inverted_range_fails() {
        let err = DashboardState::from_query_string("preset=custom&start=2025-03-10&end=2025-03-01")
            .unwrap_err();
        assert!(matches!(err, MetricsError::InvalidRange { .. }));
        assert!(matches!(
            DashboardState::from_storage_json("{not json"),
            Err(MetricsError::State(_))
        ));
    }
}
