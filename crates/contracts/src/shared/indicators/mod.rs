use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::metrics::{MetricIcon, MetricType, Unit};

// ---------------------------------------------------------------------------
// Indicator identity & display metadata
// ---------------------------------------------------------------------------

/// Indicator identifier as sent by clients. Known ids are metric keys
/// (`"roas"`, `"cpl"`, ...); anything else is skipped by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorId(pub String);

impl IndicatorId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn metric(&self) -> Option<MetricType> {
        self.0.parse().ok()
    }
}

impl From<MetricType> for IndicatorId {
    fn from(m: MetricType) -> Self {
        Self(m.as_str().to_string())
    }
}

/// Visual status of a KPI card (drives colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorStatus {
    Good,
    Bad,
    Neutral,
}

/// Static metadata describing one KPI card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorMeta {
    pub id: IndicatorId,
    pub label: String,
    pub icon: MetricIcon,
    pub unit: Unit,
    pub smaller_is_better: bool,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Indicator sets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorSetId(pub String);

impl IndicatorSetId {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A group of cards rendered together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSetMeta {
    pub id: IndicatorSetId,
    pub label: String,
    pub indicators: Vec<IndicatorId>,
    /// Number of columns in the card grid (2, 3, 4).
    pub columns: u8,
}

// ---------------------------------------------------------------------------
// Computed values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorValue {
    pub id: IndicatorId,
    /// `None` when data is unavailable.
    pub value: Option<f64>,
    pub display: String,
    /// Value for the previous period of equal length.
    pub previous_value: Option<f64>,
    /// Change relative to previous period, in percent.
    pub change_percent: Option<f64>,
    pub status: IndicatorStatus,
    pub subtitle: Option<String>,
}

// ---------------------------------------------------------------------------
// API request / response
// ---------------------------------------------------------------------------

/// Scope of a computation: inclusive date range plus funnel filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorContext {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    /// `None` means all funnels.
    #[serde(default)]
    pub funnel: Option<String>,
}

/// Batch request: compute several indicators in one round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeIndicatorsRequest {
    pub indicator_ids: Vec<IndicatorId>,
    pub context: IndicatorContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeIndicatorsResponse {
    pub values: Vec<IndicatorValue>,
}

/// Full catalogue returned by the metadata endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorCatalogResponse {
    pub indicators: Vec<IndicatorMeta>,
    pub sets: Vec<IndicatorSetMeta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_id_maps_to_metric() {
        assert_eq!(IndicatorId::new("cpmql").metric(), Some(MetricType::Cpmql));
        assert_eq!(IndicatorId::new("sales_revenue").metric(), None);
        assert_eq!(IndicatorId::from(MetricType::Roas).0, "roas");
    }

    #[test]
    fn test_context_accepts_missing_funnel() {
        let ctx: IndicatorContext =
            serde_json::from_str(r#"{"date_from":"2025-03-01","date_to":"2025-03-31"}"#).unwrap();
        assert_eq!(ctx.funnel, None);
    }
}
