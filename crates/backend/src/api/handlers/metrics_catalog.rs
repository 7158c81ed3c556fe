use axum::Json;
use contracts::shared::metrics::catalog::catalog;
use contracts::shared::metrics::{MetricIcon, MetricType, Unit};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MetricCatalogEntry {
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub label: &'static str,
    pub icon: MetricIcon,
    pub unit: Unit,
    pub smaller_is_better: bool,
    /// Stored counter (`true`) or ratio derived from counters.
    pub raw: bool,
}

/// GET /api/metrics/catalog
pub async fn list() -> Json<Vec<MetricCatalogEntry>> {
    Json(entries())
}

fn entries() -> Vec<MetricCatalogEntry> {
    catalog()
        .into_iter()
        .map(|def| MetricCatalogEntry {
            metric_type: def.metric_type,
            label: def.metric_type.label(),
            icon: def.metric_type.icon(),
            unit: def.unit,
            smaller_is_better: def.smaller_is_better,
            raw: def.metric_type.is_raw(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_follow_table_order() {
        let entries = entries();
        assert_eq!(entries.len(), MetricType::all().len());
        assert_eq!(entries[0].metric_type, MetricType::all()[0]);

        let json = serde_json::to_value(&entries[0]).unwrap();
        assert!(json.get("type").is_some());
    }
}
