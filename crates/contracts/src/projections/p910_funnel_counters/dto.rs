use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::metrics::RawPeriodCounters;

/// Raw funnel counters of one funnel on one day (projection p910).
///
/// Counters are flattened on the wire; missing ones default to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelDayDto {
    pub date: NaiveDate,
    pub funnel: String,
    #[serde(flatten)]
    pub counters: RawPeriodCounters,
}
