use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::MetricsError;

// ---------------------------------------------------------------------------
// Metric identity
// ---------------------------------------------------------------------------

/// Every metric the goals dashboard knows about.
///
/// The first eight variants are raw period counters; the rest are ratios
/// derived from them (see [`super::derived::compute_derived`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Leads,
    Mqls,
    Agendamentos,
    Reunioes,
    Vendas,
    Faturamento,
    Investimento,
    CashCollect,
    Roas,
    TicketMedio,
    TaxaCashCollect,
    Cpl,
    Cpmql,
    CustoAgendamento,
    CustoReuniao,
    Cpa,
    TxConversao,
}

impl MetricType {
    /// All metrics in the order the goals table renders them.
    pub fn all() -> &'static [MetricType] {
        &[
            MetricType::Investimento,
            MetricType::Faturamento,
            MetricType::Roas,
            MetricType::CashCollect,
            MetricType::TaxaCashCollect,
            MetricType::Leads,
            MetricType::Cpl,
            MetricType::Mqls,
            MetricType::Cpmql,
            MetricType::Agendamentos,
            MetricType::CustoAgendamento,
            MetricType::Reunioes,
            MetricType::CustoReuniao,
            MetricType::Vendas,
            MetricType::Cpa,
            MetricType::TicketMedio,
            MetricType::TxConversao,
        ]
    }

    /// Stable key used in storage and in the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Leads => "leads",
            MetricType::Mqls => "mqls",
            MetricType::Agendamentos => "agendamentos",
            MetricType::Reunioes => "reunioes",
            MetricType::Vendas => "vendas",
            MetricType::Faturamento => "faturamento",
            MetricType::Investimento => "investimento",
            MetricType::CashCollect => "cash_collect",
            MetricType::Roas => "roas",
            MetricType::TicketMedio => "ticket_medio",
            MetricType::TaxaCashCollect => "taxa_cash_collect",
            MetricType::Cpl => "cpl",
            MetricType::Cpmql => "cpmql",
            MetricType::CustoAgendamento => "custo_agendamento",
            MetricType::CustoReuniao => "custo_reuniao",
            MetricType::Cpa => "cpa",
            MetricType::TxConversao => "tx_conversao",
        }
    }

    /// Display label for tables and cards.
    pub fn label(&self) -> &'static str {
        match self {
            MetricType::Leads => "Leads",
            MetricType::Mqls => "MQLs",
            MetricType::Agendamentos => "Agendamentos",
            MetricType::Reunioes => "Reuniões",
            MetricType::Vendas => "Vendas",
            MetricType::Faturamento => "Faturamento",
            MetricType::Investimento => "Investimento",
            MetricType::CashCollect => "Cash Collect",
            MetricType::Roas => "ROAS",
            MetricType::TicketMedio => "Ticket Médio",
            MetricType::TaxaCashCollect => "Taxa de Cash Collect",
            MetricType::Cpl => "CPL",
            MetricType::Cpmql => "CPMQL",
            MetricType::CustoAgendamento => "Custo por Agendamento",
            MetricType::CustoReuniao => "Custo por Reunião",
            MetricType::Cpa => "CPA",
            MetricType::TxConversao => "Taxa de Conversão",
        }
    }

    pub fn icon(&self) -> MetricIcon {
        match self {
            MetricType::Leads => MetricIcon::Users,
            MetricType::Mqls => MetricIcon::UserCheck,
            MetricType::Agendamentos => MetricIcon::Calendar,
            MetricType::Reunioes => MetricIcon::Handshake,
            MetricType::Vendas => MetricIcon::ShoppingCart,
            MetricType::Faturamento => MetricIcon::DollarSign,
            MetricType::Investimento => MetricIcon::Wallet,
            MetricType::CashCollect => MetricIcon::Banknote,
            MetricType::Roas => MetricIcon::TrendingUp,
            MetricType::TicketMedio => MetricIcon::Receipt,
            MetricType::TaxaCashCollect | MetricType::TxConversao => MetricIcon::Percent,
            MetricType::Cpl
            | MetricType::Cpmql
            | MetricType::CustoAgendamento
            | MetricType::CustoReuniao
            | MetricType::Cpa => MetricIcon::Coins,
        }
    }

    /// `true` for counters read from the metrics source, `false` for ratios.
    pub fn is_raw(&self) -> bool {
        matches!(
            self,
            MetricType::Leads
                | MetricType::Mqls
                | MetricType::Agendamentos
                | MetricType::Reunioes
                | MetricType::Vendas
                | MetricType::Faturamento
                | MetricType::Investimento
                | MetricType::CashCollect
        )
    }

    pub fn definition(&self) -> MetricDefinition {
        definition_of(*self)
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricType {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricType::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| MetricsError::UnknownMetric(s.to_string()))
    }
}

/// Icon key for a metric. Closed set, so the UI never receives a key it
/// cannot render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricIcon {
    Users,
    UserCheck,
    Calendar,
    Handshake,
    ShoppingCart,
    DollarSign,
    Wallet,
    Banknote,
    TrendingUp,
    Receipt,
    Percent,
    Coins,
}

impl MetricIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricIcon::Users => "users",
            MetricIcon::UserCheck => "user-check",
            MetricIcon::Calendar => "calendar",
            MetricIcon::Handshake => "handshake",
            MetricIcon::ShoppingCart => "shopping-cart",
            MetricIcon::DollarSign => "dollar-sign",
            MetricIcon::Wallet => "wallet",
            MetricIcon::Banknote => "banknote",
            MetricIcon::TrendingUp => "trending-up",
            MetricIcon::Receipt => "receipt",
            MetricIcon::Percent => "percent",
            MetricIcon::Coins => "coins",
        }
    }
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// Display unit of a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Currency,
    Number,
    Multiplier,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub metric_type: MetricType,
    pub unit: Unit,
    /// Cost metrics: coming in under the goal is the good outcome.
    pub smaller_is_better: bool,
}

/// Catalog lookup for a typed metric. The match is exhaustive, so a new
/// variant without a definition does not compile.
pub fn definition_of(metric_type: MetricType) -> MetricDefinition {
    use MetricType::*;

    let (unit, smaller_is_better) = match metric_type {
        Faturamento | Investimento | CashCollect | TicketMedio => (Unit::Currency, false),
        Cpl | Cpa | CustoAgendamento | CustoReuniao | Cpmql => (Unit::Currency, true),
        Leads | Mqls | Agendamentos | Reunioes | Vendas => (Unit::Number, false),
        Roas => (Unit::Multiplier, false),
        TxConversao | TaxaCashCollect => (Unit::Percentage, false),
    };

    MetricDefinition {
        metric_type,
        unit,
        smaller_is_better,
    }
}

/// Catalog lookup by string key, for data arriving from storage or HTTP.
pub fn definition_of_key(key: &str) -> Result<MetricDefinition, MetricsError> {
    key.parse::<MetricType>().map(definition_of)
}

/// The whole catalog in table order.
pub fn catalog() -> Vec<MetricDefinition> {
    MetricType::all().iter().copied().map(definition_of).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_metric_has_one_definition() {
        let all = MetricType::all();
        assert_eq!(all.len(), 17);
        for m in all {
            assert_eq!(definition_of(*m).metric_type, *m);
        }
        let mut keys: Vec<&str> = all.iter().map(|m| m.as_str()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 17);
    }

    #[test]
    fn test_catalog_contents() {
        let cpl = definition_of(MetricType::Cpl);
        assert_eq!(cpl.unit, Unit::Currency);
        assert!(cpl.smaller_is_better);

        let fat = definition_of(MetricType::Faturamento);
        assert_eq!(fat.unit, Unit::Currency);
        assert!(!fat.smaller_is_better);

        assert_eq!(definition_of(MetricType::Roas).unit, Unit::Multiplier);
        assert_eq!(definition_of(MetricType::Vendas).unit, Unit::Number);
        assert_eq!(definition_of(MetricType::TxConversao).unit, Unit::Percentage);
        assert_eq!(
            definition_of(MetricType::TaxaCashCollect).unit,
            Unit::Percentage
        );
        assert!(definition_of(MetricType::CustoReuniao).smaller_is_better);
    }

    #[test]
    fn test_key_lookup() {
        assert_eq!(
            definition_of_key("custo_agendamento").unwrap().metric_type,
            MetricType::CustoAgendamento
        );
        assert_eq!(
            definition_of_key("sqls"),
            Err(MetricsError::UnknownMetric("sqls".into()))
        );
    }

    #[test]
    fn test_serde_uses_storage_keys() {
        let json = serde_json::to_string(&MetricType::TicketMedio).unwrap();
        assert_eq!(json, "\"ticket_medio\"");
        let back: MetricType = serde_json::from_str("\"cash_collect\"").unwrap();
        assert_eq!(back, MetricType::CashCollect);
        assert!(serde_json::from_str::<MetricType>("\"nope\"").is_err());
    }

    #[test]
    fn test_raw_split() {
        let raw = MetricType::all().iter().filter(|m| m.is_raw()).count();
        assert_eq!(raw, 8);
        assert!(!MetricType::Roas.is_raw());
    }
}
