use contracts::shared::indicators::*;
use contracts::shared::metrics::MetricType;

fn description(metric: MetricType) -> Option<String> {
    let text = match metric {
        MetricType::Roas => "Faturamento / Investimento",
        MetricType::Cpl => "Investimento / Leads",
        MetricType::Cpmql => "Investimento / MQLs",
        MetricType::Cpa => "Investimento / Vendas",
        MetricType::CustoAgendamento => "Investimento / Agendamentos",
        MetricType::CustoReuniao => "Investimento / Reuniões",
        MetricType::TxConversao => "Vendas / Leads (%)",
        MetricType::TaxaCashCollect => "Cash collect / Faturamento (%)",
        MetricType::TicketMedio => "Faturamento / Vendas",
        _ => return None,
    };
    Some(text.into())
}

fn set(id: &str, label: &str, metrics: &[MetricType], columns: u8) -> IndicatorSetMeta {
    IndicatorSetMeta {
        id: IndicatorSetId::new(id),
        label: label.into(),
        indicators: metrics.iter().map(|&m| m.into()).collect(),
        columns,
    }
}

/// Build the full catalogue of indicators + sets.
pub fn build_catalog() -> IndicatorCatalogResponse {
    let indicators = MetricType::all()
        .iter()
        .map(|&metric| {
            let def = metric.definition();
            IndicatorMeta {
                id: metric.into(),
                label: metric.label().into(),
                icon: metric.icon(),
                unit: def.unit,
                smaller_is_better: def.smaller_is_better,
                description: description(metric),
            }
        })
        .collect();

    let sets = vec![
        set(
            "funnel_overview",
            "Visão do funil",
            &[
                MetricType::Leads,
                MetricType::Mqls,
                MetricType::Reunioes,
                MetricType::Vendas,
            ],
            4,
        ),
        set(
            "cost_overview",
            "Custos e retorno",
            &[
                MetricType::Investimento,
                MetricType::Cpl,
                MetricType::Cpa,
                MetricType::Roas,
            ],
            4,
        ),
    ];

    IndicatorCatalogResponse { indicators, sets }
}
