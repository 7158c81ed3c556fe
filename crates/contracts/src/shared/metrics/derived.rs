use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use super::catalog::MetricType;

/// Raw counters for one period (a day, a week, or a sum of several).
///
/// Currency amounts are plain decimals (no minor units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPeriodCounters {
    pub leads: f64,
    pub mqls: f64,
    pub agendamentos: f64,
    pub reunioes: f64,
    pub vendas: f64,
    pub investimento: f64,
    pub faturamento: f64,
    pub cash_collect: f64,
}

impl RawPeriodCounters {
    /// Replace negative and non-finite values with 0.
    pub fn sanitized(self) -> Self {
        fn clean(v: f64) -> f64 {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                0.0
            }
        }

        Self {
            leads: clean(self.leads),
            mqls: clean(self.mqls),
            agendamentos: clean(self.agendamentos),
            reunioes: clean(self.reunioes),
            vendas: clean(self.vendas),
            investimento: clean(self.investimento),
            faturamento: clean(self.faturamento),
            cash_collect: clean(self.cash_collect),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Add for RawPeriodCounters {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for RawPeriodCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.leads += rhs.leads;
        self.mqls += rhs.mqls;
        self.agendamentos += rhs.agendamentos;
        self.reunioes += rhs.reunioes;
        self.vendas += rhs.vendas;
        self.investimento += rhs.investimento;
        self.faturamento += rhs.faturamento;
        self.cash_collect += rhs.cash_collect;
    }
}

impl Sum for RawPeriodCounters {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a RawPeriodCounters> for RawPeriodCounters {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Raw counters plus every ratio derived from them.
///
/// `#[non_exhaustive]` keeps other crates from assembling one by hand: the
/// only way in is [`compute_derived`] / [`aggregate`], so ratios always agree
/// with the counters they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[non_exhaustive]
pub struct DerivedMetrics {
    #[serde(flatten)]
    pub raw: RawPeriodCounters,
    pub roas: f64,
    pub ticket_medio: f64,
    pub cpl: f64,
    pub cpmql: f64,
    pub custo_agendamento: f64,
    pub custo_reuniao: f64,
    pub cpa: f64,
    pub taxa_cash_collect: f64,
    pub tx_conversao: f64,
}

impl DerivedMetrics {
    pub fn value_of(&self, metric: MetricType) -> f64 {
        match metric {
            MetricType::Leads => self.raw.leads,
            MetricType::Mqls => self.raw.mqls,
            MetricType::Agendamentos => self.raw.agendamentos,
            MetricType::Reunioes => self.raw.reunioes,
            MetricType::Vendas => self.raw.vendas,
            MetricType::Faturamento => self.raw.faturamento,
            MetricType::Investimento => self.raw.investimento,
            MetricType::CashCollect => self.raw.cash_collect,
            MetricType::Roas => self.roas,
            MetricType::TicketMedio => self.ticket_medio,
            MetricType::TaxaCashCollect => self.taxa_cash_collect,
            MetricType::Cpl => self.cpl,
            MetricType::Cpmql => self.cpmql,
            MetricType::CustoAgendamento => self.custo_agendamento,
            MetricType::CustoReuniao => self.custo_reuniao,
            MetricType::Cpa => self.cpa,
            MetricType::TxConversao => self.tx_conversao,
        }
    }
}

/// `num / den`, or 0 when the denominator is not positive.
fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Compute every derived ratio from one set of raw counters.
pub fn compute_derived(raw: &RawPeriodCounters) -> DerivedMetrics {
    let r = raw;
    DerivedMetrics {
        raw: *raw,
        roas: ratio(r.faturamento, r.investimento),
        ticket_medio: ratio(r.faturamento, r.vendas),
        cpl: ratio(r.investimento, r.leads),
        cpmql: ratio(r.investimento, r.mqls),
        custo_agendamento: ratio(r.investimento, r.agendamentos),
        custo_reuniao: ratio(r.investimento, r.reunioes),
        cpa: ratio(r.investimento, r.vendas),
        taxa_cash_collect: ratio(r.cash_collect, r.faturamento) * 100.0,
        tx_conversao: ratio(r.vendas, r.leads) * 100.0,
    }
}

/// Sum raw counters across periods, then derive the ratios from the sum.
pub fn aggregate<'a, I>(periods: I) -> DerivedMetrics
where
    I: IntoIterator<Item = &'a RawPeriodCounters>,
{
    let total: RawPeriodCounters = periods.into_iter().sum();
    compute_derived(&total)
}
