use serde::{Deserialize, Serialize};

use super::benefits::{BenefitSelections, CustomBenefit};
use super::catalog::Region;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EquityGrant {
    pub enabled: bool,
    pub shares: f64,
    pub strike_price: f64,
    pub fair_market_value: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    Percentage,
    FixedAmount,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MatchContribution {
    Percentage(f64),
    FixedAmount(f64),
}

impl MatchContribution {
    pub fn empty(mode: MatchMode) -> Self {
        match mode {
            MatchMode::Percentage => MatchContribution::Percentage(0.0),
            MatchMode::FixedAmount => MatchContribution::FixedAmount(0.0),
        }
    }

    pub fn mode(self) -> MatchMode {
        match self {
            MatchContribution::Percentage(_) => MatchMode::Percentage,
            MatchContribution::FixedAmount(_) => MatchMode::FixedAmount,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            MatchContribution::Percentage(v) | MatchContribution::FixedAmount(v) => v,
        }
    }
}

impl Default for MatchContribution {
    fn default() -> Self {
        MatchContribution::empty(MatchMode::Percentage)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RetirementMatch {
    pub enabled: bool,
    pub contribution: MatchContribution,
}

impl RetirementMatch {
    pub fn percentage(percent: f64) -> Self {
        Self {
            enabled: true,
            contribution: MatchContribution::Percentage(percent),
        }
    }

    pub fn fixed_amount(amount: f64) -> Self {
        Self {
            enabled: true,
            contribution: MatchContribution::FixedAmount(amount),
        }
    }

    /// Changing the mode discards the old value so it is never reread under
    /// the other interpretation.
    pub fn switch_mode(&mut self, mode: MatchMode) {
        if self.contribution.mode() != mode {
            self.contribution = MatchContribution::empty(mode);
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Inputs {
    pub cash_salary: f64,
    pub equity: EquityGrant,
    pub retirement_match: RetirementMatch,
    pub benefits: BenefitSelections,
    pub custom_benefits: Vec<CustomBenefit>,
    pub occupation_id: Option<String>,
    pub custom_job_title: Option<String>,
    pub metro_id: Option<String>,
    pub region: Region,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub cash: f64,
    pub equity_value: f64,
    pub retirement_match: f64,
    pub benefits_total: f64,
    pub total_benefits: f64,
    pub total_compensation: f64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionShares {
    pub cash_pct: f64,
    pub equity_pct: f64,
    pub benefits_pct: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketComparison {
    pub market_salary: f64,
    pub difference: f64,
    pub percent_difference: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkBasis {
    Metro,
    Region,
    National,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOfLiving {
    pub metro_name: String,
    pub index: f64,
    pub delta_vs_national: f64,
    pub equivalent_salary: f64,
    pub source_name: String,
    pub source_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub occupation_id: String,
    pub job_title: String,
    pub custom_role: bool,
    pub basis: BenchmarkBasis,
    pub metro_name: Option<String>,
    #[serde(flatten)]
    pub comparison: MarketComparison,
    pub above_market: bool,
    pub cost_of_living: Option<CostOfLiving>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitFlags {
    pub retirement_exceeded: bool,
    pub hsa_fsa_exceeded: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub breakdown: Breakdown,
    pub composition: CompositionShares,
    pub limits_year: u32,
    pub limits: LimitFlags,
    pub warnings: Vec<String>,
    pub benchmark: Option<Benchmark>,
}
