use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::core::benefits::{BenefitKind, BenefitSelections, BenefitState, CustomBenefit};
use crate::core::catalog::Region;
use crate::core::{EquityGrant, Inputs, MatchContribution, MatchMode, RetirementMatch};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown benefit id '{0}'")]
    UnknownBenefit(String),
    #[error("benefit '{0}' is set through retirementMatch, not as a benefit")]
    NotSelectable(String),
    #[error("benefit '{0}' is listed more than once")]
    DuplicateBenefit(String),
    #[error("custom benefit id '{0}' is used more than once")]
    DuplicateCustomBenefit(String),
    #[error("invalid custom benefit '{0}', expected NAME=AMOUNT")]
    InvalidCustomBenefit(String),
    #[error("unknown region '{0}'")]
    UnknownRegion(String),
    #[error("invalid amount in '{0}'")]
    InvalidAmount(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EquityPayload {
    enabled: Option<bool>,
    shares: Option<f64>,
    strike_price: Option<f64>,
    fair_market_value: Option<f64>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiMatchMode {
    #[serde(alias = "percent")]
    Percentage,
    #[serde(alias = "amount", alias = "fixedAmount", alias = "fixed_amount")]
    FixedAmount,
}

impl From<ApiMatchMode> for MatchMode {
    fn from(value: ApiMatchMode) -> Self {
        match value {
            ApiMatchMode::Percentage => MatchMode::Percentage,
            ApiMatchMode::FixedAmount => MatchMode::FixedAmount,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetirementMatchPayload {
    enabled: Option<bool>,
    mode: Option<ApiMatchMode>,
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitPayload {
    id: String,
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default)]
    amount: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomBenefitPayload {
    id: Option<String>,
    name: Option<String>,
    amount: Option<f64>,
}

/// Request body for `POST /api/estimate`. Every field is optional; missing
/// or non-finite numbers become 0 and missing blocks stay disabled.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EstimatePayload {
    cash_salary: Option<f64>,
    equity: Option<EquityPayload>,
    retirement_match: Option<RetirementMatchPayload>,
    benefits: Vec<BenefitPayload>,
    custom_benefits: Vec<CustomBenefitPayload>,
    occupation_id: Option<String>,
    custom_job_title: Option<String>,
    metro_id: Option<String>,
    region_id: Option<String>,
}

/// Query string for `GET /api/benchmark`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BenchmarkQuery {
    pub occupation_id: Option<String>,
    pub metro_id: Option<String>,
    pub region_id: Option<String>,
    pub cash_salary: Option<f64>,
}

/// Missing and non-finite numbers both read as 0.
pub fn sanitize(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn parse_region(id: Option<String>) -> Result<Region, InputError> {
    match non_empty(id) {
        None => Ok(Region::National),
        Some(id) => Region::from_id(&id).ok_or(InputError::UnknownRegion(id)),
    }
}

pub fn parse_benefit_kind(id: &str) -> Result<BenefitKind, InputError> {
    let kind = BenefitKind::from_id(id).ok_or_else(|| InputError::UnknownBenefit(id.to_string()))?;
    if !kind.is_selectable() {
        return Err(InputError::NotSelectable(id.to_string()));
    }
    Ok(kind)
}

/// Applies one benefit selection on top of the default (opted-out) state.
pub fn apply_benefit(
    selections: &mut BenefitSelections,
    seen: &mut HashSet<BenefitKind>,
    id: &str,
    enabled: bool,
    amount: Option<f64>,
) -> Result<(), InputError> {
    let kind = parse_benefit_kind(id)?;
    if !seen.insert(kind) {
        return Err(InputError::DuplicateBenefit(id.to_string()));
    }
    let amount = match amount {
        Some(v) => sanitize(Some(v)),
        None => kind.info().default_amount,
    };
    selections.insert(kind, BenefitState { enabled, amount });
    Ok(())
}

fn build_equity(payload: Option<EquityPayload>) -> EquityGrant {
    let Some(payload) = payload else {
        return EquityGrant::default();
    };
    EquityGrant {
        enabled: payload.enabled.unwrap_or(true),
        shares: sanitize(payload.shares),
        strike_price: sanitize(payload.strike_price),
        fair_market_value: sanitize(payload.fair_market_value),
    }
}

fn build_retirement_match(payload: Option<RetirementMatchPayload>) -> RetirementMatch {
    let Some(payload) = payload else {
        return RetirementMatch::default();
    };
    let value = sanitize(payload.value);
    let contribution = match payload.mode.map(MatchMode::from) {
        Some(MatchMode::FixedAmount) => MatchContribution::FixedAmount(value),
        Some(MatchMode::Percentage) | None => MatchContribution::Percentage(value),
    };
    RetirementMatch {
        enabled: payload.enabled.unwrap_or(true),
        contribution,
    }
}

pub fn build_inputs(payload: EstimatePayload) -> Result<Inputs, InputError> {
    let mut benefits = BenefitSelections::default();
    let mut seen = HashSet::new();
    for benefit in &payload.benefits {
        apply_benefit(
            &mut benefits,
            &mut seen,
            &benefit.id,
            benefit.enabled.unwrap_or(true),
            benefit.amount,
        )?;
    }

    let mut custom_ids = HashSet::new();
    let mut custom_benefits = Vec::with_capacity(payload.custom_benefits.len());
    for custom in payload.custom_benefits {
        let mut benefit =
            CustomBenefit::new(custom.name.unwrap_or_default(), sanitize(custom.amount));
        if let Some(id) = non_empty(custom.id) {
            benefit.id = id;
        }
        if !custom_ids.insert(benefit.id.clone()) {
            return Err(InputError::DuplicateCustomBenefit(benefit.id));
        }
        custom_benefits.push(benefit);
    }

    Ok(Inputs {
        cash_salary: sanitize(payload.cash_salary),
        equity: build_equity(payload.equity),
        retirement_match: build_retirement_match(payload.retirement_match),
        benefits,
        custom_benefits,
        occupation_id: non_empty(payload.occupation_id),
        custom_job_title: non_empty(payload.custom_job_title),
        metro_id: non_empty(payload.metro_id),
        region: parse_region(payload.region_id)?,
    })
}

pub fn benchmark_inputs(query: BenchmarkQuery) -> Result<Inputs, InputError> {
    Ok(Inputs {
        cash_salary: sanitize(query.cash_salary),
        occupation_id: non_empty(query.occupation_id),
        metro_id: non_empty(query.metro_id),
        region: parse_region(query.region_id)?,
        ..Inputs::default()
    })
}
