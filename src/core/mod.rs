pub mod benefits;
pub mod catalog;
mod engine;
pub mod limits;
mod types;

pub use engine::{
    check_hsa_fsa_limit, check_retirement_limit, compute_benchmark, compute_benefits_total,
    compute_composition_shares, compute_cost_of_living_equivalent, compute_equity_value,
    compute_estimate, compute_market_comparison, compute_retirement_match,
    compute_total_compensation, display_job_title, limit_warnings,
};
pub use types::{
    Benchmark, BenchmarkBasis, Breakdown, CompositionShares, CostOfLiving, EquityGrant, Estimate,
    Inputs, LimitFlags, MarketComparison, MatchContribution, MatchMode, RetirementMatch,
};
