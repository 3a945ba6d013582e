use super::benefits::{BenefitKind, BenefitSelections, CustomBenefit};
use super::catalog::{self, MetroArea, Occupation, Region};
use super::limits::{CURRENT_LIMITS, RegulatoryLimits};
use super::types::{
    Benchmark, BenchmarkBasis, Breakdown, CompositionShares, CostOfLiving, EquityGrant, Estimate,
    Inputs, LimitFlags, MarketComparison, MatchContribution, RetirementMatch,
};

const PERCENT: f64 = 100.0;

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

pub fn compute_equity_value(grant: &EquityGrant) -> f64 {
    if !grant.enabled {
        return 0.0;
    }
    let shares = finite_or_zero(grant.shares);
    let strike = finite_or_zero(grant.strike_price);
    let fmv = finite_or_zero(grant.fair_market_value);
    // Underwater grants stay negative.
    finite_or_zero(shares * (fmv - strike))
}

pub fn compute_retirement_match(config: &RetirementMatch, cash_salary: f64) -> f64 {
    if !config.enabled {
        return 0.0;
    }
    let value = match config.contribution {
        MatchContribution::Percentage(percent) => {
            finite_or_zero(cash_salary) * (finite_or_zero(percent) / PERCENT)
        }
        MatchContribution::FixedAmount(amount) => finite_or_zero(amount),
    };
    finite_or_zero(value)
}

pub fn check_retirement_limit(match_amount: f64) -> bool {
    CURRENT_LIMITS.retirement_exceeded(finite_or_zero(match_amount))
}

pub fn check_hsa_fsa_limit(hsa_amount: f64) -> bool {
    CURRENT_LIMITS.hsa_fsa_exceeded(finite_or_zero(hsa_amount))
}

pub fn compute_benefits_total(selections: &BenefitSelections, custom: &[CustomBenefit]) -> f64 {
    let catalog_total: f64 = selections
        .iter()
        .filter(|(kind, state)| kind.is_selectable() && state.enabled)
        .map(|(_, state)| finite_or_zero(state.amount))
        .sum();
    let custom_total: f64 = custom
        .iter()
        .map(|benefit| finite_or_zero(benefit.amount))
        .sum();
    finite_or_zero(catalog_total + custom_total)
}

/// `benefits_total` never carries a retirement entry, so the match is added
/// here exactly once. A sum that overflows `f64` reports 0, like any other
/// non-finite result, and composition shares then fall back to all zeros.
pub fn compute_total_compensation(
    cash: f64,
    equity_value: f64,
    retirement_match: f64,
    benefits_total: f64,
) -> f64 {
    finite_or_zero(
        finite_or_zero(cash)
            + finite_or_zero(equity_value)
            + finite_or_zero(retirement_match)
            + finite_or_zero(benefits_total),
    )
}

pub fn compute_market_comparison(cash: f64, market_salary: f64) -> MarketComparison {
    let cash = finite_or_zero(cash);
    let market_salary = finite_or_zero(market_salary);
    let difference = cash - market_salary;
    let percent_difference = if market_salary > 0.0 {
        finite_or_zero(difference / market_salary * PERCENT)
    } else {
        0.0
    };
    MarketComparison {
        market_salary,
        difference: finite_or_zero(difference),
        percent_difference,
    }
}

pub fn compute_cost_of_living_equivalent(cash: f64, cost_of_living_index: f64) -> f64 {
    let index = finite_or_zero(cost_of_living_index);
    if index <= 0.0 {
        return 0.0;
    }
    finite_or_zero(finite_or_zero(cash) / (index / PERCENT))
}

pub fn compute_composition_shares(
    cash: f64,
    equity_value: f64,
    benefits_total: f64,
    total: f64,
) -> CompositionShares {
    let total = finite_or_zero(total);
    if total == 0.0 {
        return CompositionShares::default();
    }
    let share = |part: f64| finite_or_zero(finite_or_zero(part) / total * PERCENT);
    CompositionShares {
        cash_pct: share(cash),
        equity_pct: share(equity_value),
        benefits_pct: share(benefits_total),
    }
}

pub fn display_job_title(occupation: &Occupation, custom_title: Option<&str>) -> String {
    match custom_title.map(str::trim) {
        Some(title) if occupation.is_custom_role() && !title.is_empty() => title.to_string(),
        _ => occupation.title.to_string(),
    }
}

pub fn limit_warnings(
    limits: &RegulatoryLimits,
    flags: LimitFlags,
    retirement_match: f64,
    hsa_amount: f64,
) -> Vec<String> {
    let mut warnings = Vec::new();
    if flags.retirement_exceeded {
        warnings.push(format!(
            "This 401(k) contribution ({}) exceeds the IRS annual limit of {} for combined employee and employer contributions ({}).",
            whole_dollars(retirement_match),
            whole_dollars(limits.retirement_combined),
            limits.year
        ));
    }
    if flags.hsa_fsa_exceeded {
        warnings.push(format!(
            "This HSA/FSA contribution ({}) exceeds the IRS annual HSA family limit of {} (individual: {}) or FSA limit of {} ({}).",
            whole_dollars(hsa_amount),
            whole_dollars(limits.hsa_family),
            whole_dollars(limits.hsa_individual),
            whole_dollars(limits.fsa),
            limits.year
        ));
    }
    warnings
}

pub fn compute_estimate(inputs: &Inputs) -> Estimate {
    let cash = finite_or_zero(inputs.cash_salary);
    let equity_value = compute_equity_value(&inputs.equity);
    let retirement_match = compute_retirement_match(&inputs.retirement_match, cash);
    let benefits_total = compute_benefits_total(&inputs.benefits, &inputs.custom_benefits);
    let total_compensation =
        compute_total_compensation(cash, equity_value, retirement_match, benefits_total);
    let total_benefits = finite_or_zero(benefits_total + retirement_match);

    let hsa_amount = finite_or_zero(inputs.benefits.enabled_amount(BenefitKind::Hsa));
    let limits = LimitFlags {
        retirement_exceeded: check_retirement_limit(retirement_match),
        hsa_fsa_exceeded: check_hsa_fsa_limit(hsa_amount),
    };

    Estimate {
        breakdown: Breakdown {
            cash,
            equity_value,
            retirement_match,
            benefits_total,
            total_benefits,
            total_compensation,
        },
        composition: compute_composition_shares(
            cash,
            equity_value,
            total_benefits,
            total_compensation,
        ),
        limits_year: CURRENT_LIMITS.year,
        limits,
        warnings: limit_warnings(&CURRENT_LIMITS, limits, retirement_match, hsa_amount),
        benchmark: compute_benchmark(inputs, cash),
    }
}

pub fn compute_benchmark(inputs: &Inputs, cash: f64) -> Option<Benchmark> {
    let occupation = catalog::find_occupation(inputs.occupation_id.as_deref()?)?;
    let metro_id = inputs.metro_id.as_deref();
    let metro = metro_id.and_then(catalog::find_metro_area);

    let market_salary = catalog::resolve_market_salary(occupation, metro_id, Some(inputs.region));
    let comparison = compute_market_comparison(cash, market_salary);
    let basis = match (metro, inputs.region) {
        (Some(_), _) => BenchmarkBasis::Metro,
        (None, Region::National) => BenchmarkBasis::National,
        (None, _) => BenchmarkBasis::Region,
    };

    Some(Benchmark {
        occupation_id: occupation.id.to_string(),
        job_title: display_job_title(occupation, inputs.custom_job_title.as_deref()),
        custom_role: occupation.is_custom_role(),
        basis,
        metro_name: metro.map(|m| m.name.to_string()),
        above_market: comparison.difference >= 0.0,
        comparison,
        cost_of_living: metro.and_then(|m| cost_of_living_adjustment(m, cash)),
    })
}

fn cost_of_living_adjustment(metro: &MetroArea, cash: f64) -> Option<CostOfLiving> {
    if metro.cost_of_living_delta() == 0.0 {
        return None;
    }
    Some(CostOfLiving {
        metro_name: metro.name.to_string(),
        index: metro.cost_of_living_index,
        delta_vs_national: metro.cost_of_living_delta(),
        equivalent_salary: compute_cost_of_living_equivalent(cash, metro.cost_of_living_index),
        source_name: metro.cost_of_living_source.name.to_string(),
        source_url: metro.cost_of_living_source.url.to_string(),
    })
}

fn whole_dollars(amount: f64) -> String {
    let rounded = finite_or_zero(amount).round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::benefits::BenefitState;
    use crate::core::types::MatchMode;
    use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn grant(shares: f64, strike: f64, fmv: f64) -> EquityGrant {
        EquityGrant {
            enabled: true,
            shares,
            strike_price: strike,
            fair_market_value: fmv,
        }
    }

    fn sample_inputs() -> Inputs {
        let mut benefits = BenefitSelections::default();
        benefits.set_enabled(BenefitKind::Health, true);
        Inputs {
            cash_salary: 150_000.0,
            benefits,
            ..Inputs::default()
        }
    }

    #[test]
    fn equity_value_is_linear_and_unfloored() {
        assert_approx(compute_equity_value(&grant(1_000.0, 2.0, 5.0)), 3_000.0);
        assert_approx(compute_equity_value(&grant(1_000.0, 5.0, 2.0)), -3_000.0);
    }

    #[test]
    fn disabled_equity_is_zero_whatever_the_terms() {
        let mut disabled = grant(50_000.0, 0.1, 40.0);
        disabled.enabled = false;
        assert_eq!(compute_equity_value(&disabled), 0.0);
    }

    #[test]
    fn non_finite_equity_terms_count_as_zero() {
        assert_eq!(compute_equity_value(&grant(f64::NAN, 1.0, 3.0)), 0.0);
        assert_approx(compute_equity_value(&grant(100.0, f64::INFINITY, 3.0)), 300.0);
        assert_eq!(compute_equity_value(&grant(f64::MAX, -f64::MAX, f64::MAX)), 0.0);
    }

    #[test]
    fn percentage_match_scales_with_cash() {
        let config = RetirementMatch::percentage(5.0);
        assert_approx(compute_retirement_match(&config, 100_000.0), 5_000.0);
        assert_eq!(compute_retirement_match(&config, 0.0), 0.0);
    }

    #[test]
    fn fixed_match_ignores_cash() {
        let config = RetirementMatch::fixed_amount(7_500.0);
        for cash in [0.0, 55_000.0, 400_000.0] {
            assert_approx(compute_retirement_match(&config, cash), 7_500.0);
        }
    }

    #[test]
    fn disabled_or_blank_match_is_zero() {
        let mut config = RetirementMatch::percentage(6.0);
        config.enabled = false;
        assert_eq!(compute_retirement_match(&config, 100_000.0), 0.0);

        let blank = RetirementMatch::percentage(f64::NAN);
        assert_eq!(compute_retirement_match(&blank, 100_000.0), 0.0);
    }

    #[test]
    fn switching_match_mode_clears_value() {
        let mut config = RetirementMatch::percentage(4.0);
        config.switch_mode(MatchMode::Percentage);
        assert_eq!(config.contribution, MatchContribution::Percentage(4.0));

        config.switch_mode(MatchMode::FixedAmount);
        assert_eq!(config.contribution, MatchContribution::FixedAmount(0.0));
        assert!(config.enabled);
        assert_eq!(compute_retirement_match(&config, 100_000.0), 0.0);
    }

    #[test]
    fn retirement_limit_is_strictly_greater_than() {
        assert!(check_retirement_limit(70_001.0));
        assert!(!check_retirement_limit(70_000.0));
        assert!(!check_retirement_limit(f64::INFINITY));
    }

    // Only the family ceiling triggers the flag, so an individual-coverage
    // 5,000 contribution passes.
    #[test]
    fn hsa_limit_uses_family_ceiling() {
        assert!(!check_hsa_fsa_limit(5_000.0));
        assert!(!check_hsa_fsa_limit(8_550.0));
        assert!(check_hsa_fsa_limit(8_550.01));
    }

    #[test]
    fn benefits_total_counts_enabled_catalog_and_all_custom() {
        let mut selections = BenefitSelections::empty();
        selections.insert(BenefitKind::Dental, BenefitState::disabled(1_500.0));
        selections.insert(BenefitKind::Gym, BenefitState::enabled(1_200.0));
        let custom = vec![CustomBenefit::new("", -500.0)];

        assert_approx(compute_benefits_total(&selections, &custom), 700.0);
    }

    #[test]
    fn benefits_total_never_counts_retirement_entry() {
        let mut selections = BenefitSelections::empty();
        selections.insert(BenefitKind::Retirement401k, BenefitState::enabled(7_500.0));
        selections.insert(BenefitKind::Vision, BenefitState::enabled(500.0));
        assert_approx(compute_benefits_total(&selections, &[]), 500.0);
    }

    #[test]
    fn benefits_total_skips_non_finite_amounts() {
        let mut selections = BenefitSelections::empty();
        selections.insert(BenefitKind::Meals, BenefitState::enabled(f64::NAN));
        let custom = vec![
            CustomBenefit::new("Bonus", 250.0),
            CustomBenefit::new("Broken", f64::NEG_INFINITY),
        ];
        assert_approx(compute_benefits_total(&selections, &custom), 250.0);
    }

    #[test]
    fn total_adds_match_once() {
        assert_approx(
            compute_total_compensation(100_000.0, 3_000.0, 5_000.0, 1_200.0),
            109_200.0,
        );

        let mut inputs = sample_inputs();
        inputs.retirement_match = RetirementMatch::fixed_amount(6_000.0);
        inputs
            .benefits
            .insert(BenefitKind::Retirement401k, BenefitState::enabled(6_000.0));
        let estimate = compute_estimate(&inputs);
        assert_approx(estimate.breakdown.total_compensation, 168_000.0);
        assert_approx(estimate.breakdown.total_benefits, 18_000.0);
    }

    #[test]
    fn overflowing_total_reports_zero() {
        let total = compute_total_compensation(f64::MAX, f64::MAX, 0.0, 0.0);
        assert_eq!(total, 0.0);
        assert_eq!(
            compute_composition_shares(f64::MAX, f64::MAX, 0.0, total),
            CompositionShares::default()
        );
    }

    #[test]
    fn market_comparison_reports_signed_difference() {
        let above = compute_market_comparison(132_000.0, 120_000.0);
        assert_approx(above.difference, 12_000.0);
        assert_approx(above.percent_difference, 10.0);

        let below = compute_market_comparison(90_000.0, 120_000.0);
        assert_approx(below.difference, -30_000.0);
        assert_approx(below.percent_difference, -25.0);
    }

    #[test]
    fn market_comparison_without_market_salary_is_zero_percent() {
        let result = compute_market_comparison(85_000.0, 0.0);
        assert_eq!(result.difference, 85_000.0);
        assert_eq!(result.percent_difference, 0.0);
        assert!(result.percent_difference.is_finite());
    }

    #[test]
    fn cost_of_living_equivalent_normalises_to_national() {
        assert_approx(compute_cost_of_living_equivalent(165_000.0, 165.0), 100_000.0);
        assert_approx(compute_cost_of_living_equivalent(95_000.0, 95.0), 100_000.0);
        assert_eq!(compute_cost_of_living_equivalent(95_000.0, 0.0), 0.0);
    }

    #[test]
    fn composition_shares_with_zero_total_are_zero() {
        assert_eq!(
            compute_composition_shares(0.0, 0.0, 0.0, 0.0),
            CompositionShares::default()
        );
        assert_eq!(
            compute_composition_shares(10_000.0, -10_000.0, 0.0, 0.0),
            CompositionShares::default()
        );
    }

    #[test]
    fn end_to_end_cash_plus_health() {
        let estimate = compute_estimate(&sample_inputs());
        assert_approx(estimate.breakdown.total_compensation, 162_000.0);
        assert_approx(estimate.breakdown.benefits_total, 12_000.0);
        assert_eq!(estimate.breakdown.equity_value, 0.0);
        assert_eq!(estimate.breakdown.retirement_match, 0.0);

        assert_approx_tol(estimate.composition.cash_pct, 92.6, 0.05);
        assert_approx_tol(estimate.composition.benefits_pct, 7.4, 0.05);
        assert_eq!(estimate.composition.equity_pct, 0.0);
        assert!(estimate.warnings.is_empty());
        assert!(estimate.benchmark.is_none());
        assert_eq!(estimate.limits_year, 2025);
    }

    #[test]
    fn composition_counts_match_as_benefit() {
        let mut inputs = sample_inputs();
        inputs.retirement_match = RetirementMatch::percentage(4.0);
        let estimate = compute_estimate(&inputs);
        // 150_000 + 12_000 + 6_000
        assert_approx(estimate.breakdown.total_compensation, 168_000.0);
        assert_approx(estimate.composition.benefits_pct, 18_000.0 / 168_000.0 * 100.0);
    }

    #[test]
    fn all_disabled_inputs_yield_zero_estimate() {
        let estimate = compute_estimate(&Inputs::default());
        assert_eq!(estimate.breakdown.total_compensation, 0.0);
        assert_eq!(estimate.composition, CompositionShares::default());
        assert_eq!(estimate.limits, LimitFlags::default());
    }

    #[test]
    fn estimate_flags_and_explains_exceeded_limits() {
        let mut inputs = sample_inputs();
        inputs.retirement_match = RetirementMatch::fixed_amount(75_000.0);
        inputs.benefits.set_enabled(BenefitKind::Hsa, true);
        inputs.benefits.set_amount(BenefitKind::Hsa, 9_000.0);

        let estimate = compute_estimate(&inputs);
        assert!(estimate.limits.retirement_exceeded);
        assert!(estimate.limits.hsa_fsa_exceeded);
        assert_eq!(estimate.warnings.len(), 2);
        assert!(estimate.warnings[0].contains("$75,000"));
        assert!(estimate.warnings[0].contains("$70,000"));
        assert!(estimate.warnings[1].contains("$8,550"));
        assert!(estimate.warnings[1].contains("$4,300"));
        assert!(estimate.warnings[1].contains("$3,300"));
        // Warnings never change the total.
        assert_approx(estimate.breakdown.total_compensation, 246_000.0);
    }

    #[test]
    fn disabled_hsa_never_triggers_limit() {
        let mut inputs = sample_inputs();
        inputs.benefits.set_amount(BenefitKind::Hsa, 20_000.0);
        let estimate = compute_estimate(&inputs);
        assert!(!estimate.limits.hsa_fsa_exceeded);
    }

    #[test]
    fn benchmark_prefers_metro_and_reports_cost_of_living() {
        let mut inputs = sample_inputs();
        inputs.occupation_id = Some("software-engineer".to_string());
        inputs.metro_id = Some("sf-bay".to_string());
        inputs.region = Region::Midwest;

        let benchmark = compute_benchmark(&inputs, inputs.cash_salary).unwrap();
        assert_eq!(benchmark.basis, BenchmarkBasis::Metro);
        assert_eq!(benchmark.metro_name.as_deref(), Some("San Francisco Bay Area"));
        assert_eq!(benchmark.comparison.market_salary, 210_250.0);
        assert!(!benchmark.above_market);

        let col = benchmark.cost_of_living.unwrap();
        assert_eq!(col.delta_vs_national, 65.0);
        assert_approx(col.equivalent_salary, 150_000.0 / 1.65);
    }

    #[test]
    fn benchmark_by_region_has_no_cost_of_living() {
        let mut inputs = sample_inputs();
        inputs.occupation_id = Some("account-executive".to_string());
        inputs.region = Region::West;

        let benchmark = compute_benchmark(&inputs, inputs.cash_salary).unwrap();
        assert_eq!(benchmark.basis, BenchmarkBasis::Region);
        assert_eq!(benchmark.comparison.market_salary, 120_000.0);
        assert_approx(benchmark.comparison.percent_difference, 25.0);
        assert!(benchmark.above_market);
        assert!(benchmark.cost_of_living.is_none());
    }

    #[test]
    fn unknown_occupation_means_no_benchmark() {
        let mut inputs = sample_inputs();
        inputs.occupation_id = Some("astronaut".to_string());
        assert!(compute_estimate(&inputs).benchmark.is_none());
    }

    #[test]
    fn custom_role_uses_custom_title_when_given() {
        let other = catalog::find_occupation(catalog::OTHER_OCCUPATION_ID).unwrap();
        assert_eq!(display_job_title(other, Some("Solutions Architect")), "Solutions Architect");
        assert_eq!(display_job_title(other, Some("   ")), "Other (Custom Role)");
        assert_eq!(display_job_title(other, None), "Other (Custom Role)");

        let scientist = catalog::find_occupation("data-scientist").unwrap();
        assert_eq!(display_job_title(scientist, Some("Wizard")), "Data Scientist");
    }

    #[test]
    fn whole_dollars_groups_thousands() {
        assert_eq!(whole_dollars(0.0), "$0");
        assert_eq!(whole_dollars(999.4), "$999");
        assert_eq!(whole_dollars(70_000.0), "$70,000");
        assert_eq!(whole_dollars(1_234_567.0), "$1,234,567");
        assert_eq!(whole_dollars(-3_000.0), "-$3,000");
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_estimate_is_finite_and_repeatable(
            cash in any::<f64>(),
            shares in 0u32..2_000_000,
            strike_cents in 0u32..10_000,
            fmv_cents in 0u32..10_000,
            match_pct in any::<f64>(),
            custom_amount in -50_000i32..50_000,
            equity_enabled in any::<bool>()
        ) {
            let mut inputs = sample_inputs();
            inputs.cash_salary = cash;
            inputs.equity = EquityGrant {
                enabled: equity_enabled,
                shares: shares as f64,
                strike_price: strike_cents as f64 / 100.0,
                fair_market_value: fmv_cents as f64 / 100.0,
            };
            inputs.retirement_match = RetirementMatch::percentage(match_pct);
            inputs.custom_benefits = vec![CustomBenefit::new("custom", custom_amount as f64)];
            inputs.occupation_id = Some("staff-engineer".to_string());

            let first = compute_estimate(&inputs);
            let second = compute_estimate(&inputs);

            let b = first.breakdown;
            for value in [b.cash, b.equity_value, b.retirement_match, b.benefits_total, b.total_benefits, b.total_compensation] {
                prop_assert!(value.is_finite());
            }
            let c = first.composition;
            for value in [c.cash_pct, c.equity_pct, c.benefits_pct] {
                prop_assert!(value.is_finite());
            }
            prop_assert!(first.benchmark.as_ref().unwrap().comparison.percent_difference.is_finite());

            prop_assert_eq!(b.total_compensation.to_bits(), second.breakdown.total_compensation.to_bits());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_composition_shares_sum_to_hundred(
            cash in 1u32..1_000_000,
            equity in 0u32..1_000_000,
            benefits in 0u32..100_000
        ) {
            let (cash, equity, benefits) = (cash as f64, equity as f64, benefits as f64);
            let total = compute_total_compensation(cash, equity, 0.0, benefits);
            let shares = compute_composition_shares(cash, equity, benefits, total);
            prop_assert!((shares.cash_pct + shares.equity_pct + shares.benefits_pct - 100.0).abs() < 1e-9);
        }

        #[test]
        fn prop_metro_benchmark_ignores_region_field(
            metro_index in 0usize..22,
            region_index in 0usize..5
        ) {
            let metro = &catalog::list_metro_areas()[metro_index];
            let mut manual = sample_inputs();
            manual.occupation_id = Some("data-engineer".to_string());
            manual.metro_id = Some(metro.id.to_string());
            manual.region = Region::ALL[region_index];

            let mut auto_set = manual.clone();
            auto_set.region = metro.region;

            prop_assert_eq!(
                compute_benchmark(&manual, 100_000.0).unwrap().comparison,
                compute_benchmark(&auto_set, 100_000.0).unwrap().comparison
            );
        }
    }
}
