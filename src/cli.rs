use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::collections::HashSet;
use std::net::IpAddr;
use std::process::ExitCode;

use crate::api::{InputError, apply_benefit, sanitize};
use crate::core::benefits::{BenefitSelections, CustomBenefit};
use crate::core::catalog::{self, MetroArea, Occupation, Region};
use crate::core::{EquityGrant, Inputs, RetirementMatch, compute_estimate};

#[derive(Parser, Debug)]
#[command(
    name = "totalcomp",
    about = "Total compensation estimator (cash + equity + retirement match + benefits)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Compute one estimate and print it as JSON
    Estimate(EstimateArgs),
    /// Print occupations, metro areas and regions as JSON
    Catalog,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliRegion {
    National,
    Northeast,
    Midwest,
    South,
    West,
}

impl From<CliRegion> for Region {
    fn from(value: CliRegion) -> Self {
        match value {
            CliRegion::National => Region::National,
            CliRegion::Northeast => Region::Northeast,
            CliRegion::Midwest => Region::Midwest,
            CliRegion::South => Region::South,
            CliRegion::West => Region::West,
        }
    }
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    #[arg(
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        help = "Annual cash salary"
    )]
    pub cash: f64,
    #[arg(long, help = "Occupation id, e.g. software-engineer or other")]
    pub occupation: Option<String>,
    #[arg(long, help = "Job title shown for the 'other' occupation")]
    pub job_title: Option<String>,
    #[arg(long, help = "Metro area id, e.g. sf-bay; overrides --region")]
    pub metro: Option<String>,
    #[arg(long, value_enum, help = "Region used when no metro is given")]
    pub region: Option<CliRegion>,
    #[arg(long, allow_negative_numbers = true, help = "Number of shares or options granted")]
    pub shares: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Strike price per share")]
    pub strike: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "Fair market value per share")]
    pub fmv: Option<f64>,
    #[arg(
        long,
        conflicts_with = "match_amount",
        allow_negative_numbers = true,
        help = "Employer retirement match in percent of cash salary"
    )]
    pub match_percent: Option<f64>,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Employer retirement match as a fixed annual amount"
    )]
    pub match_amount: Option<f64>,
    #[arg(
        long = "benefit",
        value_name = "KIND[=AMOUNT]",
        help = "Enable a catalog benefit, optionally overriding its default amount"
    )]
    pub benefits: Vec<String>,
    #[arg(
        long = "custom",
        value_name = "NAME=AMOUNT",
        help = "Add a custom benefit; negative amounts model a cost"
    )]
    pub custom: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDump {
    occupations: &'static [Occupation],
    metro_areas: &'static [MetroArea],
    regions: &'static [Region],
}

fn parse_amount(raw: &str, raw_arg: &str) -> Result<f64, InputError> {
    raw.trim()
        .parse::<f64>()
        .map(|v| sanitize(Some(v)))
        .map_err(|_| InputError::InvalidAmount(raw_arg.to_string()))
}

fn parse_custom(raw_arg: &str) -> Result<CustomBenefit, InputError> {
    let (name, amount) = raw_arg
        .rsplit_once('=')
        .ok_or_else(|| InputError::InvalidCustomBenefit(raw_arg.to_string()))?;
    Ok(CustomBenefit::new(name.trim(), parse_amount(amount, raw_arg)?))
}

pub fn build_inputs(args: EstimateArgs) -> Result<Inputs, InputError> {
    let mut benefits = BenefitSelections::default();
    let mut seen = HashSet::new();
    for raw_arg in &args.benefits {
        let (id, amount) = match raw_arg.split_once('=') {
            Some((id, amount)) => (id.trim(), Some(parse_amount(amount, raw_arg)?)),
            None => (raw_arg.trim(), None),
        };
        apply_benefit(&mut benefits, &mut seen, id, true, amount)?;
    }

    let custom_benefits = args
        .custom
        .iter()
        .map(|raw_arg| parse_custom(raw_arg))
        .collect::<Result<Vec<_>, _>>()?;

    let equity = EquityGrant {
        enabled: args.shares.is_some() || args.strike.is_some() || args.fmv.is_some(),
        shares: sanitize(args.shares),
        strike_price: sanitize(args.strike),
        fair_market_value: sanitize(args.fmv),
    };

    let retirement_match = match (args.match_percent, args.match_amount) {
        (Some(percent), _) => RetirementMatch::percentage(sanitize(Some(percent))),
        (None, Some(amount)) => RetirementMatch::fixed_amount(sanitize(Some(amount))),
        (None, None) => RetirementMatch::default(),
    };

    Ok(Inputs {
        cash_salary: sanitize(Some(args.cash)),
        equity,
        retirement_match,
        benefits,
        custom_benefits,
        occupation_id: args.occupation,
        custom_job_title: args.job_title,
        metro_id: args.metro,
        region: args.region.map(Region::from).unwrap_or_default(),
    })
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("failed to serialize output: {e}");
            ExitCode::FAILURE
        }
    }
}

pub fn print_estimate(args: EstimateArgs) -> ExitCode {
    let inputs = match build_inputs(args) {
        Ok(inputs) => inputs,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };
    let estimate = compute_estimate(&inputs);
    if inputs.occupation_id.is_some() && estimate.benchmark.is_none() {
        tracing::warn!("unknown occupation, market comparison skipped");
    }
    print_json(&estimate)
}

pub fn print_catalog() -> ExitCode {
    print_json(&CatalogDump {
        occupations: catalog::list_occupations(),
        metro_areas: catalog::list_metro_areas(),
        regions: catalog::list_regions(),
    })
}
