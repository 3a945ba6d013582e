//! Annual IRS contribution ceilings used for informational warnings.
//!
//! Update once a year when the IRS publishes cost-of-living adjustments
//! (usually Q4), then point [`CURRENT_LIMITS`] at the new table.

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulatoryLimits {
    pub year: u32,
    pub hsa_individual: f64,
    pub hsa_family: f64,
    pub fsa: f64,
    pub retirement_employee: f64,
    pub retirement_combined: f64,
}

pub const LIMITS_2025: RegulatoryLimits = RegulatoryLimits {
    year: 2025,
    hsa_individual: 4_300.0,
    hsa_family: 8_550.0,
    fsa: 3_300.0,
    retirement_employee: 23_500.0,
    retirement_combined: 70_000.0,
};

pub const CURRENT_LIMITS: RegulatoryLimits = LIMITS_2025;

impl RegulatoryLimits {
    pub fn retirement_exceeded(&self, match_amount: f64) -> bool {
        match_amount > self.retirement_combined
    }

    /// Compared against the family ceiling only, since coverage type is
    /// unknown.
    pub fn hsa_fsa_exceeded(&self, hsa_amount: f64) -> bool {
        hsa_amount > self.hsa_family
    }
}
