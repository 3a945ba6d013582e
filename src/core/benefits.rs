use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum BenefitKind {
    Health,
    Dental,
    Vision,
    #[serde(rename = "401k")]
    Retirement401k,
    Commuter,
    Gym,
    Learning,
    HomeOffice,
    Phone,
    Life,
    Disability,
    Hsa,
    Meals,
    Wellness,
}

impl BenefitKind {
    pub const ALL: [BenefitKind; 14] = [
        BenefitKind::Health,
        BenefitKind::Dental,
        BenefitKind::Vision,
        BenefitKind::Retirement401k,
        BenefitKind::Commuter,
        BenefitKind::Gym,
        BenefitKind::Learning,
        BenefitKind::HomeOffice,
        BenefitKind::Phone,
        BenefitKind::Life,
        BenefitKind::Disability,
        BenefitKind::Hsa,
        BenefitKind::Meals,
        BenefitKind::Wellness,
    ];

    pub fn id(self) -> &'static str {
        match self {
            BenefitKind::Health => "health",
            BenefitKind::Dental => "dental",
            BenefitKind::Vision => "vision",
            BenefitKind::Retirement401k => "401k",
            BenefitKind::Commuter => "commuter",
            BenefitKind::Gym => "gym",
            BenefitKind::Learning => "learning",
            BenefitKind::HomeOffice => "home-office",
            BenefitKind::Phone => "phone",
            BenefitKind::Life => "life",
            BenefitKind::Disability => "disability",
            BenefitKind::Hsa => "hsa",
            BenefitKind::Meals => "meals",
            BenefitKind::Wellness => "wellness",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Employer retirement contributions are priced by the retirement match
    /// configuration, so the 401(k) entry can never be toggled on as a
    /// benefit.
    pub fn is_selectable(self) -> bool {
        self != BenefitKind::Retirement401k
    }

    pub fn selectable() -> impl Iterator<Item = BenefitKind> {
        Self::ALL.into_iter().filter(|kind| kind.is_selectable())
    }

    pub fn info(self) -> &'static BenefitInfo {
        // ALL and BENEFIT_CATALOG share an order.
        &BENEFIT_CATALOG[self as usize]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitInfo {
    pub kind: BenefitKind,
    pub name: &'static str,
    pub default_amount: f64,
    pub description: &'static str,
    pub estimate_guidance: &'static str,
}

static BENEFIT_CATALOG: [BenefitInfo; 14] = [
    BenefitInfo {
        kind: BenefitKind::Health,
        name: "Health Insurance",
        default_amount: 12_000.0,
        description: "Medical coverage",
        estimate_guidance: "Typical employer contribution: $8,000-$15,000/year for individual coverage, $15,000-$25,000 for family coverage",
    },
    BenefitInfo {
        kind: BenefitKind::Dental,
        name: "Dental Insurance",
        default_amount: 1_500.0,
        description: "Dental coverage",
        estimate_guidance: "Typical employer contribution: $500-$2,000/year. Average is around $1,200-$1,500 annually",
    },
    BenefitInfo {
        kind: BenefitKind::Vision,
        name: "Vision Insurance",
        default_amount: 500.0,
        description: "Vision coverage",
        estimate_guidance: "Typical employer contribution: $200-$800/year. Average is around $400-$600 annually",
    },
    BenefitInfo {
        kind: BenefitKind::Retirement401k,
        name: "401(k) Match",
        default_amount: 7_500.0,
        description: "Employer retirement contribution",
        estimate_guidance: "Common match: 50% of first 6% or 100% of first 3-5% of salary. Average total match: $5,000-$10,000/year",
    },
    BenefitInfo {
        kind: BenefitKind::Commuter,
        name: "Commuter Benefits",
        default_amount: 3_000.0,
        description: "Transit/parking benefits",
        estimate_guidance: "Pre-tax benefit up to $315/month ($3,780/year) for transit or parking. Many employers offer $100-$300/month",
    },
    BenefitInfo {
        kind: BenefitKind::Gym,
        name: "Gym Membership",
        default_amount: 1_200.0,
        description: "Fitness/wellness",
        estimate_guidance: "Typical benefit: $30-$150/month ($360-$1,800/year). Some offer free memberships or on-site gyms",
    },
    BenefitInfo {
        kind: BenefitKind::Learning,
        name: "Learning & Development",
        default_amount: 2_000.0,
        description: "Education/courses budget",
        estimate_guidance: "Typical annual budget: $1,000-$5,000 for courses, conferences, or certifications",
    },
    BenefitInfo {
        kind: BenefitKind::HomeOffice,
        name: "Home Office Stipend",
        default_amount: 1_000.0,
        description: "WFH equipment",
        estimate_guidance: "One-time or annual stipend: $500-$2,000 for desk, chair, monitor, etc.",
    },
    BenefitInfo {
        kind: BenefitKind::Phone,
        name: "Phone/Internet",
        default_amount: 1_200.0,
        description: "Communication expenses",
        estimate_guidance: "Typical monthly stipend: $50-$150/month ($600-$1,800/year) for phone and internet",
    },
    BenefitInfo {
        kind: BenefitKind::Life,
        name: "Life Insurance",
        default_amount: 500.0,
        description: "Life insurance coverage",
        estimate_guidance: "Employer-paid basic coverage (1-2x salary) costs $200-$800/year. Additional voluntary coverage available",
    },
    BenefitInfo {
        kind: BenefitKind::Disability,
        name: "Disability Insurance",
        default_amount: 800.0,
        description: "Short/long-term disability",
        estimate_guidance: "Typical employer cost: $400-$1,200/year for short and long-term disability coverage",
    },
    BenefitInfo {
        kind: BenefitKind::Hsa,
        name: "HSA/FSA Contribution",
        default_amount: 1_000.0,
        description: "Health savings account",
        estimate_guidance: "Employer HSA contribution: $500-$2,000/year. FSA contribution varies, often matches employee contribution up to a limit",
    },
    BenefitInfo {
        kind: BenefitKind::Meals,
        name: "Meals/Food Stipend",
        default_amount: 2_400.0,
        description: "Daily meals or snacks",
        estimate_guidance: "Free meals/snacks value: $10-$25/day ($2,400-$6,000/year for 5 days/week)",
    },
    BenefitInfo {
        kind: BenefitKind::Wellness,
        name: "Wellness Stipend",
        default_amount: 1_000.0,
        description: "General wellness budget",
        estimate_guidance: "Flexible wellness benefit: $500-$2,000/year for fitness, mental health, massage, etc.",
    },
];

pub fn catalog() -> &'static [BenefitInfo] {
    &BENEFIT_CATALOG
}

pub fn find_benefit(id: &str) -> Option<&'static BenefitInfo> {
    BenefitKind::from_id(id).map(BenefitKind::info)
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenefitState {
    pub enabled: bool,
    pub amount: f64,
}

impl BenefitState {
    pub fn enabled(amount: f64) -> Self {
        Self {
            enabled: true,
            amount,
        }
    }

    pub fn disabled(amount: f64) -> Self {
        Self {
            enabled: false,
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BenefitSelections {
    states: BTreeMap<BenefitKind, BenefitState>,
}

impl Default for BenefitSelections {
    fn default() -> Self {
        let states = BenefitKind::selectable()
            .map(|kind| (kind, BenefitState::disabled(kind.info().default_amount)))
            .collect();
        Self { states }
    }
}

impl BenefitSelections {
    pub fn empty() -> Self {
        Self {
            states: BTreeMap::new(),
        }
    }

    pub fn get(&self, kind: BenefitKind) -> Option<&BenefitState> {
        self.states.get(&kind)
    }

    pub fn insert(&mut self, kind: BenefitKind, state: BenefitState) {
        self.states.insert(kind, state);
    }

    pub fn set_enabled(&mut self, kind: BenefitKind, enabled: bool) {
        self.entry(kind).enabled = enabled;
    }

    pub fn set_amount(&mut self, kind: BenefitKind, amount: f64) {
        self.entry(kind).amount = amount;
    }

    pub fn enabled_amount(&self, kind: BenefitKind) -> f64 {
        match self.states.get(&kind) {
            Some(state) if state.enabled => state.amount,
            _ => 0.0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BenefitKind, &BenefitState)> {
        self.states.iter().map(|(kind, state)| (*kind, state))
    }

    fn entry(&mut self, kind: BenefitKind) -> &mut BenefitState {
        self.states
            .entry(kind)
            .or_insert_with(|| BenefitState::disabled(kind.info().default_amount))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomBenefit {
    pub id: String,
    pub name: String,
    /// May be negative to model a benefit cost.
    pub amount: f64,
}

impl CustomBenefit {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            amount,
        }
    }
}

impl Default for CustomBenefit {
    fn default() -> Self {
        Self::new(String::new(), 0.0)
    }
}
