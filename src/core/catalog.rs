use serde::{Deserialize, Serialize};

/// Occupation id for a user-supplied job title priced at fallback averages.
pub const OTHER_OCCUPATION_ID: &str = "other";

const NATIONAL_COST_OF_LIVING_INDEX: f64 = 100.0;

#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    National,
    Northeast,
    Midwest,
    South,
    West,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::National,
        Region::Northeast,
        Region::Midwest,
        Region::South,
        Region::West,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Region::National => "national",
            Region::Northeast => "northeast",
            Region::Midwest => "midwest",
            Region::South => "south",
            Region::West => "west",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Region::National => "National Average",
            Region::Northeast => "Northeast",
            Region::Midwest => "Midwest",
            Region::South => "South",
            Region::West => "West",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|region| region.id() == id)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct SalaryByRegion {
    pub national: f64,
    pub northeast: f64,
    pub midwest: f64,
    pub south: f64,
    pub west: f64,
}

impl SalaryByRegion {
    pub fn get(&self, region: Region) -> f64 {
        match region {
            Region::National => self.national,
            Region::Northeast => self.northeast,
            Region::Midwest => self.midwest,
            Region::South => self.south,
            Region::West => self.west,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupation {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub salary_by_region: SalaryByRegion,
}

impl Occupation {
    pub fn is_custom_role(&self) -> bool {
        self.id == OTHER_OCCUPATION_ID
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CostOfLivingSource {
    pub name: &'static str,
    pub url: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetroArea {
    pub id: &'static str,
    pub name: &'static str,
    pub state: &'static str,
    pub region: Region,
    pub cost_of_living_index: f64,
    pub salary_multiplier: f64,
    pub cost_of_living_source: CostOfLivingSource,
}

impl MetroArea {
    pub fn cost_of_living_delta(&self) -> f64 {
        self.cost_of_living_index - NATIONAL_COST_OF_LIVING_INDEX
    }
}

const C2ER: CostOfLivingSource = CostOfLivingSource {
    name: "Council for Community and Economic Research (C2ER)",
    url: "https://www.coli.org/",
};

const fn metro(
    id: &'static str,
    name: &'static str,
    state: &'static str,
    region: Region,
    cost_of_living_index: f64,
    salary_multiplier: f64,
) -> MetroArea {
    MetroArea {
        id,
        name,
        state,
        region,
        cost_of_living_index,
        salary_multiplier,
        cost_of_living_source: C2ER,
    }
}

static OCCUPATIONS: &[Occupation] = &[
    Occupation {
        id: "other",
        title: "Other (Custom Role)",
        category: "Other",
        salary_by_region: SalaryByRegion {
            national: 95_000.0,
            northeast: 108_768.0,
            midwest: 91_430.0,
            south: 83_346.0,
            west: 103_418.0,
        },
    },
    Occupation {
        id: "software-engineer",
        title: "Software Engineer",
        category: "Engineering",
        salary_by_region: SalaryByRegion {
            national: 120_000.0,
            northeast: 135_000.0,
            midwest: 105_000.0,
            south: 110_000.0,
            west: 145_000.0,
        },
    },
    Occupation {
        id: "senior-software-engineer",
        title: "Senior Software Engineer",
        category: "Engineering",
        salary_by_region: SalaryByRegion {
            national: 155_000.0,
            northeast: 170_000.0,
            midwest: 140_000.0,
            south: 145_000.0,
            west: 180_000.0,
        },
    },
    Occupation {
        id: "staff-engineer",
        title: "Staff Engineer",
        category: "Engineering",
        salary_by_region: SalaryByRegion {
            national: 190_000.0,
            northeast: 210_000.0,
            midwest: 170_000.0,
            south: 175_000.0,
            west: 220_000.0,
        },
    },
    Occupation {
        id: "engineering-manager",
        title: "Engineering Manager",
        category: "Engineering",
        salary_by_region: SalaryByRegion {
            national: 165_000.0,
            northeast: 180_000.0,
            midwest: 150_000.0,
            south: 155_000.0,
            west: 190_000.0,
        },
    },
    Occupation {
        id: "product-manager",
        title: "Product Manager",
        category: "Product",
        salary_by_region: SalaryByRegion {
            national: 130_000.0,
            northeast: 145_000.0,
            midwest: 115_000.0,
            south: 120_000.0,
            west: 155_000.0,
        },
    },
    Occupation {
        id: "senior-product-manager",
        title: "Senior Product Manager",
        category: "Product",
        salary_by_region: SalaryByRegion {
            national: 160_000.0,
            northeast: 175_000.0,
            midwest: 145_000.0,
            south: 150_000.0,
            west: 185_000.0,
        },
    },
    Occupation {
        id: "product-designer",
        title: "Product Designer",
        category: "Design",
        salary_by_region: SalaryByRegion {
            national: 110_000.0,
            northeast: 125_000.0,
            midwest: 95_000.0,
            south: 100_000.0,
            west: 135_000.0,
        },
    },
    Occupation {
        id: "senior-product-designer",
        title: "Senior Product Designer",
        category: "Design",
        salary_by_region: SalaryByRegion {
            national: 140_000.0,
            northeast: 155_000.0,
            midwest: 125_000.0,
            south: 130_000.0,
            west: 165_000.0,
        },
    },
    Occupation {
        id: "data-scientist",
        title: "Data Scientist",
        category: "Data",
        salary_by_region: SalaryByRegion {
            national: 125_000.0,
            northeast: 140_000.0,
            midwest: 110_000.0,
            south: 115_000.0,
            west: 150_000.0,
        },
    },
    Occupation {
        id: "data-engineer",
        title: "Data Engineer",
        category: "Data",
        salary_by_region: SalaryByRegion {
            national: 130_000.0,
            northeast: 145_000.0,
            midwest: 115_000.0,
            south: 120_000.0,
            west: 155_000.0,
        },
    },
    Occupation {
        id: "devops-engineer",
        title: "DevOps Engineer",
        category: "Engineering",
        salary_by_region: SalaryByRegion {
            national: 125_000.0,
            northeast: 140_000.0,
            midwest: 110_000.0,
            south: 115_000.0,
            west: 150_000.0,
        },
    },
    Occupation {
        id: "marketing-manager",
        title: "Marketing Manager",
        category: "Marketing",
        salary_by_region: SalaryByRegion {
            national: 105_000.0,
            northeast: 120_000.0,
            midwest: 90_000.0,
            south: 95_000.0,
            west: 130_000.0,
        },
    },
    Occupation {
        id: "sales-engineer",
        title: "Sales Engineer",
        category: "Sales",
        salary_by_region: SalaryByRegion {
            national: 115_000.0,
            northeast: 130_000.0,
            midwest: 100_000.0,
            south: 105_000.0,
            west: 140_000.0,
        },
    },
    Occupation {
        id: "account-executive",
        title: "Account Executive",
        category: "Sales",
        salary_by_region: SalaryByRegion {
            national: 95_000.0,
            northeast: 110_000.0,
            midwest: 80_000.0,
            south: 85_000.0,
            west: 120_000.0,
        },
    },
    Occupation {
        id: "customer-success",
        title: "Customer Success Manager",
        category: "Customer Success",
        salary_by_region: SalaryByRegion {
            national: 85_000.0,
            northeast: 95_000.0,
            midwest: 75_000.0,
            south: 78_000.0,
            west: 105_000.0,
        },
    },
    Occupation {
        id: "hr-manager",
        title: "HR Manager",
        category: "Human Resources",
        salary_by_region: SalaryByRegion {
            national: 95_000.0,
            northeast: 110_000.0,
            midwest: 85_000.0,
            south: 88_000.0,
            west: 115_000.0,
        },
    },
    Occupation {
        id: "recruiter",
        title: "Technical Recruiter",
        category: "Human Resources",
        salary_by_region: SalaryByRegion {
            national: 80_000.0,
            northeast: 90_000.0,
            midwest: 70_000.0,
            south: 73_000.0,
            west: 95_000.0,
        },
    },
    Occupation {
        id: "operations-manager",
        title: "Operations Manager",
        category: "Operations",
        salary_by_region: SalaryByRegion {
            national: 90_000.0,
            northeast: 105_000.0,
            midwest: 80_000.0,
            south: 83_000.0,
            west: 110_000.0,
        },
    },
];

static METRO_AREAS: &[MetroArea] = &[
    // West Coast and Mountain
    metro("sf-bay", "San Francisco Bay Area", "CA", Region::West, 165.0, 1.45),
    metro("seattle", "Seattle", "WA", Region::West, 145.0, 1.35),
    metro("san-diego", "San Diego", "CA", Region::West, 140.0, 1.25),
    metro("los-angeles", "Los Angeles", "CA", Region::West, 142.0, 1.28),
    metro("portland", "Portland", "OR", Region::West, 128.0, 1.18),
    metro("denver", "Denver", "CO", Region::West, 125.0, 1.15),
    // Northeast
    metro("nyc", "New York City", "NY", Region::Northeast, 168.0, 1.42),
    metro("boston", "Boston", "MA", Region::Northeast, 148.0, 1.35),
    metro("philadelphia", "Philadelphia", "PA", Region::Northeast, 115.0, 1.1),
    metro("washington-dc", "Washington DC", "DC", Region::Northeast, 152.0, 1.3),
    // South
    metro("austin", "Austin", "TX", Region::South, 118.0, 1.15),
    metro("dallas", "Dallas", "TX", Region::South, 108.0, 1.08),
    metro("houston", "Houston", "TX", Region::South, 102.0, 1.05),
    metro("atlanta", "Atlanta", "GA", Region::South, 108.0, 1.1),
    metro("miami", "Miami", "FL", Region::South, 120.0, 1.12),
    metro("raleigh", "Raleigh-Durham", "NC", Region::South, 105.0, 1.08),
    metro("nashville", "Nashville", "TN", Region::South, 110.0, 1.05),
    // Midwest
    metro("chicago", "Chicago", "IL", Region::Midwest, 115.0, 1.12),
    metro("minneapolis", "Minneapolis", "MN", Region::Midwest, 108.0, 1.08),
    metro("detroit", "Detroit", "MI", Region::Midwest, 95.0, 0.98),
    metro("columbus", "Columbus", "OH", Region::Midwest, 98.0, 1.0),
    metro("kansas-city", "Kansas City", "MO", Region::Midwest, 95.0, 0.98),
];

pub fn list_occupations() -> &'static [Occupation] {
    OCCUPATIONS
}

pub fn list_metro_areas() -> &'static [MetroArea] {
    METRO_AREAS
}

pub fn list_regions() -> &'static [Region] {
    &Region::ALL
}

pub fn find_occupation(id: &str) -> Option<&'static Occupation> {
    OCCUPATIONS.iter().find(|occupation| occupation.id == id)
}

pub fn find_metro_area(id: &str) -> Option<&'static MetroArea> {
    METRO_AREAS.iter().find(|metro| metro.id == id)
}

/// Occupations grouped by category, categories in first-appearance order.
pub fn occupations_by_category() -> Vec<(&'static str, Vec<&'static Occupation>)> {
    let mut groups: Vec<(&'static str, Vec<&'static Occupation>)> = Vec::new();
    for occupation in OCCUPATIONS {
        match groups
            .iter_mut()
            .find(|(category, _)| *category == occupation.category)
        {
            Some((_, members)) => members.push(occupation),
            None => groups.push((occupation.category, vec![occupation])),
        }
    }
    groups
}

/// Benchmark salary for `occupation` at the most specific known location.
///
/// A known metro always wins and is priced as the metro's regional average
/// times its salary multiplier, rounded to whole currency units with
/// [`f64::round`] (half away from zero). The `region` argument is ignored in
/// that case, even when it disagrees with the metro's region. Without a known
/// metro, a non-national region returns the table value unchanged and
/// anything else falls back to the national average.
pub fn resolve_market_salary(
    occupation: &Occupation,
    metro_id: Option<&str>,
    region: Option<Region>,
) -> f64 {
    if let Some(metro) = metro_id.and_then(find_metro_area) {
        let regional = occupation.salary_by_region.get(metro.region);
        return (regional * metro.salary_multiplier).round();
    }

    match region {
        Some(region) if region != Region::National => occupation.salary_by_region.get(region),
        _ => occupation.salary_by_region.national,
    }
}
