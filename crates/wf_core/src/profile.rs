//! Per-metric generation constants
//!
//! Every series follows the same template:
//!
//! ```text
//! value(i, Y) = base × trend(i, Y) × cycle(Y) × specialty × noise
//! ```
//!
//! and differs only in the constants below.

use crate::metrics::Metric;
use crate::registry::{Category, Specialty, SubdivisionConfig};

/// Where the series baseline comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Base {
    /// `population_base × fraction`
    Population(f64),
    /// `budget_base × fraction`
    Budget(f64),
    /// Fixed constant, independent of the subdivision
    Fixed(f64),
}

impl Base {
    pub fn value(&self, config: &SubdivisionConfig) -> f64 {
        match *self {
            Base::Population(fraction) => config.population_base * fraction,
            Base::Budget(fraction) => config.budget_base * fraction,
            Base::Fixed(value) => value,
        }
    }
}

/// Growth rates per subdivision category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryRates {
    pub chief_town: f64,
    pub district: f64,
    pub district_remote: f64,
}

impl CategoryRates {
    pub fn rate(&self, category: Category) -> f64 {
        match category {
            Category::ChiefTown => self.chief_town,
            Category::District => self.district,
            Category::DistrictRemote => self.district_remote,
        }
    }
}

/// Deterministic trend factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trend {
    /// No trend
    Flat,
    /// `1 + rate × i`, `i` being the year's offset in the range
    Linear(f64),
    /// Linear with a category-dependent rate
    ByCategory(CategoryRates),
    /// `1` before `threshold`, `1 + rate × (year − threshold)` from it on
    Since { threshold: i32, rate: f64 },
}

impl Trend {
    pub fn factor(&self, category: Category, index: usize, year: i32) -> f64 {
        match *self {
            Trend::Flat => 1.0,
            Trend::Linear(rate) => 1.0 + rate * index as f64,
            Trend::ByCategory(rates) => 1.0 + rates.rate(category) * index as f64,
            Trend::Since { threshold, rate } => {
                if year >= threshold {
                    1.0 + rate * (year - threshold) as f64
                } else {
                    1.0
                }
            }
        }
    }
}

/// Multiplier applied on a fixed list of years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cycle {
    pub years: &'static [i32],
    pub factor: f64,
}

/// Sector boost keyed on a specialty tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialtyBoost {
    pub specialty: Specialty,
    pub matched: f64,
    pub unmatched: f64,
}

impl SpecialtyBoost {
    pub fn factor(&self, config: &SubdivisionConfig) -> f64 {
        if config.has_specialty(self.specialty) {
            self.matched
        } else {
            self.unmatched
        }
    }
}

/// Complete constant set for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricProfile {
    pub metric: Metric,
    pub base: Base,
    pub trend: Trend,
    /// Boost first, then dip. A year listed in both gets the boost.
    pub cycles: &'static [Cycle],
    pub specialty: Option<SpecialtyBoost>,
    /// Standard deviation of the `Normal(1, σ)` noise; 0 = noiseless
    pub noise_sd: f64,
}

impl MetricProfile {
    /// Multiplier for `year` from the cycle lists, 1.0 when unlisted.
    pub fn cycle_factor(&self, year: i32) -> f64 {
        self.cycles
            .iter()
            .find(|c| c.years.contains(&year))
            .map(|c| c.factor)
            .unwrap_or(1.0)
    }

    pub fn specialty_factor(&self, config: &SubdivisionConfig) -> f64 {
        self.specialty.map(|s| s.factor(config)).unwrap_or(1.0)
    }

    /// Noise-free value at offset `index` / calendar `year`.
    pub fn expected(&self, config: &SubdivisionConfig, index: usize, year: i32) -> f64 {
        self.base.value(config)
            * self.trend.factor(config.category, index, year)
            * self.cycle_factor(year)
            * self.specialty_factor(config)
    }
}

// Capital spending cycle shared by investment expenses, debt and transport
const INFRASTRUCTURE_YEARS: &[i32] = &[2006, 2012, 2018, 2023];

const INVESTMENT_CYCLES: &[Cycle] = &[
    Cycle { years: INFRASTRUCTURE_YEARS, factor: 1.6 },
    Cycle { years: &[2008, 2014, 2020], factor: 0.8 },
];

const DEBT_CYCLES: &[Cycle] = &[
    Cycle { years: INFRASTRUCTURE_YEARS, factor: 1.25 },
    Cycle { years: &[2009, 2015, 2021], factor: 0.92 },
];

const AGRICULTURE_CYCLES: &[Cycle] = &[Cycle { years: &[2005, 2010, 2015, 2020], factor: 1.8 }];
const FISHING_CYCLES: &[Cycle] = &[Cycle { years: &[2007, 2013, 2019, 2024], factor: 1.7 }];
const TRANSPORT_CYCLES: &[Cycle] = &[Cycle { years: INFRASTRUCTURE_YEARS, factor: 1.6 }];
const EDUCATION_CYCLES: &[Cycle] = &[Cycle { years: &[2008, 2014, 2020], factor: 1.6 }];
const HEALTH_CYCLES: &[Cycle] = &[Cycle { years: &[2009, 2015, 2021], factor: 1.7 }];
const CULTURE_CYCLES: &[Cycle] = &[Cycle { years: &[2010, 2016, 2022], factor: 1.7 }];

const fn plain(metric: Metric, base: Base, trend: Trend, noise_sd: f64) -> MetricProfile {
    MetricProfile {
        metric,
        base,
        trend,
        cycles: &[],
        specialty: None,
        noise_sd,
    }
}

const fn sector(
    metric: Metric,
    fraction: f64,
    rate: f64,
    cycles: &'static [Cycle],
    specialty: Specialty,
    matched: f64,
    unmatched: f64,
    noise_sd: f64,
) -> MetricProfile {
    MetricProfile {
        metric,
        base: Base::Budget(fraction),
        trend: Trend::Linear(rate),
        cycles,
        specialty: Some(SpecialtyBoost { specialty, matched, unmatched }),
        noise_sd,
    }
}

/// One profile per metric, in column order.
pub const PROFILES: [MetricProfile; Metric::COUNT] = [
    plain(
        Metric::Population,
        Base::Population(1.0),
        Trend::ByCategory(CategoryRates { chief_town: 0.01, district: 0.009, district_remote: 0.008 }),
        0.0,
    ),
    plain(Metric::Households, Base::Population(1.0 / 4.5), Trend::Linear(0.008), 0.0),
    plain(
        Metric::TotalRevenue,
        Base::Budget(1.0),
        Trend::ByCategory(CategoryRates { chief_town: 0.028, district: 0.026, district_remote: 0.025 }),
        0.08,
    ),
    plain(Metric::LocalTaxes, Base::Budget(0.25), Trend::Linear(0.015), 0.09),
    plain(
        Metric::StateGrants,
        Base::Budget(0.55),
        Trend::Since { threshold: 2010, rate: 0.012 },
        0.06,
    ),
    plain(
        Metric::TerritorialGrants,
        Base::Budget(0.12),
        Trend::Since { threshold: 2005, rate: 0.01 },
        0.07,
    ),
    plain(Metric::OtherRevenue, Base::Budget(0.08), Trend::Linear(0.018), 0.10),
    plain(Metric::TotalExpenses, Base::Budget(0.98), Trend::Linear(0.026), 0.07),
    plain(Metric::OperatingExpenses, Base::Budget(0.68), Trend::Linear(0.024), 0.06),
    MetricProfile {
        metric: Metric::InvestmentExpenses,
        base: Base::Budget(0.30),
        trend: Trend::Linear(0.022),
        cycles: INVESTMENT_CYCLES,
        specialty: None,
        noise_sd: 0.16,
    },
    plain(
        Metric::DebtCharges,
        Base::Budget(0.06),
        Trend::Since { threshold: 2005, rate: 0.009 },
        0.10,
    ),
    plain(Metric::StaffCosts, Base::Budget(0.48), Trend::Linear(0.026), 0.05),
    plain(
        Metric::GrossSavings,
        Base::Budget(0.02),
        Trend::Since { threshold: 2010, rate: 0.007 },
        0.13,
    ),
    MetricProfile {
        metric: Metric::TotalDebt,
        base: Base::Budget(0.75),
        trend: Trend::Flat,
        cycles: DEBT_CYCLES,
        specialty: None,
        noise_sd: 0.09,
    },
    plain(
        Metric::DebtRatio,
        Base::Fixed(0.70),
        Trend::Since { threshold: 2010, rate: -0.01 },
        0.07,
    ),
    plain(
        Metric::TaxRate,
        Base::Fixed(0.80),
        Trend::Since { threshold: 2010, rate: 0.004 },
        0.04,
    ),
    sector(Metric::AgricultureInvestment, 0.07, 0.026, AGRICULTURE_CYCLES, Specialty::Agriculture, 1.5, 0.8, 0.15),
    sector(Metric::FishingInvestment, 0.06, 0.028, FISHING_CYCLES, Specialty::Fishing, 1.6, 0.7, 0.16),
    sector(Metric::TransportInvestment, 0.05, 0.024, TRANSPORT_CYCLES, Specialty::Transport, 1.4, 0.9, 0.14),
    sector(Metric::EducationInvestment, 0.06, 0.027, EDUCATION_CYCLES, Specialty::Education, 1.4, 0.9, 0.17),
    sector(Metric::HealthInvestment, 0.05, 0.025, HEALTH_CYCLES, Specialty::Health, 1.5, 0.9, 0.16),
    sector(Metric::CultureInvestment, 0.04, 0.023, CULTURE_CYCLES, Specialty::Culture, 1.6, 0.7, 0.15),
];

pub fn profile(metric: Metric) -> &'static MetricProfile {
    &PROFILES[metric.index()]
}
