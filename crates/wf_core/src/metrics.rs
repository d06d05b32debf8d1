//! Metric catalogue
//!
//! Every generated column, in export order. `year` is the row key and is not
//! a metric.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header of the key column.
pub const YEAR_COLUMN: &str = "year";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricGroup {
    Demography,
    Revenue,
    Expense,
    FinancialRatio,
    SectorInvestment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Population,
    Households,
    TotalRevenue,
    LocalTaxes,
    StateGrants,
    TerritorialGrants,
    OtherRevenue,
    TotalExpenses,
    OperatingExpenses,
    InvestmentExpenses,
    DebtCharges,
    StaffCosts,
    GrossSavings,
    TotalDebt,
    DebtRatio,
    TaxRate,
    AgricultureInvestment,
    FishingInvestment,
    TransportInvestment,
    EducationInvestment,
    HealthInvestment,
    CultureInvestment,
}

impl Metric {
    pub const COUNT: usize = 22;

    /// Column order of the table and of the CSV export.
    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::Population,
        Metric::Households,
        Metric::TotalRevenue,
        Metric::LocalTaxes,
        Metric::StateGrants,
        Metric::TerritorialGrants,
        Metric::OtherRevenue,
        Metric::TotalExpenses,
        Metric::OperatingExpenses,
        Metric::InvestmentExpenses,
        Metric::DebtCharges,
        Metric::StaffCosts,
        Metric::GrossSavings,
        Metric::TotalDebt,
        Metric::DebtRatio,
        Metric::TaxRate,
        Metric::AgricultureInvestment,
        Metric::FishingInvestment,
        Metric::TransportInvestment,
        Metric::EducationInvestment,
        Metric::HealthInvestment,
        Metric::CultureInvestment,
    ];

    /// Column slot in a row.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn column_name(self) -> &'static str {
        match self {
            Metric::Population => "population",
            Metric::Households => "households",
            Metric::TotalRevenue => "total_revenue",
            Metric::LocalTaxes => "local_taxes",
            Metric::StateGrants => "state_grants",
            Metric::TerritorialGrants => "territorial_grants",
            Metric::OtherRevenue => "other_revenue",
            Metric::TotalExpenses => "total_expenses",
            Metric::OperatingExpenses => "operating_expenses",
            Metric::InvestmentExpenses => "investment_expenses",
            Metric::DebtCharges => "debt_charges",
            Metric::StaffCosts => "staff_costs",
            Metric::GrossSavings => "gross_savings",
            Metric::TotalDebt => "total_debt",
            Metric::DebtRatio => "debt_ratio",
            Metric::TaxRate => "tax_rate",
            Metric::AgricultureInvestment => "agriculture_investment",
            Metric::FishingInvestment => "fishing_investment",
            Metric::TransportInvestment => "transport_investment",
            Metric::EducationInvestment => "education_investment",
            Metric::HealthInvestment => "health_investment",
            Metric::CultureInvestment => "culture_investment",
        }
    }

    pub fn from_column_name(name: &str) -> Result<Self> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.column_name() == name)
            .ok_or_else(|| CoreError::UnknownColumn(name.to_string()))
    }

    /// Human-readable label used by charts and reports
    pub fn label(self) -> &'static str {
        match self {
            Metric::Population => "Population",
            Metric::Households => "Households",
            Metric::TotalRevenue => "Total revenue",
            Metric::LocalTaxes => "Local taxes",
            Metric::StateGrants => "State grants",
            Metric::TerritorialGrants => "Territorial grants",
            Metric::OtherRevenue => "Other revenue",
            Metric::TotalExpenses => "Total expenses",
            Metric::OperatingExpenses => "Operating",
            Metric::InvestmentExpenses => "Investment",
            Metric::DebtCharges => "Debt charges",
            Metric::StaffCosts => "Staff",
            Metric::GrossSavings => "Gross savings",
            Metric::TotalDebt => "Total debt",
            Metric::DebtRatio => "Debt ratio",
            Metric::TaxRate => "Tax rate",
            Metric::AgricultureInvestment => "Agriculture",
            Metric::FishingInvestment => "Fishing",
            Metric::TransportInvestment => "Transport",
            Metric::EducationInvestment => "Education",
            Metric::HealthInvestment => "Health",
            Metric::CultureInvestment => "Culture",
        }
    }

    pub fn group(self) -> MetricGroup {
        match self {
            Metric::Population | Metric::Households => MetricGroup::Demography,
            Metric::TotalRevenue
            | Metric::LocalTaxes
            | Metric::StateGrants
            | Metric::TerritorialGrants
            | Metric::OtherRevenue => MetricGroup::Revenue,
            Metric::TotalExpenses
            | Metric::OperatingExpenses
            | Metric::InvestmentExpenses
            | Metric::DebtCharges
            | Metric::StaffCosts => MetricGroup::Expense,
            Metric::GrossSavings | Metric::TotalDebt | Metric::DebtRatio | Metric::TaxRate => {
                MetricGroup::FinancialRatio
            }
            Metric::AgricultureInvestment
            | Metric::FishingInvestment
            | Metric::TransportInvestment
            | Metric::EducationInvestment
            | Metric::HealthInvestment
            | Metric::CultureInvestment => MetricGroup::SectorInvestment,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Full header: `year` followed by every metric column.
pub fn header() -> Vec<&'static str> {
    std::iter::once(YEAR_COLUMN)
        .chain(Metric::ALL.iter().map(|m| m.column_name()))
        .collect()
}
