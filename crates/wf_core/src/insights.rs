//! Financial insights
//!
//! Summary statistics over a generated table plus the narrative sections of
//! the console report (profile, timeline, recommendations).

use crate::metrics::Metric;
use crate::registry::{Specialty, SubdivisionConfig};
use crate::shocks::{ShockEvent, YearWindow, CRISIS, OPENING, RECOVERY, SERVICES};
use crate::table::FinancialTable;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralStats {
    pub avg_revenue: f64,
    pub avg_expenses: f64,
    pub avg_savings: f64,
    pub avg_debt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthStats {
    pub revenue_growth_pct: f64,
    pub population_growth_pct: f64,
}

/// Shares as ratio of means, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureStats {
    pub tax_share_pct: f64,
    pub state_share_pct: f64,
    pub territorial_share_pct: f64,
    pub investment_share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtStats {
    pub avg_debt_ratio_pct: f64,
    pub final_debt_ratio_pct: f64,
    pub avg_tax_rate: f64,
}

/// One line of the historical timeline, clipped to the table period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub from: i32,
    pub to: i32,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceInsights {
    pub subdivision: String,
    pub start_year: i32,
    pub end_year: i32,
    pub general: GeneralStats,
    pub growth: GrowthStats,
    pub structure: StructureStats,
    pub debt: DebtStats,
    pub category_label: &'static str,
    pub specialties: String,
    pub timeline: Vec<TimelineEntry>,
    pub recommendations: Vec<&'static str>,
}

/// Narrative periods. Shock windows are reused, except that the pandemic
/// entry covers both crisis years while its shock hits 2020 only.
const TIMELINE: [(&str, YearWindow); 6] = [
    (ShockEvent::InitialDevelopment.label(), OPENING),
    ("Infrastructure investment", YearWindow::Between { from: 2006, to: 2007 }),
    (ShockEvent::FinancialCrisis.label(), CRISIS),
    (ShockEvent::PublicServices.label(), SERVICES),
    (ShockEvent::Pandemic.label(), YearWindow::Between { from: 2020, to: 2021 }),
    (ShockEvent::RecoveryPlan.label(), RECOVERY),
];

const SPECIALTY_RECOMMENDATIONS: [(Specialty, [&str; 2]); 3] = [
    (
        Specialty::Agriculture,
        [
            "Develop subsistence farming and local crops",
            "Modernize traditional farming techniques",
        ],
    ),
    (
        Specialty::Fishing,
        [
            "Modernize small-scale fishing and develop aquaculture",
            "Promote local fishery products",
        ],
    ),
    (
        Specialty::Tourism,
        [
            "Develop eco-tourism and cultural tourism",
            "Showcase cultural and natural heritage",
        ],
    ),
];

const GENERAL_RECOMMENDATIONS: [&str; 4] = [
    "Improve transport and mobility infrastructure",
    "Preserve the environment and biodiversity",
    "Strengthen local public services",
    "Develop renewable energy and energy self-sufficiency",
];

fn share_pct(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    part / whole * 100.0
}

/// Timeline entries overlapping `start..=end`, bounds clipped.
pub fn timeline(start: i32, end: i32) -> Vec<TimelineEntry> {
    TIMELINE
        .iter()
        .filter_map(|&(label, window)| {
            let (from, to) = window.bounds(start);
            let from = from.max(start);
            let to = to.unwrap_or(end).min(end);
            (from <= to).then_some(TimelineEntry { from, to, label })
        })
        .collect()
}

pub fn recommendations(config: &SubdivisionConfig) -> Vec<&'static str> {
    SPECIALTY_RECOMMENDATIONS
        .iter()
        .filter(|(specialty, _)| config.has_specialty(*specialty))
        .flat_map(|(_, lines)| lines.iter().copied())
        .chain(GENERAL_RECOMMENDATIONS)
        .collect()
}

impl FinanceInsights {
    pub fn from_table(subdivision: &str, config: &SubdivisionConfig, table: &FinancialTable) -> Self {
        let years = table.years();
        let avg_revenue = table.mean(Metric::TotalRevenue);
        let avg_expenses = table.mean(Metric::TotalExpenses);

        Self {
            subdivision: subdivision.to_string(),
            start_year: years.start(),
            end_year: years.end(),
            general: GeneralStats {
                avg_revenue,
                avg_expenses,
                avg_savings: table.mean(Metric::GrossSavings),
                avg_debt: table.mean(Metric::TotalDebt),
            },
            growth: GrowthStats {
                revenue_growth_pct: table.growth_pct(Metric::TotalRevenue),
                population_growth_pct: table.growth_pct(Metric::Population),
            },
            structure: StructureStats {
                tax_share_pct: share_pct(table.mean(Metric::LocalTaxes), avg_revenue),
                state_share_pct: share_pct(table.mean(Metric::StateGrants), avg_revenue),
                territorial_share_pct: share_pct(table.mean(Metric::TerritorialGrants), avg_revenue),
                investment_share_pct: share_pct(table.mean(Metric::InvestmentExpenses), avg_expenses),
            },
            debt: DebtStats {
                avg_debt_ratio_pct: table.mean(Metric::DebtRatio) * 100.0,
                final_debt_ratio_pct: table.last(Metric::DebtRatio) * 100.0,
                avg_tax_rate: table.mean(Metric::TaxRate),
            },
            category_label: config.category.display_text(),
            specialties: config.specialty_list(),
            timeline: timeline(years.start(), years.end()),
            recommendations: recommendations(config),
        }
    }
}

impl fmt::Display for FinanceInsights {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "INSIGHTS - {} (Wallis-et-Futuna), {}-{}",
            self.subdivision, self.start_year, self.end_year
        )?;
        writeln!(f, "{}", "=".repeat(60))?;

        writeln!(f, "\n1. GENERAL STATISTICS")?;
        writeln!(f, "Average annual revenue:   {:.2} M€", self.general.avg_revenue)?;
        writeln!(f, "Average annual expenses:  {:.2} M€", self.general.avg_expenses)?;
        writeln!(f, "Average gross savings:    {:.2} M€", self.general.avg_savings)?;
        writeln!(f, "Average debt:             {:.2} M€", self.general.avg_debt)?;

        writeln!(f, "\n2. GROWTH")?;
        writeln!(
            f,
            "Revenue growth ({}-{}):    {:.1}%",
            self.start_year, self.end_year, self.growth.revenue_growth_pct
        )?;
        writeln!(
            f,
            "Population growth ({}-{}): {:.1}%",
            self.start_year, self.end_year, self.growth.population_growth_pct
        )?;

        writeln!(f, "\n3. FINANCIAL STRUCTURE")?;
        writeln!(f, "Local taxes share of revenue:        {:.1}%", self.structure.tax_share_pct)?;
        writeln!(f, "State grants share of revenue:       {:.1}%", self.structure.state_share_pct)?;
        writeln!(
            f,
            "Territorial grants share of revenue: {:.1}%",
            self.structure.territorial_share_pct
        )?;
        writeln!(
            f,
            "Investment share of expenses:        {:.1}%",
            self.structure.investment_share_pct
        )?;

        writeln!(f, "\n4. DEBT AND TAXATION")?;
        writeln!(f, "Average debt ratio: {:.1}%", self.debt.avg_debt_ratio_pct)?;
        writeln!(f, "Final debt ratio:   {:.1}%", self.debt.final_debt_ratio_pct)?;
        writeln!(f, "Average tax rate:   {:.2}", self.debt.avg_tax_rate)?;

        writeln!(f, "\n5. PROFILE OF {}", self.subdivision.to_uppercase())?;
        writeln!(f, "Category:    {}", self.category_label)?;
        writeln!(f, "Specialties: {}", self.specialties)?;

        writeln!(f, "\n6. KEY EVENTS")?;
        for entry in &self.timeline {
            if entry.from == entry.to {
                writeln!(f, "• {}: {}", entry.from, entry.label)?;
            } else {
                writeln!(f, "• {}-{}: {}", entry.from, entry.to, entry.label)?;
            }
        }

        writeln!(f, "\n7. STRATEGIC RECOMMENDATIONS")?;
        for line in &self.recommendations {
            writeln!(f, "• {line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SeriesGenerator;
    use crate::period::YearRange;
    use crate::registry::resolve_config;

    #[test]
    fn test_timeline_full_period() {
        let entries = timeline(2002, 2025);
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0], TimelineEntry { from: 2002, to: 2005, label: "Initial development" });
        assert_eq!(entries[5].to, 2025);
    }

    #[test]
    fn test_timeline_clipped() {
        let entries = timeline(2009, 2012);
        let labels: Vec<_> = entries.iter().map(|e| e.label).collect();
        // The opening period follows the table start
        assert_eq!(
            labels,
            vec!["Initial development", "Global financial crisis", "Public services build-out"]
        );
        assert_eq!(entries[0], TimelineEntry { from: 2009, to: 2012, label: "Initial development" });
        assert_eq!(entries[1].from, 2009);
        assert_eq!(entries[1].to, 2009);
        assert_eq!(entries[2].to, 2012);
    }

    #[test]
    fn test_timeline_matches_shock_labels() {
        let entries = timeline(2002, 2025);
        assert_eq!(entries[2].label, ShockEvent::FinancialCrisis.label());
        assert_eq!(entries[4], TimelineEntry { from: 2020, to: 2021, label: "COVID-19 crisis" });
    }

    #[test]
    fn test_recommendations_follow_specialties() {
        let hihifo = recommendations(&resolve_config("Hihifo"));
        // agriculture + fishing + tourism, then the four general lines
        assert_eq!(hihifo.len(), 10);

        let mata_utu = recommendations(&resolve_config("Mata-Utu"));
        assert_eq!(mata_utu.len(), 6);
        assert_eq!(mata_utu[0], "Develop eco-tourism and cultural tourism");
    }

    #[test]
    fn test_noiseless_insights() {
        let config = resolve_config("Mata-Utu");
        let years = YearRange::new(2002, 2003).unwrap();
        let table = SeriesGenerator::from_seed(config.clone(), years, 1)
            .without_noise()
            .generate_table();
        let insights = FinanceInsights::from_table("Mata-Utu", &config, &table);

        assert!((insights.growth.population_growth_pct - 1.0).abs() < 1e-9);
        // total revenue: 35, 35 × 1.028
        assert!((insights.general.avg_revenue - 35.0 * 1.014).abs() < 1e-9);
        assert!((insights.debt.avg_tax_rate - 0.80).abs() < 1e-12);
        assert_eq!(insights.category_label, "Chief town");
    }

    #[test]
    fn test_report_sections() {
        let config = resolve_config("Alo");
        let table = crate::generator::generate_table(&config, YearRange::default(), Some(5));
        let report = FinanceInsights::from_table("Alo", &config, &table).to_string();
        for heading in [
            "1. GENERAL STATISTICS",
            "2. GROWTH",
            "3. FINANCIAL STRUCTURE",
            "4. DEBT AND TAXATION",
            "5. PROFILE OF ALO",
            "6. KEY EVENTS",
            "7. STRATEGIC RECOMMENDATIONS",
        ] {
            assert!(report.contains(heading), "missing {heading}");
        }
        assert!(report.contains("• 2022-2025: Post-COVID recovery plan"));
    }
}
