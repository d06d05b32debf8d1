//! Dashboard panel data
//!
//! The eight-panel finance dashboard, as data: which columns each panel
//! plots, how, and in which colour. Rendering is left to the consumer.

use crate::metrics::Metric;
use crate::table::FinancialTable;
use serde::Serialize;

/// Shared palette.
pub const PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#F9A602", "#6A0572", "#AB83A1", "#5CAB7D", "#2A9D8F",
    "#E76F51", "#264653",
];

const DARK_BLUE: &str = "#264653";
const TEAL: &str = "#2A9D8F";
const SKY: &str = "#45B7D1";
const ORANGE: &str = "#F9A602";
const PURPLE: &str = "#6A0572";
const CORAL: &str = "#E76F51";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Line,
    StackedBar,
    /// Bars on the primary axis, a line on the secondary axis
    DualAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSpec {
    pub metric: Metric,
    pub color: &'static str,
    pub axis: Axis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSpec {
    pub title: &'static str,
    pub kind: PanelKind,
    pub y_label: &'static str,
    pub series: &'static [SeriesSpec],
}

const fn primary(metric: Metric, color: &'static str) -> SeriesSpec {
    SeriesSpec { metric, color, axis: Axis::Primary }
}

const fn secondary(metric: Metric, color: &'static str) -> SeriesSpec {
    SeriesSpec { metric, color, axis: Axis::Secondary }
}

const SECTORS: &[SeriesSpec] = &[
    primary(Metric::AgricultureInvestment, DARK_BLUE),
    primary(Metric::FishingInvestment, TEAL),
    primary(Metric::TransportInvestment, CORAL),
    primary(Metric::EducationInvestment, ORANGE),
    primary(Metric::HealthInvestment, PURPLE),
];

/// Panels in dashboard order (4 rows × 2 columns).
pub const DASHBOARD: [PanelSpec; 8] = [
    PanelSpec {
        title: "Revenue and expenses (M€)",
        kind: PanelKind::Line,
        y_label: "Amount (M€)",
        series: &[primary(Metric::TotalRevenue, TEAL), primary(Metric::TotalExpenses, CORAL)],
    },
    PanelSpec {
        title: "Revenue structure (M€)",
        kind: PanelKind::StackedBar,
        y_label: "Amount (M€)",
        series: &[
            primary(Metric::LocalTaxes, DARK_BLUE),
            primary(Metric::StateGrants, TEAL),
            primary(Metric::TerritorialGrants, SKY),
            primary(Metric::OtherRevenue, CORAL),
        ],
    },
    PanelSpec {
        title: "Expense structure (M€)",
        kind: PanelKind::StackedBar,
        y_label: "Amount (M€)",
        series: &[
            primary(Metric::OperatingExpenses, DARK_BLUE),
            primary(Metric::InvestmentExpenses, TEAL),
            primary(Metric::DebtCharges, CORAL),
            primary(Metric::StaffCosts, ORANGE),
        ],
    },
    PanelSpec {
        title: "Investments (M€)",
        kind: PanelKind::Line,
        y_label: "Amount (M€)",
        series: SECTORS,
    },
    PanelSpec {
        title: "Debt and debt ratio",
        kind: PanelKind::DualAxis,
        y_label: "Debt (M€)",
        series: &[primary(Metric::TotalDebt, DARK_BLUE), secondary(Metric::DebtRatio, CORAL)],
    },
    PanelSpec {
        title: "Performance indicators",
        kind: PanelKind::DualAxis,
        y_label: "Gross savings (M€)",
        series: &[primary(Metric::GrossSavings, TEAL), secondary(Metric::TaxRate, ORANGE)],
    },
    PanelSpec {
        title: "Demography",
        kind: PanelKind::DualAxis,
        y_label: "Population",
        series: &[primary(Metric::Population, DARK_BLUE), secondary(Metric::Households, CORAL)],
    },
    PanelSpec {
        title: "Investments by sector (M€)",
        kind: PanelKind::StackedBar,
        y_label: "Amount (M€)",
        series: SECTORS,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub column: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub axis: Axis,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelData {
    pub title: &'static str,
    pub kind: PanelKind,
    pub y_label: &'static str,
    pub series: Vec<SeriesData>,
}

impl PanelData {
    /// Running totals per year, bottom to top, for stacked bars.
    pub fn stacked_tops(&self) -> Vec<f64> {
        let len = self.series.first().map(|s| s.values.len()).unwrap_or(0);
        let mut tops = vec![0.0; len];
        for s in &self.series {
            for (top, v) in tops.iter_mut().zip(&s.values) {
                *top += v;
            }
        }
        tops
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub title: String,
    pub years: Vec<i32>,
    pub panels: Vec<PanelData>,
}

impl ChartSet {
    pub fn from_table(subdivision: &str, table: &FinancialTable) -> Self {
        let years = table.years();
        let panels = DASHBOARD
            .iter()
            .map(|spec| PanelData {
                title: spec.title,
                kind: spec.kind,
                y_label: spec.y_label,
                series: spec
                    .series
                    .iter()
                    .map(|s| SeriesData {
                        column: s.metric.column_name(),
                        label: s.metric.label(),
                        color: s.color,
                        axis: s.axis,
                        values: table.column(s.metric),
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: format!(
                "Accounts of {} - Wallis-et-Futuna ({}-{})",
                subdivision,
                years.start(),
                years.end()
            ),
            years: table.year_column(),
            panels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_table;
    use crate::period::YearRange;
    use crate::registry::resolve_config;

    #[test]
    fn test_dashboard_colors_in_palette() {
        for panel in DASHBOARD.iter() {
            for s in panel.series {
                assert!(PALETTE.contains(&s.color), "{} not in palette", s.color);
            }
        }
    }

    #[test]
    fn test_dual_axis_panels_have_secondary_series() {
        for panel in DASHBOARD.iter().filter(|p| p.kind == PanelKind::DualAxis) {
            let secondary = panel.series.iter().filter(|s| s.axis == Axis::Secondary).count();
            assert_eq!(secondary, 1, "{}", panel.title);
        }
    }

    #[test]
    fn test_chart_set_from_table() {
        let table = generate_table(&resolve_config("Mua"), YearRange::default(), Some(11));
        let charts = ChartSet::from_table("Mua", &table);

        assert_eq!(charts.panels.len(), 8);
        assert_eq!(charts.years.len(), 24);
        assert!(charts.title.contains("Mua"));
        for panel in &charts.panels {
            for s in &panel.series {
                assert_eq!(s.values.len(), 24);
            }
        }

        let revenue = &charts.panels[1];
        let tops = revenue.stacked_tops();
        let expected = table.rows()[0].get(Metric::LocalTaxes)
            + table.rows()[0].get(Metric::StateGrants)
            + table.rows()[0].get(Metric::TerritorialGrants)
            + table.rows()[0].get(Metric::OtherRevenue);
        assert!((tops[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_serializes_to_json() {
        let table = generate_table(&resolve_config("Alo"), YearRange::new(2002, 2004).unwrap(), Some(1));
        let json = serde_json::to_value(ChartSet::from_table("Alo", &table)).unwrap();
        assert_eq!(json["panels"][4]["kind"], "dual_axis");
        assert_eq!(json["panels"][4]["series"][1]["axis"], "secondary");
        assert_eq!(json["panels"][0]["series"][0]["column"], "total_revenue");
    }
}
