//! Historical shock adjustments
//!
//! Stylized external events layered on top of the smooth generated trend.
//! Each rule scales one column inside an inclusive year window. Rules may
//! overlap; every matching rule for a row applies independently.

use crate::metrics::Metric;
use crate::table::FinancialTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inclusive year predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearWindow {
    /// First `span + 1` years of the table (`start..=start + span`)
    Opening { span: i32 },
    Between { from: i32, to: i32 },
    Exactly(i32),
    Since(i32),
}

impl YearWindow {
    /// `start` is the first year of the table being adjusted.
    pub fn contains(&self, year: i32, start: i32) -> bool {
        match *self {
            YearWindow::Opening { span } => year >= start && year <= start + span,
            YearWindow::Between { from, to } => year >= from && year <= to,
            YearWindow::Exactly(y) => year == y,
            YearWindow::Since(y) => year >= y,
        }
    }

    /// Concrete bounds for a table starting at `start`; `None` end means open.
    pub fn bounds(&self, start: i32) -> (i32, Option<i32>) {
        match *self {
            YearWindow::Opening { span } => (start, Some(start + span)),
            YearWindow::Between { from, to } => (from, Some(to)),
            YearWindow::Exactly(y) => (y, Some(y)),
            YearWindow::Since(y) => (y, None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShockEvent {
    InitialDevelopment,
    FinancialCrisis,
    PublicServices,
    Pandemic,
    RecoveryPlan,
}

impl ShockEvent {
    pub const fn label(&self) -> &'static str {
        match self {
            ShockEvent::InitialDevelopment => "Initial development",
            ShockEvent::FinancialCrisis => "Global financial crisis",
            ShockEvent::PublicServices => "Public services build-out",
            ShockEvent::Pandemic => "COVID-19 crisis",
            ShockEvent::RecoveryPlan => "Post-COVID recovery plan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShockRule {
    pub event: ShockEvent,
    pub window: YearWindow,
    pub metric: Metric,
    pub factor: f64,
}

impl ShockRule {
    pub const fn new(event: ShockEvent, window: YearWindow, metric: Metric, factor: f64) -> Self {
        Self { event, window, metric, factor }
    }
}

pub(crate) const OPENING: YearWindow = YearWindow::Opening { span: 3 };
pub(crate) const CRISIS: YearWindow = YearWindow::Between { from: 2008, to: 2009 };
pub(crate) const SERVICES: YearWindow = YearWindow::Between { from: 2010, to: 2015 };
pub(crate) const PANDEMIC: YearWindow = YearWindow::Exactly(2020);
pub(crate) const RECOVERY: YearWindow = YearWindow::Since(2022);

/// Built-in rule set, in application order.
pub const HISTORICAL_SHOCKS: [ShockRule; 12] = {
    use Metric::*;
    use ShockEvent::*;
    [
        ShockRule::new(InitialDevelopment, OPENING, AgricultureInvestment, 1.4),
        ShockRule::new(InitialDevelopment, OPENING, FishingInvestment, 1.3),
        ShockRule::new(FinancialCrisis, CRISIS, TotalRevenue, 0.94),
        ShockRule::new(FinancialCrisis, CRISIS, InvestmentExpenses, 0.85),
        ShockRule::new(FinancialCrisis, CRISIS, OtherRevenue, 0.88),
        ShockRule::new(PublicServices, SERVICES, EducationInvestment, 1.3),
        ShockRule::new(PublicServices, SERVICES, HealthInvestment, 1.4),
        ShockRule::new(Pandemic, PANDEMIC, OtherRevenue, 0.78),
        ShockRule::new(Pandemic, PANDEMIC, StateGrants, 1.15),
        ShockRule::new(RecoveryPlan, RECOVERY, InvestmentExpenses, 1.14),
        ShockRule::new(RecoveryPlan, RECOVERY, AgricultureInvestment, 1.12),
        ShockRule::new(RecoveryPlan, RECOVERY, FishingInvestment, 1.10),
    ]
};

/// Ordered list of shock rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShockSchedule {
    rules: Vec<ShockRule>,
}

impl ShockSchedule {
    pub fn new(rules: Vec<ShockRule>) -> Self {
        Self { rules }
    }

    pub fn historical() -> Self {
        Self::new(HISTORICAL_SHOCKS.to_vec())
    }

    /// No adjustments.
    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    pub fn rules(&self) -> &[ShockRule] {
        &self.rules
    }

    /// Combined factor the schedule applies to `metric` in `year`.
    pub fn factor_for(&self, year: i32, start: i32, metric: Metric) -> f64 {
        self.rules
            .iter()
            .filter(|r| r.metric == metric && r.window.contains(year, start))
            .map(|r| r.factor)
            .product()
    }

    /// Scale matching cells in place, one pass over the rows in year order.
    ///
    /// Must be applied exactly once per table.
    pub fn apply(&self, table: &mut FinancialTable) -> usize {
        let start = table.years().start();
        let mut applied = 0;

        for row in table.rows_mut() {
            for rule in &self.rules {
                if rule.window.contains(row.year, start) {
                    row.scale(rule.metric, rule.factor);
                    applied += 1;
                }
            }
        }

        debug!(applied, rules = self.rules.len(), "shock pass complete");
        applied
    }
}

impl Default for ShockSchedule {
    fn default() -> Self {
        Self::historical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::YearRange;
    use crate::table::YearlySeries;

    fn flat_table(start: i32, end: i32) -> FinancialTable {
        let years = YearRange::new(start, end).unwrap();
        let series: Vec<YearlySeries> = Metric::ALL
            .iter()
            .map(|&metric| YearlySeries { metric, values: vec![1.0; years.len()] })
            .collect();
        FinancialTable::from_series(years, &series).unwrap()
    }

    #[test]
    fn test_crisis_boundary() {
        let mut table = flat_table(2002, 2025);
        ShockSchedule::historical().apply(&mut table);

        assert_eq!(table.value(2007, Metric::TotalRevenue), Some(1.0));
        assert_eq!(table.value(2007, Metric::InvestmentExpenses), Some(1.0));
        assert_eq!(table.value(2008, Metric::TotalRevenue), Some(0.94));
        assert_eq!(table.value(2009, Metric::InvestmentExpenses), Some(0.85));
        assert_eq!(table.value(2010, Metric::OtherRevenue), Some(1.0));
    }

    #[test]
    fn test_opening_window_is_relative_to_start() {
        let mut table = flat_table(2002, 2010);
        ShockSchedule::historical().apply(&mut table);
        assert_eq!(table.value(2005, Metric::AgricultureInvestment), Some(1.4));
        assert_eq!(table.value(2006, Metric::AgricultureInvestment), Some(1.0));

        let mut later = flat_table(2004, 2010);
        ShockSchedule::historical().apply(&mut later);
        assert_eq!(later.value(2007, Metric::FishingInvestment), Some(1.3));
        assert_eq!(later.value(2008, Metric::FishingInvestment), Some(1.0));
    }

    #[test]
    fn test_pandemic_year_only() {
        let mut table = flat_table(2019, 2021);
        ShockSchedule::historical().apply(&mut table);
        assert_eq!(table.value(2019, Metric::StateGrants), Some(1.0));
        assert_eq!(table.value(2020, Metric::StateGrants), Some(1.15));
        assert_eq!(table.value(2020, Metric::OtherRevenue), Some(0.78));
        assert_eq!(table.value(2021, Metric::OtherRevenue), Some(1.0));
    }

    #[test]
    fn test_overlapping_rules_compound() {
        // Opening window reaching into the recovery years
        let mut table = flat_table(2022, 2025);
        ShockSchedule::historical().apply(&mut table);
        let agri = table.value(2023, Metric::AgricultureInvestment).unwrap();
        assert!((agri - 1.4 * 1.12).abs() < 1e-12);
        assert!(
            (ShockSchedule::historical().factor_for(2023, 2022, Metric::AgricultureInvestment)
                - 1.4 * 1.12)
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn test_applied_count() {
        let mut table = flat_table(2002, 2025);
        let applied = ShockSchedule::historical().apply(&mut table);
        // opening 4×2, crisis 2×3, services 6×2, pandemic 1×2, recovery 4×3
        assert_eq!(applied, 8 + 6 + 12 + 2 + 12);
    }

    #[test]
    fn test_empty_schedule_is_noop() {
        let mut table = flat_table(2002, 2025);
        let before = table.clone();
        assert_eq!(ShockSchedule::none().apply(&mut table), 0);
        assert_eq!(table, before);
    }

    #[test]
    fn test_window_bounds() {
        assert_eq!(OPENING.bounds(2002), (2002, Some(2005)));
        assert_eq!(RECOVERY.bounds(2002), (2022, None));
    }
}
