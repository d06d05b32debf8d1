//! Yearly series and the assembled financial table.

use crate::error::{CoreError, Result};
use crate::metrics::Metric;
use crate::period::YearRange;
use serde::{Deserialize, Serialize};

/// Values of one metric, one per year of the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySeries {
    pub metric: Metric,
    pub values: Vec<f64>,
}

/// One row of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRow {
    pub year: i32,
    pub values: [f64; Metric::COUNT],
}

impl YearRow {
    pub fn get(&self, metric: Metric) -> f64 {
        self.values[metric.index()]
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        self.values[metric.index()] = value;
    }

    pub fn scale(&mut self, metric: Metric, factor: f64) {
        self.values[metric.index()] *= factor;
    }
}

/// One row per year, one column per metric, chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct FinancialTable {
    years: YearRange,
    rows: Vec<YearRow>,
}

/// Unchecked wire form; deserialization goes through [`FinancialTable::from_rows`].
#[derive(Deserialize)]
struct RawTable {
    years: YearRange,
    rows: Vec<YearRow>,
}

impl TryFrom<RawTable> for FinancialTable {
    type Error = CoreError;

    fn try_from(raw: RawTable) -> Result<Self> {
        let table = Self::from_rows(raw.rows)?;
        if table.len() != raw.years.len() {
            return Err(CoreError::RowCountMismatch {
                expected: raw.years.len(),
                found: table.len(),
            });
        }
        if table.years != raw.years {
            return Err(CoreError::YearGap {
                expected: raw.years.start(),
                found: table.years.start(),
            });
        }
        Ok(table)
    }
}

impl FinancialTable {
    /// Assemble a table from per-metric series.
    ///
    /// Every metric must appear exactly once, covering the whole range.
    pub fn from_series(years: YearRange, series: &[YearlySeries]) -> Result<Self> {
        let mut table = Self::blank(years);
        let mut seen = [false; Metric::COUNT];

        for s in series {
            if s.values.len() != table.len() {
                return Err(CoreError::RowCountMismatch {
                    expected: table.len(),
                    found: s.values.len(),
                });
            }
            if std::mem::replace(&mut seen[s.metric.index()], true) {
                return Err(CoreError::DuplicateColumn(s.metric.column_name().to_string()));
            }
            table.fill_column(s);
        }

        if let Some(missing) = Metric::ALL.iter().find(|m| !seen[m.index()]) {
            return Err(CoreError::MissingColumn(missing.column_name().to_string()));
        }
        Ok(table)
    }

    /// All-zero table covering `years`.
    pub(crate) fn blank(years: YearRange) -> Self {
        let rows = years
            .years()
            .map(|year| YearRow { year, values: [0.0; Metric::COUNT] })
            .collect();
        Self { years, rows }
    }

    /// Copy a full-length series into its column.
    pub(crate) fn fill_column(&mut self, series: &YearlySeries) {
        debug_assert_eq!(series.values.len(), self.rows.len());
        for (row, value) in self.rows.iter_mut().zip(&series.values) {
            row.set(series.metric, *value);
        }
    }

    /// Build from already assembled rows, checking chronology and gaps.
    pub fn from_rows(rows: Vec<YearRow>) -> Result<Self> {
        let (first, last) = match (rows.first(), rows.last()) {
            (Some(f), Some(l)) => (f.year, l.year),
            _ => return Err(CoreError::RowCountMismatch { expected: 1, found: 0 }),
        };
        let years = YearRange::new(first, last)?;

        for (expected, row) in years.years().zip(&rows) {
            if row.year != expected {
                return Err(CoreError::YearGap { expected, found: row.year });
            }
        }
        if rows.len() != years.len() {
            return Err(CoreError::RowCountMismatch {
                expected: years.len(),
                found: rows.len(),
            });
        }

        Ok(Self { years, rows })
    }

    pub fn years(&self) -> YearRange {
        self.years
    }

    pub fn rows(&self) -> &[YearRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [YearRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, year: i32) -> Option<&YearRow> {
        self.years.index_of(year).map(|i| &self.rows[i])
    }

    pub fn value(&self, year: i32, metric: Metric) -> Option<f64> {
        self.row(year).map(|r| r.get(metric))
    }

    pub fn column(&self, metric: Metric) -> Vec<f64> {
        self.rows.iter().map(|r| r.get(metric)).collect()
    }

    pub fn year_column(&self) -> Vec<i32> {
        self.rows.iter().map(|r| r.year).collect()
    }

    pub fn mean(&self, metric: Metric) -> f64 {
        let sum: f64 = self.rows.iter().map(|r| r.get(metric)).sum();
        sum / self.rows.len() as f64
    }

    pub fn first(&self, metric: Metric) -> f64 {
        self.rows[0].get(metric)
    }

    pub fn last(&self, metric: Metric) -> f64 {
        self.rows[self.rows.len() - 1].get(metric)
    }

    /// First → last year growth, in percent.
    pub fn growth_pct(&self, metric: Metric) -> f64 {
        (self.last(metric) / self.first(metric) - 1.0) * 100.0
    }
}
