//! Console rendering: table preview and subdivision listing.

use std::fmt::Write as _;
use wf_core::{FinancialTable, Metric, Registry, YEAR_COLUMN};

/// Rows shown by [`format_preview`].
pub const PREVIEW_ROWS: usize = 5;

/// Columns shown after `year`.
pub const PREVIEW_COLUMNS: [Metric; 4] = [
    Metric::Population,
    Metric::TotalRevenue,
    Metric::TotalExpenses,
    Metric::TotalDebt,
];

const WIDTH: usize = 15;

/// First [`PREVIEW_ROWS`] years as a fixed-width text table.
pub fn format_preview(table: &FinancialTable) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:>6}", YEAR_COLUMN);
    for metric in PREVIEW_COLUMNS {
        let _ = write!(out, "{:>WIDTH$}", metric.column_name());
    }
    out.push('\n');

    for row in table.rows().iter().take(PREVIEW_ROWS) {
        let _ = write!(out, "{:>6}", row.year);
        for metric in PREVIEW_COLUMNS {
            let _ = write!(out, "{:>WIDTH$.2}", row.get(metric));
        }
        out.push('\n');
    }
    out
}

/// Numbered listing of the registry, one subdivision per line.
pub fn format_listing(registry: &Registry) -> String {
    let mut out = String::new();
    for (i, name) in registry.names().into_iter().enumerate() {
        let config = registry.lookup(name);
        let _ = writeln!(
            out,
            "{:>2}. {:<10} {:<18} {}",
            i + 1,
            name,
            config.category.display_text(),
            config.specialty_list()
        );
    }
    out
}
