//! # wf_core - Synthetic Municipal Finance Engine
//!
//! Generates a plausible yearly finance dataset for the circumscriptions of
//! Wallis-et-Futuna: demography, revenue, expenses, debt and sector
//! investment, 2002-2025 by default.
//!
//! ## Pipeline
//! 1. [`resolve_config`] - subdivision name → parameter record
//! 2. [`SeriesGenerator`] - one series per metric (trend × cycle × specialty × noise)
//! 3. [`ShockSchedule`] - historical event adjustments over fixed year windows
//!
//! Same seed = same table. Without a seed, noise comes from OS entropy.

// Constant tables are built through const fns with many scalar arguments
#![allow(clippy::too_many_arguments)]

pub mod charts;
pub mod error;
pub mod generator;
pub mod insights;
pub mod metrics;
pub mod period;
pub mod profile;
pub mod registry;
pub mod settings;
pub mod shocks;
pub mod table;

pub use charts::{ChartSet, PanelData, PanelKind, DASHBOARD, PALETTE};
pub use error::{CoreError, Result};
pub use generator::{generate_table, SeriesGenerator};
pub use insights::FinanceInsights;
pub use metrics::{Metric, MetricGroup, YEAR_COLUMN};
pub use period::YearRange;
pub use profile::{MetricProfile, PROFILES};
pub use registry::{
    builtin_registry, resolve_config, Category, Registry, Specialty, SubdivisionConfig,
    DEFAULT_KEY, FALLBACK_SUBDIVISION,
};
pub use settings::{RunSettings, SETTINGS_PATH_ENV};
pub use shocks::{ShockRule, ShockSchedule, YearWindow, HISTORICAL_SHOCKS};
pub use table::{FinancialTable, YearRow, YearlySeries};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
