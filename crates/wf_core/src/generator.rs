//! Series generator
//!
//! Produces every metric column from its [`MetricProfile`], then runs the
//! shock pass over the assembled table.
//!
//! ## Randomness
//! - Noise is `1 + σ·z`, `z ~ N(0, 1)`, one draw per (metric, year)
//! - Metrics are drawn in column order, years in chronological order, so the
//!   same seed always reproduces the same table
//! - Noiseless metrics (σ = 0) and a zero noise scale consume no draws

use crate::metrics::Metric;
use crate::period::YearRange;
use crate::profile::{profile, MetricProfile};
use crate::registry::SubdivisionConfig;
use crate::shocks::ShockSchedule;
use crate::table::{FinancialTable, YearlySeries};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use tracing::{debug, info};

pub struct SeriesGenerator<R: Rng = ChaCha8Rng> {
    config: SubdivisionConfig,
    years: YearRange,
    rng: R,
    /// Multiplies every profile's σ; 0.0 disables noise
    noise_scale: f64,
    shocks: ShockSchedule,
}

impl SeriesGenerator<ChaCha8Rng> {
    /// Reproducible generator.
    pub fn from_seed(config: SubdivisionConfig, years: YearRange, seed: u64) -> Self {
        Self::new(config, years, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Entropy-seeded generator; output differs run to run.
    pub fn from_entropy(config: SubdivisionConfig, years: YearRange) -> Self {
        Self::new(config, years, ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> SeriesGenerator<R> {
    pub fn new(config: SubdivisionConfig, years: YearRange, rng: R) -> Self {
        Self {
            config,
            years,
            rng,
            noise_scale: 1.0,
            shocks: ShockSchedule::historical(),
        }
    }

    pub fn with_noise_scale(mut self, noise_scale: f64) -> Self {
        self.noise_scale = noise_scale;
        self
    }

    /// Deterministic trend only.
    pub fn without_noise(self) -> Self {
        self.with_noise_scale(0.0)
    }

    pub fn with_shocks(mut self, shocks: ShockSchedule) -> Self {
        self.shocks = shocks;
        self
    }

    pub fn config(&self) -> &SubdivisionConfig {
        &self.config
    }

    pub fn years(&self) -> YearRange {
        self.years
    }

    fn noise(&mut self, sigma: f64) -> f64 {
        if sigma == 0.0 {
            return 1.0;
        }
        let z: f64 = StandardNormal.sample(&mut self.rng);
        1.0 + sigma * z
    }

    fn series_for(&mut self, p: &MetricProfile) -> YearlySeries {
        let sigma = p.noise_sd * self.noise_scale;
        let mut values = Vec::with_capacity(self.years.len());

        for (i, year) in self.years.years().enumerate() {
            let expected = p.expected(&self.config, i, year);
            values.push(expected * self.noise(sigma));
        }

        debug!(metric = %p.metric, sigma, "series generated");
        YearlySeries { metric: p.metric, values }
    }

    /// One metric over the whole range, before shocks.
    pub fn generate_series(&mut self, metric: Metric) -> YearlySeries {
        self.series_for(profile(metric))
    }

    /// Every metric in column order, then the shock pass.
    pub fn generate_table(&mut self) -> FinancialTable {
        let mut table = FinancialTable::blank(self.years);

        for metric in Metric::ALL {
            let series = self.generate_series(metric);
            table.fill_column(&series);
        }

        let adjusted = self.shocks.apply(&mut table);

        info!(
            start = self.years.start(),
            end = self.years.end(),
            rows = table.len(),
            adjusted,
            "financial table generated"
        );
        table
    }
}

/// Generate a table with the historical shocks.
///
/// `seed = None` draws from OS entropy.
pub fn generate_table(
    config: &SubdivisionConfig,
    years: YearRange,
    seed: Option<u64>,
) -> FinancialTable {
    match seed {
        Some(seed) => SeriesGenerator::from_seed(config.clone(), years, seed).generate_table(),
        None => SeriesGenerator::from_entropy(config.clone(), years).generate_table(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{resolve_config, DEFAULT_KEY};

    fn noiseless(name: &str, start: i32, end: i32) -> SeriesGenerator {
        let years = YearRange::new(start, end).unwrap();
        SeriesGenerator::from_seed(resolve_config(name), years, 0).without_noise()
    }

    #[test]
    fn test_row_count_and_columns() {
        let table = generate_table(&resolve_config("Hahake"), YearRange::default(), Some(7));
        assert_eq!(table.len(), 24);
        assert_eq!(table.rows()[0].year, 2002);
        assert_eq!(table.rows()[23].year, 2025);
        for row in table.rows() {
            assert_eq!(row.values.len(), Metric::COUNT);
            assert!(row.values.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_same_seed_same_table() {
        let config = resolve_config("Sigave");
        let a = generate_table(&config, YearRange::default(), Some(42));
        let b = generate_table(&config, YearRange::default(), Some(42));
        let c = generate_table(&config, YearRange::default(), Some(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_chief_town_end_to_end() {
        let table = noiseless("Mata-Utu", 2002, 2003).generate_table();

        assert_eq!(table.len(), 2);
        assert_eq!(table.value(2002, Metric::Population), Some(1200.0));
        let pop_2003 = table.value(2003, Metric::Population).unwrap();
        assert!((pop_2003 - 1200.0 * 1.01).abs() < 1e-9);

        // Mata-Utu has neither agriculture nor fishing: 35 × 0.07 × 0.8, 35 × 0.06 × 0.7
        let agri = table.value(2002, Metric::AgricultureInvestment).unwrap();
        let fish = table.value(2002, Metric::FishingInvestment).unwrap();
        assert!((agri - 35.0 * 0.07 * 0.8 * 1.4).abs() < 1e-9);
        assert!((fish - 35.0 * 0.06 * 0.7 * 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_cycle_year_multiplier() {
        let mut gen = noiseless("Hahake", 2002, 2025);
        let series = gen.generate_series(Metric::CultureInvestment);
        let base = 30.0 * 0.04 * 1.6;
        // 2016 is a culture cycle year (index 14), 2015/2017 are not
        let trend = |i: usize| base * (1.0 + 0.023 * i as f64);
        assert!((series.values[13] - trend(13)).abs() < 1e-9);
        assert!((series.values[14] - trend(14) * 1.7).abs() < 1e-9);
        assert!((series.values[15] - trend(15)).abs() < 1e-9);
        assert!(series.values[14] > series.values[13]);
        assert!(series.values[14] > series.values[15]);
    }

    #[test]
    fn test_dip_year() {
        let mut gen = noiseless(DEFAULT_KEY, 2002, 2025);
        let series = gen.generate_series(Metric::TotalDebt);
        let base = 30.0 * 0.75;
        assert!((series.values[4] - base * 1.25).abs() < 1e-9); // 2006
        assert!((series.values[7] - base * 0.92).abs() < 1e-9); // 2009
        assert!((series.values[5] - base).abs() < 1e-9); // 2007
    }

    #[test]
    fn test_ratio_trend_threshold() {
        let mut gen = noiseless("Mua", 2002, 2025);
        let ratio = gen.generate_series(Metric::DebtRatio);
        assert!((ratio.values[0] - 0.70).abs() < 1e-12);
        assert!((ratio.values[8] - 0.70).abs() < 1e-12); // 2010
        assert!((ratio.values[23] - 0.70 * (1.0 - 0.01 * 15.0)).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_positive_at_latest_year() {
        let table = noiseless("Mua", 2090, crate::period::LATEST_YEAR).generate_table();
        // 0.70 × (1 − 0.01 × 90)
        let last = table.value(2100, Metric::DebtRatio).unwrap();
        assert!((last - 0.07).abs() < 1e-12);
        assert!(table.rows().iter().all(|r| r.get(Metric::DebtRatio) > 0.0));

        assert!(YearRange::new(2150, 2150).is_err());
    }

    #[test]
    fn test_population_has_no_noise() {
        let years = YearRange::default();
        let mut noisy = SeriesGenerator::from_seed(resolve_config("Alo"), years, 3);
        let mut quiet = SeriesGenerator::from_seed(resolve_config("Alo"), years, 3).without_noise();
        assert_eq!(
            noisy.generate_series(Metric::Population),
            quiet.generate_series(Metric::Population)
        );
    }

    #[test]
    fn test_shocks_can_be_disabled() {
        let years = YearRange::new(2002, 2003).unwrap();
        let table = SeriesGenerator::from_seed(resolve_config("Mata-Utu"), years, 0)
            .without_noise()
            .with_shocks(ShockSchedule::none())
            .generate_table();
        let agri = table.value(2002, Metric::AgricultureInvestment).unwrap();
        assert!((agri - 35.0 * 0.07 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_plausibility_under_noise() {
        for seed in 0..20 {
            let table = generate_table(&resolve_config("Hihifo"), YearRange::default(), Some(seed));
            for row in table.rows() {
                assert!(row.get(Metric::Population) > 0.0);
                assert!(row.get(Metric::Households) > 0.0);
                assert!(row.get(Metric::DebtRatio) > 0.0);
                assert!(row.get(Metric::TaxRate) > 0.0);
            }
        }
    }
}
