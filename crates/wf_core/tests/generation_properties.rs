//! Structural and statistical properties of generated tables.

use proptest::prelude::*;
use wf_core::{
    builtin_registry, generate_table, resolve_config, FinancialTable, Metric, SeriesGenerator,
    ShockSchedule, YearRange, DEFAULT_KEY, PROFILES,
};

fn subdivision_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Mata-Utu".to_string()),
        Just("Hahake".to_string()),
        Just("Hihifo".to_string()),
        Just("Mua".to_string()),
        Just("Sigave".to_string()),
        Just("Alo".to_string()),
        Just(DEFAULT_KEY.to_string()),
        "[a-z]{1,12}",
    ]
}

fn range_strategy() -> impl Strategy<Value = YearRange> {
    (1990i32..=2030, 0i32..=40).prop_map(|(start, span)| YearRange::new(start, start + span).unwrap())
}

fn noiseless_table(name: &str, years: YearRange, shocks: ShockSchedule) -> FinancialTable {
    SeriesGenerator::from_seed(resolve_config(name), years, 0)
        .without_noise()
        .with_shocks(shocks)
        .generate_table()
}

proptest! {
    /// Property: one row per year, chronological, every cell finite
    #[test]
    fn prop_table_shape(name in subdivision_strategy(), years in range_strategy(), seed in any::<u64>()) {
        let table = generate_table(&resolve_config(&name), years, Some(seed));
        prop_assert_eq!(table.len(), (years.end() - years.start() + 1) as usize);
        for (row, year) in table.rows().iter().zip(years.years()) {
            prop_assert_eq!(row.year, year);
            prop_assert!(row.values.iter().all(|v| v.is_finite()));
        }
    }

    /// Property: population and households are noiseless and strictly positive
    #[test]
    fn prop_demography_positive(name in subdivision_strategy(), years in range_strategy(), seed in any::<u64>()) {
        let table = generate_table(&resolve_config(&name), years, Some(seed));
        for row in table.rows() {
            prop_assert!(row.get(Metric::Population) > 0.0);
            prop_assert!(row.get(Metric::Households) > 0.0);
        }
    }

    /// Property: generation is a pure function of (config, range, seed)
    #[test]
    fn prop_seed_determinism(name in subdivision_strategy(), seed in any::<u64>()) {
        let config = resolve_config(&name);
        let a = generate_table(&config, YearRange::default(), Some(seed));
        let b = generate_table(&config, YearRange::default(), Some(seed));
        prop_assert_eq!(a, b);
    }

    /// Property: unknown names behave exactly like the default record
    #[test]
    fn prop_unknown_names_fall_back(name in "[a-z]{1,12}") {
        prop_assume!(!builtin_registry().contains(&name));
        prop_assert_eq!(resolve_config(&name), resolve_config(DEFAULT_KEY));
    }

    /// Property: with noise off, the shock pass only ever rescales by the
    /// combined factor of the rules matching that cell
    #[test]
    fn prop_shock_factor_matches_rules(name in subdivision_strategy(), years in range_strategy()) {
        let schedule = ShockSchedule::historical();
        let raw = noiseless_table(&name, years, ShockSchedule::none());
        let shocked = noiseless_table(&name, years, schedule.clone());

        for (before, after) in raw.rows().iter().zip(shocked.rows()) {
            for metric in Metric::ALL {
                let factor = schedule.factor_for(before.year, years.start(), metric);
                let expected = before.get(metric) * factor;
                prop_assert!((after.get(metric) - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            }
        }
    }
}

#[test]
fn noiseless_table_matches_profiles() {
    let config = resolve_config("Hihifo");
    let years = YearRange::default();
    let table = noiseless_table("Hihifo", years, ShockSchedule::none());

    for (i, row) in table.rows().iter().enumerate() {
        for p in PROFILES.iter() {
            let expected = p.expected(&config, i, row.year);
            assert!(
                (row.get(p.metric) - expected).abs() < 1e-9,
                "{} in {}",
                p.metric,
                row.year
            );
        }
    }
}

#[test]
fn noise_stays_near_trend_on_average() {
    // Mean of Normal(1, σ) noise over many seeds stays close to 1
    let config = resolve_config("Mua");
    let years = YearRange::new(2003, 2003).unwrap();
    let expected = PROFILES[Metric::LocalTaxes.index()].expected(&config, 0, 2003);

    let n = 2000;
    let mean: f64 = (0..n)
        .map(|seed| {
            SeriesGenerator::from_seed(config.clone(), years, seed)
                .with_shocks(ShockSchedule::none())
                .generate_table()
                .first(Metric::LocalTaxes)
        })
        .sum::<f64>()
        / n as f64;

    // σ = 0.09 → standard error of the mean ≈ 0.002
    assert!((mean / expected - 1.0).abs() < 0.01, "mean ratio {}", mean / expected);
}

#[test]
fn crisis_boundary_on_generated_table() {
    let years = YearRange::new(2006, 2009).unwrap();
    let raw = noiseless_table(DEFAULT_KEY, years, ShockSchedule::none());
    let shocked = noiseless_table(DEFAULT_KEY, years, ShockSchedule::historical());

    let ratio = |year: i32, metric: Metric| {
        shocked.value(year, metric).unwrap() / raw.value(year, metric).unwrap()
    };
    assert!((ratio(2007, Metric::TotalRevenue) - 1.0).abs() < 1e-12);
    assert!((ratio(2008, Metric::TotalRevenue) - 0.94).abs() < 1e-12);
    assert!((ratio(2008, Metric::InvestmentExpenses) - 0.85).abs() < 1e-12);
    assert!((ratio(2009, Metric::OtherRevenue) - 0.88).abs() < 1e-12);
}
