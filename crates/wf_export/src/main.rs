//! wf_export CLI
//!
//! Synthetic finance tables for the Wallis-et-Futuna subdivisions → CSV
//! plus console preview and insights report.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "wf_export")]
#[command(about = "Generate and export synthetic municipal finance tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List known subdivisions
    List,

    /// Generate a table, export it to CSV and print the report
    Generate {
        /// Subdivision name (unknown names use the default profile)
        #[arg(long, conflicts_with = "choice")]
        subdivision: Option<String>,

        /// 1-based index into the subdivision list
        #[arg(long)]
        choice: Option<String>,

        /// Fixed RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// First year
        #[arg(long)]
        start: Option<i32>,

        /// Last year (inclusive)
        #[arg(long)]
        end: Option<i32>,

        /// Deterministic trend only
        #[arg(long, default_value = "false")]
        no_noise: bool,

        /// Output directory for the CSV file
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// YAML run settings (falls back to WF_SETTINGS_PATH)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Output chart panel JSON file
        #[arg(long)]
        chart_data: Option<PathBuf>,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Re-import an exported CSV and print its report
    Inspect {
        /// Exported CSV file
        #[arg(long)]
        csv: PathBuf,

        /// Subdivision name (inferred from the file name when omitted)
        #[arg(long)]
        subdivision: Option<String>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            println!("Subdivisions of Wallis-et-Futuna:");
            print!("{}", wf_export::format_listing(wf_core::builtin_registry()));
        }

        Commands::Generate {
            subdivision,
            choice,
            seed,
            start,
            end,
            no_noise,
            out_dir,
            settings,
            chart_data,
            metadata,
        } => {
            let (mut run, from_file) = match settings {
                Some(path) => (wf_core::RunSettings::load(&path)?, true),
                None => match wf_core::RunSettings::from_env()? {
                    Some(run) => (run, true),
                    None => (wf_core::RunSettings::default(), false),
                },
            };

            if let Some(name) = subdivision {
                run.subdivision = name;
            } else if let Some(choice) = choice {
                run.subdivision = wf_export::parse_selection(&choice).to_string();
            } else if !from_file {
                let stdin = std::io::stdin();
                run.subdivision =
                    wf_export::prompt_selection(stdin.lock(), std::io::stdout())?.to_string();
            }
            if let Some(year) = start {
                run.start_year = year;
            }
            if let Some(year) = end {
                run.end_year = year;
            }
            if seed.is_some() {
                run.seed = seed;
            }
            if no_noise {
                run.noise_scale = 0.0;
            }
            if let Some(dir) = out_dir {
                run.output_dir = dir;
            }
            run.validate()?;

            generate(&run, chart_data.as_deref(), metadata.as_deref())?;
        }

        Commands::Inspect { csv, subdivision } => {
            let name = subdivision
                .or_else(|| infer_subdivision(&csv))
                .unwrap_or_else(|| wf_core::FALLBACK_SUBDIVISION.to_string());

            println!("🔍 Inspecting {}", csv.display());
            let table = wf_export::read_table_csv(&csv)?;
            let config = wf_core::resolve_config(&name);

            println!("\n{}", wf_export::format_preview(&table));
            println!("{}", wf_core::FinanceInsights::from_table(&name, &config, &table));
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn generate(
    run: &wf_core::RunSettings,
    chart_data: Option<&Path>,
    metadata: Option<&Path>,
) -> Result<()> {
    use wf_core::SeriesGenerator;

    let config = wf_core::resolve_config(&run.subdivision);
    let years = run.year_range()?;

    println!("🔨 Generating financial data...");
    println!("   Subdivision: {}", run.subdivision);
    println!("   Period:      {}-{}", years.start(), years.end());
    match run.seed {
        Some(seed) => println!("   Seed:        {}", seed),
        None => println!("   Seed:        (entropy)"),
    }

    let generator = match run.seed {
        Some(seed) => SeriesGenerator::from_seed(config.clone(), years, seed),
        None => SeriesGenerator::from_entropy(config.clone(), years),
    };
    let table = generator.with_noise_scale(run.noise_scale).generate_table();

    let out = run
        .output_dir
        .join(wf_export::default_file_name(&run.subdivision, years));
    let meta = wf_export::write_table_csv(&table, &out)?;
    print_metadata(&meta);

    if let Some(path) = metadata {
        save_metadata(path, &meta)?;
    }
    if let Some(path) = chart_data {
        let charts = wf_core::ChartSet::from_table(&run.subdivision, &table);
        wf_export::write_chart_data(&charts, path)?;
        println!("📊 Chart data saved to: {}", path.display());
    }

    println!("\n{}", wf_export::format_preview(&table));
    println!(
        "{}",
        wf_core::FinanceInsights::from_table(&run.subdivision, &config, &table)
    );
    Ok(())
}

/// `Hihifo_financial_data_2002_2025.csv` → `Hihifo`
#[cfg(feature = "cli")]
fn infer_subdivision(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let (name, _) = stem.split_once("_financial_data_")?;
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &wf_export::ExportMetadata) {
    println!("\n✅ Data exported successfully!");
    println!("   File:     {}", meta.path.display());
    println!("   Rows:     {}", meta.rows);
    println!("   Columns:  {}", meta.columns);
    println!(
        "   Size:     {} bytes ({:.2} KB)",
        meta.size,
        meta.size as f64 / 1024.0
    );
    println!("   Checksum: {}", meta.checksum);
    println!("   Created:  {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn save_metadata(path: &Path, meta: &wf_export::ExportMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("wf_export CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
