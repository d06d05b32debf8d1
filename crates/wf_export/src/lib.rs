//! Export Library
//!
//! FinancialTable → CSV (+ SHA256 checksum metadata)
//! CSV → FinancialTable (re-import for inspection)
//! ChartSet → JSON (for an external renderer)

pub mod report;
pub mod selection;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use wf_core::metrics::header;
use wf_core::{ChartSet, FinancialTable, Metric, YearRow, YearRange};

pub use report::{format_listing, format_preview, PREVIEW_COLUMNS, PREVIEW_ROWS};
pub use selection::{parse_selection, prompt_selection};

/// Export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Output file
    pub path: PathBuf,
    /// Data rows (header excluded)
    pub rows: usize,
    /// Columns including `year`
    pub columns: usize,
    /// File size (bytes)
    pub size: u64,
    /// SHA256 checksum (hex)
    pub checksum: String,
    /// Creation time (RFC3339)
    pub created_at: String,
}

/// `{subdivision}_financial_data_{start}_{end}.csv`
pub fn default_file_name(subdivision: &str, years: YearRange) -> String {
    format!(
        "{}_financial_data_{}_{}.csv",
        subdivision,
        years.start(),
        years.end()
    )
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Serialize a table to CSV bytes: one header row, one record per year.
pub fn table_to_csv(table: &FinancialTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header()).context("Failed to write CSV header")?;

    for row in table.rows() {
        let mut record = Vec::with_capacity(Metric::COUNT + 1);
        record.push(row.year.to_string());
        record.extend(row.values.iter().map(|v| v.to_string()));
        writer
            .write_record(&record)
            .with_context(|| format!("Failed to write CSV row for {}", row.year))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV writer: {}", e.error()))
}

/// Write a table to `path` and describe the result.
///
/// # Arguments
///
/// * `table` - generated table
/// * `path` - output CSV path; parent directories are created
///
/// # Returns
///
/// Metadata of the written file
pub fn write_table_csv(table: &FinancialTable, path: &Path) -> Result<ExportMetadata> {
    let bytes = table_to_csv(table)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, &bytes)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    let meta = ExportMetadata {
        path: path.to_path_buf(),
        rows: table.len(),
        columns: Metric::COUNT + 1,
        size: bytes.len() as u64,
        checksum: sha256_hex(&bytes),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    info!(path = %path.display(), rows = meta.rows, "table exported");
    Ok(meta)
}

/// Parse CSV produced by [`table_to_csv`].
///
/// The header must match the export column order exactly.
pub fn table_from_csv<R: std::io::Read>(reader: R) -> Result<FinancialTable> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let found: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let expected = header();
    if found.len() != expected.len() {
        bail!(
            "Unexpected column count: expected {}, found {}",
            expected.len(),
            found.len()
        );
    }
    for (i, (f, e)) in found.iter().zip(&expected).enumerate() {
        if f != e {
            // Foreign column names surface as UnknownColumn
            if f != wf_core::YEAR_COLUMN {
                Metric::from_column_name(f)?;
            }
            bail!("Column {} is '{}', expected '{}'", i, f, e);
        }
    }

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read CSV record {}", line + 1))?;

        let year: i32 = record[0]
            .trim()
            .parse()
            .with_context(|| format!("Line {} - invalid year '{}'", line + 1, &record[0]))?;

        let mut row = YearRow { year, values: [0.0; Metric::COUNT] };
        for metric in Metric::ALL {
            let raw = record[metric.index() + 1].trim();
            let value: f64 = raw.parse().with_context(|| {
                format!("Line {} - invalid {} value '{}'", line + 1, metric, raw)
            })?;
            row.set(metric, value);
        }
        rows.push(row);
    }
    debug!(rows = rows.len(), "CSV parsed");

    Ok(FinancialTable::from_rows(rows)?)
}

pub fn read_table_csv(path: &Path) -> Result<FinancialTable> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    table_from_csv(file).with_context(|| format!("Failed to parse CSV file: {}", path.display()))
}

/// Check an exported file against its recorded checksum.
pub fn verify_export(path: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read export: {}", path.display()))?;
    Ok(sha256_hex(&bytes) == expected_checksum)
}

/// Write the dashboard panel data as pretty JSON.
pub fn write_chart_data(charts: &ChartSet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(charts).context("Failed to serialize chart data")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write chart data: {}", path.display()))?;
    info!(path = %path.display(), panels = charts.panels.len(), "chart data written");
    Ok(())
}
