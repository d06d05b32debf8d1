//! Interactive subdivision choice.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::warn;
use wf_core::{builtin_registry, FALLBACK_SUBDIVISION};

/// Map a 1-based menu answer to a subdivision name.
///
/// Anything that is not a valid index selects [`FALLBACK_SUBDIVISION`].
pub fn parse_selection(input: &str) -> &'static str {
    let names = builtin_registry().names();
    let choice = input.trim();

    match choice.parse::<usize>() {
        Ok(n) if (1..=names.len()).contains(&n) => names[n - 1],
        _ => {
            warn!(input = choice, fallback = FALLBACK_SUBDIVISION, "invalid selection");
            FALLBACK_SUBDIVISION
        }
    }
}

/// Print the numbered menu to `writer` and read one answer from `reader`.
pub fn prompt_selection<R: BufRead, W: Write>(mut reader: R, mut writer: W) -> Result<&'static str> {
    let names = builtin_registry().names();

    writeln!(writer, "Available subdivisions:")?;
    for (i, name) in names.iter().enumerate() {
        writeln!(writer, "{}. {}", i + 1, name)?;
    }
    write!(writer, "Select a subdivision (1-{}): ", names.len())?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line).context("Failed to read selection")?;
    Ok(parse_selection(&line))
}
