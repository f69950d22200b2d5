pub mod formats;

use crate::filter::Filter;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const REPORT_HEADER: &str = "READ_NAME\tEXCLUDED_OBSERVATIONS";

/// Replaces characters that do not belong in a file name.
pub fn sanitize_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "filter".to_string()
    } else {
        sanitized
    }
}

/// One report path per filter name. Names that collide after sanitizing get
/// `.2`, `.3`, ... appended in order, so every filter keeps its own report.
pub fn report_paths(prefix: &str, filter_names: &[&str], extension: &str) -> Vec<PathBuf> {
    let mut taken = HashSet::new();
    filter_names
        .iter()
        .map(|name| {
            let base = sanitize_name(name);
            let mut stem = base.clone();
            let mut copy = 1;
            while !taken.insert(stem.clone()) {
                copy += 1;
                stem = format!("{}.{}", base, copy);
            }
            if copy > 1 {
                log::warn!(
                    "Report name of filter '{}' is already taken; writing it as '{}'",
                    name,
                    stem
                );
            }
            PathBuf::from(format!("{}.{}.{}", prefix, stem, extension))
        })
        .collect()
}

/// Writes one line per excluded read, sorted by read name.
pub fn write_exclusion_report<W: Write>(filter: &Filter, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", REPORT_HEADER)?;

    let mut rows: Vec<(&String, &u32)> = filter.filtered_reads().iter().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));
    for (read_name, count) in rows {
        writeln!(writer, "{}\t{}", read_name, count)?;
    }
    Ok(())
}

pub fn save_exclusion_report(filter: &Filter, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_exclusion_report(filter, &mut writer)?;
    writer.flush()?;
    Ok(())
}
