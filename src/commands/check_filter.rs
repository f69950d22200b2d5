use super::load_filters;
use crate::export::formats::filter::FilterExport;
use crate::filter::MismatchPolicy;
use anyhow::Result;
use std::fmt::Write;
use std::path::PathBuf;

pub fn run(rules: Vec<PathBuf>, json: bool) -> Result<()> {
    let filters = load_filters(&rules, MismatchPolicy::default())?;
    let exports: Vec<FilterExport> = filters
        .iter()
        .map(|(path, filter)| FilterExport::from_filter(filter, &path.display().to_string()))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&exports)?);
    } else {
        print!("{}", render_text(&exports)?);
    }
    Ok(())
}

fn render_text(exports: &[FilterExport]) -> Result<String> {
    let mut out = String::new();
    for export in exports {
        writeln!(out, "{} ({})", export.name, export.source)?;
        if export.criteria.is_empty() {
            writeln!(out, "  no criteria: every observation is excluded")?;
        }
        for criterion in &export.criteria {
            writeln!(
                out,
                "  {}\t{}\t{}\t{}",
                criterion.suffix, criterion.domain, criterion.comparator, criterion.value
            )?;
        }
        for suffix in &export.unknown_suffixes {
            writeln!(out, "  warning: unknown stratifier '{}'", suffix)?;
        }
        for conflict in &export.domain_conflicts {
            writeln!(out, "  warning: {}", conflict)?;
        }
    }
    Ok(out)
}
