pub mod check_filter;
pub mod filter_reads;

use crate::filter::{default_log, Filter, MismatchPolicy};
use crate::stratify::{domain_conflicts, unknown_suffixes};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Parses every rule file. Files without a name line are skipped with a
/// warning; unreadable files abort.
pub(crate) fn load_filters(
    paths: &[PathBuf],
    policy: MismatchPolicy,
) -> Result<Vec<(PathBuf, Filter)>> {
    let mut filters = Vec::with_capacity(paths.len());
    for path in paths {
        match load_filter(path, policy)? {
            Some(filter) => filters.push((path.clone(), filter)),
            None => log::warn!("Skipping {}: no filter defined", path.display()),
        }
    }
    Ok(filters)
}

fn load_filter(path: &Path, policy: MismatchPolicy) -> Result<Option<Filter>> {
    let filter = Filter::from_file(path, default_log())
        .with_context(|| format!("Failed to load filter {}", path.display()))?;

    Ok(filter.map(|filter| {
        log::info!(
            "Loaded filter '{}' with {} criteria from {}",
            filter.name(),
            filter.criteria_count(),
            path.display()
        );
        for suffix in unknown_suffixes(&filter) {
            log::warn!(
                "Filter '{}' uses unknown stratifier '{}'; its criteria will never be satisfied",
                filter.name(),
                suffix
            );
        }
        for (suffix, declared) in domain_conflicts(&filter) {
            log::warn!(
                "Filter '{}' declares '{}' as {}, which does not match the values it receives",
                filter.name(),
                suffix,
                declared
            );
        }
        filter.with_mismatch_policy(policy)
    }))
}
