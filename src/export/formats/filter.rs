use crate::filter::{Filter, StratumValue, ValueDomain};
use crate::stratify::{domain_conflicts, unknown_suffixes};
use serde::Serialize;

/// Parsed view of a rule file, as printed by `check-filter --json`.
#[derive(Debug, Serialize)]
pub struct FilterExport {
    pub name: String,
    pub source: String,
    pub criteria: Vec<CriterionExport>,
    pub unknown_suffixes: Vec<String>,
    pub domain_conflicts: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CriterionExport {
    pub suffix: String,
    #[serde(rename = "type")]
    pub domain: ValueDomain,
    pub comparator: String,
    pub value: StratumValue,
}

impl FilterExport {
    pub fn from_filter(filter: &Filter, source: &str) -> Self {
        let criteria = filter
            .criteria()
            .iter()
            .flat_map(|(suffix, group)| {
                group.iter().map(move |criterion| CriterionExport {
                    suffix: suffix.clone(),
                    domain: criterion.domain(),
                    comparator: criterion.comparator().symbol().to_string(),
                    value: criterion.threshold(),
                })
            })
            .collect();

        FilterExport {
            name: filter.name().to_string(),
            source: source.to_string(),
            criteria,
            unknown_suffixes: unknown_suffixes(filter)
                .into_iter()
                .map(str::to_string)
                .collect(),
            domain_conflicts: domain_conflicts(filter)
                .into_iter()
                .map(|(suffix, declared)| format!("{} declared as {}", suffix, declared))
                .collect(),
        }
    }
}
