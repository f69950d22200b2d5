//! Stratifier vocabulary shared by rule files and the read driver.

mod record;

pub use record::{aligned_offsets, cycle_of, strata_from_record};

use crate::filter::{Filter, StratumValue, ValueDomain};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stratifier {
    MappingQuality,
    ReadLength,
    InsertLength,
    MismatchesInRead,
    SoftClippedBases,
    NsInRead,
    ReverseStrand,
    Paired,
    ProperPair,
    FirstOfPair,
    Duplicate,
    Secondary,
    Supplementary,
    BaseQuality,
    Cycle,
    ReadBaseN,
}

impl Stratifier {
    pub const READ_LEVEL: [Stratifier; 13] = [
        Stratifier::MappingQuality,
        Stratifier::ReadLength,
        Stratifier::InsertLength,
        Stratifier::MismatchesInRead,
        Stratifier::SoftClippedBases,
        Stratifier::NsInRead,
        Stratifier::ReverseStrand,
        Stratifier::Paired,
        Stratifier::ProperPair,
        Stratifier::FirstOfPair,
        Stratifier::Duplicate,
        Stratifier::Secondary,
        Stratifier::Supplementary,
    ];

    pub const BASE_LEVEL: [Stratifier; 3] = [
        Stratifier::BaseQuality,
        Stratifier::Cycle,
        Stratifier::ReadBaseN,
    ];

    pub fn all() -> impl Iterator<Item = Stratifier> {
        Self::READ_LEVEL.into_iter().chain(Self::BASE_LEVEL)
    }

    /// The suffix rule files use to address this stratifier.
    pub fn suffix(&self) -> &'static str {
        match self {
            Stratifier::MappingQuality => "mapping_quality",
            Stratifier::ReadLength => "read_length",
            Stratifier::InsertLength => "insert_length",
            Stratifier::MismatchesInRead => "mismatches_in_read",
            Stratifier::SoftClippedBases => "soft_clipped_bases",
            Stratifier::NsInRead => "ns_in_read",
            Stratifier::ReverseStrand => "reverse_strand",
            Stratifier::Paired => "paired",
            Stratifier::ProperPair => "proper_pair",
            Stratifier::FirstOfPair => "first_of_pair",
            Stratifier::Duplicate => "duplicate",
            Stratifier::Secondary => "secondary",
            Stratifier::Supplementary => "supplementary",
            Stratifier::BaseQuality => "base_quality",
            Stratifier::Cycle => "cycle",
            Stratifier::ReadBaseN => "read_base_n",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::all().find(|s| s.suffix() == suffix)
    }

    pub fn domain(&self) -> ValueDomain {
        match self {
            Stratifier::ReverseStrand
            | Stratifier::Paired
            | Stratifier::ProperPair
            | Stratifier::FirstOfPair
            | Stratifier::Duplicate
            | Stratifier::Secondary
            | Stratifier::Supplementary
            | Stratifier::ReadBaseN => ValueDomain::Boolean,
            _ => ValueDomain::Int,
        }
    }
}

/// Suffixes used by `filter` that no stratifier produces. Criteria under
/// them can never be satisfied by the read driver.
pub fn unknown_suffixes(filter: &Filter) -> Vec<&str> {
    filter
        .criteria()
        .keys()
        .map(String::as_str)
        .filter(|suffix| Stratifier::from_suffix(suffix).is_none())
        .collect()
}

/// Criteria whose declared domain differs from what the stratifier produces,
/// as `(suffix, declared)` pairs.
pub fn domain_conflicts(filter: &Filter) -> Vec<(&str, ValueDomain)> {
    let mut conflicts = Vec::new();
    for (suffix, group) in filter.criteria() {
        let Some(stratifier) = Stratifier::from_suffix(suffix) else {
            continue;
        };
        for criterion in group {
            if criterion.domain() != stratifier.domain() {
                conflicts.push((suffix.as_str(), criterion.domain()));
            }
        }
    }
    conflicts
}

pub type StratumEntry = (Stratifier, Option<StratumValue>);

/// Stratifier values of one read: the read-level values plus one set of
/// base-level values per aligned base.
#[derive(Debug, Clone, Default)]
pub struct ReadStrata {
    pub read_name: String,
    pub read_values: Vec<StratumEntry>,
    pub bases: Vec<Vec<StratumEntry>>,
}

impl ReadStrata {
    pub fn new(read_name: impl Into<String>) -> Self {
        Self {
            read_name: read_name.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, stratifier: Stratifier, value: Option<StratumValue>) -> Self {
        self.read_values.push((stratifier, value));
        self
    }

    pub fn with_base(mut self, values: Vec<StratumEntry>) -> Self {
        self.bases.push(values);
        self
    }
}
