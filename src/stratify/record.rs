use super::{ReadStrata, Stratifier, StratumEntry};
use crate::filter::StratumValue;
use rust_htslib::bam::record::{Aux, Cigar};
use rust_htslib::bam::Record;

/// Query offsets of the bases aligned to the reference (M, = and X operations).
pub fn aligned_offsets(record: &Record) -> Vec<usize> {
    if record.is_unmapped() {
        return Vec::new();
    }

    let mut offsets = Vec::with_capacity(record.seq_len());
    let mut offset = 0usize;
    for op in record.cigar().iter() {
        match op {
            Cigar::Match(len) | Cigar::Equal(len) | Cigar::Diff(len) => {
                let len = *len as usize;
                offsets.extend(offset..offset + len);
                offset += len;
            }
            Cigar::Ins(len) | Cigar::SoftClip(len) => offset += *len as usize,
            Cigar::Del(_) | Cigar::RefSkip(_) | Cigar::HardClip(_) | Cigar::Pad(_) => {}
        }
    }
    offsets.retain(|&o| o < record.seq_len());
    offsets
}

/// 1-based sequencing cycle of the base at `offset`.
pub fn cycle_of(offset: usize, read_length: usize, reverse: bool) -> i32 {
    if reverse {
        (read_length - offset) as i32
    } else {
        (offset + 1) as i32
    }
}

fn aux_int(record: &Record, tag: &[u8]) -> Option<i32> {
    match record.aux(tag).ok()? {
        Aux::I8(v) => Some(v as i32),
        Aux::U8(v) => Some(v as i32),
        Aux::I16(v) => Some(v as i32),
        Aux::U16(v) => Some(v as i32),
        Aux::I32(v) => Some(v),
        Aux::U32(v) => i32::try_from(v).ok(),
        _ => None,
    }
}

fn soft_clipped(record: &Record) -> i32 {
    record
        .cigar()
        .iter()
        .map(|op| match op {
            Cigar::SoftClip(len) => *len as i32,
            _ => 0,
        })
        .sum()
}

/// Computes every stratifier value for `record`.
pub fn strata_from_record(record: &Record) -> ReadStrata {
    let read_name = String::from_utf8_lossy(record.qname()).into_owned();
    let bases = record.seq().as_bytes();
    let quals = record.qual();
    let read_length = record.seq_len();
    let reverse = record.is_reverse();
    let paired = record.is_paired();

    let int = |v: i32| Some(StratumValue::Int(v));
    let flag = |v: bool| Some(StratumValue::Boolean(v));
    let when_paired = |v: Option<StratumValue>| if paired { v } else { None };

    let read_values: Vec<StratumEntry> = vec![
        (Stratifier::MappingQuality, int(record.mapq() as i32)),
        (Stratifier::ReadLength, int(read_length as i32)),
        (
            Stratifier::InsertLength,
            when_paired(int(record.insert_size().unsigned_abs().min(i32::MAX as u64) as i32)),
        ),
        (
            Stratifier::MismatchesInRead,
            aux_int(record, b"NM").map(StratumValue::Int),
        ),
        (Stratifier::SoftClippedBases, int(soft_clipped(record))),
        (
            Stratifier::NsInRead,
            int(bases.iter().filter(|&&b| b == b'N' || b == b'n').count() as i32),
        ),
        (Stratifier::ReverseStrand, flag(reverse)),
        (Stratifier::Paired, flag(paired)),
        (Stratifier::ProperPair, when_paired(flag(record.is_proper_pair()))),
        (
            Stratifier::FirstOfPair,
            when_paired(flag(record.is_first_in_template())),
        ),
        (Stratifier::Duplicate, flag(record.is_duplicate())),
        (Stratifier::Secondary, flag(record.is_secondary())),
        (Stratifier::Supplementary, flag(record.is_supplementary())),
    ];

    let base_values = aligned_offsets(record)
        .into_iter()
        .map(|offset| {
            // 0xff marks a missing quality string
            let quality = quals
                .get(offset)
                .filter(|&&q| q != 0xff)
                .map(|&q| StratumValue::Int(q as i32));
            let is_n = bases
                .get(offset)
                .map(|&b| StratumValue::Boolean(b == b'N' || b == b'n'));
            vec![
                (Stratifier::BaseQuality, quality),
                (
                    Stratifier::Cycle,
                    int(cycle_of(offset, read_length, reverse)),
                ),
                (Stratifier::ReadBaseN, is_n),
            ]
        })
        .collect();

    ReadStrata {
        read_name,
        read_values,
        bases: base_values,
    }
}
