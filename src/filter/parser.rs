use super::comparator::Comparator;
use super::criterion::Criterion;
use super::logging::FilterLog;
use super::read_filter::Filter;
use super::value::{StratumValue, ValueDomain};
use crate::error::{FilterError, FilterResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

const FIELD_SEPARATOR: char = '\t';
const FIELDS_PER_CRITERION: usize = 4;

fn is_skipped(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}

fn parse_threshold(domain: ValueDomain, value: &str) -> FilterResult<StratumValue> {
    let invalid = || FilterError::InvalidValue {
        domain,
        value: value.to_string(),
    };

    match domain {
        ValueDomain::Boolean => match value.to_lowercase().as_str() {
            "true" => Ok(StratumValue::Boolean(true)),
            "false" => Ok(StratumValue::Boolean(false)),
            _ => Err(invalid()),
        },
        ValueDomain::Int => value
            .parse::<i32>()
            .map(StratumValue::Int)
            .map_err(|_| invalid()),
    }
}

/// Parses the four tab separated fields of a criterion line.
pub(crate) fn parse_criterion(fields: &[&str]) -> FilterResult<(String, Criterion)> {
    let suffix = fields[0].trim();
    let kind = fields[1].trim();
    let comparator = fields[2].trim();
    let value = fields[3].trim();

    let comparator = Comparator::from_symbol(comparator)?;
    let domain = ValueDomain::from_keyword(kind)
        .ok_or_else(|| FilterError::InvalidCriterionType(kind.to_string()))?;
    let threshold = parse_threshold(domain, value)?;

    Ok((suffix.to_string(), Criterion::new(comparator, threshold)))
}

impl Filter {
    /// Reads a filter definition from `path`.
    ///
    /// Returns `Ok(None)` when the file holds no name line. Malformed criterion
    /// lines are reported to `log` and skipped; only I/O failures are errors.
    pub fn from_file(path: &Path, log: Arc<dyn FilterLog>) -> FilterResult<Option<Filter>> {
        let file = File::open(path).map_err(|source| FilterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), &path.display().to_string(), log)
    }

    /// Same as [`Filter::from_file`] for an already opened source. `source`
    /// only names the input in warnings.
    pub fn from_reader<R: BufRead>(
        reader: R,
        source: &str,
        log: Arc<dyn FilterLog>,
    ) -> FilterResult<Option<Filter>> {
        let mut lines = reader.split(b'\n').enumerate();

        let mut filter = None;
        for (_, line) in lines.by_ref() {
            let line = decode(line.map_err(|e| io_failure(source, e))?);
            if is_skipped(&line) {
                continue;
            }
            filter = Some(Filter::empty(line.trim(), Arc::clone(&log)));
            break;
        }

        let Some(mut filter) = filter else {
            log.warn(&format!("Empty filter input file: {}", source));
            return Ok(None);
        };

        for (index, line) in lines {
            let line = decode(line.map_err(|e| io_failure(source, e))?);
            if is_skipped(&line) {
                continue;
            }
            let line_number = index + 1;

            let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            if fields.len() != FIELDS_PER_CRITERION {
                log.warn(&format!(
                    "Invalid line {} in filter input file {}: expected {} tab separated fields, found {}",
                    line_number,
                    source,
                    FIELDS_PER_CRITERION,
                    fields.len()
                ));
                continue;
            }

            match parse_criterion(&fields) {
                Ok((suffix, criterion)) => filter.push_criterion(suffix, criterion),
                Err(FilterError::InvalidCriterionType(kind)) => log.warn(&format!(
                    "Invalid criterion type '{}' in line {} (\"{}\") in filter input file {}",
                    kind, line_number, line, source
                )),
                Err(e) => log.warn(&format!(
                    "Invalid value in line {} (\"{}\") in filter input file {}: {}. Skipping this criterion.",
                    line_number, line, source, e
                )),
            }
        }

        Ok(Some(filter))
    }
}

// Rule files written with legacy encodings still parse; stray bytes become U+FFFD.
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(line) => line,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn io_failure(source: &str, error: std::io::Error) -> FilterError {
    FilterError::Io {
        path: source.into(),
        source: error,
    }
}
