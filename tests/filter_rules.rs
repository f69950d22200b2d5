use decodingus_read_filter::filter::{
    Comparator, Criterion, Filter, FilterLog, RecordingLog, StratumValue,
};
use decodingus_read_filter::FilterError;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn write_rules(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create rule file");
    file.write_all(text.as_bytes()).expect("write rule file");
    path
}

fn load(text: &str) -> (Option<Filter>, Arc<RecordingLog>) {
    let dir = TempDir::new().unwrap();
    let path = write_rules(&dir, "rules.txt", text);
    let log = RecordingLog::new();
    let sink: Arc<dyn FilterLog> = log.clone();
    let filter = Filter::from_file(&path, sink).expect("rule file is readable");
    (filter, log)
}

#[test]
fn name_only_file_is_vacuously_satisfied() {
    let (filter, log) = load("# excludes everything\n\nall_bases\n# nothing else\n");
    let filter = filter.expect("name line present");

    assert_eq!(filter.name(), "all_bases");
    assert!(filter.criteria().is_empty());
    assert!(filter.is_satisfied());
    assert!(log.is_empty());
}

#[test]
fn comment_only_file_yields_no_filter() {
    let (filter, log) = load("# nothing here\n\n");
    assert!(filter.is_none());
    assert_eq!(log.len(), 1);
}

#[test]
fn two_suffix_filter_needs_both_values() {
    let (filter, _) = load("both\nA\tint\t>\t5\nB\tboolean\t=\ttrue\n");
    let mut filter = filter.unwrap();

    filter.reset();
    filter.process_value("A", Some(StratumValue::Int(10)));
    filter.process_value("B", Some(StratumValue::Boolean(true)));
    assert!(filter.is_satisfied());

    filter.reset();
    filter.process_value("A", Some(StratumValue::Int(10)));
    assert!(!filter.is_satisfied());
}

#[test]
fn malformed_lines_are_skipped() {
    let text = "mixed\n\
                A\tint\t>\n\
                B\tint\t=\tabc\n\
                C\tint\t>=\t3\n\
                D\tdouble\t>\t1\n\
                E\tboolean\t~\ttrue\n";
    let (filter, log) = load(text);
    let filter = filter.unwrap();

    assert_eq!(log.len(), 4);
    assert_eq!(filter.criteria().len(), 1);
    assert_eq!(
        filter.criteria()["C"],
        vec![Criterion::numeric(Comparator::GreaterOrEqual, 3)]
    );
}

#[test]
fn tally_accumulates_across_observations() {
    let (filter, _) = load("t\n");
    let mut filter = filter.unwrap();

    for read in ["r1", "r2", "r1"] {
        let observation = filter.observe();
        assert!(observation.exclude_if_satisfied(read));
    }

    let tally = filter.filtered_reads();
    assert_eq!(tally.len(), 2);
    assert_eq!(tally["r1"], 2);
    assert_eq!(tally["r2"], 1);
}

#[test]
fn wrong_domain_value_is_logged_not_raised() {
    let (filter, log) = load("m\nA\tint\t<\t20\n");
    let mut filter = filter.unwrap().with_log(log.clone());

    filter.reset();
    filter.process_value("A", Some(StratumValue::Int(10)));
    filter.process_value("A", Some(StratumValue::Boolean(true)));

    assert_eq!(log.len(), 1);
    assert!(filter.is_satisfied());
}

#[test]
fn unreadable_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let result = Filter::from_file(&missing, RecordingLog::new());
    assert!(matches!(result, Err(FilterError::Io { .. })));
}
