use std::time::Duration;

use super::History;
use super::HISTORY_LIMIT;
use crate::domain::models::ExecutionResult;
use crate::domain::models::HistoryEntry;

fn entry(stdout: &str) -> HistoryEntry {
    return HistoryEntry::new(ExecutionResult {
        language: "python".to_string(),
        version: "3.10.0".to_string(),
        exit_code: Some(0),
        signal: None,
        stdout: stdout.to_string(),
        stderr: "".to_string(),
        compile_output: None,
        raw_output: stdout.to_string(),
        execution_time: Duration::from_millis(1),
    });
}

#[test]
fn it_inserts_newest_first() {
    let mut history = History::default();
    history.push(entry("first"));
    history.push(entry("second"));

    let stdouts = history
        .iter()
        .map(|e| return e.result.stdout.as_str())
        .collect::<Vec<&str>>();

    assert_eq!(stdouts, vec!["second", "first"]);
    assert_eq!(history.iter().next().unwrap().result.stdout, "second");
}

#[test]
fn it_never_exceeds_the_limit() {
    let mut history = History::default();
    for idx in 0..(HISTORY_LIMIT * 2) {
        history.push(entry(&idx.to_string()));
        assert!(history.iter().count() <= HISTORY_LIMIT);
    }

    assert_eq!(history.iter().count(), HISTORY_LIMIT);
}

#[test]
fn it_evicts_exactly_the_oldest_entry() {
    let mut history = History::default();
    for idx in 0..HISTORY_LIMIT {
        history.push(entry(&idx.to_string()));
    }
    assert_eq!(history.iter().last().unwrap().result.stdout, "0");

    history.push(entry("51st"));

    assert_eq!(history.iter().count(), HISTORY_LIMIT);
    assert_eq!(history.iter().next().unwrap().result.stdout, "51st");
    assert_eq!(history.iter().last().unwrap().result.stdout, "1");
    assert!(!history.iter().any(|e| return e.result.stdout == "0"));
}

#[test]
fn it_keeps_duplicates() {
    let mut history = History::new(3);
    history.push(entry("same"));
    history.push(entry("same"));
    assert_eq!(history.iter().count(), 2);
}

#[test]
fn it_starts_empty() {
    let mut history = History::new(3);
    assert!(history.is_empty());

    history.push(entry("one"));
    assert!(!history.is_empty());
}
