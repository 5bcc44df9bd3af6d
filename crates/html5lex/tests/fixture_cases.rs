//! Golden fixtures: each case carries its exact expected token rendering,
//! checked whole and at several chunk sizes.

use std::fs;
use std::path::PathBuf;

use html5lex::{ContentMode, Policies};
use lex_test_support::{diff_lines, run_with_modes};
use serde::Deserialize;

#[derive(Deserialize)]
struct Case {
    name: String,
    input: String,
    #[serde(default)]
    modes: Vec<(String, String)>,
    expected: Vec<String>,
}

fn parse_mode(label: &str) -> ContentMode {
    match label {
        "data" => ContentMode::Data,
        "rcdata" => ContentMode::Rcdata,
        "rawtext" => ContentMode::Rawtext,
        "script-data" => ContentMode::ScriptData,
        "plaintext" => ContentMode::Plaintext,
        other => panic!("unknown content mode label {other:?}"),
    }
}

fn load_cases() -> Vec<Case> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/tokenizer_cases.json");
    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("bad fixture file: {e}"))
}

#[test]
fn fixtures_whole_input() {
    for case in load_cases() {
        let modes: Vec<(&str, ContentMode)> = case
            .modes
            .iter()
            .map(|(tag, mode)| (tag.as_str(), parse_mode(mode)))
            .collect();
        let outcome = run_with_modes(&case.input, Policies::default(), usize::MAX, &modes)
            .unwrap_or_else(|e| panic!("fixture '{}' failed: {e}", case.name));
        if let Some(diff) = diff_lines(&case.expected, &outcome.lines) {
            panic!("fixture '{}' mismatch: {diff}", case.name);
        }
    }
}

#[test]
fn fixtures_chunked_input() {
    for case in load_cases() {
        let modes: Vec<(&str, ContentMode)> = case
            .modes
            .iter()
            .map(|(tag, mode)| (tag.as_str(), parse_mode(mode)))
            .collect();
        for chunk_len in [1, 2, 3, 7] {
            let outcome = run_with_modes(&case.input, Policies::default(), chunk_len, &modes)
                .unwrap_or_else(|e| {
                    panic!("fixture '{}' failed at chunk_len {chunk_len}: {e}", case.name)
                });
            if let Some(diff) = diff_lines(&case.expected, &outcome.lines) {
                panic!(
                    "fixture '{}' mismatch at chunk_len {chunk_len}: {diff}",
                    case.name
                );
            }
        }
    }
}
