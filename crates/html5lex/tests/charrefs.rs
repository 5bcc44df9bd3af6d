//! Character-reference behavior through the public API.

use html5lex::{Policies, ViolationCode};
use lex_test_support::{run_whole, RunOutcome};

fn lines(input: &str) -> Vec<String> {
    run_whole(input, Policies::default()).unwrap().lines
}

fn codes(outcome: &RunOutcome) -> Vec<ViolationCode> {
    outcome.violations.iter().map(|v| v.code).collect()
}

#[test]
fn named_references_expand() {
    assert_eq!(lines("a &amp; b"), ["CHAR \"a & b\"", "EOF"]);
    assert_eq!(lines("&notin;"), ["CHAR \"\u{2209}\"", "EOF"]);
    assert_eq!(lines("&ThickSpace;"), ["CHAR \"\u{205F}\u{200A}\"", "EOF"]);
    assert_eq!(lines("&Afr;"), ["CHAR \"\u{1D504}\"", "EOF"]);
}

#[test]
fn longest_match_wins_and_leftovers_pass_through() {
    // `&not` matches and the unmatched tail replays as text.
    let outcome = run_whole("&not!", Policies::default()).unwrap();
    assert_eq!(outcome.lines, ["CHAR \"\u{AC}!\"", "EOF"]);
    assert_eq!(codes(&outcome), [ViolationCode::UnterminatedNamedReference]);
}

#[test]
fn prefix_discard_before_equals_or_alnum() {
    let outcome = run_whole("&ampz &amp2", Policies::default()).unwrap();
    assert_eq!(outcome.lines, ["CHAR \"&ampz &amp2\"", "EOF"]);
    assert_eq!(
        codes(&outcome),
        [
            ViolationCode::NoNamedReferenceMatch,
            ViolationCode::NoNamedReferenceMatch
        ]
    );
}

#[test]
fn discard_checks_the_unit_after_the_match() {
    // The search for `&noti` runs one unit past the `not` match, so the
    // alphanumeric `i` sits in the buffered leftovers rather than at the
    // terminator. The whole reference must stay literal.
    let outcome = run_whole("<a b=\"&noti \">", Policies::default()).unwrap();
    assert_eq!(
        outcome.lines,
        ["START name=a attrs=[b=\"&noti \"] self_closing=false", "EOF"]
    );
    assert_eq!(codes(&outcome), [ViolationCode::NoNamedReferenceMatch]);

    let outcome = run_whole("&noti x", Policies::default()).unwrap();
    assert_eq!(outcome.lines, ["CHAR \"&noti x\"", "EOF"]);
    assert_eq!(codes(&outcome), [ViolationCode::NoNamedReferenceMatch]);

    let outcome = run_whole("&noti", Policies::default()).unwrap();
    assert_eq!(outcome.lines, ["CHAR \"&noti\"", "EOF"]);
    assert_eq!(codes(&outcome), [ViolationCode::NoNamedReferenceMatch]);
}

#[test]
fn attribute_values_share_the_matcher() {
    let outcome = run_whole("<a b=\"&amp;&amp=&copy\">", Policies::default()).unwrap();
    assert_eq!(outcome.lines, ["START name=a attrs=[b=\"&&amp=\u{A9}\"] self_closing=false", "EOF"]);
    assert_eq!(
        codes(&outcome),
        [
            ViolationCode::NoNamedReferenceMatch,
            ViolationCode::UnterminatedNamedReference
        ]
    );
}

#[test]
fn numeric_reference_validation() {
    // The expansion column is pre-rendered in the test renderer's escape
    // style (controls as \uXXXX, tab as \t, everything else literal).
    let cases: &[(&str, &str, &[ViolationCode])] = &[
        ("&#65;", "A", &[]),
        ("&#x41;", "A", &[]),
        ("&#X41;", "A", &[]),
        ("&#0;", "\u{FFFD}", &[ViolationCode::NumericReferenceToNull]),
        (
            "&#x110000;",
            "\u{FFFD}",
            &[ViolationCode::NumericReferenceOutOfRange],
        ),
        (
            "&#xDFFF;",
            "\u{FFFD}",
            &[ViolationCode::NumericReferenceToSurrogate],
        ),
        ("&#x80;", "\u{20AC}", &[ViolationCode::NumericReferenceToC1Range]),
        ("&#x9F;", "\u{178}", &[ViolationCode::NumericReferenceToC1Range]),
        ("&#x1;", "\\u0001", &[ViolationCode::NumericReferenceToControl]),
        ("&#x10FFFF;", "\u{10FFFF}", &[ViolationCode::NumericReferenceToNonCharacter]),
        ("&#xFDD0;", "\u{FDD0}", &[ViolationCode::NumericReferenceToNonCharacter]),
        ("&#x1F4A9;", "\u{1F4A9}", &[]),
        ("&#9;", "\\t", &[]),
    ];
    for (input, expansion, expected_codes) in cases {
        let outcome = run_whole(input, Policies::default()).unwrap();
        let want = format!("CHAR \"{expansion}\"");
        assert_eq!(outcome.lines, [want, "EOF".to_string()], "input {input}");
        assert_eq!(&codes(&outcome), expected_codes, "input {input}");
    }
}

#[test]
fn unterminated_numeric_reference_reprocesses_the_terminator() {
    let outcome = run_whole("&#38 x", Policies::default()).unwrap();
    assert_eq!(outcome.lines, ["CHAR \"& x\"", "EOF"]);
    assert_eq!(
        codes(&outcome),
        [ViolationCode::UnterminatedNumericReference]
    );
}

#[test]
fn reference_cut_by_end_of_stream() {
    let outcome = run_whole("&gt", Policies::default()).unwrap();
    assert_eq!(outcome.lines, ["CHAR \">\"", "EOF"]);
    assert_eq!(codes(&outcome), [ViolationCode::UnterminatedNamedReference]);

    let outcome = run_whole("&#x26", Policies::default()).unwrap();
    assert_eq!(outcome.lines, ["CHAR \"&\"", "EOF"]);
    assert_eq!(
        codes(&outcome),
        [ViolationCode::UnterminatedNumericReference]
    );

    let outcome = run_whole("&#", Policies::default()).unwrap();
    assert_eq!(outcome.lines, ["CHAR \"&#\"", "EOF"]);
    assert_eq!(codes(&outcome), [ViolationCode::NoDigitsInNumericReference]);
}

#[test]
fn reporter_sees_severities() {
    let outcome = run_whole("&#xFDD0;&#0;", Policies::default()).unwrap();
    let severities: Vec<_> = outcome.violations.iter().map(|v| v.severity).collect();
    assert_eq!(
        severities,
        [html5lex::Severity::Warning, html5lex::Severity::Error]
    );
}
