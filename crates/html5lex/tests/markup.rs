//! Tag, comment, DOCTYPE and content-mode behavior through the public API.

use html5lex::{ContentMode, NamePolicy, Policies, ViolationCode, ViolationPolicy, XmlnsPolicy};
use lex_test_support::{run_whole, run_with_modes};

fn lines(input: &str) -> Vec<String> {
    run_whole(input, Policies::default()).unwrap().lines
}

#[test]
fn attributes_round_trip() {
    assert_eq!(
        lines("<input type=\"text\" value='a b' disabled data-x=unquoted>"),
        [
            "START name=input attrs=[type=\"text\" value=\"a b\" disabled=\"\" data-x=\"unquoted\"] self_closing=false",
            "EOF"
        ]
    );
}

#[test]
fn duplicate_attributes_keep_the_first() {
    let outcome = run_whole("<div id=a id=b ID=c>", Policies::default()).unwrap();
    assert_eq!(
        outcome.lines,
        ["START name=div attrs=[id=\"a\"] self_closing=false", "EOF"]
    );
    assert_eq!(
        outcome.violations.len(),
        2,
        "both repeats must be reported"
    );
    assert!(outcome
        .violations
        .iter()
        .all(|v| v.code == ViolationCode::DuplicateAttribute));
}

#[test]
fn missing_space_between_attributes() {
    let outcome = run_whole("<div a=\"1\"b=\"2\">", Policies::default()).unwrap();
    assert_eq!(
        outcome.lines,
        ["START name=div attrs=[a=\"1\" b=\"2\"] self_closing=false", "EOF"]
    );
    assert_eq!(
        outcome.violations[0].code,
        ViolationCode::NoSpaceBetweenAttributes
    );
}

#[test]
fn end_tag_attributes_are_dropped() {
    let outcome = run_whole("x</div id=a>y", Policies::default()).unwrap();
    assert_eq!(
        outcome.lines,
        ["CHAR \"x\"", "END name=div", "CHAR \"y\"", "EOF"]
    );
    assert_eq!(
        outcome.violations[0].code,
        ViolationCode::AttributesOnEndTag
    );
}

#[test]
fn xmlns_alter_policy_drops_the_attribute() {
    let policies = Policies {
        xmlns: XmlnsPolicy::Alter,
        ..Policies::default()
    };
    let outcome = run_whole("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1\">", policies)
        .unwrap();
    assert_eq!(
        outcome.lines,
        ["START name=svg attrs=[width=\"1\"] self_closing=false", "EOF"]
    );
    assert_eq!(outcome.violations[0].code, ViolationCode::XmlnsAttribute);
}

#[test]
fn strict_names_abort_on_bad_doctype_name() {
    let policies = Policies {
        name: NamePolicy::Strict,
        ..Policies::default()
    };
    let err = run_whole("<!DOCTYPE -html>", policies).unwrap_err();
    assert_eq!(err.code, ViolationCode::NameNotXmlCompatible);
}

#[test]
fn comment_tokens_and_policies() {
    assert_eq!(lines("<!--x-->"), ["COMMENT \"x\"", "EOF"]);
    assert_eq!(lines("<!---->"), ["COMMENT \"\"", "EOF"]);
    assert_eq!(lines("<!--- x-->"), ["COMMENT \"- x\"", "EOF"]);

    let fatal = Policies {
        comment: ViolationPolicy::Fatal,
        ..Policies::default()
    };
    let err = run_whole("<!--a--b-->", fatal).unwrap_err();
    assert_eq!(err.code, ViolationCode::DoubleHyphenInComment);
    // Well-formed comments pass untouched under the same policy.
    let outcome = run_whole("<!--a-b-->", fatal).unwrap();
    assert_eq!(outcome.lines, ["COMMENT \"a-b\"", "EOF"]);
}

#[test]
fn doctype_identifier_forms() {
    assert_eq!(
        lines("<!doctype HTML>"),
        ["DOCTYPE name=html public=<none> system=<none> quirks=false", "EOF"]
    );
    assert_eq!(
        lines("<!DOCTYPE html SYSTEM 'about:legacy-compat'>"),
        [
            "DOCTYPE name=html public=<none> system=\"about:legacy-compat\" quirks=false",
            "EOF"
        ]
    );
    assert_eq!(
        lines("<!DOCTYPE html PUBLIC \"p\">"),
        ["DOCTYPE name=html public=\"p\" system=<none> quirks=false", "EOF"]
    );
}

#[test]
fn malformed_doctypes_force_quirks() {
    let cases = [
        "<!DOCTYPE>",
        "<!DOCTYPE html PUBLIC>",
        "<!DOCTYPE html PUBLIC p>",
        "<!DOCTYPE html SYSTEM >",
        "<!DOCTYPE html PUBLIX \"p\">",
    ];
    for input in cases {
        let outcome = run_whole(input, Policies::default()).unwrap();
        assert_eq!(outcome.lines.len(), 2, "one DOCTYPE plus EOF for {input}");
        assert!(
            outcome.lines[0].ends_with("quirks=true"),
            "expected quirks for {input}: {}",
            outcome.lines[0]
        );
    }
}

#[test]
fn doctype_after_system_id_garbage_keeps_quirks_off() {
    let outcome = run_whole("<!DOCTYPE html SYSTEM \"s\" junk>", Policies::default()).unwrap();
    assert_eq!(
        outcome.lines,
        ["DOCTYPE name=html public=<none> system=\"s\" quirks=false", "EOF"]
    );
    assert_eq!(outcome.violations[0].code, ViolationCode::BogusDoctype);
}

#[test]
fn script_data_needs_the_exact_end_tag() {
    let modes: &[(&str, ContentMode)] = &[("script", ContentMode::ScriptData)];
    let outcome = run_with_modes(
        "<script>a</scriptx></SCRIPT >b",
        Policies::default(),
        usize::MAX,
        modes,
    )
    .unwrap();
    assert_eq!(
        outcome.lines,
        [
            "START name=script attrs=[] self_closing=false",
            "CHAR \"a</scriptx>\"",
            "END name=script",
            "CHAR \"b\"",
            "EOF"
        ]
    );
}

#[test]
fn script_double_escape_keeps_inner_end_tag_as_text() {
    let modes: &[(&str, ContentMode)] = &[("script", ContentMode::ScriptData)];
    let outcome = run_with_modes(
        "<script><!--<script>x</script>--></script>t",
        Policies::default(),
        usize::MAX,
        modes,
    )
    .unwrap();
    assert_eq!(
        outcome.lines,
        [
            "START name=script attrs=[] self_closing=false",
            "CHAR \"<!--<script>x</script>-->\"",
            "END name=script",
            "CHAR \"t\"",
            "EOF"
        ]
    );
}

#[test]
fn rawtext_never_decodes() {
    let modes: &[(&str, ContentMode)] = &[("style", ContentMode::Rawtext)];
    let outcome = run_with_modes(
        "<style>a { content: \"&amp;\" }</style>",
        Policies::default(),
        usize::MAX,
        modes,
    )
    .unwrap();
    assert_eq!(
        outcome.lines,
        [
            "START name=style attrs=[] self_closing=false",
            "CHAR \"a { content: \\\"&amp;\\\" }\"",
            "END name=style",
            "EOF"
        ]
    );
}

#[test]
fn eof_recoveries() {
    assert_eq!(lines("a<"), ["CHAR \"a<\"", "EOF"]);
    assert_eq!(lines("a</"), ["CHAR \"a</\"", "EOF"]);
    assert_eq!(lines("<!--x"), ["COMMENT \"x\"", "EOF"]);
    assert_eq!(lines("<!-"), ["COMMENT \"-\"", "EOF"]);
    assert_eq!(
        lines("<!DOCTYPE html"),
        ["DOCTYPE name=html public=<none> system=<none> quirks=true", "EOF"]
    );
    // An unfinished tag is dropped entirely.
    assert_eq!(lines("x<div a="), ["CHAR \"x\"", "EOF"]);
}

#[test]
fn null_bytes_are_replaced_everywhere() {
    let outcome = run_whole("a\u{0}<di\u{0}v b\u{0}=\"c\u{0}\"><!--d\u{0}-->", Policies::default())
        .unwrap();
    assert_eq!(
        outcome.lines,
        [
            "CHAR \"a\u{FFFD}\"",
            "START name=di\u{FFFD}v attrs=[b\u{FFFD}=\"c\u{FFFD}\"] self_closing=false",
            "COMMENT \"d\u{FFFD}\"",
            "EOF"
        ]
    );
    assert_eq!(outcome.violations.len(), 5);
    assert!(outcome
        .violations
        .iter()
        .all(|v| v.code == ViolationCode::UnexpectedNullCharacter));
}
