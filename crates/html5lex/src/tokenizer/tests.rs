use super::*;
use crate::shared::{NamePolicy, NameTable, SinkResponse, ViolationPolicy, XmlnsPolicy};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Ev {
    Start {
        name: NameHandle,
        attrs: Vec<(NameHandle, Vec<u16>)>,
        self_closing: bool,
    },
    End(NameHandle),
    Chars(Vec<u16>),
    Comment(Vec<u16>),
    Doctype {
        name: Option<NameHandle>,
        public_id: Option<Vec<u16>>,
        system_id: Option<Vec<u16>>,
        force_quirks: bool,
    },
    Eof,
}

struct Sink {
    events: Vec<Ev>,
    switch_rules: Vec<(NameHandle, ContentMode)>,
    comments: bool,
    cdata: bool,
    suspend_on_tags: bool,
}

impl Sink {
    fn new() -> Self {
        Self {
            events: Vec::new(),
            switch_rules: Vec::new(),
            comments: true,
            cdata: false,
            suspend_on_tags: false,
        }
    }
}

impl TokenSink for Sink {
    fn start_tag(
        &mut self,
        name: NameHandle,
        attrs: &AttributeList,
        self_closing: bool,
    ) -> SinkResponse {
        self.events.push(Ev::Start {
            name,
            attrs: attrs.iter().map(|a| (a.name, a.value.clone())).collect(),
            self_closing,
        });
        let mut resp = match self.switch_rules.iter().find(|(n, _)| *n == name) {
            Some(&(_, mode)) => SinkResponse::switch_to(mode, Some(name)),
            None => SinkResponse::proceed(),
        };
        resp.suspend = self.suspend_on_tags;
        resp
    }

    fn end_tag(&mut self, name: NameHandle) -> SinkResponse {
        self.events.push(Ev::End(name));
        let mut resp = SinkResponse::proceed();
        resp.suspend = self.suspend_on_tags;
        resp
    }

    fn characters(&mut self, units: &[u16]) -> SinkResponse {
        self.events.push(Ev::Chars(units.to_vec()));
        SinkResponse::proceed()
    }

    fn comment(&mut self, units: &[u16]) -> SinkResponse {
        self.events.push(Ev::Comment(units.to_vec()));
        SinkResponse::proceed()
    }

    fn doctype(
        &mut self,
        name: Option<NameHandle>,
        public_id: Option<&[u16]>,
        system_id: Option<&[u16]>,
        force_quirks: bool,
    ) -> SinkResponse {
        self.events.push(Ev::Doctype {
            name,
            public_id: public_id.map(<[u16]>::to_vec),
            system_id: system_id.map(<[u16]>::to_vec),
            force_quirks,
        });
        SinkResponse::proceed()
    }

    fn eof(&mut self) {
        self.events.push(Ev::Eof);
    }

    fn wants_comments(&self) -> bool {
        self.comments
    }

    fn cdata_allowed(&self) -> bool {
        self.cdata
    }
}

struct Collect(Vec<Violation>);

impl ViolationReporter for Collect {
    fn report(&mut self, violation: &Violation) {
        self.0.push(violation.clone());
    }
}

struct Harness {
    sink: Sink,
    names: NameTable,
    reporter: Collect,
    tokenizer: Tokenizer,
}

fn text(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

impl Harness {
    fn new(policies: Policies) -> Self {
        Self {
            sink: Sink::new(),
            names: NameTable::new(),
            reporter: Collect(Vec::new()),
            tokenizer: Tokenizer::new(policies),
        }
    }

    fn switch_rule(&mut self, name: &str, mode: ContentMode) {
        let handle = self.names.intern_str(name);
        self.sink.switch_rules.push((handle, mode));
    }

    /// One `tokenize_chunk` call, no redelivery.
    fn feed_once(&mut self, input: &str) -> Result<usize, FatalViolation> {
        let units: Vec<u16> = input.encode_utf16().collect();
        self.tokenizer.tokenize_chunk(
            &units,
            &mut Host {
                sink: &mut self.sink,
                names: &mut self.names,
                reporter: &mut self.reporter,
            },
        )
    }

    fn feed(&mut self, input: &str) -> Result<(), FatalViolation> {
        let units: Vec<u16> = input.encode_utf16().collect();
        let mut rest = units.as_slice();
        loop {
            let consumed = self.tokenizer.tokenize_chunk(
                rest,
                &mut Host {
                    sink: &mut self.sink,
                    names: &mut self.names,
                    reporter: &mut self.reporter,
                },
            )?;
            if consumed >= rest.len() {
                return Ok(());
            }
            rest = &rest[consumed..];
        }
    }

    fn finish(&mut self) -> Result<(), FatalViolation> {
        self.tokenizer.end_of_input(&mut Host {
            sink: &mut self.sink,
            names: &mut self.names,
            reporter: &mut self.reporter,
        })
    }

    fn run(input: &str, policies: Policies) -> Result<Harness, FatalViolation> {
        let mut h = Harness::new(policies);
        h.feed(input)?;
        h.finish()?;
        Ok(h)
    }

    fn name(&self, handle: NameHandle) -> String {
        self.names
            .resolve_string(handle)
            .unwrap_or_else(|| format!("?{}", handle.0))
    }

    /// Events rendered one per line, adjacent character runs coalesced.
    fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut chars: Vec<u16> = Vec::new();
        for ev in &self.sink.events {
            if let Ev::Chars(units) = ev {
                chars.extend_from_slice(units);
                continue;
            }
            if !chars.is_empty() {
                out.push(format!("CHAR {:?}", text(&chars)));
                chars.clear();
            }
            match ev {
                Ev::Chars(_) => unreachable!(),
                Ev::Start {
                    name,
                    attrs,
                    self_closing,
                } => {
                    let mut line = format!("START {}", self.name(*name));
                    for (attr, value) in attrs {
                        line.push_str(&format!(" {}={:?}", self.name(*attr), text(value)));
                    }
                    if *self_closing {
                        line.push_str(" (self-closing)");
                    }
                    out.push(line);
                }
                Ev::End(name) => out.push(format!("END {}", self.name(*name))),
                Ev::Comment(units) => out.push(format!("COMMENT {:?}", text(units))),
                Ev::Doctype {
                    name,
                    public_id,
                    system_id,
                    force_quirks,
                } => out.push(format!(
                    "DOCTYPE {:?} public={:?} system={:?} quirks={}",
                    name.map(|n| self.name(n)),
                    public_id.as_deref().map(text),
                    system_id.as_deref().map(text),
                    force_quirks
                )),
                Ev::Eof => out.push("EOF".to_string()),
            }
        }
        if !chars.is_empty() {
            out.push(format!("CHAR {:?}", text(&chars)));
        }
        out
    }

    fn codes(&self) -> Vec<ViolationCode> {
        self.reporter.0.iter().map(|v| v.code).collect()
    }
}

#[test]
fn plain_markup() {
    let h = Harness::run("<div id=\"x\" hidden>hi</div>", Policies::default()).unwrap();
    assert_eq!(
        h.lines(),
        ["START div id=\"x\" hidden=\"\"", "CHAR \"hi\"", "END div", "EOF"]
    );
    assert!(h.codes().is_empty());
}

#[test]
fn tag_names_are_ascii_folded() {
    let h = Harness::run("<DIV CLASS=a></dIv>", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["START div class=\"a\"", "END div", "EOF"]);
}

#[test]
fn self_closing_tag() {
    let h = Harness::run("<br/>", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["START br (self-closing)", "EOF"]);
}

#[test]
fn named_reference_with_semicolon() {
    let h = Harness::run("a &amp; b", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"a & b\"", "EOF"]);
    assert!(h.codes().is_empty());
}

#[test]
fn named_reference_without_semicolon() {
    let h = Harness::run("x &amp y", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"x & y\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::UnterminatedNamedReference]);
}

#[test]
fn prefix_followed_by_alnum_stays_literal() {
    let h = Harness::run("&ampz", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"&ampz\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::NoNamedReferenceMatch]);
}

#[test]
fn full_match_pending_at_end_of_stream() {
    let h = Harness::run("&lt", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"<\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::UnterminatedNamedReference]);
}

#[test]
fn bare_ampersand_is_not_a_reference() {
    let h = Harness::run("fish & chips", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"fish & chips\"", "EOF"]);
    assert!(h.codes().is_empty());
}

#[test]
fn unknown_name_replays_literally() {
    let h = Harness::run("&qz;", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"&qz;\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::NoNamedReferenceMatch]);
}

#[test]
fn references_in_attribute_values() {
    let h = Harness::run("<a href=\"?x=1&amp=2&amp;3\">", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["START a href=\"?x=1&amp=2&3\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::NoNamedReferenceMatch]);
}

#[test]
fn numeric_references() {
    let h = Harness::run("&#65;&#x41;&#x1F600;", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"AA\u{1F600}\"", "EOF"]);
    assert!(h.codes().is_empty());
}

#[test]
fn numeric_reference_to_null() {
    let h = Harness::run("&#0;", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"\u{FFFD}\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::NumericReferenceToNull]);
}

#[test]
fn numeric_reference_out_of_range() {
    // Overlong digit strings must clamp, not wrap back into range.
    let h = Harness::run("&#x110000;&#99999999999999;", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"\u{FFFD}\u{FFFD}\"", "EOF"]);
    assert_eq!(
        h.codes(),
        [
            ViolationCode::NumericReferenceOutOfRange,
            ViolationCode::NumericReferenceOutOfRange
        ]
    );
}

#[test]
fn numeric_reference_into_c1_range() {
    let h = Harness::run("&#x80;&#x99;", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"\u{20AC}\u{2122}\"", "EOF"]);
    assert_eq!(
        h.codes(),
        [
            ViolationCode::NumericReferenceToC1Range,
            ViolationCode::NumericReferenceToC1Range
        ]
    );
}

#[test]
fn numeric_reference_to_surrogate() {
    let h = Harness::run("&#xD800;", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"\u{FFFD}\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::NumericReferenceToSurrogate]);
}

#[test]
fn numeric_reference_without_digits() {
    let h = Harness::run("&#xG &#;", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"&#xG &#;\"", "EOF"]);
    assert_eq!(
        h.codes(),
        [
            ViolationCode::NoDigitsInNumericReference,
            ViolationCode::NoDigitsInNumericReference
        ]
    );
}

#[test]
fn crlf_collapses_to_one_line_feed() {
    let h = Harness::run("a\r\nb\rc\nd", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"a\\nb\\nc\\nd\"", "EOF"]);
    assert_eq!(h.tokenizer.line(), 4);
}

#[test]
fn crlf_split_across_chunks() {
    let mut h = Harness::new(Policies::default());
    h.feed("a\r").unwrap();
    h.feed("\nb").unwrap();
    h.finish().unwrap();
    assert_eq!(h.lines(), ["CHAR \"a\\nb\"", "EOF"]);
    assert_eq!(h.tokenizer.line(), 2);
}

#[test]
fn null_in_character_data() {
    let h = Harness::run("a\u{0}b", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"a\u{FFFD}b\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::UnexpectedNullCharacter]);
}

#[test]
fn form_feed_policies() {
    let h = Harness::run("a\u{C}b", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"a\\u{c}b\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::FormFeedInContent]);

    let altering = Policies {
        content_space: ViolationPolicy::Alter,
        ..Policies::default()
    };
    let h = Harness::run("a\u{C}b&#xC;", altering).unwrap();
    assert_eq!(h.lines(), ["CHAR \"a b \"", "EOF"]);

    let fatal = Policies {
        content_space: ViolationPolicy::Fatal,
        ..Policies::default()
    };
    let Err(err) = Harness::run("a\u{C}b", fatal) else {
        panic!("form feed should abort under the fatal policy");
    };
    assert_eq!(err.code, ViolationCode::FormFeedInContent);
}

#[test]
fn comment_double_hyphen_policies() {
    let h = Harness::run("<!--a--b-->", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["COMMENT \"a--b\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::DoubleHyphenInComment]);

    let altering = Policies {
        comment: ViolationPolicy::Alter,
        ..Policies::default()
    };
    let h = Harness::run("<!--a--b-->", altering).unwrap();
    assert_eq!(h.lines(), ["COMMENT \"a- -b\"", "EOF"]);

    let fatal = Policies {
        comment: ViolationPolicy::Fatal,
        ..Policies::default()
    };
    let Err(err) = Harness::run("<!--a--b-->", fatal) else {
        panic!("double hyphen should abort under the fatal policy");
    };
    assert_eq!(err.code, ViolationCode::DoubleHyphenInComment);
    assert_eq!(err.line, 1);
}

#[test]
fn comment_ended_with_bang() {
    let h = Harness::run("<!--a--!>", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["COMMENT \"a\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::CommentEndedWithBang]);

    let altering = Policies {
        comment: ViolationPolicy::Alter,
        ..Policies::default()
    };
    let h = Harness::run("<!--a--!>x", altering).unwrap();
    assert_eq!(h.lines(), ["COMMENT \"a- -!\"", "CHAR \"x\"", "EOF"]);
}

#[test]
fn premature_end_of_comment() {
    let h = Harness::run("<!-->", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["COMMENT \"\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::PrematureEndOfComment]);
}

#[test]
fn comments_can_be_declined() {
    let mut h = Harness::new(Policies::default());
    h.sink.comments = false;
    h.feed("a<!--x-->b").unwrap();
    h.finish().unwrap();
    assert_eq!(h.lines(), ["CHAR \"ab\"", "EOF"]);
}

#[test]
fn duplicate_attribute_dropped() {
    let h = Harness::run("<div a=\"1\" a=\"2\">", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["START div a=\"1\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::DuplicateAttribute]);
}

#[test]
fn attributes_on_end_tag_dropped() {
    let h = Harness::run("</div a=1>", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["END div", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::AttributesOnEndTag]);
}

#[test]
fn xmlns_policies() {
    let h = Harness::run("<svg xmlns=\"u\" xmlns:xlink=\"v\">", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["START svg xmlns=\"u\" xmlns:xlink=\"v\"", "EOF"]);
    assert_eq!(
        h.codes(),
        [ViolationCode::XmlnsAttribute, ViolationCode::XmlnsAttribute]
    );

    let altering = Policies {
        xmlns: XmlnsPolicy::Alter,
        ..Policies::default()
    };
    let h = Harness::run("<svg xmlns=\"u\" id=\"a\">", altering).unwrap();
    assert_eq!(h.lines(), ["START svg id=\"a\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::XmlnsAttribute]);
}

#[test]
fn strict_name_policy_rejects_bad_attribute_name() {
    let strict = Policies {
        name: NamePolicy::Strict,
        ..Policies::default()
    };
    let Err(err) = Harness::run("<div 1a=\"x\">", strict) else {
        panic!("a leading digit should fail the strict name check");
    };
    assert_eq!(err.code, ViolationCode::NameNotXmlCompatible);

    // Same markup passes under the default policy.
    let h = Harness::run("<div 1a=\"x\">", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["START div 1a=\"x\"", "EOF"]);
}

#[test]
fn doctype_with_identifiers() {
    let h = Harness::run(
        "<!DOCTYPE html PUBLIC \"-//P//\" \"sys\">",
        Policies::default(),
    )
    .unwrap();
    assert_eq!(
        h.lines(),
        ["DOCTYPE Some(\"html\") public=Some(\"-//P//\") system=Some(\"sys\") quirks=false", "EOF"]
    );
    assert!(h.codes().is_empty());
}

#[test]
fn nameless_doctype_forces_quirks() {
    let h = Harness::run("<!DOCTYPE>", Policies::default()).unwrap();
    assert_eq!(
        h.lines(),
        ["DOCTYPE None public=None system=None quirks=true", "EOF"]
    );
    assert!(h.codes().contains(&ViolationCode::NamelessDoctype));
}

#[test]
fn script_data_end_tag_matching() {
    let mut h = Harness::new(Policies::default());
    h.switch_rule("script", ContentMode::ScriptData);
    h.feed("<script>a<b</scriptx></script>x").unwrap();
    h.finish().unwrap();
    assert_eq!(
        h.lines(),
        [
            "START script",
            "CHAR \"a<b</scriptx>\"",
            "END script",
            "CHAR \"x\"",
            "EOF"
        ]
    );
}

#[test]
fn rcdata_decodes_references() {
    let mut h = Harness::new(Policies::default());
    h.switch_rule("textarea", ContentMode::Rcdata);
    h.feed("<textarea>&amp;<i></textarea>").unwrap();
    h.finish().unwrap();
    assert_eq!(
        h.lines(),
        ["START textarea", "CHAR \"&<i>\"", "END textarea", "EOF"]
    );
}

#[test]
fn rawtext_is_fully_literal() {
    let mut h = Harness::new(Policies::default());
    h.switch_rule("style", ContentMode::Rawtext);
    h.feed("<style>a&amp;<i></style>").unwrap();
    h.finish().unwrap();
    assert_eq!(
        h.lines(),
        ["START style", "CHAR \"a&amp;<i>\"", "END style", "EOF"]
    );
}

#[test]
fn script_data_escaped_comment() {
    let mut h = Harness::new(Policies::default());
    h.switch_rule("script", ContentMode::ScriptData);
    h.feed("<script><!--a</script>").unwrap();
    h.finish().unwrap();
    assert_eq!(
        h.lines(),
        ["START script", "CHAR \"<!--a\"", "END script", "EOF"]
    );
}

#[test]
fn plaintext_never_ends() {
    let mut h = Harness::new(Policies::default());
    h.tokenizer
        .set_mode_and_expected_end_tag(ContentMode::Plaintext, None, &mut h.names);
    h.feed("a</plaintext>b").unwrap();
    h.finish().unwrap();
    assert_eq!(h.lines(), ["CHAR \"a</plaintext>b\"", "EOF"]);
}

#[test]
fn cdata_requires_foreign_content() {
    let mut h = Harness::new(Policies::default());
    h.sink.cdata = true;
    h.feed("<![CDATA[x]]y]]>").unwrap();
    h.finish().unwrap();
    assert_eq!(h.lines(), ["CHAR \"x]]y\"", "EOF"]);
    assert!(h.codes().is_empty());

    let h = Harness::run("<![CDATA[x]]>", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["COMMENT \"[CDATA[x]]\"", "EOF"]);
    assert!(h.codes().contains(&ViolationCode::CdataOutsideForeignContent));
}

#[test]
fn bogus_comment_from_question_mark() {
    let h = Harness::run("<?xml version=\"1.0\"?>", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["COMMENT \"?xml version=\\\"1.0\\\"?\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::BogusComment]);
}

#[test]
fn eof_inside_tag_drops_the_token() {
    let h = Harness::run("x<div class=", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"x\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::EofInTag]);
}

#[test]
fn eof_after_less_than_replays_it() {
    let h = Harness::run("a<", Policies::default()).unwrap();
    assert_eq!(h.lines(), ["CHAR \"a<\"", "EOF"]);
    assert_eq!(h.codes(), [ViolationCode::EofAfterLessThan]);
}

#[test]
fn end_of_input_is_idempotent() {
    let mut h = Harness::new(Policies::default());
    h.feed("a").unwrap();
    h.finish().unwrap();
    h.finish().unwrap();
    assert_eq!(h.lines(), ["CHAR \"a\"", "EOF"]);
}

#[test]
fn sink_requested_suspension_returns_early() {
    let mut h = Harness::new(Policies::default());
    h.sink.suspend_on_tags = true;
    let consumed = h.feed_once("<b>rest").unwrap();
    assert_eq!(consumed, 3);
    assert_eq!(h.lines(), ["START b"]);
    h.feed("rest").unwrap();
    h.finish().unwrap();
    assert_eq!(h.lines(), ["START b", "CHAR \"rest\"", "EOF"]);
    assert!(h.tokenizer.stats().suspensions >= 1);
}

#[test]
fn driver_requested_suspension() {
    let mut h = Harness::new(Policies::default());
    h.tokenizer.request_suspension();
    let consumed = h.feed_once("ab").unwrap();
    assert_eq!(consumed, 0);
    h.feed("ab").unwrap();
    h.finish().unwrap();
    assert_eq!(h.lines(), ["CHAR \"ab\"", "EOF"]);
}

#[test]
fn snapshot_rewinds_the_machine() {
    let mut h = Harness::new(Policies::default());
    h.feed("<di").unwrap();
    let snapshot = h.tokenizer.save_state();
    h.feed("v>").unwrap();
    h.tokenizer.restore_state(snapshot);
    h.feed("p>").unwrap();
    h.finish().unwrap();
    assert_eq!(h.lines(), ["START div", "START dip", "EOF"]);
}

#[test]
fn reset_clears_state_and_stats() {
    let mut h = Harness::new(Policies::default());
    h.feed("a\nb<div").unwrap();
    h.tokenizer.reset();
    assert_eq!(h.tokenizer.line(), 1);
    assert_eq!(h.tokenizer.stats(), TokenizerStats::default());
    h.feed("<p>").unwrap();
    h.finish().unwrap();
    assert_eq!(h.lines(), ["CHAR \"a\\nb\"", "START p", "EOF"]);
}

#[test]
fn stats_count_units_and_tokens() {
    let h = Harness::run("<b>hi</b>", Policies::default()).unwrap();
    let stats = h.tokenizer.stats();
    assert_eq!(stats.units_consumed, 9);
    // START, two character runs at most, END; the exact split does not
    // matter but the total must cover all four logical tokens.
    assert!(stats.tokens_emitted >= 4);
    assert_eq!(stats.violations, 0);
}

#[test]
fn violation_lines_are_tracked() {
    let h = Harness::run("a\n\n<>", Policies::default()).unwrap();
    assert_eq!(h.codes(), [ViolationCode::BadCharacterAfterLessThan]);
    assert_eq!(h.reporter.0[0].line, 3);
}

#[test]
fn single_unit_chunks_match_whole_input() {
    let input = "<!DOCTYPE html><p a=\"&amp;\">x &notin; y</p><!--c-->";
    let whole = Harness::run(input, Policies::default()).unwrap();
    let mut per_unit = Harness::new(Policies::default());
    for unit in input.chars() {
        per_unit.feed(&unit.to_string()).unwrap();
    }
    per_unit.finish().unwrap();
    assert_eq!(whole.lines(), per_unit.lines());
    assert_eq!(whole.codes(), per_unit.codes());
}

#[test]
fn named_reference_split_across_chunks() {
    let mut h = Harness::new(Policies::default());
    h.feed("x &no").unwrap();
    h.feed("tin; y").unwrap();
    h.finish().unwrap();
    assert_eq!(h.lines(), ["CHAR \"x \u{2209} y\"", "EOF"]);
}
