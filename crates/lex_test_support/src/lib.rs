//! Test support for the `html5lex` tokenizer.
//!
//! Provides a recording sink, a deterministic one-line-per-token format for
//! golden comparisons, and drivers that feed input whole or in chunks so
//! suites can assert chunk-split invariance.

use std::collections::HashMap;

use html5lex::{
    AttributeList, ContentMode, FatalViolation, Host, NameHandle, NameTable, Policies,
    SinkResponse, TokenSink, Tokenizer, Violation, ViolationCode, ViolationReporter,
};

/// One recorded token callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenRecord {
    Start {
        name: NameHandle,
        attrs: Vec<(NameHandle, Vec<u16>)>,
        self_closing: bool,
    },
    End {
        name: NameHandle,
    },
    Characters(Vec<u16>),
    Comment(Vec<u16>),
    Doctype {
        name: Option<NameHandle>,
        public_id: Option<Vec<u16>>,
        system_id: Option<Vec<u16>>,
        force_quirks: bool,
    },
    Eof,
}

/// Sink that records every callback and can drive content-mode switches.
///
/// Switch rules map a start-tag name to the content mode the tree builder
/// would select (`script` -> script data, `textarea` -> RCDATA, …); the rule
/// also installs the matching expected end tag.
#[derive(Default)]
pub struct RecordingSink {
    pub tokens: Vec<TokenRecord>,
    pub switch_rules: HashMap<NameHandle, ContentMode>,
    pub wants_comments: bool,
    pub cdata_allowed: bool,
    /// Request suspension after every recorded token.
    pub suspend_each_token: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            switch_rules: HashMap::new(),
            wants_comments: true,
            cdata_allowed: false,
            suspend_each_token: false,
        }
    }

    fn respond(&self, switch: Option<(ContentMode, NameHandle)>) -> SinkResponse {
        let mut resp = match switch {
            Some((mode, name)) => SinkResponse::switch_to(mode, Some(name)),
            None => SinkResponse::proceed(),
        };
        resp.suspend = self.suspend_each_token;
        resp
    }
}

impl TokenSink for RecordingSink {
    fn start_tag(
        &mut self,
        name: NameHandle,
        attrs: &AttributeList,
        self_closing: bool,
    ) -> SinkResponse {
        self.tokens.push(TokenRecord::Start {
            name,
            attrs: attrs
                .iter()
                .map(|attr| (attr.name, attr.value.clone()))
                .collect(),
            self_closing,
        });
        let switch = self.switch_rules.get(&name).map(|&mode| (mode, name));
        self.respond(switch)
    }

    fn end_tag(&mut self, name: NameHandle) -> SinkResponse {
        self.tokens.push(TokenRecord::End { name });
        self.respond(None)
    }

    fn characters(&mut self, units: &[u16]) -> SinkResponse {
        self.tokens.push(TokenRecord::Characters(units.to_vec()));
        self.respond(None)
    }

    fn comment(&mut self, units: &[u16]) -> SinkResponse {
        self.tokens.push(TokenRecord::Comment(units.to_vec()));
        self.respond(None)
    }

    fn doctype(
        &mut self,
        name: Option<NameHandle>,
        public_id: Option<&[u16]>,
        system_id: Option<&[u16]>,
        force_quirks: bool,
    ) -> SinkResponse {
        self.tokens.push(TokenRecord::Doctype {
            name,
            public_id: public_id.map(<[u16]>::to_vec),
            system_id: system_id.map(<[u16]>::to_vec),
            force_quirks,
        });
        self.respond(None)
    }

    fn eof(&mut self) {
        self.tokens.push(TokenRecord::Eof);
    }

    fn wants_comments(&self) -> bool {
        self.wants_comments
    }

    fn cdata_allowed(&self) -> bool {
        self.cdata_allowed
    }
}

/// Reporter that collects violations for assertions.
#[derive(Default)]
pub struct CollectingReporter {
    pub violations: Vec<Violation>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn codes(&self) -> Vec<ViolationCode> {
        self.violations.iter().map(|v| v.code).collect()
    }

    pub fn has(&self, code: ViolationCode) -> bool {
        self.violations.iter().any(|v| v.code == code)
    }
}

impl ViolationReporter for CollectingReporter {
    fn report(&mut self, violation: &Violation) {
        self.violations.push(violation.clone());
    }
}

fn escape(units: &[u16]) -> String {
    let mut out = String::new();
    for ch in char::decode_utf16(units.iter().copied()) {
        match ch {
            Ok('\n') => out.push_str("\\n"),
            Ok('\t') => out.push_str("\\t"),
            Ok('\\') => out.push_str("\\\\"),
            Ok('"') => out.push_str("\\\""),
            Ok(c) if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04X}", c as u32)),
            Ok(c) => out.push(c),
            Err(e) => out.push_str(&format!("\\u{:04X}", e.unpaired_surrogate())),
        }
    }
    out
}

fn name_text(names: &NameTable, handle: NameHandle) -> String {
    names
        .resolve_string(handle)
        .unwrap_or_else(|| format!("#{:?}", handle))
}

/// Render recorded tokens one per line, coalescing adjacent character runs
/// so the format is independent of chunking.
pub fn render_tokens(tokens: &[TokenRecord], names: &NameTable) -> Vec<String> {
    let mut lines = Vec::new();
    let mut chars: Vec<u16> = Vec::new();
    for token in tokens {
        if let TokenRecord::Characters(units) = token {
            chars.extend_from_slice(units);
            continue;
        }
        if !chars.is_empty() {
            lines.push(format!("CHAR \"{}\"", escape(&chars)));
            chars.clear();
        }
        match token {
            TokenRecord::Characters(_) => unreachable!(),
            TokenRecord::Start {
                name,
                attrs,
                self_closing,
            } => {
                let attrs: Vec<String> = attrs
                    .iter()
                    .map(|(name, value)| {
                        format!("{}=\"{}\"", name_text(names, *name), escape(value))
                    })
                    .collect();
                lines.push(format!(
                    "START name={} attrs=[{}] self_closing={}",
                    name_text(names, *name),
                    attrs.join(" "),
                    self_closing
                ));
            }
            TokenRecord::End { name } => {
                lines.push(format!("END name={}", name_text(names, *name)));
            }
            TokenRecord::Comment(units) => {
                lines.push(format!("COMMENT \"{}\"", escape(units)));
            }
            TokenRecord::Doctype {
                name,
                public_id,
                system_id,
                force_quirks,
            } => {
                let fmt_opt_name = match name {
                    Some(handle) => name_text(names, *handle),
                    None => "<none>".to_string(),
                };
                let fmt_opt_id = |id: &Option<Vec<u16>>| match id {
                    Some(units) => format!("\"{}\"", escape(units)),
                    None => "<none>".to_string(),
                };
                lines.push(format!(
                    "DOCTYPE name={} public={} system={} quirks={}",
                    fmt_opt_name,
                    fmt_opt_id(public_id),
                    fmt_opt_id(system_id),
                    force_quirks
                ));
            }
            TokenRecord::Eof => lines.push("EOF".to_string()),
        }
    }
    if !chars.is_empty() {
        lines.push(format!("CHAR \"{}\"", escape(&chars)));
    }
    lines
}

/// Everything one tokenizer run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub lines: Vec<String>,
    pub violations: Vec<Violation>,
    pub names: NameTable,
}

/// Tokenize `input` delivered as a single chunk.
pub fn run_whole(input: &str, policies: Policies) -> Result<RunOutcome, FatalViolation> {
    let units: Vec<u16> = input.encode_utf16().collect();
    run_units(&units, policies, usize::MAX, &[])
}

/// Tokenize `input` delivered in `chunk_len`-unit chunks.
pub fn run_chunked(
    input: &str,
    policies: Policies,
    chunk_len: usize,
) -> Result<RunOutcome, FatalViolation> {
    let units: Vec<u16> = input.encode_utf16().collect();
    run_units(&units, policies, chunk_len, &[])
}

/// Tokenize with content-mode switch rules (`("script", ContentMode::ScriptData)`).
pub fn run_with_modes(
    input: &str,
    policies: Policies,
    chunk_len: usize,
    modes: &[(&str, ContentMode)],
) -> Result<RunOutcome, FatalViolation> {
    let units: Vec<u16> = input.encode_utf16().collect();
    run_units(&units, policies, chunk_len, modes)
}

fn run_units(
    units: &[u16],
    policies: Policies,
    chunk_len: usize,
    modes: &[(&str, ContentMode)],
) -> Result<RunOutcome, FatalViolation> {
    let mut sink = RecordingSink::new();
    let mut names = NameTable::new();
    let mut reporter = CollectingReporter::new();
    for (name, mode) in modes {
        let handle = names.intern_str(name);
        sink.switch_rules.insert(handle, *mode);
    }
    let mut tokenizer = Tokenizer::new(policies);
    let chunk_len = chunk_len.max(1);
    for chunk in units.chunks(chunk_len.min(units.len().max(1))) {
        let mut delivered = chunk;
        loop {
            let consumed = {
                let mut host = Host {
                    sink: &mut sink,
                    names: &mut names,
                    reporter: &mut reporter,
                };
                tokenizer.tokenize_chunk(delivered, &mut host)?
            };
            if consumed >= delivered.len() {
                break;
            }
            delivered = &delivered[consumed..];
        }
    }
    {
        let mut host = Host {
            sink: &mut sink,
            names: &mut names,
            reporter: &mut reporter,
        };
        tokenizer.end_of_input(&mut host)?;
    }
    Ok(RunOutcome {
        lines: render_tokens(&sink.tokens, &names),
        violations: reporter.violations,
        names,
    })
}

/// First differing line between two renderings, for readable failures.
pub fn diff_lines(left: &[String], right: &[String]) -> Option<String> {
    for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
        if l != r {
            return Some(format!("line {}: {:?} != {:?}", i, l, r));
        }
    }
    if left.len() != right.len() {
        return Some(format!(
            "length mismatch: {} vs {} lines",
            left.len(),
            right.len()
        ));
    }
    None
}

/// Assert that tokenizing whole and at every chunk split from 1 to
/// `max_len` yields identical renderings.
pub fn assert_chunk_invariant(input: &str, policies: Policies, modes: &[(&str, ContentMode)]) {
    let units: Vec<u16> = input.encode_utf16().collect();
    let whole = run_units(&units, policies, usize::MAX, modes).expect("whole run failed");
    for chunk_len in 1..=units.len().max(1) {
        let chunked = run_units(&units, policies, chunk_len, modes)
            .unwrap_or_else(|e| panic!("chunked run failed at len {}: {}", chunk_len, e));
        if let Some(diff) = diff_lines(&whole.lines, &chunked.lines) {
            panic!(
                "chunk_len {} diverged for {:?}: {}",
                chunk_len, input, diff
            );
        }
    }
}
