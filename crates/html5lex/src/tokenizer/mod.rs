//! Incremental HTML5 tokenizer over UTF-16 code units.
//!
//! This is a streaming tokenizer: the driver feeds decoded chunks and the
//! tokenizer pushes tokens into a [`TokenSink`]. The machine is resumable at
//! any chunk boundary, including mid-tag, mid-comment and mid-character-
//! reference.
//!
//! Invariants:
//! - Chunk-equivalence: feeding input in one chunk or many chunks yields the
//!   same token sequence (character runs may split differently; consumers
//!   concatenate).
//! - `tokenize_chunk` returns the resume position; the driver redelivers the
//!   remainder of the chunk after a suspension.
//! - A complete run ends in exactly one `eof()` sink call, from
//!   `end_of_input`.

use crate::shared::{
    AttributeList, ContentMode, FatalViolation, NameHandle, NameRegistry, Policies, Severity,
    TokenSink, Violation, ViolationCode, ViolationReporter,
};
use buffers::CodeUnitBuf;
use states::State;
use units::{AMPERSAND, CR, LF, LT, RSQB, SLASH};

mod buffers;
mod charref;
mod comment;
mod doctype;
mod emit;
mod entities;
mod states;
mod tag;
mod text;
mod units;

/// The tokenizer's external collaborators, bundled per call.
///
/// Borrowing these per call (rather than owning them) keeps the tokenizer
/// state value-copyable for `save_state`/`restore_state`.
pub struct Host<'a> {
    pub sink: &'a mut dyn TokenSink,
    pub names: &'a mut dyn NameRegistry,
    pub reporter: &'a mut dyn ViolationReporter,
}

/// Minimal tokenizer instrumentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenizerStats {
    pub units_consumed: u64,
    pub tokens_emitted: u64,
    pub violations: u64,
    pub suspensions: u64,
}

/// Opaque copy of the full machine state, for speculative parses.
#[derive(Clone, Debug)]
pub struct Snapshot(MachineState);

/// Live named/numeric character reference search.
#[derive(Clone, Debug, Default)]
pub(crate) struct CharRef {
    /// Units consumed past the `&`, replayed literally on failure.
    pub(crate) buf: Vec<u16>,
    /// Window into the sorted name catalog; valid while `lo <= hi`.
    pub(crate) lo: usize,
    pub(crate) hi: usize,
    /// Characters matched so far (column into the stored names).
    pub(crate) col: usize,
    /// Longest fully-matched name seen so far.
    pub(crate) candidate: Option<usize>,
    /// `buf` length at the time `candidate` matched; units past the mark are
    /// not covered by the match and pass through.
    pub(crate) mark: usize,
    /// Numeric accumulator, clamped to `0x11_0000` on overflow.
    pub(crate) value: u32,
    pub(crate) seen_digits: bool,
    pub(crate) hex: bool,
}

/// Everything that must survive a suspension, in one clonable value.
#[derive(Clone, Debug)]
pub(crate) struct MachineState {
    pub(crate) state: State,
    pub(crate) return_state: State,
    /// Reprocess `cur` before reading the next unit.
    pub(crate) reconsume: bool,
    pub(crate) cur: u16,
    /// A CR was consumed last; an immediately following LF is swallowed.
    pub(crate) pending_cr: bool,
    pub(crate) line: u64,
    /// Shared progress counter for keyword and end-tag matching states.
    pub(crate) index: usize,
    pub(crate) small: CodeUnitBuf,
    pub(crate) large: CodeUnitBuf,
    pub(crate) tag_name: Option<NameHandle>,
    pub(crate) is_end_tag: bool,
    pub(crate) self_closing: bool,
    pub(crate) attrs: AttributeList,
    /// An attribute name has been completed but not yet committed.
    pub(crate) attr_pending: bool,
    /// `None` while pending means the attribute is being discarded.
    pub(crate) attr_name: Option<NameHandle>,
    pub(crate) doctype_name: Option<NameHandle>,
    pub(crate) public_id: Option<Vec<u16>>,
    pub(crate) system_id: Option<Vec<u16>>,
    pub(crate) force_quirks: bool,
    /// End tag that terminates the current RCDATA/RAWTEXT/script content.
    pub(crate) expected_tag: Option<NameHandle>,
    pub(crate) char_ref: CharRef,
    pub(crate) eof_done: bool,
}

impl Default for MachineState {
    fn default() -> Self {
        Self {
            state: State::Data,
            return_state: State::Data,
            reconsume: false,
            cur: 0,
            pending_cr: false,
            line: 1,
            index: 0,
            small: CodeUnitBuf::small(),
            large: CodeUnitBuf::large(),
            tag_name: None,
            is_end_tag: false,
            self_closing: false,
            attrs: AttributeList::new(),
            attr_pending: false,
            attr_name: None,
            doctype_name: None,
            public_id: None,
            system_id: None,
            force_quirks: false,
            expected_tag: None,
            char_ref: CharRef::default(),
            eof_done: false,
        }
    }
}

/// Per-call context handed to state handlers.
pub(crate) struct Cx<'h, 'a, 'c> {
    pub(crate) host: &'h mut Host<'a>,
    pub(crate) units: &'c [u16],
    pub(crate) run: Run,
}

/// Pending character run inside the current chunk.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Run {
    pub(crate) start: Option<usize>,
    pub(crate) end: usize,
}

/// Incremental HTML5 tokenizer.
pub struct Tokenizer {
    policies: Policies,
    machine: MachineState,
    stats: TokenizerStats,
    /// Stop at the next unit boundary and return control to the driver.
    suspend: bool,
}

impl Tokenizer {
    pub fn new(policies: Policies) -> Self {
        Self {
            policies,
            machine: MachineState::default(),
            stats: TokenizerStats::default(),
            suspend: false,
        }
    }

    /// Process one chunk of code units.
    ///
    /// Returns the resume position: the number of leading units fully
    /// consumed. A return value short of `chunk.len()` means the tokenizer
    /// suspended (sink request or CR at hand); the driver resumes by calling
    /// again with `&chunk[consumed..]`. The only error is a conformance
    /// policy escalated to fatal.
    pub fn tokenize_chunk(
        &mut self,
        chunk: &[u16],
        host: &mut Host<'_>,
    ) -> Result<usize, FatalViolation> {
        let mut cx = Cx {
            host,
            units: chunk,
            run: Run::default(),
        };
        let mut pos = 0usize;
        loop {
            if self.suspend {
                self.suspend = false;
                self.stats.suspensions += 1;
                self.flush_run(&mut cx);
                #[cfg(any(test, feature = "debug-stats"))]
                log::trace!(
                    target: "html5lex.tokenizer",
                    "suspended in {:?} at {}/{}",
                    self.machine.state,
                    pos,
                    chunk.len()
                );
                return Ok(pos);
            }
            let unit;
            let at;
            let mut saw_cr = false;
            if self.machine.reconsume {
                self.machine.reconsume = false;
                unit = self.machine.cur;
                at = None;
            } else {
                if pos >= chunk.len() {
                    break;
                }
                let raw = chunk[pos];
                self.stats.units_consumed += 1;
                pos += 1;
                if raw == CR {
                    // Normalize to LF now; whether a trailing LF belongs to
                    // this CR is only known once the next unit arrives, so
                    // processing stops after the substitute is handled.
                    self.flush_run(&mut cx);
                    self.machine.pending_cr = true;
                    self.machine.line += 1;
                    unit = LF;
                    at = None;
                    saw_cr = true;
                } else if raw == LF {
                    if self.machine.pending_cr {
                        self.machine.pending_cr = false;
                        continue;
                    }
                    self.machine.line += 1;
                    unit = raw;
                    at = Some(pos - 1);
                } else {
                    self.machine.pending_cr = false;
                    unit = raw;
                    at = Some(pos - 1);
                }
            }
            self.machine.cur = unit;
            self.dispatch(&mut cx, unit, at)?;
            if saw_cr {
                self.stats.suspensions += 1;
                self.flush_run(&mut cx);
                return Ok(pos);
            }
        }
        self.flush_run(&mut cx);
        Ok(pos)
    }

    /// Signal end of stream: run the current state's end-of-input recovery
    /// and deliver exactly one `eof()`.
    pub fn end_of_input(&mut self, host: &mut Host<'_>) -> Result<(), FatalViolation> {
        if self.machine.eof_done {
            return Ok(());
        }
        let mut cx = Cx {
            host,
            units: &[],
            run: Run::default(),
        };
        loop {
            match self.machine.state {
                State::Data
                | State::Rcdata
                | State::Rawtext
                | State::ScriptData
                | State::Plaintext
                | State::ScriptDataEscapeStart
                | State::ScriptDataEscapeStartDash
                | State::ScriptDataEscaped
                | State::ScriptDataEscapedDash
                | State::ScriptDataEscapedDashDash
                | State::ScriptDataDoubleEscapeStart
                | State::ScriptDataDoubleEscaped
                | State::ScriptDataDoubleEscapedDash
                | State::ScriptDataDoubleEscapedDashDash
                | State::ScriptDataDoubleEscapeEnd => {}
                State::TagOpen => {
                    self.report(&mut cx, ViolationCode::EofAfterLessThan);
                    self.emit_units(&mut cx, &[LT]);
                }
                State::CloseTagOpen => {
                    self.report(&mut cx, ViolationCode::EofAfterLessThan);
                    self.emit_units(&mut cx, &[LT, SLASH]);
                }
                State::NonDataEndTagName => {
                    self.replay_end_tag_candidate(&mut cx);
                }
                State::TagName
                | State::BeforeAttributeName
                | State::AttributeName
                | State::AfterAttributeName
                | State::BeforeAttributeValue
                | State::AttributeValueDoubleQuoted
                | State::AttributeValueSingleQuoted
                | State::AttributeValueUnquoted
                | State::AfterAttributeValueQuoted
                | State::SelfClosingStartTag => {
                    self.report(&mut cx, ViolationCode::EofInTag);
                    self.reset_tag_state();
                }
                State::RawtextRcdataLessThanSign | State::ScriptDataLessThanSign => {
                    self.emit_units(&mut cx, &[LT]);
                }
                State::ScriptDataEscapedLessThanSign
                | State::ScriptDataDoubleEscapedLessThanSign => {
                    self.emit_units(&mut cx, &[LT]);
                }
                State::MarkupDeclarationOpen => {
                    self.report(&mut cx, ViolationCode::BogusComment);
                    self.machine.large.clear();
                    self.emit_comment(&mut cx);
                }
                State::MarkupDeclarationHyphen => {
                    self.report(&mut cx, ViolationCode::BogusComment);
                    self.machine.large.clear();
                    self.machine.large.push(units::HYPHEN);
                    self.emit_comment(&mut cx);
                }
                State::MarkupDeclarationOctype | State::CdataStart => {
                    self.report(&mut cx, ViolationCode::BogusComment);
                    self.emit_comment(&mut cx);
                }
                State::CommentStart
                | State::CommentStartDash
                | State::Comment
                | State::CommentEndDash
                | State::CommentEnd
                | State::CommentEndBang => {
                    self.report(&mut cx, ViolationCode::EofInComment);
                    self.emit_comment(&mut cx);
                }
                State::BogusComment | State::BogusCommentHyphen => {
                    self.emit_comment(&mut cx);
                }
                State::CdataSection => {
                    self.report(&mut cx, ViolationCode::EofInCdata);
                }
                State::CdataRsqb => {
                    self.report(&mut cx, ViolationCode::EofInCdata);
                    self.emit_units(&mut cx, &[RSQB]);
                }
                State::CdataRsqbRsqb => {
                    self.report(&mut cx, ViolationCode::EofInCdata);
                    self.emit_units(&mut cx, &[RSQB, RSQB]);
                }
                State::Doctype | State::BeforeDoctypeName => {
                    self.report(&mut cx, ViolationCode::EofInDoctype);
                    self.machine.force_quirks = true;
                    self.emit_doctype(&mut cx);
                }
                State::DoctypeName => {
                    self.finish_doctype_name(&mut cx)?;
                    self.report(&mut cx, ViolationCode::EofInDoctype);
                    self.machine.force_quirks = true;
                    self.emit_doctype(&mut cx);
                }
                State::AfterDoctypeName
                | State::DoctypeUblic
                | State::DoctypeYstem
                | State::AfterDoctypePublicKeyword
                | State::BeforeDoctypePublicIdentifier
                | State::AfterDoctypePublicIdentifier
                | State::BetweenDoctypePublicAndSystemIdentifiers
                | State::AfterDoctypeSystemKeyword
                | State::BeforeDoctypeSystemIdentifier
                | State::AfterDoctypeSystemIdentifier => {
                    self.report(&mut cx, ViolationCode::EofInDoctype);
                    self.machine.force_quirks = true;
                    self.emit_doctype(&mut cx);
                }
                State::DoctypePublicIdentifierDoubleQuoted
                | State::DoctypePublicIdentifierSingleQuoted => {
                    self.report(&mut cx, ViolationCode::EofInDoctype);
                    self.machine.force_quirks = true;
                    self.machine.public_id = Some(self.machine.large.take_vec());
                    self.emit_doctype(&mut cx);
                }
                State::DoctypeSystemIdentifierDoubleQuoted
                | State::DoctypeSystemIdentifierSingleQuoted => {
                    self.report(&mut cx, ViolationCode::EofInDoctype);
                    self.machine.force_quirks = true;
                    self.machine.system_id = Some(self.machine.large.take_vec());
                    self.emit_doctype(&mut cx);
                }
                State::BogusDoctype => {
                    self.emit_doctype(&mut cx);
                }
                State::ConsumeCharacterReference => {
                    self.emit_or_append(&mut cx, &[AMPERSAND]);
                    self.machine.state = self.machine.return_state;
                    continue;
                }
                State::CharacterReferenceHiloLookup => {
                    self.report(&mut cx, ViolationCode::NoNamedReferenceMatch);
                    self.replay_char_ref(&mut cx);
                    self.machine.state = self.machine.return_state;
                    continue;
                }
                State::CharacterReferenceTail => {
                    self.finish_named_reference(&mut cx, None)?;
                    continue;
                }
                State::ConsumeNcr => {
                    self.report(&mut cx, ViolationCode::NoDigitsInNumericReference);
                    self.replay_char_ref(&mut cx);
                    self.machine.state = self.machine.return_state;
                    continue;
                }
                State::DecimalNcrLoop | State::HexNcrLoop => {
                    if self.machine.char_ref.seen_digits {
                        self.report(&mut cx, ViolationCode::UnterminatedNumericReference);
                        self.handle_ncr_value(&mut cx)?;
                    } else {
                        self.report(&mut cx, ViolationCode::NoDigitsInNumericReference);
                        self.replay_char_ref(&mut cx);
                    }
                    self.machine.state = self.machine.return_state;
                    continue;
                }
            }
            break;
        }
        // Reconsume carried past end of stream is meaningless; drop it.
        self.machine.reconsume = false;
        self.machine.eof_done = true;
        cx.host.sink.eof();
        Ok(())
    }

    /// Ask the tokenizer to return to the driver at the next unit boundary.
    pub fn request_suspension(&mut self) {
        self.suspend = true;
    }

    /// Put the machine into a content mode with an expected end tag, as when
    /// resuming a fragment parse inside `<textarea>` or `<script>`.
    pub fn set_mode_and_expected_end_tag(
        &mut self,
        mode: ContentMode,
        expected_end_tag: Option<&[u16]>,
        names: &mut dyn NameRegistry,
    ) {
        self.machine.state = state_for_mode(mode);
        self.machine.expected_tag = expected_end_tag.map(|units| names.intern(units));
    }

    /// Capture the full machine state for a speculative parse.
    pub fn save_state(&self) -> Snapshot {
        Snapshot(self.machine.clone())
    }

    /// Rewind to a previously captured snapshot.
    pub fn restore_state(&mut self, snapshot: Snapshot) {
        self.machine = snapshot.0;
        self.suspend = false;
    }

    /// Reset for reuse on a new stream. Policies are kept.
    pub fn reset(&mut self) {
        self.machine = MachineState::default();
        self.stats = TokenizerStats::default();
        self.suspend = false;
    }

    /// Current 1-based line number.
    pub fn line(&self) -> u64 {
        self.machine.line
    }

    /// Copy of the instrumentation counters.
    pub fn stats(&self) -> TokenizerStats {
        self.stats
    }

    fn dispatch(&mut self, cx: &mut Cx, c: u16, at: Option<usize>) -> Result<(), FatalViolation> {
        match self.machine.state {
            State::Data => self.data_state(cx, c, at),
            State::Rcdata => self.rcdata_state(cx, c, at),
            State::Rawtext => self.rawtext_state(cx, c, at),
            State::ScriptData => self.script_data_state(cx, c, at),
            State::Plaintext => self.plaintext_state(cx, c, at),
            State::TagOpen => self.tag_open_state(cx, c),
            State::CloseTagOpen => self.close_tag_open_state(cx, c),
            State::TagName => self.tag_name_state(cx, c),
            State::BeforeAttributeName => self.before_attribute_name_state(cx, c),
            State::AttributeName => self.attribute_name_state(cx, c),
            State::AfterAttributeName => self.after_attribute_name_state(cx, c),
            State::BeforeAttributeValue => self.before_attribute_value_state(cx, c),
            State::AttributeValueDoubleQuoted | State::AttributeValueSingleQuoted => {
                self.attribute_value_quoted_state(cx, c)
            }
            State::AttributeValueUnquoted => self.attribute_value_unquoted_state(cx, c),
            State::AfterAttributeValueQuoted => self.after_attribute_value_quoted_state(cx, c),
            State::SelfClosingStartTag => self.self_closing_start_tag_state(cx, c),
            State::RawtextRcdataLessThanSign => self.rawtext_rcdata_less_than_state(cx, c),
            State::NonDataEndTagName => self.non_data_end_tag_name_state(cx, c),
            State::ScriptDataLessThanSign => self.script_data_less_than_state(cx, c),
            State::ScriptDataEscapeStart => self.script_data_escape_start_state(cx, c, at),
            State::ScriptDataEscapeStartDash => self.script_data_escape_start_dash_state(cx, c, at),
            State::ScriptDataEscaped => self.script_data_escaped_state(cx, c, at),
            State::ScriptDataEscapedDash => self.script_data_escaped_dash_state(cx, c, at),
            State::ScriptDataEscapedDashDash => self.script_data_escaped_dash_dash_state(cx, c, at),
            State::ScriptDataEscapedLessThanSign => self.script_data_escaped_less_than_state(cx, c),
            State::ScriptDataDoubleEscapeStart => {
                self.script_data_double_escape_start_state(cx, c, at)
            }
            State::ScriptDataDoubleEscaped => self.script_data_double_escaped_state(cx, c, at),
            State::ScriptDataDoubleEscapedDash => {
                self.script_data_double_escaped_dash_state(cx, c, at)
            }
            State::ScriptDataDoubleEscapedDashDash => {
                self.script_data_double_escaped_dash_dash_state(cx, c, at)
            }
            State::ScriptDataDoubleEscapedLessThanSign => {
                self.script_data_double_escaped_less_than_state(cx, c, at)
            }
            State::ScriptDataDoubleEscapeEnd => {
                self.script_data_double_escape_end_state(cx, c, at)
            }
            State::MarkupDeclarationOpen => self.markup_declaration_open_state(cx, c),
            State::MarkupDeclarationHyphen => self.markup_declaration_hyphen_state(cx, c),
            State::MarkupDeclarationOctype => self.markup_declaration_octype_state(cx, c),
            State::CommentStart => self.comment_start_state(cx, c),
            State::CommentStartDash => self.comment_start_dash_state(cx, c),
            State::Comment => self.comment_state(cx, c),
            State::CommentEndDash => self.comment_end_dash_state(cx, c),
            State::CommentEnd => self.comment_end_state(cx, c),
            State::CommentEndBang => self.comment_end_bang_state(cx, c),
            State::BogusComment => self.bogus_comment_state(cx, c),
            State::BogusCommentHyphen => self.bogus_comment_hyphen_state(cx, c),
            State::CdataStart => self.cdata_start_state(cx, c),
            State::CdataSection => self.cdata_section_state(cx, c, at),
            State::CdataRsqb => self.cdata_rsqb_state(cx, c),
            State::CdataRsqbRsqb => self.cdata_rsqb_rsqb_state(cx, c),
            State::Doctype => self.doctype_state(cx, c),
            State::BeforeDoctypeName => self.before_doctype_name_state(cx, c),
            State::DoctypeName => self.doctype_name_state(cx, c),
            State::AfterDoctypeName => self.after_doctype_name_state(cx, c),
            State::DoctypeUblic => self.doctype_ublic_state(cx, c),
            State::AfterDoctypePublicKeyword => self.after_doctype_public_keyword_state(cx, c),
            State::BeforeDoctypePublicIdentifier => {
                self.before_doctype_public_identifier_state(cx, c)
            }
            State::DoctypePublicIdentifierDoubleQuoted
            | State::DoctypePublicIdentifierSingleQuoted => {
                self.doctype_public_identifier_quoted_state(cx, c)
            }
            State::AfterDoctypePublicIdentifier => {
                self.after_doctype_public_identifier_state(cx, c)
            }
            State::BetweenDoctypePublicAndSystemIdentifiers => {
                self.between_doctype_identifiers_state(cx, c)
            }
            State::DoctypeYstem => self.doctype_ystem_state(cx, c),
            State::AfterDoctypeSystemKeyword => self.after_doctype_system_keyword_state(cx, c),
            State::BeforeDoctypeSystemIdentifier => {
                self.before_doctype_system_identifier_state(cx, c)
            }
            State::DoctypeSystemIdentifierDoubleQuoted
            | State::DoctypeSystemIdentifierSingleQuoted => {
                self.doctype_system_identifier_quoted_state(cx, c)
            }
            State::AfterDoctypeSystemIdentifier => {
                self.after_doctype_system_identifier_state(cx, c)
            }
            State::BogusDoctype => self.bogus_doctype_state(cx, c),
            State::ConsumeCharacterReference => self.consume_character_reference_state(cx, c),
            State::CharacterReferenceHiloLookup => self.character_reference_hilo_state(cx, c),
            State::CharacterReferenceTail => self.character_reference_tail_state(cx, c),
            State::ConsumeNcr => self.consume_ncr_state(cx, c),
            State::DecimalNcrLoop => self.decimal_ncr_loop_state(cx, c),
            State::HexNcrLoop => self.hex_ncr_loop_state(cx, c),
        }
    }

    pub(crate) fn report(&mut self, cx: &mut Cx, code: ViolationCode) {
        self.stats.violations += 1;
        cx.host.reporter.report(&Violation {
            code,
            severity: code.severity(),
            line: self.machine.line,
        });
    }

    /// Report at fatal severity and build the abort error.
    pub(crate) fn report_fatal(&mut self, cx: &mut Cx, code: ViolationCode) -> FatalViolation {
        self.stats.violations += 1;
        cx.host.reporter.report(&Violation {
            code,
            severity: Severity::Fatal,
            line: self.machine.line,
        });
        FatalViolation {
            code,
            line: self.machine.line,
        }
    }
}

pub(crate) fn state_for_mode(mode: ContentMode) -> State {
    match mode {
        ContentMode::Data => State::Data,
        ContentMode::Rcdata => State::Rcdata,
        ContentMode::Rawtext => State::Rawtext,
        ContentMode::ScriptData => State::ScriptData,
        ContentMode::Plaintext => State::Plaintext,
    }
}

#[cfg(test)]
mod tests;
