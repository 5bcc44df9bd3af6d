//! Character-data states: data, RCDATA, RAWTEXT, script data (with its
//! escape and double-escape families), PLAINTEXT and the shared non-data
//! end-tag matcher.
//!
//! Plain characters are marked into the current chunk's run and flushed
//! lazily; only substitutions and held-back prefixes are emitted as owned
//! units.

use crate::shared::{FatalViolation, ViolationCode, ViolationPolicy};
use super::states::State;
use super::units::{
    fold_ascii, is_ascii_alpha, is_space, AMPERSAND, EXCLAMATION, FF, GT, HYPHEN, LT, NUL,
    REPLACEMENT, SLASH, SPACE,
};
use super::{Cx, Tokenizer};

/// `script`, the double-escape keyword.
const SCRIPT: [u16; 6] = [0x73, 0x63, 0x72, 0x69, 0x70, 0x74];

impl Tokenizer {
    pub(crate) fn data_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            AMPERSAND => {
                self.flush_run(cx);
                self.start_char_ref(State::Data);
            }
            LT => {
                self.flush_run(cx);
                self.machine.state = State::TagOpen;
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.flush_run(cx);
                self.emit_units(cx, &[REPLACEMENT]);
            }
            FF => return self.text_form_feed(cx, c, at),
            _ => self.mark(cx, c, at),
        }
        Ok(())
    }

    pub(crate) fn rcdata_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            AMPERSAND => {
                self.flush_run(cx);
                self.start_char_ref(State::Rcdata);
            }
            LT => {
                self.flush_run(cx);
                self.machine.return_state = State::Rcdata;
                self.machine.state = State::RawtextRcdataLessThanSign;
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.flush_run(cx);
                self.emit_units(cx, &[REPLACEMENT]);
            }
            FF => return self.text_form_feed(cx, c, at),
            _ => self.mark(cx, c, at),
        }
        Ok(())
    }

    pub(crate) fn rawtext_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            LT => {
                self.flush_run(cx);
                self.machine.return_state = State::Rawtext;
                self.machine.state = State::RawtextRcdataLessThanSign;
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.flush_run(cx);
                self.emit_units(cx, &[REPLACEMENT]);
            }
            FF => return self.text_form_feed(cx, c, at),
            _ => self.mark(cx, c, at),
        }
        Ok(())
    }

    pub(crate) fn script_data_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            LT => {
                self.flush_run(cx);
                self.machine.return_state = State::ScriptData;
                self.machine.state = State::ScriptDataLessThanSign;
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.flush_run(cx);
                self.emit_units(cx, &[REPLACEMENT]);
            }
            FF => return self.text_form_feed(cx, c, at),
            _ => self.mark(cx, c, at),
        }
        Ok(())
    }

    pub(crate) fn plaintext_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.flush_run(cx);
                self.emit_units(cx, &[REPLACEMENT]);
            }
            FF => return self.text_form_feed(cx, c, at),
            _ => self.mark(cx, c, at),
        }
        Ok(())
    }

    /// Literal U+000C in character data, governed by the content-space
    /// policy.
    fn text_form_feed(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match self.policies.content_space {
            ViolationPolicy::Allow => {
                self.report(cx, ViolationCode::FormFeedInContent);
                self.mark(cx, c, at);
                Ok(())
            }
            ViolationPolicy::Alter => {
                self.report(cx, ViolationCode::FormFeedInContent);
                self.flush_run(cx);
                self.emit_units(cx, &[SPACE]);
                Ok(())
            }
            ViolationPolicy::Fatal => Err(self.report_fatal(cx, ViolationCode::FormFeedInContent)),
        }
    }

    pub(crate) fn rawtext_rcdata_less_than_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            SLASH => {
                self.machine.small.clear();
                self.machine.index = 0;
                self.machine.state = State::NonDataEndTagName;
            }
            _ => {
                self.emit_units(cx, &[LT]);
                self.machine.reconsume = true;
                self.machine.state = self.machine.return_state;
            }
        }
        Ok(())
    }

    /// Unit-by-unit case-insensitive match against the expected end tag.
    /// Any mismatch replays the consumed `</…` literally and reprocesses in
    /// the content state that owns it.
    pub(crate) fn non_data_end_tag_name_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        let expected_len = self
            .machine
            .expected_tag
            .and_then(|handle| cx.host.names.resolve(handle))
            .map(<[u16]>::len);
        let Some(expected_len) = expected_len else {
            self.replay_end_tag_candidate(cx);
            self.machine.reconsume = true;
            self.machine.state = self.machine.return_state;
            return Ok(());
        };
        let idx = self.machine.index;
        if idx < expected_len {
            let want = self
                .machine
                .expected_tag
                .and_then(|handle| cx.host.names.resolve(handle))
                .and_then(|units| units.get(idx).copied());
            if want == Some(fold_ascii(c)) {
                self.machine.small.push(c);
                self.machine.index = idx + 1;
            } else {
                self.replay_end_tag_candidate(cx);
                self.machine.reconsume = true;
                self.machine.state = self.machine.return_state;
            }
            return Ok(());
        }
        // Full name matched; only a tag-terminating unit confirms it.
        match c {
            _ if is_space(c) => {
                self.begin_expected_end_tag();
                self.machine.state = State::BeforeAttributeName;
            }
            SLASH => {
                self.begin_expected_end_tag();
                self.machine.state = State::SelfClosingStartTag;
            }
            GT => {
                self.begin_expected_end_tag();
                self.emit_tag(cx);
            }
            _ => {
                self.replay_end_tag_candidate(cx);
                self.machine.reconsume = true;
                self.machine.state = self.machine.return_state;
            }
        }
        Ok(())
    }

    fn begin_expected_end_tag(&mut self) {
        self.machine.tag_name = self.machine.expected_tag;
        self.machine.is_end_tag = true;
        self.machine.self_closing = false;
        self.machine.attrs.clear();
        self.machine.small.clear();
    }

    /// Emit the held-back `</` plus whatever prefix of the expected name was
    /// consumed.
    pub(crate) fn replay_end_tag_candidate(&mut self, cx: &mut Cx) {
        let mut literal = vec![LT, SLASH];
        literal.extend_from_slice(self.machine.small.as_slice());
        self.machine.small.clear();
        self.emit_units(cx, &literal);
    }

    pub(crate) fn script_data_less_than_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            SLASH => {
                self.machine.small.clear();
                self.machine.index = 0;
                self.machine.state = State::NonDataEndTagName;
            }
            EXCLAMATION => {
                self.emit_units(cx, &[LT, EXCLAMATION]);
                self.machine.state = State::ScriptDataEscapeStart;
            }
            _ => {
                self.emit_units(cx, &[LT]);
                self.machine.reconsume = true;
                self.machine.state = State::ScriptData;
            }
        }
        Ok(())
    }

    pub(crate) fn script_data_escape_start_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataEscapeStartDash;
            }
            _ => {
                self.machine.reconsume = true;
                self.machine.state = State::ScriptData;
            }
        }
        Ok(())
    }

    pub(crate) fn script_data_escape_start_dash_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataEscapedDashDash;
            }
            _ => {
                self.machine.reconsume = true;
                self.machine.state = State::ScriptData;
            }
        }
        Ok(())
    }

    pub(crate) fn script_data_escaped_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataEscapedDash;
            }
            LT => {
                self.flush_run(cx);
                self.machine.return_state = State::ScriptDataEscaped;
                self.machine.state = State::ScriptDataEscapedLessThanSign;
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.flush_run(cx);
                self.emit_units(cx, &[REPLACEMENT]);
            }
            _ => self.mark(cx, c, at),
        }
        Ok(())
    }

    pub(crate) fn script_data_escaped_dash_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataEscapedDashDash;
            }
            LT => {
                self.flush_run(cx);
                self.machine.return_state = State::ScriptDataEscaped;
                self.machine.state = State::ScriptDataEscapedLessThanSign;
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.flush_run(cx);
                self.emit_units(cx, &[REPLACEMENT]);
                self.machine.state = State::ScriptDataEscaped;
            }
            _ => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataEscaped;
            }
        }
        Ok(())
    }

    pub(crate) fn script_data_escaped_dash_dash_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => self.mark(cx, c, at),
            LT => {
                self.flush_run(cx);
                self.machine.return_state = State::ScriptDataEscaped;
                self.machine.state = State::ScriptDataEscapedLessThanSign;
            }
            GT => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptData;
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.flush_run(cx);
                self.emit_units(cx, &[REPLACEMENT]);
                self.machine.state = State::ScriptDataEscaped;
            }
            _ => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataEscaped;
            }
        }
        Ok(())
    }

    pub(crate) fn script_data_escaped_less_than_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            SLASH => {
                self.machine.small.clear();
                self.machine.index = 0;
                self.machine.state = State::NonDataEndTagName;
            }
            _ if is_ascii_alpha(c) => {
                self.emit_units(cx, &[LT]);
                self.machine.index = 0;
                self.machine.reconsume = true;
                self.machine.state = State::ScriptDataDoubleEscapeStart;
            }
            _ => {
                self.emit_units(cx, &[LT]);
                self.machine.reconsume = true;
                self.machine.state = State::ScriptDataEscaped;
            }
        }
        Ok(())
    }

    pub(crate) fn script_data_double_escape_start_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        self.double_escape_keyword(cx, c, at, State::ScriptDataDoubleEscaped, State::ScriptDataEscaped)
    }

    pub(crate) fn script_data_double_escaped_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataDoubleEscapedDash;
            }
            LT => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataDoubleEscapedLessThanSign;
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.flush_run(cx);
                self.emit_units(cx, &[REPLACEMENT]);
            }
            _ => self.mark(cx, c, at),
        }
        Ok(())
    }

    pub(crate) fn script_data_double_escaped_dash_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataDoubleEscapedDashDash;
            }
            LT => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataDoubleEscapedLessThanSign;
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.flush_run(cx);
                self.emit_units(cx, &[REPLACEMENT]);
                self.machine.state = State::ScriptDataDoubleEscaped;
            }
            _ => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataDoubleEscaped;
            }
        }
        Ok(())
    }

    pub(crate) fn script_data_double_escaped_dash_dash_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => self.mark(cx, c, at),
            LT => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataDoubleEscapedLessThanSign;
            }
            GT => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptData;
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.flush_run(cx);
                self.emit_units(cx, &[REPLACEMENT]);
                self.machine.state = State::ScriptDataDoubleEscaped;
            }
            _ => {
                self.mark(cx, c, at);
                self.machine.state = State::ScriptDataDoubleEscaped;
            }
        }
        Ok(())
    }

    pub(crate) fn script_data_double_escaped_less_than_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            SLASH => {
                self.mark(cx, c, at);
                self.machine.index = 0;
                self.machine.state = State::ScriptDataDoubleEscapeEnd;
            }
            _ => {
                self.machine.reconsume = true;
                self.machine.state = State::ScriptDataDoubleEscaped;
            }
        }
        Ok(())
    }

    pub(crate) fn script_data_double_escape_end_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        self.double_escape_keyword(cx, c, at, State::ScriptDataEscaped, State::ScriptDataDoubleEscaped)
    }

    /// Both double-escape boundary states track `script` with the shared
    /// index counter; the characters stay visible as script text either way.
    fn double_escape_keyword(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
        on_match: State,
        on_mismatch: State,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) || c == SLASH || c == GT => {
                self.mark(cx, c, at);
                self.machine.state = if self.machine.index == SCRIPT.len() {
                    on_match
                } else {
                    on_mismatch
                };
            }
            _ if is_ascii_alpha(c) => {
                let idx = self.machine.index;
                if idx < SCRIPT.len() && fold_ascii(c) == SCRIPT[idx] {
                    self.machine.index = idx + 1;
                } else {
                    self.machine.index = SCRIPT.len() + 1;
                }
                self.mark(cx, c, at);
            }
            _ => {
                self.machine.reconsume = true;
                self.machine.state = on_mismatch;
            }
        }
        Ok(())
    }
}
