//! Markup declarations, comments and CDATA sections.
//!
//! Comment end handling holds pending hyphens in the state instead of the
//! buffer, so the comment conformance policy can decide how a `--` run is
//! written back (verbatim, space-separated, or fatal).

use crate::shared::{FatalViolation, ViolationCode, ViolationPolicy};
use super::states::State;
use super::units::{
    EXCLAMATION, GT, HYPHEN, LSQB, NUL, REPLACEMENT, RSQB, SPACE,
};
use super::{Cx, Tokenizer};

/// `octype`, matched case-insensitively after `<!d`.
const OCTYPE: [u16; 6] = [0x6F, 0x63, 0x74, 0x79, 0x70, 0x65];
/// `CDATA[`, matched case-sensitively after `<![`.
const CDATA_LSQB: [u16; 6] = [0x43, 0x44, 0x41, 0x54, 0x41, 0x5B];

impl Tokenizer {
    pub(crate) fn markup_declaration_open_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => self.machine.state = State::MarkupDeclarationHyphen,
            0x44 | 0x64 => {
                // `d` or `D`; the consumed units are kept for the bogus
                // comment salvage path.
                self.machine.large.clear();
                self.machine.large.push(c);
                self.machine.index = 0;
                self.machine.state = State::MarkupDeclarationOctype;
            }
            LSQB if cx.host.sink.cdata_allowed() => {
                self.machine.large.clear();
                self.machine.large.push(c);
                self.machine.index = 0;
                self.machine.state = State::CdataStart;
            }
            LSQB => {
                self.report(cx, ViolationCode::CdataOutsideForeignContent);
                self.machine.large.clear();
                self.machine.large.push(c);
                self.machine.state = State::BogusComment;
            }
            _ => {
                self.report(cx, ViolationCode::BogusComment);
                self.machine.large.clear();
                self.machine.reconsume = true;
                self.machine.state = State::BogusComment;
            }
        }
        Ok(())
    }

    pub(crate) fn markup_declaration_hyphen_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => {
                self.machine.large.clear();
                self.machine.state = State::CommentStart;
            }
            _ => {
                self.report(cx, ViolationCode::BogusComment);
                self.machine.large.clear();
                self.machine.large.push(HYPHEN);
                self.machine.reconsume = true;
                self.machine.state = State::BogusComment;
            }
        }
        Ok(())
    }

    pub(crate) fn markup_declaration_octype_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        let idx = self.machine.index;
        if super::units::fold_ascii(c) == OCTYPE[idx] {
            self.machine.large.push(c);
            self.machine.index = idx + 1;
            if self.machine.index == OCTYPE.len() {
                self.machine.large.clear();
                self.machine.state = State::Doctype;
            }
        } else {
            self.report(cx, ViolationCode::BogusComment);
            self.machine.reconsume = true;
            self.machine.state = State::BogusComment;
        }
        Ok(())
    }

    pub(crate) fn comment_start_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => self.machine.state = State::CommentStartDash,
            GT => {
                self.report(cx, ViolationCode::PrematureEndOfComment);
                self.emit_comment(cx);
            }
            _ => {
                self.machine.reconsume = true;
                self.machine.state = State::Comment;
            }
        }
        Ok(())
    }

    pub(crate) fn comment_start_dash_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => self.machine.state = State::CommentEnd,
            GT => {
                self.report(cx, ViolationCode::PrematureEndOfComment);
                self.emit_comment(cx);
            }
            _ => {
                self.machine.large.push(HYPHEN);
                self.machine.reconsume = true;
                self.machine.state = State::Comment;
            }
        }
        Ok(())
    }

    pub(crate) fn comment_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => self.machine.state = State::CommentEndDash,
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.machine.large.push(REPLACEMENT);
            }
            _ => self.machine.large.push(c),
        }
        Ok(())
    }

    pub(crate) fn comment_end_dash_state(
        &mut self,
        _cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            HYPHEN => self.machine.state = State::CommentEnd,
            _ => {
                self.machine.large.push(HYPHEN);
                self.machine.reconsume = true;
                self.machine.state = State::Comment;
            }
        }
        Ok(())
    }

    pub(crate) fn comment_end_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        match c {
            GT => self.emit_comment(cx),
            EXCLAMATION => self.machine.state = State::CommentEndBang,
            HYPHEN => {
                // A third hyphen: one is flushed through the policy, two
                // stay held.
                self.append_comment_hyphens(
                    cx,
                    ViolationCode::DoubleHyphenInComment,
                    &[HYPHEN],
                    &[HYPHEN, SPACE],
                )?;
            }
            _ => {
                self.append_comment_hyphens(
                    cx,
                    ViolationCode::DoubleHyphenInComment,
                    &[HYPHEN, HYPHEN],
                    &[HYPHEN, SPACE, HYPHEN],
                )?;
                self.machine.reconsume = true;
                self.machine.state = State::Comment;
            }
        }
        Ok(())
    }

    pub(crate) fn comment_end_bang_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            GT => match self.policies.comment {
                ViolationPolicy::Allow => {
                    self.report(cx, ViolationCode::CommentEndedWithBang);
                    self.emit_comment(cx);
                }
                ViolationPolicy::Alter => {
                    self.report(cx, ViolationCode::CommentEndedWithBang);
                    self.machine.large.extend(&[HYPHEN, SPACE, HYPHEN, EXCLAMATION]);
                    self.emit_comment(cx);
                }
                ViolationPolicy::Fatal => {
                    return Err(self.report_fatal(cx, ViolationCode::CommentEndedWithBang));
                }
            },
            HYPHEN => {
                self.append_comment_hyphens(
                    cx,
                    ViolationCode::DoubleHyphenInComment,
                    &[HYPHEN, HYPHEN, EXCLAMATION],
                    &[HYPHEN, SPACE, HYPHEN, EXCLAMATION],
                )?;
                self.machine.state = State::CommentEndDash;
            }
            _ => {
                self.append_comment_hyphens(
                    cx,
                    ViolationCode::DoubleHyphenInComment,
                    &[HYPHEN, HYPHEN, EXCLAMATION],
                    &[HYPHEN, SPACE, HYPHEN, EXCLAMATION],
                )?;
                self.machine.reconsume = true;
                self.machine.state = State::Comment;
            }
        }
        Ok(())
    }

    pub(crate) fn bogus_comment_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            GT => self.emit_comment(cx),
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.machine.large.push(REPLACEMENT);
            }
            HYPHEN => {
                self.machine.large.push(HYPHEN);
                self.machine.state = State::BogusCommentHyphen;
            }
            _ => self.machine.large.push(c),
        }
        Ok(())
    }

    pub(crate) fn bogus_comment_hyphen_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            GT => self.emit_comment(cx),
            HYPHEN => {
                // Consecutive hyphens in a bogus comment hit the same
                // policy as `--` in a proper comment.
                self.append_comment_hyphens(
                    cx,
                    ViolationCode::DoubleHyphenInComment,
                    &[HYPHEN],
                    &[SPACE, HYPHEN],
                )?;
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.machine.large.push(REPLACEMENT);
                self.machine.state = State::BogusComment;
            }
            _ => {
                self.machine.large.push(c);
                self.machine.state = State::BogusComment;
            }
        }
        Ok(())
    }

    pub(crate) fn cdata_start_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        let idx = self.machine.index;
        if c == CDATA_LSQB[idx] {
            self.machine.large.push(c);
            self.machine.index = idx + 1;
            if self.machine.index == CDATA_LSQB.len() {
                self.machine.large.clear();
                self.machine.state = State::CdataSection;
            }
        } else {
            self.report(cx, ViolationCode::BogusComment);
            self.machine.reconsume = true;
            self.machine.state = State::BogusComment;
        }
        Ok(())
    }

    pub(crate) fn cdata_section_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
        at: Option<usize>,
    ) -> Result<(), FatalViolation> {
        match c {
            RSQB => {
                self.flush_run(cx);
                self.machine.state = State::CdataRsqb;
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

    pub(crate) fn cdata_rsqb_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        match c {
            RSQB => self.machine.state = State::CdataRsqbRsqb,
            _ => {
                self.emit_units(cx, &[RSQB]);
                self.machine.reconsume = true;
                self.machine.state = State::CdataSection;
            }
        }
        Ok(())
    }

    pub(crate) fn cdata_rsqb_rsqb_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            GT => self.machine.state = State::Data,
            RSQB => self.emit_units(cx, &[RSQB]),
            _ => {
                self.emit_units(cx, &[RSQB, RSQB]);
                self.machine.reconsume = true;
                self.machine.state = State::CdataSection;
            }
        }
        Ok(())
    }
}
