//! The DOCTYPE state family.
//!
//! Keyword matching for `PUBLIC`/`SYSTEM` runs through dedicated states
//! sharing the machine's index counter; everything malformed past the name
//! falls into bogus-DOCTYPE salvage, which still emits a force-quirks token.

use crate::shared::{FatalViolation, ViolationCode};
use super::states::State;
use super::units::{
    fold_ascii, is_space, APOSTROPHE, GT, NUL, QUOTE, REPLACEMENT,
};
use super::{Cx, Tokenizer};

/// `ublic` and `ystem`, matched case-insensitively after the first keyword
/// letter.
const UBLIC: [u16; 5] = [0x75, 0x62, 0x6C, 0x69, 0x63];
const YSTEM: [u16; 5] = [0x79, 0x73, 0x74, 0x65, 0x6D];

impl Tokenizer {
    pub(crate) fn doctype_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        self.machine.doctype_name = None;
        self.machine.public_id = None;
        self.machine.system_id = None;
        self.machine.force_quirks = false;
        match c {
            _ if is_space(c) => self.machine.state = State::BeforeDoctypeName,
            _ => {
                self.report(cx, ViolationCode::MissingSpaceBeforeDoctypeName);
                self.machine.reconsume = true;
                self.machine.state = State::BeforeDoctypeName;
            }
        }
        Ok(())
    }

    pub(crate) fn before_doctype_name_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {}
            GT => {
                self.report(cx, ViolationCode::NamelessDoctype);
                self.machine.force_quirks = true;
                self.emit_doctype(cx);
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.machine.small.clear();
                self.machine.small.push(REPLACEMENT);
                self.machine.state = State::DoctypeName;
            }
            _ => {
                self.machine.small.clear();
                self.machine.small.push(fold_ascii(c));
                self.machine.state = State::DoctypeName;
            }
        }
        Ok(())
    }

    pub(crate) fn doctype_name_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {
                self.finish_doctype_name(cx)?;
                self.machine.state = State::AfterDoctypeName;
            }
            GT => {
                self.finish_doctype_name(cx)?;
                self.emit_doctype(cx);
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.machine.small.push(REPLACEMENT);
            }
            _ => self.machine.small.push(fold_ascii(c)),
        }
        Ok(())
    }

    pub(crate) fn after_doctype_name_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {}
            GT => self.emit_doctype(cx),
            0x50 | 0x70 => {
                // `p` or `P` opens the PUBLIC keyword.
                self.machine.index = 0;
                self.machine.state = State::DoctypeUblic;
            }
            0x53 | 0x73 => {
                self.machine.index = 0;
                self.machine.state = State::DoctypeYstem;
            }
            _ => {
                self.report(cx, ViolationCode::BogusDoctype);
                self.machine.force_quirks = true;
                self.machine.state = State::BogusDoctype;
            }
        }
        Ok(())
    }

    pub(crate) fn doctype_ublic_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        let idx = self.machine.index;
        if fold_ascii(c) == UBLIC[idx] {
            self.machine.index = idx + 1;
            if self.machine.index == UBLIC.len() {
                self.machine.state = State::AfterDoctypePublicKeyword;
            }
        } else {
            self.report(cx, ViolationCode::BogusDoctype);
            self.machine.force_quirks = true;
            self.machine.reconsume = true;
            self.machine.state = State::BogusDoctype;
        }
        Ok(())
    }

    pub(crate) fn doctype_ystem_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        let idx = self.machine.index;
        if fold_ascii(c) == YSTEM[idx] {
            self.machine.index = idx + 1;
            if self.machine.index == YSTEM.len() {
                self.machine.state = State::AfterDoctypeSystemKeyword;
            }
        } else {
            self.report(cx, ViolationCode::BogusDoctype);
            self.machine.force_quirks = true;
            self.machine.reconsume = true;
            self.machine.state = State::BogusDoctype;
        }
        Ok(())
    }

    pub(crate) fn after_doctype_public_keyword_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => self.machine.state = State::BeforeDoctypePublicIdentifier,
            QUOTE => {
                self.report(cx, ViolationCode::NoSpaceBeforeDoctypeIdentifier);
                self.machine.large.clear();
                self.machine.state = State::DoctypePublicIdentifierDoubleQuoted;
            }
            APOSTROPHE => {
                self.report(cx, ViolationCode::NoSpaceBeforeDoctypeIdentifier);
                self.machine.large.clear();
                self.machine.state = State::DoctypePublicIdentifierSingleQuoted;
            }
            GT => {
                self.report(cx, ViolationCode::MissingQuoteBeforePublicIdentifier);
                self.machine.force_quirks = true;
                self.emit_doctype(cx);
            }
            _ => {
                self.report(cx, ViolationCode::MissingQuoteBeforePublicIdentifier);
                self.machine.force_quirks = true;
                self.machine.state = State::BogusDoctype;
            }
        }
        Ok(())
    }

    pub(crate) fn before_doctype_public_identifier_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {}
            QUOTE => {
                self.machine.large.clear();
                self.machine.state = State::DoctypePublicIdentifierDoubleQuoted;
            }
            APOSTROPHE => {
                self.machine.large.clear();
                self.machine.state = State::DoctypePublicIdentifierSingleQuoted;
            }
            GT => {
                self.report(cx, ViolationCode::MissingQuoteBeforePublicIdentifier);
                self.machine.force_quirks = true;
                self.emit_doctype(cx);
            }
            _ => {
                self.report(cx, ViolationCode::MissingQuoteBeforePublicIdentifier);
                self.machine.force_quirks = true;
                self.machine.state = State::BogusDoctype;
            }
        }
        Ok(())
    }

    pub(crate) fn doctype_public_identifier_quoted_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        let closing = if self.machine.state == State::DoctypePublicIdentifierDoubleQuoted {
            QUOTE
        } else {
            APOSTROPHE
        };
        match c {
            _ if c == closing => {
                self.machine.public_id = Some(self.machine.large.take_vec());
                self.machine.state = State::AfterDoctypePublicIdentifier;
            }
            GT => {
                self.report(cx, ViolationCode::GreaterThanInPublicIdentifier);
                self.machine.force_quirks = true;
                self.machine.public_id = Some(self.machine.large.take_vec());
                self.emit_doctype(cx);
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.machine.large.push(REPLACEMENT);
            }
            _ => self.machine.large.push(c),
        }
        Ok(())
    }

    pub(crate) fn after_doctype_public_identifier_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {
                self.machine.state = State::BetweenDoctypePublicAndSystemIdentifiers;
            }
            GT => self.emit_doctype(cx),
            QUOTE => {
                self.report(cx, ViolationCode::NoSpaceBeforeDoctypeIdentifier);
                self.machine.large.clear();
                self.machine.state = State::DoctypeSystemIdentifierDoubleQuoted;
            }
            APOSTROPHE => {
                self.report(cx, ViolationCode::NoSpaceBeforeDoctypeIdentifier);
                self.machine.large.clear();
                self.machine.state = State::DoctypeSystemIdentifierSingleQuoted;
            }
            _ => {
                self.report(cx, ViolationCode::MissingQuoteBeforeSystemIdentifier);
                self.machine.force_quirks = true;
                self.machine.state = State::BogusDoctype;
            }
        }
        Ok(())
    }

    pub(crate) fn between_doctype_identifiers_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {}
            GT => self.emit_doctype(cx),
            QUOTE => {
                self.machine.large.clear();
                self.machine.state = State::DoctypeSystemIdentifierDoubleQuoted;
            }
            APOSTROPHE => {
                self.machine.large.clear();
                self.machine.state = State::DoctypeSystemIdentifierSingleQuoted;
            }
            _ => {
                self.report(cx, ViolationCode::MissingQuoteBeforeSystemIdentifier);
                self.machine.force_quirks = true;
                self.machine.state = State::BogusDoctype;
            }
        }
        Ok(())
    }

    pub(crate) fn after_doctype_system_keyword_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => self.machine.state = State::BeforeDoctypeSystemIdentifier,
            QUOTE => {
                self.report(cx, ViolationCode::NoSpaceBeforeDoctypeIdentifier);
                self.machine.large.clear();
                self.machine.state = State::DoctypeSystemIdentifierDoubleQuoted;
            }
            APOSTROPHE => {
                self.report(cx, ViolationCode::NoSpaceBeforeDoctypeIdentifier);
                self.machine.large.clear();
                self.machine.state = State::DoctypeSystemIdentifierSingleQuoted;
            }
            GT => {
                self.report(cx, ViolationCode::MissingQuoteBeforeSystemIdentifier);
                self.machine.force_quirks = true;
                self.emit_doctype(cx);
            }
            _ => {
                self.report(cx, ViolationCode::MissingQuoteBeforeSystemIdentifier);
                self.machine.force_quirks = true;
                self.machine.state = State::BogusDoctype;
            }
        }
        Ok(())
    }

    pub(crate) fn before_doctype_system_identifier_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {}
            QUOTE => {
                self.machine.large.clear();
                self.machine.state = State::DoctypeSystemIdentifierDoubleQuoted;
            }
            APOSTROPHE => {
                self.machine.large.clear();
                self.machine.state = State::DoctypeSystemIdentifierSingleQuoted;
            }
            GT => {
                self.report(cx, ViolationCode::MissingQuoteBeforeSystemIdentifier);
                self.machine.force_quirks = true;
                self.emit_doctype(cx);
            }
            _ => {
                self.report(cx, ViolationCode::MissingQuoteBeforeSystemIdentifier);
                self.machine.force_quirks = true;
                self.machine.state = State::BogusDoctype;
            }
        }
        Ok(())
    }

    pub(crate) fn doctype_system_identifier_quoted_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        let closing = if self.machine.state == State::DoctypeSystemIdentifierDoubleQuoted {
            QUOTE
        } else {
            APOSTROPHE
        };
        match c {
            _ if c == closing => {
                self.machine.system_id = Some(self.machine.large.take_vec());
                self.machine.state = State::AfterDoctypeSystemIdentifier;
            }
            GT => {
                self.report(cx, ViolationCode::GreaterThanInSystemIdentifier);
                self.machine.force_quirks = true;
                self.machine.system_id = Some(self.machine.large.take_vec());
                self.emit_doctype(cx);
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.machine.large.push(REPLACEMENT);
            }
            _ => self.machine.large.push(c),
        }
        Ok(())
    }

    pub(crate) fn after_doctype_system_identifier_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {}
            GT => self.emit_doctype(cx),
            _ => {
                // Trailing garbage does not force quirks once both
                // identifiers are in.
                self.report(cx, ViolationCode::BogusDoctype);
                self.machine.state = State::BogusDoctype;
            }
        }
        Ok(())
    }

    pub(crate) fn bogus_doctype_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        match c {
            GT => self.emit_doctype(cx),
            _ => {}
        }
        Ok(())
    }
}
