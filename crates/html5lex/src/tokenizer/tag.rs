//! Tag and attribute states.

use crate::shared::{FatalViolation, ViolationCode};
use super::states::State;
use super::units::{
    fold_ascii, is_ascii_alpha, is_space, AMPERSAND, APOSTROPHE, EQUALS, EXCLAMATION, GRAVE, GT,
    LT, NUL, QUESTION, QUOTE, REPLACEMENT, SLASH,
};
use super::{Cx, Tokenizer};

impl Tokenizer {
    pub(crate) fn tag_open_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        match c {
            _ if is_ascii_alpha(c) => {
                self.begin_tag(false);
                self.machine.small.push(fold_ascii(c));
                self.machine.state = State::TagName;
            }
            EXCLAMATION => {
                self.machine.state = State::MarkupDeclarationOpen;
            }
            SLASH => {
                self.machine.state = State::CloseTagOpen;
            }
            QUESTION => {
                // Processing instructions do not exist in HTML; the whole
                // `<?…>` run is salvaged as a bogus comment.
                self.report(cx, ViolationCode::BogusComment);
                self.machine.large.clear();
                self.machine.large.push(QUESTION);
                self.machine.state = State::BogusComment;
            }
            GT => {
                self.report(cx, ViolationCode::BadCharacterAfterLessThan);
                self.emit_units(cx, &[LT, GT]);
                self.machine.state = State::Data;
            }
            _ => {
                self.report(cx, ViolationCode::BadCharacterAfterLessThan);
                self.emit_units(cx, &[LT]);
                self.machine.reconsume = true;
                self.machine.state = State::Data;
            }
        }
        Ok(())
    }

    pub(crate) fn close_tag_open_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            GT => {
                self.report(cx, ViolationCode::EmptyEndTag);
                self.machine.state = State::Data;
            }
            _ if is_ascii_alpha(c) => {
                self.begin_tag(true);
                self.machine.small.push(fold_ascii(c));
                self.machine.state = State::TagName;
            }
            _ => {
                self.report(cx, ViolationCode::GarbageAfterLessThanSlash);
                self.machine.large.clear();
                self.machine.reconsume = true;
                self.machine.state = State::BogusComment;
            }
        }
        Ok(())
    }

    fn begin_tag(&mut self, is_end: bool) {
        self.machine.small.clear();
        self.machine.large.clear();
        self.machine.attrs.clear();
        self.machine.attr_pending = false;
        self.machine.attr_name = None;
        self.machine.tag_name = None;
        self.machine.is_end_tag = is_end;
        self.machine.self_closing = false;
    }

    pub(crate) fn tag_name_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {
                self.finish_tag_name(cx)?;
                self.machine.state = State::BeforeAttributeName;
            }
            SLASH => {
                self.finish_tag_name(cx)?;
                self.machine.state = State::SelfClosingStartTag;
            }
            GT => {
                self.finish_tag_name(cx)?;
                self.emit_tag(cx);
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.machine.small.push(REPLACEMENT);
            }
            _ => self.machine.small.push(fold_ascii(c)),
        }
        Ok(())
    }

    pub(crate) fn before_attribute_name_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {}
            SLASH => self.machine.state = State::SelfClosingStartTag,
            GT => self.emit_tag(cx),
            EQUALS => {
                self.report(cx, ViolationCode::EqualsSignBeforeAttributeName);
                self.start_attribute_name(c);
            }
            QUOTE | APOSTROPHE => {
                self.report(cx, ViolationCode::QuoteBeforeAttributeName);
                self.start_attribute_name(c);
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.start_attribute_name(REPLACEMENT);
            }
            _ => self.start_attribute_name(fold_ascii(c)),
        }
        Ok(())
    }

    fn start_attribute_name(&mut self, first: u16) {
        self.machine.small.clear();
        self.machine.small.push(first);
        self.machine.state = State::AttributeName;
    }

    pub(crate) fn attribute_name_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {
                self.finish_attribute_name(cx)?;
                self.machine.state = State::AfterAttributeName;
            }
            SLASH => {
                self.finish_attribute_name(cx)?;
                self.commit_attribute_without_value();
                self.machine.state = State::SelfClosingStartTag;
            }
            EQUALS => {
                self.finish_attribute_name(cx)?;
                self.machine.state = State::BeforeAttributeValue;
            }
            GT => {
                self.finish_attribute_name(cx)?;
                self.emit_tag(cx);
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.machine.small.push(REPLACEMENT);
            }
            QUOTE | APOSTROPHE | LT => {
                self.report(cx, ViolationCode::QuoteOrLessThanInAttributeName);
                self.machine.small.push(c);
            }
            _ => self.machine.small.push(fold_ascii(c)),
        }
        Ok(())
    }

    pub(crate) fn after_attribute_name_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {}
            SLASH => {
                self.commit_attribute_without_value();
                self.machine.state = State::SelfClosingStartTag;
            }
            EQUALS => self.machine.state = State::BeforeAttributeValue,
            GT => {
                self.emit_tag(cx);
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.commit_attribute_without_value();
                self.start_attribute_name(REPLACEMENT);
            }
            QUOTE | APOSTROPHE => {
                self.report(cx, ViolationCode::QuoteBeforeAttributeName);
                self.commit_attribute_without_value();
                self.start_attribute_name(c);
            }
            _ => {
                self.commit_attribute_without_value();
                self.start_attribute_name(fold_ascii(c));
            }
        }
        Ok(())
    }

    pub(crate) fn before_attribute_value_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {}
            QUOTE => {
                self.machine.large.clear();
                self.machine.state = State::AttributeValueDoubleQuoted;
            }
            APOSTROPHE => {
                self.machine.large.clear();
                self.machine.state = State::AttributeValueSingleQuoted;
            }
            GT => {
                self.report(cx, ViolationCode::AttributeValueMissing);
                self.commit_attribute_without_value();
                self.emit_tag(cx);
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.machine.large.clear();
                self.machine.large.push(REPLACEMENT);
                self.machine.state = State::AttributeValueUnquoted;
            }
            LT | EQUALS | GRAVE => {
                self.report(cx, ViolationCode::BadCharacterInUnquotedValue);
                self.machine.large.clear();
                self.machine.large.push(c);
                self.machine.state = State::AttributeValueUnquoted;
            }
            _ => {
                self.machine.large.clear();
                self.machine.reconsume = true;
                self.machine.state = State::AttributeValueUnquoted;
            }
        }
        Ok(())
    }

    pub(crate) fn attribute_value_quoted_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        let closing = if self.machine.state == State::AttributeValueDoubleQuoted {
            QUOTE
        } else {
            APOSTROPHE
        };
        match c {
            _ if c == closing => {
                self.commit_attribute_with_value();
                self.machine.state = State::AfterAttributeValueQuoted;
            }
            AMPERSAND => self.start_char_ref(self.machine.state),
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.machine.large.push(REPLACEMENT);
            }
            _ => self.machine.large.push(c),
        }
        Ok(())
    }

    pub(crate) fn attribute_value_unquoted_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => {
                self.commit_attribute_with_value();
                self.machine.state = State::BeforeAttributeName;
            }
            AMPERSAND => self.start_char_ref(State::AttributeValueUnquoted),
            GT => {
                self.commit_attribute_with_value();
                self.emit_tag(cx);
            }
            NUL => {
                self.report(cx, ViolationCode::UnexpectedNullCharacter);
                self.machine.large.push(REPLACEMENT);
            }
            QUOTE | APOSTROPHE | LT | EQUALS | GRAVE => {
                self.report(cx, ViolationCode::BadCharacterInUnquotedValue);
                self.machine.large.push(c);
            }
            _ => self.machine.large.push(c),
        }
        Ok(())
    }

    pub(crate) fn after_attribute_value_quoted_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_space(c) => self.machine.state = State::BeforeAttributeName,
            SLASH => self.machine.state = State::SelfClosingStartTag,
            GT => self.emit_tag(cx),
            _ => {
                self.report(cx, ViolationCode::NoSpaceBetweenAttributes);
                self.machine.reconsume = true;
                self.machine.state = State::BeforeAttributeName;
            }
        }
        Ok(())
    }

    pub(crate) fn self_closing_start_tag_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            GT => {
                self.machine.self_closing = true;
                self.emit_tag(cx);
            }
            _ => {
                self.report(cx, ViolationCode::SlashNotFollowedByGreaterThan);
                self.machine.reconsume = true;
                self.machine.state = State::BeforeAttributeName;
            }
        }
        Ok(())
    }
}
