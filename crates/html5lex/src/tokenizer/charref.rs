//! Character-reference states: the named-reference window search and the
//! numeric decoder.
//!
//! The named search consumes one unit at a time, narrowing a `[lo, hi]`
//! window over the sorted catalog and recording the longest fully-matched
//! name so far. The search state is plain machine state, so a chunk boundary
//! in the middle of `&not` suspends and resumes transparently. On any
//! failure the ampersand and every consumed unit replay literally into the
//! host context.

use crate::shared::{FatalViolation, ViolationCode, ViolationPolicy};
use super::entities::{name_len, name_unit, window, NAMES};
use super::states::State;
use super::units::{
    hex_value, is_ascii_alnum, is_ascii_alpha, is_ascii_digit, AMPERSAND, EQUALS, HASH,
    REPLACEMENT, SEMICOLON, SPACE,
};
use super::{CharRef, Cx, Tokenizer};

/// Substitutions for numeric references into the C1 controls range,
/// matching the Windows-1252 repertoire those documents meant.
const WINDOWS_1252: [u16; 32] = [
    0x20AC, 0x0081, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, 0x02C6, 0x2030, 0x0160,
    0x2039, 0x0152, 0x008D, 0x017D, 0x008F, 0x0090, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022,
    0x2013, 0x2014, 0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0x009D, 0x017E, 0x0178,
];

/// Out-of-range sentinel the numeric accumulator clamps to.
const NCR_OVERFLOW: u32 = 0x11_0000;

impl Tokenizer {
    /// Enter the character-reference sub-dispatch; `&` itself is withheld
    /// until the outcome is known.
    pub(crate) fn start_char_ref(&mut self, return_state: State) {
        self.machine.return_state = return_state;
        self.machine.char_ref = CharRef::default();
        self.machine.state = State::ConsumeCharacterReference;
    }

    pub(crate) fn consume_character_reference_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            HASH => {
                self.machine.char_ref.buf.push(HASH);
                self.machine.state = State::ConsumeNcr;
            }
            _ if is_ascii_alpha(c) => {
                self.machine.char_ref.buf.push(c);
                self.machine.state = State::CharacterReferenceHiloLookup;
            }
            _ => {
                // Not a reference at all; `& ` and friends are fine as-is.
                self.emit_or_append(cx, &[AMPERSAND]);
                self.machine.reconsume = true;
                self.machine.state = self.machine.return_state;
            }
        }
        Ok(())
    }

    /// The second unit selects the catalog window; resolution never
    /// consults the table with fewer than two characters.
    pub(crate) fn character_reference_hilo_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        let first = self.machine.char_ref.buf[0];
        match window(first, c) {
            Some((lo, hi)) => {
                let cr = &mut self.machine.char_ref;
                cr.lo = lo;
                cr.hi = hi;
                cr.col = 2;
                cr.candidate = None;
                cr.mark = 0;
                cr.buf.push(c);
                self.machine.state = State::CharacterReferenceTail;
            }
            None => {
                self.report(cx, ViolationCode::NoNamedReferenceMatch);
                self.replay_char_ref(cx);
                self.machine.reconsume = true;
                self.machine.state = self.machine.return_state;
            }
        }
        Ok(())
    }

    pub(crate) fn character_reference_tail_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        let cr = &mut self.machine.char_ref;
        // A name exactly as long as the consumed prefix is a full match;
        // record it and keep looking for a longer one.
        if cr.lo <= cr.hi && name_len(cr.lo) == cr.col {
            cr.candidate = Some(cr.lo);
            cr.mark = cr.buf.len();
            if cr.lo == cr.hi {
                return self.finish_named_reference(cx, Some(c));
            }
            cr.lo += 1;
        }
        // Narrow both ends to names whose next character is `c`. Every name
        // left in the window is longer than the prefix, so `col` indexing is
        // in bounds.
        let mut live = cr.lo <= cr.hi;
        while live && name_unit(cr.lo, cr.col) < c {
            if cr.lo == cr.hi {
                live = false;
            } else {
                cr.lo += 1;
            }
        }
        while live && name_unit(cr.hi, cr.col) > c {
            if cr.hi == cr.lo {
                live = false;
            } else {
                cr.hi -= 1;
            }
        }
        if live && name_unit(cr.lo, cr.col) == c {
            cr.buf.push(c);
            cr.col += 1;
            Ok(())
        } else {
            self.finish_named_reference(cx, Some(c))
        }
    }

    /// Resolve the finished named search: emit the candidate's expansion
    /// plus unmatched leftovers, or replay everything literally. `next` is
    /// the unit that ended the search (`None` at end of stream) and is
    /// reprocessed in the host state.
    pub(crate) fn finish_named_reference(
        &mut self,
        cx: &mut Cx,
        next: Option<u16>,
    ) -> Result<(), FatalViolation> {
        let cr = &mut self.machine.char_ref;
        if cr.lo <= cr.hi && name_len(cr.lo) == cr.col {
            cr.candidate = Some(cr.lo);
            cr.mark = cr.buf.len();
        }
        let candidate = cr.candidate;
        self.machine.state = self.machine.return_state;
        if next.is_some() {
            self.machine.reconsume = true;
        }
        let Some(candidate) = candidate else {
            self.report(cx, ViolationCode::NoNamedReferenceMatch);
            self.replay_char_ref(cx);
            return Ok(());
        };
        let (name, expansion) = NAMES[candidate];
        if !name.ends_with(';') {
            // Historical compatibility: `&ampz` and `&amp=` keep their
            // literal spelling instead of expanding a prefix. The unit
            // examined is the one right after the matched name; when the
            // search ran past the match it sits in the buffered leftovers.
            let cr = &self.machine.char_ref;
            let following = cr.buf.get(cr.mark).copied().or(next);
            if let Some(c) = following {
                if c == EQUALS || is_ascii_alnum(c) {
                    self.report(cx, ViolationCode::NoNamedReferenceMatch);
                    self.replay_char_ref(cx);
                    return Ok(());
                }
            }
            self.report(cx, ViolationCode::UnterminatedNamedReference);
        }
        let cr = &mut self.machine.char_ref;
        let buf = std::mem::take(&mut cr.buf);
        let mark = cr.mark;
        let mut out: Vec<u16> = expansion.encode_utf16().collect();
        out.extend_from_slice(&buf[mark..]);
        self.emit_or_append(cx, &out);
        Ok(())
    }

    /// Emit `&` plus every unit consumed since it, untouched.
    pub(crate) fn replay_char_ref(&mut self, cx: &mut Cx) {
        let buf = std::mem::take(&mut self.machine.char_ref.buf);
        let mut out = Vec::with_capacity(buf.len() + 1);
        out.push(AMPERSAND);
        out.extend_from_slice(&buf);
        self.emit_or_append(cx, &out);
    }

    pub(crate) fn consume_ncr_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        match c {
            0x78 | 0x58 => {
                // `x` or `X`.
                self.machine.char_ref.hex = true;
                self.machine.char_ref.buf.push(c);
                self.machine.state = State::HexNcrLoop;
            }
            _ if is_ascii_digit(c) => {
                self.machine.char_ref.value = u32::from(c - 0x30);
                self.machine.char_ref.seen_digits = true;
                self.machine.state = State::DecimalNcrLoop;
            }
            _ => {
                self.report(cx, ViolationCode::NoDigitsInNumericReference);
                self.replay_char_ref(cx);
                self.machine.reconsume = true;
                self.machine.state = self.machine.return_state;
            }
        }
        Ok(())
    }

    pub(crate) fn decimal_ncr_loop_state(
        &mut self,
        cx: &mut Cx,
        c: u16,
    ) -> Result<(), FatalViolation> {
        match c {
            _ if is_ascii_digit(c) => self.accumulate_ncr(10, u32::from(c - 0x30)),
            SEMICOLON => {
                self.handle_ncr_value(cx)?;
                self.machine.state = self.machine.return_state;
            }
            _ => {
                self.report(cx, ViolationCode::UnterminatedNumericReference);
                self.handle_ncr_value(cx)?;
                self.machine.reconsume = true;
                self.machine.state = self.machine.return_state;
            }
        }
        Ok(())
    }

    pub(crate) fn hex_ncr_loop_state(&mut self, cx: &mut Cx, c: u16) -> Result<(), FatalViolation> {
        if let Some(digit) = hex_value(c) {
            self.accumulate_ncr(16, digit);
            return Ok(());
        }
        if !self.machine.char_ref.seen_digits {
            self.report(cx, ViolationCode::NoDigitsInNumericReference);
            self.replay_char_ref(cx);
            self.machine.reconsume = true;
            self.machine.state = self.machine.return_state;
            return Ok(());
        }
        match c {
            SEMICOLON => {
                self.handle_ncr_value(cx)?;
                self.machine.state = self.machine.return_state;
            }
            _ => {
                self.report(cx, ViolationCode::UnterminatedNumericReference);
                self.handle_ncr_value(cx)?;
                self.machine.reconsume = true;
                self.machine.state = self.machine.return_state;
            }
        }
        Ok(())
    }

    /// Accumulate one digit; overflow clamps to the sentinel instead of
    /// wrapping, so any overlong reference stays out of range.
    fn accumulate_ncr(&mut self, base: u32, digit: u32) {
        let cr = &mut self.machine.char_ref;
        cr.value = cr
            .value
            .saturating_mul(base)
            .saturating_add(digit)
            .min(NCR_OVERFLOW);
        cr.seen_digits = true;
    }

    /// Map the accumulated scalar to its emitted unit(s).
    pub(crate) fn handle_ncr_value(&mut self, cx: &mut Cx) -> Result<(), FatalViolation> {
        let value = self.machine.char_ref.value;
        self.machine.char_ref.buf.clear();
        let mut pair = [0u16; 2];
        let out: &[u16] = match value {
            0x00 => {
                self.report(cx, ViolationCode::NumericReferenceToNull);
                &[REPLACEMENT]
            }
            0x80..=0x9F => {
                self.report(cx, ViolationCode::NumericReferenceToC1Range);
                pair[0] = WINDOWS_1252[(value - 0x80) as usize];
                &pair[..1]
            }
            0x0C => match self.policies.content_space {
                ViolationPolicy::Allow => {
                    self.report(cx, ViolationCode::FormFeedInContent);
                    &[0x0C]
                }
                ViolationPolicy::Alter => {
                    self.report(cx, ViolationCode::FormFeedInContent);
                    &[SPACE]
                }
                ViolationPolicy::Fatal => {
                    return Err(self.report_fatal(cx, ViolationCode::FormFeedInContent));
                }
            },
            0x09 | 0x0A => {
                pair[0] = value as u16;
                &pair[..1]
            }
            0x01..=0x08 | 0x0B | 0x0D..=0x1F | 0x7F => {
                self.report(cx, ViolationCode::NumericReferenceToControl);
                pair[0] = value as u16;
                &pair[..1]
            }
            0xD800..=0xDFFF => {
                self.report(cx, ViolationCode::NumericReferenceToSurrogate);
                &[REPLACEMENT]
            }
            _ if value > 0x10_FFFF => {
                self.report(cx, ViolationCode::NumericReferenceOutOfRange);
                &[REPLACEMENT]
            }
            _ => {
                if matches!(value, 0xFDD0..=0xFDEF) || value & 0xFFFE == 0xFFFE {
                    self.report(cx, ViolationCode::NumericReferenceToNonCharacter);
                }
                encode_scalar(value, &mut pair)
            }
        };
        let out = out.to_vec();
        self.emit_or_append(cx, &out);
        Ok(())
    }
}

/// Encode a validated scalar as one unit or a surrogate pair.
fn encode_scalar(value: u32, pair: &mut [u16; 2]) -> &[u16] {
    if value < 0x1_0000 {
        pair[0] = value as u16;
        &pair[..1]
    } else {
        let v = value - 0x1_0000;
        pair[0] = 0xD800 + (v >> 10) as u16;
        pair[1] = 0xDC00 + (v & 0x3FF) as u16;
        &pair[..]
    }
}
