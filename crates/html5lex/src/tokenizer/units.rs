//! UTF-16 code unit constants and classification helpers.

pub(crate) const NUL: u16 = 0x0000;
pub(crate) const TAB: u16 = 0x0009;
pub(crate) const LF: u16 = 0x000A;
pub(crate) const FF: u16 = 0x000C;
pub(crate) const CR: u16 = 0x000D;
pub(crate) const SPACE: u16 = 0x0020;
pub(crate) const EXCLAMATION: u16 = 0x0021;
pub(crate) const QUOTE: u16 = 0x0022;
pub(crate) const HASH: u16 = 0x0023;
pub(crate) const AMPERSAND: u16 = 0x0026;
pub(crate) const APOSTROPHE: u16 = 0x0027;
pub(crate) const HYPHEN: u16 = 0x002D;
pub(crate) const SLASH: u16 = 0x002F;
pub(crate) const SEMICOLON: u16 = 0x003B;
pub(crate) const LT: u16 = 0x003C;
pub(crate) const EQUALS: u16 = 0x003D;
pub(crate) const GT: u16 = 0x003E;
pub(crate) const QUESTION: u16 = 0x003F;
pub(crate) const LSQB: u16 = 0x005B;
pub(crate) const RSQB: u16 = 0x005D;
pub(crate) const GRAVE: u16 = 0x0060;
pub(crate) const REPLACEMENT: u16 = 0xFFFD;

/// HTML whitespace (CR never reaches state handlers; it is normalized to LF
/// at the chunk loop).
pub(crate) fn is_space(c: u16) -> bool {
    matches!(c, SPACE | TAB | LF | FF)
}

pub(crate) fn is_ascii_alpha(c: u16) -> bool {
    matches!(c, 0x41..=0x5A | 0x61..=0x7A)
}

pub(crate) fn is_ascii_digit(c: u16) -> bool {
    matches!(c, 0x30..=0x39)
}

pub(crate) fn is_ascii_alnum(c: u16) -> bool {
    is_ascii_alpha(c) || is_ascii_digit(c)
}

pub(crate) fn is_ascii_upper(c: u16) -> bool {
    matches!(c, 0x41..=0x5A)
}

/// ASCII case fold (`A-Z` -> `a-z`); everything else passes through.
pub(crate) fn fold_ascii(c: u16) -> u16 {
    if is_ascii_upper(c) { c + 0x20 } else { c }
}

/// Hex digit value, if `c` is one.
pub(crate) fn hex_value(c: u16) -> Option<u32> {
    match c {
        0x30..=0x39 => Some(u32::from(c - 0x30)),
        0x41..=0x46 => Some(u32::from(c - 0x41 + 10)),
        0x61..=0x66 => Some(u32::from(c - 0x61 + 10)),
        _ => None,
    }
}
