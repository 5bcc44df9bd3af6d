//! Tokenizer state machine definitions.
//!
//! One variant per tokenization state. Keyword-matching states
//! (`MarkupDeclarationOctype`, `DoctypeUblic`, `DoctypeYstem`, `CdataStart`,
//! the script double-escape pair) share the machine's single `index` counter;
//! the character-reference family shares the `return_state` slot with the
//! less-than-sign dispatch of the RCDATA/RAWTEXT/script families.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum State {
    Data,
    Rcdata,
    Rawtext,
    ScriptData,
    Plaintext,
    TagOpen,
    CloseTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
    RawtextRcdataLessThanSign,
    NonDataEndTagName,
    ScriptDataLessThanSign,
    ScriptDataEscapeStart,
    ScriptDataEscapeStartDash,
    ScriptDataEscaped,
    ScriptDataEscapedDash,
    ScriptDataEscapedDashDash,
    ScriptDataEscapedLessThanSign,
    ScriptDataDoubleEscapeStart,
    ScriptDataDoubleEscaped,
    ScriptDataDoubleEscapedDash,
    ScriptDataDoubleEscapedDashDash,
    ScriptDataDoubleEscapedLessThanSign,
    ScriptDataDoubleEscapeEnd,
    MarkupDeclarationOpen,
    MarkupDeclarationHyphen,
    MarkupDeclarationOctype,
    CommentStart,
    CommentStartDash,
    Comment,
    CommentEndDash,
    CommentEnd,
    CommentEndBang,
    BogusComment,
    BogusCommentHyphen,
    CdataStart,
    CdataSection,
    CdataRsqb,
    CdataRsqbRsqb,
    Doctype,
    BeforeDoctypeName,
    DoctypeName,
    AfterDoctypeName,
    DoctypeUblic,
    AfterDoctypePublicKeyword,
    BeforeDoctypePublicIdentifier,
    DoctypePublicIdentifierDoubleQuoted,
    DoctypePublicIdentifierSingleQuoted,
    AfterDoctypePublicIdentifier,
    BetweenDoctypePublicAndSystemIdentifiers,
    DoctypeYstem,
    AfterDoctypeSystemKeyword,
    BeforeDoctypeSystemIdentifier,
    DoctypeSystemIdentifierDoubleQuoted,
    DoctypeSystemIdentifierSingleQuoted,
    AfterDoctypeSystemIdentifier,
    BogusDoctype,
    ConsumeCharacterReference,
    CharacterReferenceHiloLookup,
    CharacterReferenceTail,
    ConsumeNcr,
    DecimalNcrLoop,
    HexNcrLoop,
}

impl State {
    /// True when resolved character references append to the attribute value
    /// buffer instead of being emitted as character tokens.
    pub(crate) fn is_attribute_value(self) -> bool {
        matches!(
            self,
            State::AttributeValueDoubleQuoted
                | State::AttributeValueSingleQuoted
                | State::AttributeValueUnquoted
        )
    }
}
