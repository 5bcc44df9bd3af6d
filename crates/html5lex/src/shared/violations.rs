//! Spec-violation reporting.
//!
//! Violations are malformed-but-recoverable markup; every one is reported and
//! tokenization continues along a deterministic recovery transition. Only a
//! policy-escalated violation becomes a `FatalViolation` and aborts the run.

/// How serious a reported violation is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

/// Closed inventory of conditions the tokenizer reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViolationCode {
    // Character data
    UnexpectedNullCharacter,
    FormFeedInContent,
    // Tag structure
    BadCharacterAfterLessThan,
    EmptyEndTag,
    GarbageAfterLessThanSlash,
    AttributesOnEndTag,
    SelfClosingEndTag,
    SlashNotFollowedByGreaterThan,
    DuplicateAttribute,
    QuoteOrLessThanInAttributeName,
    EqualsSignBeforeAttributeName,
    AttributeValueMissing,
    BadCharacterInUnquotedValue,
    NoSpaceBetweenAttributes,
    QuoteBeforeAttributeName,
    XmlnsAttribute,
    NameNotXmlCompatible,
    // Comments and markup declarations
    BogusComment,
    DoubleHyphenInComment,
    PrematureEndOfComment,
    CommentEndedWithBang,
    CdataOutsideForeignContent,
    // DOCTYPE
    MissingSpaceBeforeDoctypeName,
    NamelessDoctype,
    BogusDoctype,
    NoSpaceBeforeDoctypeIdentifier,
    MissingQuoteBeforePublicIdentifier,
    MissingQuoteBeforeSystemIdentifier,
    GreaterThanInPublicIdentifier,
    GreaterThanInSystemIdentifier,
    // Character references
    NoNamedReferenceMatch,
    UnterminatedNamedReference,
    NoDigitsInNumericReference,
    UnterminatedNumericReference,
    NumericReferenceToNull,
    NumericReferenceOutOfRange,
    NumericReferenceToSurrogate,
    NumericReferenceToControl,
    NumericReferenceToC1Range,
    NumericReferenceToNonCharacter,
    // End of stream
    EofAfterLessThan,
    EofInTag,
    EofInComment,
    EofInDoctype,
    EofInCdata,
}

impl ViolationCode {
    /// Human-readable message for diagnostics.
    pub fn message(self) -> &'static str {
        use ViolationCode::*;
        match self {
            UnexpectedNullCharacter => "NUL character in input; replaced with U+FFFD",
            FormFeedInContent => "form feed in character data",
            BadCharacterAfterLessThan => "\"<\" not followed by a tag name",
            EmptyEndTag => "empty end tag \"</>\"",
            GarbageAfterLessThanSlash => "\"</\" not followed by a tag name",
            AttributesOnEndTag => "attributes on an end tag",
            SelfClosingEndTag => "\"/>\" on an end tag",
            SlashNotFollowedByGreaterThan => "\"/\" not immediately followed by \">\"",
            DuplicateAttribute => "duplicate attribute; the repeated one was dropped",
            QuoteOrLessThanInAttributeName => "quote or \"<\" in an attribute name",
            EqualsSignBeforeAttributeName => "\"=\" before an attribute name",
            AttributeValueMissing => "attribute value missing after \"=\"",
            BadCharacterInUnquotedValue => "\"<\", \"=\" or \"`\" in an unquoted attribute value",
            NoSpaceBetweenAttributes => "no space between attributes",
            QuoteBeforeAttributeName => "quote where an attribute name was expected",
            XmlnsAttribute => "\"xmlns\" attribute is not expressible in the XML infoset",
            NameNotXmlCompatible => "name is not a well-formed XML 1.0 name",
            BogusComment => "markup declaration read as a bogus comment",
            DoubleHyphenInComment => "\"--\" inside a comment",
            PrematureEndOfComment => "comment ended prematurely",
            CommentEndedWithBang => "comment ended with \"--!>\"",
            CdataOutsideForeignContent => "CDATA section outside foreign content",
            MissingSpaceBeforeDoctypeName => "missing space before DOCTYPE name",
            NamelessDoctype => "DOCTYPE without a name",
            BogusDoctype => "bogus DOCTYPE",
            NoSpaceBeforeDoctypeIdentifier => {
                "no space between the DOCTYPE keyword and the identifier"
            }
            MissingQuoteBeforePublicIdentifier => "public identifier is not quoted",
            MissingQuoteBeforeSystemIdentifier => "system identifier is not quoted",
            GreaterThanInPublicIdentifier => "\">\" inside the public identifier",
            GreaterThanInSystemIdentifier => "\">\" inside the system identifier",
            NoNamedReferenceMatch => "\"&\" did not start a character reference",
            UnterminatedNamedReference => "named character reference without \";\"",
            NoDigitsInNumericReference => "numeric character reference without digits",
            UnterminatedNumericReference => "numeric character reference without \";\"",
            NumericReferenceToNull => "numeric character reference to U+0000",
            NumericReferenceOutOfRange => "numeric character reference above U+10FFFF",
            NumericReferenceToSurrogate => "numeric character reference to a surrogate",
            NumericReferenceToControl => "numeric character reference to a control character",
            NumericReferenceToC1Range => "numeric character reference in the C1 controls range",
            NumericReferenceToNonCharacter => "numeric character reference to a non-character",
            EofAfterLessThan => "end of stream after \"<\"",
            EofInTag => "end of stream inside a tag",
            EofInComment => "end of stream inside a comment",
            EofInDoctype => "end of stream inside a DOCTYPE",
            EofInCdata => "end of stream inside a CDATA section",
        }
    }

    /// Baseline severity before any policy escalation.
    pub fn severity(self) -> Severity {
        use ViolationCode::*;
        match self {
            NumericReferenceToNonCharacter | XmlnsAttribute => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A single reported violation, carrying the line it was observed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub code: ViolationCode,
    pub severity: Severity,
    pub line: u64,
}

impl Violation {
    pub fn message(&self) -> &'static str {
        self.code.message()
    }
}

/// Receiver of violation notifications.
///
/// A `Severity::Fatal` notification is always followed by the tokenizer
/// returning a `FatalViolation` to the driver; the reporter itself never
/// controls flow.
pub trait ViolationReporter {
    fn report(&mut self, violation: &Violation);
}

/// Reporter that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl ViolationReporter for NullReporter {
    fn report(&mut self, _violation: &Violation) {}
}

/// The single abort path: a violation escalated to fatal by the active
/// conformance policy (or a strict name-policy failure).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FatalViolation {
    pub code: ViolationCode,
    pub line: u64,
}

impl std::fmt::Display for FatalViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fatal at line {}: {}", self.line, self.code.message())
    }
}

impl std::error::Error for FatalViolation {}
