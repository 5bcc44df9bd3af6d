//! Conformance policies.
//!
//! Each policy governs one specific XML-1.0-incompatibility: whether the
//! offending construct passes through unchanged, is altered with a
//! compensating substitution, or fails the whole run.

/// Three-way handling of a policed violation point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViolationPolicy {
    /// Pass the construct through unchanged (still reported).
    #[default]
    Allow,
    /// Substitute a compensating infoset alteration.
    Alter,
    /// Escalate to a fatal error.
    Fatal,
}

/// Handling of names that are not well-formed XML 1.0 names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NamePolicy {
    #[default]
    Allow,
    /// Validate completed names; offenders abort the run.
    Strict,
}

/// Handling of `xmlns`/`xmlns:*` attribute names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum XmlnsPolicy {
    #[default]
    Allow,
    /// Report and drop the attribute from the token.
    Alter,
}

/// The full policy set consulted by the tokenizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Policies {
    /// `--` inside comments, trailing `-`, and `--!>` endings.
    pub comment: ViolationPolicy,
    /// U+000C in character data and `&#xC;`-style references.
    pub content_space: ViolationPolicy,
    /// XML well-formedness of completed tag/attribute/doctype names.
    pub name: NamePolicy,
    /// `xmlns` attribute names.
    pub xmlns: XmlnsPolicy,
}
