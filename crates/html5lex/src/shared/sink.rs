//! Token sink interface.
//!
//! The sink is the downstream consumer (typically a tree builder). Token
//! callbacks return a [`SinkResponse`]; that explicit return channel is the
//! only way the consumer influences tokenizer state. There is no reentrant
//! mutation path.

use super::{AttributeList, NameHandle};

/// Content models the sink can put the tokenizer into after a start tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentMode {
    #[default]
    Data,
    Rcdata,
    Rawtext,
    ScriptData,
    Plaintext,
}

/// A requested follow-up content model, with the end tag that terminates it.
///
/// `expected_end_tag` is required for every mode except `Data` and
/// `Plaintext` (PLAINTEXT runs to end of stream).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeSwitch {
    pub mode: ContentMode,
    pub expected_end_tag: Option<NameHandle>,
}

/// Response value of every token callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SinkResponse {
    /// Override the tokenizer's follow-up state (applied after the token's
    /// normal transition, before the next code unit is consumed).
    pub switch: Option<ModeSwitch>,
    /// Suspend tokenization once this callback returns; the driver resumes
    /// by redelivering the unconsumed remainder of the chunk.
    pub suspend: bool,
}

impl SinkResponse {
    /// Keep going; no override, no suspension.
    pub fn proceed() -> Self {
        Self::default()
    }

    pub fn switch_to(mode: ContentMode, expected_end_tag: Option<NameHandle>) -> Self {
        Self {
            switch: Some(ModeSwitch {
                mode,
                expected_end_tag,
            }),
            suspend: false,
        }
    }

    pub fn suspend() -> Self {
        Self {
            switch: None,
            suspend: true,
        }
    }
}

/// Downstream consumer of the token stream.
pub trait TokenSink {
    fn start_tag(
        &mut self,
        name: NameHandle,
        attrs: &AttributeList,
        self_closing: bool,
    ) -> SinkResponse;

    fn end_tag(&mut self, name: NameHandle) -> SinkResponse;

    /// A run of character data. Runs split arbitrarily at chunk and token
    /// boundaries; consumers must concatenate.
    fn characters(&mut self, units: &[u16]) -> SinkResponse;

    fn comment(&mut self, units: &[u16]) -> SinkResponse;

    fn doctype(
        &mut self,
        name: Option<NameHandle>,
        public_id: Option<&[u16]>,
        system_id: Option<&[u16]>,
        force_quirks: bool,
    ) -> SinkResponse;

    /// End of stream. Called exactly once per run.
    fn eof(&mut self);

    /// Whether comment tokens should be delivered at all. When `false` the
    /// tokenizer still walks comment states but drops the token at emission.
    fn wants_comments(&self) -> bool {
        true
    }

    /// Whether `<![CDATA[` opens a CDATA section (foreign content) instead
    /// of a bogus comment.
    fn cdata_allowed(&self) -> bool {
        false
    }
}
