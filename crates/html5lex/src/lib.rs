//! `html5lex`: incremental, standards-conformant HTML5 tokenizer.
//!
//! The tokenizer consumes UTF-16 code units chunk by chunk and pushes tokens
//! into a caller-supplied [`TokenSink`]; names are canonicalized through a
//! [`NameRegistry`], anomalies flow to a [`ViolationReporter`], and a set of
//! [`Policies`] decides how XML-incompatible constructs are handled. The
//! machine suspends and resumes at arbitrary chunk boundaries, including
//! inside tags, comments and character references.
//!
//! ```
//! use html5lex::{
//!     AttributeList, Host, NameHandle, NameTable, NullReporter, Policies, SinkResponse,
//!     TokenSink, Tokenizer,
//! };
//!
//! struct Collect(Vec<String>);
//!
//! impl TokenSink for Collect {
//!     fn start_tag(&mut self, _: NameHandle, _: &AttributeList, _: bool) -> SinkResponse {
//!         SinkResponse::proceed()
//!     }
//!     fn end_tag(&mut self, _: NameHandle) -> SinkResponse {
//!         SinkResponse::proceed()
//!     }
//!     fn characters(&mut self, units: &[u16]) -> SinkResponse {
//!         self.0.push(String::from_utf16_lossy(units));
//!         SinkResponse::proceed()
//!     }
//!     fn comment(&mut self, _: &[u16]) -> SinkResponse {
//!         SinkResponse::proceed()
//!     }
//!     fn doctype(
//!         &mut self,
//!         _: Option<NameHandle>,
//!         _: Option<&[u16]>,
//!         _: Option<&[u16]>,
//!         _: bool,
//!     ) -> SinkResponse {
//!         SinkResponse::proceed()
//!     }
//!     fn eof(&mut self) {}
//! }
//!
//! let mut sink = Collect(Vec::new());
//! let mut names = NameTable::new();
//! let mut reporter = NullReporter;
//! let mut tokenizer = Tokenizer::new(Policies::default());
//! let chunk: Vec<u16> = "a &amp; b".encode_utf16().collect();
//! let mut host = Host {
//!     sink: &mut sink,
//!     names: &mut names,
//!     reporter: &mut reporter,
//! };
//! let consumed = tokenizer.tokenize_chunk(&chunk, &mut host).unwrap();
//! assert_eq!(consumed, chunk.len());
//! tokenizer.end_of_input(&mut host).unwrap();
//! assert_eq!(sink.0.concat(), "a & b");
//! ```

mod shared;
pub mod tokenizer;

pub use shared::{
    Attribute, AttributeList, ContentMode, FatalViolation, ModeSwitch, NameHandle, NamePolicy,
    NameRegistry, NameTable, NullReporter, Policies, Severity, SinkResponse, TokenSink, Violation,
    ViolationCode, ViolationPolicy, ViolationReporter, XmlnsPolicy,
};
pub use tokenizer::{Host, Snapshot, Tokenizer, TokenizerStats};
