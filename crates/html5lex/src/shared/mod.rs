//! Shared types for the tokenizer and its collaborators.
//!
//! Downstream consumers import these via the crate root (`html5lex::{…}`)
//! rather than through `shared::*` to preserve API flexibility.

mod attributes;
mod names;
mod policy;
mod sink;
mod violations;

pub use attributes::{Attribute, AttributeList};
pub use names::{NameHandle, NameRegistry, NameTable};
pub use policy::{NamePolicy, Policies, ViolationPolicy, XmlnsPolicy};
pub use sink::{ContentMode, ModeSwitch, SinkResponse, TokenSink};
pub use violations::{
    FatalViolation, NullReporter, Severity, Violation, ViolationCode, ViolationReporter,
};
