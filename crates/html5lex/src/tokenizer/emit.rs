//! Token emission and name-completion helpers.
//!
//! All sink traffic funnels through here so that the response channel
//! (content-mode switch, suspension request) is applied uniformly and the
//! instrumentation counters stay accurate.

use crate::shared::{FatalViolation, NameHandle, NamePolicy, SinkResponse, ViolationCode,
    ViolationPolicy, XmlnsPolicy};
use super::states::State;
use super::{state_for_mode, Cx, Tokenizer};

impl Tokenizer {
    /// Flush the pending character run of the current chunk, if any.
    pub(crate) fn flush_run(&mut self, cx: &mut Cx) {
        let Some(start) = cx.run.start.take() else {
            return;
        };
        let end = cx.run.end;
        if end > start {
            let resp = cx.host.sink.characters(&cx.units[start..end]);
            self.stats.tokens_emitted += 1;
            self.apply_response(resp);
        }
    }

    /// Extend the pending run with the unit at `at`, or emit the unit
    /// directly when it has no chunk position (CR substitute, reconsumed
    /// carry-over from a previous chunk).
    pub(crate) fn mark(&mut self, cx: &mut Cx, c: u16, at: Option<usize>) {
        match at {
            Some(i) => {
                if cx.run.start.is_none() {
                    cx.run.start = Some(i);
                }
                cx.run.end = i + 1;
            }
            None => {
                self.flush_run(cx);
                self.emit_units(cx, &[c]);
            }
        }
    }

    pub(crate) fn emit_units(&mut self, cx: &mut Cx, units: &[u16]) {
        if units.is_empty() {
            return;
        }
        let resp = cx.host.sink.characters(units);
        self.stats.tokens_emitted += 1;
        self.apply_response(resp);
    }

    /// Character-reference output target: attribute value buffer inside an
    /// attribute value, character tokens otherwise.
    pub(crate) fn emit_or_append(&mut self, cx: &mut Cx, units: &[u16]) {
        if self.machine.return_state.is_attribute_value() {
            self.machine.large.extend(units);
        } else {
            self.emit_units(cx, units);
        }
    }

    pub(crate) fn apply_response(&mut self, resp: SinkResponse) {
        if let Some(switch) = resp.switch {
            self.machine.state = state_for_mode(switch.mode);
            self.machine.expected_tag = switch.expected_end_tag;
        }
        if resp.suspend {
            self.suspend = true;
        }
    }

    /// Intern the small buffer as a completed tag/attribute/DOCTYPE name.
    pub(crate) fn intern_small(&mut self, cx: &mut Cx) -> Result<NameHandle, FatalViolation> {
        if self.policies.name == NamePolicy::Strict
            && !is_xml_name(self.machine.small.as_slice())
        {
            return Err(self.report_fatal(cx, ViolationCode::NameNotXmlCompatible));
        }
        Ok(cx.host.names.intern(self.machine.small.as_slice()))
    }

    pub(crate) fn finish_tag_name(&mut self, cx: &mut Cx) -> Result<(), FatalViolation> {
        let name = self.intern_small(cx)?;
        self.machine.tag_name = Some(name);
        self.machine.small.clear();
        Ok(())
    }

    pub(crate) fn finish_doctype_name(&mut self, cx: &mut Cx) -> Result<(), FatalViolation> {
        let name = self.intern_small(cx)?;
        self.machine.doctype_name = Some(name);
        self.machine.small.clear();
        Ok(())
    }

    /// Complete the attribute name in the small buffer. Duplicates and
    /// (under the alter policy) `xmlns` names leave a pending-but-discarded
    /// attribute whose value is still consumed.
    pub(crate) fn finish_attribute_name(&mut self, cx: &mut Cx) -> Result<(), FatalViolation> {
        let mut keep = true;
        if is_xmlns_name(self.machine.small.as_slice()) {
            self.report(cx, ViolationCode::XmlnsAttribute);
            if self.policies.xmlns == XmlnsPolicy::Alter {
                keep = false;
            }
        }
        let name = self.intern_small(cx)?;
        self.machine.small.clear();
        if self.machine.attrs.contains(name) {
            self.report(cx, ViolationCode::DuplicateAttribute);
            keep = false;
        }
        self.machine.attr_pending = true;
        self.machine.attr_name = if keep { Some(name) } else { None };
        Ok(())
    }

    pub(crate) fn commit_attribute_without_value(&mut self) {
        if !self.machine.attr_pending {
            return;
        }
        self.machine.attr_pending = false;
        if let Some(name) = self.machine.attr_name.take() {
            self.machine.attrs.push(name, Vec::new());
        }
    }

    pub(crate) fn commit_attribute_with_value(&mut self) {
        if !self.machine.attr_pending {
            self.machine.large.clear();
            return;
        }
        self.machine.attr_pending = false;
        let value = self.machine.large.take_vec();
        if let Some(name) = self.machine.attr_name.take() {
            self.machine.attrs.push(name, value);
        }
    }

    /// Emit the pending tag token and take the sink-directed follow-up
    /// transition (data state unless the response switches modes).
    pub(crate) fn emit_tag(&mut self, cx: &mut Cx) {
        self.commit_attribute_without_value();
        let Some(name) = self.machine.tag_name.take() else {
            self.machine.state = State::Data;
            return;
        };
        let resp = if self.machine.is_end_tag {
            if !self.machine.attrs.is_empty() {
                self.report(cx, ViolationCode::AttributesOnEndTag);
            }
            if self.machine.self_closing {
                self.report(cx, ViolationCode::SelfClosingEndTag);
            }
            cx.host.sink.end_tag(name)
        } else {
            cx.host
                .sink
                .start_tag(name, &self.machine.attrs, self.machine.self_closing)
        };
        self.stats.tokens_emitted += 1;
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "html5lex.tokenizer",
            "{} tag emitted, line {}",
            if self.machine.is_end_tag { "end" } else { "start" },
            self.machine.line
        );
        self.reset_tag_state();
        self.machine.state = State::Data;
        self.machine.expected_tag = None;
        self.apply_response(resp);
    }

    pub(crate) fn reset_tag_state(&mut self) {
        self.machine.tag_name = None;
        self.machine.is_end_tag = false;
        self.machine.self_closing = false;
        self.machine.attrs.clear();
        self.machine.attr_pending = false;
        self.machine.attr_name = None;
        self.machine.small.clear();
        self.machine.large.clear();
    }

    /// Emit the comment accumulated in the large buffer, unless the sink
    /// declined comment tokens.
    pub(crate) fn emit_comment(&mut self, cx: &mut Cx) {
        let data = self.machine.large.take_vec();
        if cx.host.sink.wants_comments() {
            let resp = cx.host.sink.comment(&data);
            self.stats.tokens_emitted += 1;
            self.apply_response(resp);
        }
        self.machine.state = State::Data;
    }

    pub(crate) fn emit_doctype(&mut self, cx: &mut Cx) {
        let name = self.machine.doctype_name.take();
        let public_id = self.machine.public_id.take();
        let system_id = self.machine.system_id.take();
        let force_quirks = self.machine.force_quirks;
        self.machine.force_quirks = false;
        let resp = cx.host.sink.doctype(
            name,
            public_id.as_deref(),
            system_id.as_deref(),
            force_quirks,
        );
        self.stats.tokens_emitted += 1;
        self.machine.state = State::Data;
        self.apply_response(resp);
    }

    /// Apply the comment conformance policy at a `--`-shaped violation:
    /// `allow` keeps `raw`, `alter` substitutes `altered`, `fatal` aborts.
    pub(crate) fn append_comment_hyphens(
        &mut self,
        cx: &mut Cx,
        code: ViolationCode,
        raw: &[u16],
        altered: &[u16],
    ) -> Result<(), FatalViolation> {
        match self.policies.comment {
            ViolationPolicy::Allow => {
                self.report(cx, code);
                self.machine.large.extend(raw);
                Ok(())
            }
            ViolationPolicy::Alter => {
                self.report(cx, code);
                self.machine.large.extend(altered);
                Ok(())
            }
            ViolationPolicy::Fatal => Err(self.report_fatal(cx, code)),
        }
    }
}

/// `xmlns` or `xmlns:*` attribute name.
fn is_xmlns_name(units: &[u16]) -> bool {
    const XMLNS: [u16; 5] = [0x78, 0x6D, 0x6C, 0x6E, 0x73];
    match units.len() {
        5 => units == XMLNS,
        6.. => units[..5] == XMLNS && units[5] == 0x3A,
        _ => false,
    }
}

/// ASCII-exact XML 1.0 Name check; non-ASCII units are accepted wholesale
/// (surrogate-aware validation is out of scope for the strict policy).
fn is_xml_name(units: &[u16]) -> bool {
    let Some(&first) = units.first() else {
        return false;
    };
    let start_ok = matches!(first, 0x41..=0x5A | 0x61..=0x7A | 0x5F | 0x3A) || first >= 0x80;
    if !start_ok {
        return false;
    }
    units[1..].iter().all(|&c| {
        matches!(
            c,
            0x41..=0x5A | 0x61..=0x7A | 0x30..=0x39 | 0x5F | 0x3A | 0x2D | 0x2E
        ) || c >= 0x80
    })
}

#[cfg(test)]
mod tests {
    use super::{is_xml_name, is_xmlns_name};

    fn u(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn xmlns_detection() {
        assert!(is_xmlns_name(&u("xmlns")));
        assert!(is_xmlns_name(&u("xmlns:xlink")));
        assert!(!is_xmlns_name(&u("xmlnsx")));
        assert!(!is_xmlns_name(&u("xml")));
    }

    #[test]
    fn xml_name_check() {
        assert!(is_xml_name(&u("div")));
        assert!(is_xml_name(&u("_x-1.y")));
        assert!(is_xml_name(&u("svg:path")));
        assert!(!is_xml_name(&u("")));
        assert!(!is_xml_name(&u("1a")));
        assert!(!is_xml_name(&u("-a")));
        assert!(!is_xml_name(&u("a b")));
        assert!(is_xml_name(&u("übung")));
    }
}
