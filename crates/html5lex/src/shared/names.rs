//! Name registry for canonicalized tag/attribute/doctype names.

use std::collections::HashMap;
use std::sync::Arc;

/// Opaque, comparison-stable name handle.
///
/// Handles produced by one registry instance compare by identity: two handles
/// are equal exactly when they denote the same canonical name. This is what
/// duplicate-attribute detection and expected-end-tag matching rely on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameHandle(pub u32);

/// External name-interning collaborator.
///
/// The tokenizer hands over code-unit ranges that are already ASCII-folded
/// (`A-Z` -> `a-z`); the registry must return a stable handle for equal
/// ranges and must be able to resolve a handle back to its units for
/// end-tag-expectation matching.
pub trait NameRegistry {
    fn intern(&mut self, units: &[u16]) -> NameHandle;
    fn resolve(&self, handle: NameHandle) -> Option<&[u16]>;
}

/// Default in-memory name registry.
///
/// Invariant: stored names are in canonical (pre-folded) form; the tokenizer
/// folds on input, so the table never sees an ASCII uppercase letter from the
/// tokenizer itself.
#[derive(Debug, Default)]
pub struct NameTable {
    names: Vec<Arc<[u16]>>,
    map: HashMap<Arc<[u16]>, NameHandle>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Intern a name given as UTF-8 text (test/driver convenience).
    pub fn intern_str(&mut self, name: &str) -> NameHandle {
        let units: Vec<u16> = name.encode_utf16().collect();
        self.intern(&units)
    }

    /// Resolve a handle to a lossy `String` (test/driver convenience).
    pub fn resolve_string(&self, handle: NameHandle) -> Option<String> {
        self.resolve(handle).map(String::from_utf16_lossy)
    }
}

impl NameRegistry for NameTable {
    fn intern(&mut self, units: &[u16]) -> NameHandle {
        if let Some(handle) = self.map.get(units) {
            return *handle;
        }
        let stored: Arc<[u16]> = Arc::from(units);
        let handle = NameHandle(self.names.len() as u32);
        self.names.push(Arc::clone(&stored));
        self.map.insert(stored, handle);
        handle
    }

    fn resolve(&self, handle: NameHandle) -> Option<&[u16]> {
        self.names.get(handle.0 as usize).map(|name| name.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_identity_stable() {
        let mut table = NameTable::new();
        let a = table.intern_str("div");
        let b = table.intern_str("div");
        let c = table.intern_str("span");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(table.resolve_string(a).as_deref(), Some("div"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn resolve_round_trips_units() {
        let mut table = NameTable::new();
        let units: Vec<u16> = "textarea".encode_utf16().collect();
        let handle = table.intern(&units);
        assert_eq!(table.resolve(handle), Some(units.as_slice()));
        assert_eq!(table.resolve(NameHandle(99)), None);
    }
}
