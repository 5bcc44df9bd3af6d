//! Attribute collection for the tag token under construction.

use super::NameHandle;

/// One attribute: interned name plus its value in code units.
///
/// Determinism contract (carried over to every emitted start tag):
/// - Attributes are stored in encounter order; no sorting, no hash order.
/// - Names are unique; a duplicate is dropped at name-completion time with a
///   violation, so a collection never holds two equal handles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: NameHandle,
    pub value: Vec<u16>,
}

/// Insertion-ordered, unique-name attribute list.
///
/// The backing storage is reused across tags: `clear` keeps the allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeList {
    attrs: Vec<Attribute>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: NameHandle) -> bool {
        self.attrs.iter().any(|attr| attr.name == name)
    }

    pub(crate) fn push(&mut self, name: NameHandle, value: Vec<u16>) {
        debug_assert!(!self.contains(name), "duplicate attribute name pushed");
        self.attrs.push(Attribute { name, value });
    }

    pub(crate) fn clear(&mut self) {
        self.attrs.clear();
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attrs.iter()
    }

    pub fn get(&self, name: NameHandle) -> Option<&[u16]> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_slice())
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}
