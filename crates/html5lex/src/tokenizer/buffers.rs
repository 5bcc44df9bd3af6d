//! Accumulation buffers with explicit growth policies.
//!
//! The small buffer holds short identifiers (tag/attribute/DOCTYPE names,
//! end-tag match candidates) and grows by a fixed increment; the large buffer
//! holds comment data, attribute values and DOCTYPE identifiers and grows
//! geometrically. Capacity is retained across tokens; `clear` only resets the
//! length.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Growth {
    /// Add a fixed number of units when full.
    Fixed(usize),
    /// Grow by half the current capacity when full.
    Half,
}

const SMALL_INITIAL: usize = 64;
const SMALL_INCREMENT: usize = 1024;
const LARGE_INITIAL: usize = 1024;

#[derive(Clone, Debug)]
pub(crate) struct CodeUnitBuf {
    units: Vec<u16>,
    growth: Growth,
}

impl CodeUnitBuf {
    pub(crate) fn small() -> Self {
        Self {
            units: Vec::with_capacity(SMALL_INITIAL),
            growth: Growth::Fixed(SMALL_INCREMENT),
        }
    }

    pub(crate) fn large() -> Self {
        Self {
            units: Vec::with_capacity(LARGE_INITIAL),
            growth: Growth::Half,
        }
    }

    pub(crate) fn push(&mut self, unit: u16) {
        if self.units.len() == self.units.capacity() {
            let extra = match self.growth {
                Growth::Fixed(n) => n,
                Growth::Half => (self.units.capacity() / 2).max(1),
            };
            self.units.reserve_exact(extra);
        }
        self.units.push(unit);
    }

    pub(crate) fn extend(&mut self, units: &[u16]) {
        for &unit in units {
            self.push(unit);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.units.clear();
    }

    pub(crate) fn as_slice(&self) -> &[u16] {
        &self.units
    }

    /// Copy out the contents and reset the length, keeping capacity.
    pub(crate) fn take_vec(&mut self) -> Vec<u16> {
        let out = self.units.clone();
        self.units.clear();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_buffer_grows_by_fixed_increment() {
        let mut buf = CodeUnitBuf::small();
        assert_eq!(buf.as_slice().len(), 0);
        for i in 0..SMALL_INITIAL {
            buf.push(i as u16);
        }
        let cap_before = SMALL_INITIAL;
        buf.push(0x61);
        assert_eq!(buf.units.len(), cap_before + 1);
        assert!(buf.units.capacity() >= cap_before + SMALL_INCREMENT);
    }

    #[test]
    fn large_buffer_grows_geometrically() {
        let mut buf = CodeUnitBuf::large();
        for _ in 0..LARGE_INITIAL {
            buf.push(0x62);
        }
        buf.push(0x62);
        assert!(buf.units.capacity() >= LARGE_INITIAL + LARGE_INITIAL / 2);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buf = CodeUnitBuf::small();
        buf.extend(&[1, 2, 3]);
        let cap = buf.units.capacity();
        buf.clear();
        assert!(buf.units.is_empty());
        assert_eq!(buf.units.capacity(), cap);
    }

    #[test]
    fn take_vec_copies_and_resets() {
        let mut buf = CodeUnitBuf::large();
        buf.extend(&[0x68, 0x69]);
        let taken = buf.take_vec();
        assert_eq!(taken, vec![0x68, 0x69]);
        assert!(buf.units.is_empty());
    }
}
