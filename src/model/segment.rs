use std::ops::Range;

/// Contiguous half-open residue range `[start, stop)` within a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment {
    pub start: usize,
    pub stop: usize,
}

impl Segment {
    pub fn new(start: usize, stop: usize) -> Self {
        debug_assert!(start <= stop, "segment start must not exceed stop");
        Self { start, stop }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_range() {
        let segment = Segment::new(4, 60);
        assert_eq!(segment.len(), 56);
        assert_eq!(segment.range(), 4..60);
        assert!(!segment.is_empty());
        assert!(Segment::new(3, 3).is_empty());
    }
}
