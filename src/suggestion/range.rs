use std::ops::Range;

use serde::Serialize;

/// Half-open byte range `[start, end)` over an input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct StringRange {
    start: usize,
    end: usize,
}

impl StringRange {
    /// Create a range; the bounds are swapped if given in reverse
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Empty range at `pos`
    pub fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Smallest range covering both `a` and `b`
    pub fn encompassing(a: StringRange, b: StringRange) -> Self {
        Self {
            start: a.start.min(b.start),
            end: a.end.max(b.end),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Slice of `input` covered by this range, clamped to the input
    pub fn get<'a>(&self, input: &'a str) -> &'a str {
        let end = self.end.min(input.len());
        let start = self.start.min(end);
        input.get(start..end).unwrap_or("")
    }
}

impl From<Range<usize>> for StringRange {
    fn from(range: Range<usize>) -> Self {
        StringRange::new(range.start, range.end)
    }
}

impl From<StringRange> for Range<usize> {
    fn from(range: StringRange) -> Self {
        range.start..range.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encompassing() {
        let merged = StringRange::encompassing(StringRange::new(2, 4), StringRange::new(6, 9));
        assert_eq!(merged, StringRange::new(2, 9));
    }

    #[test]
    fn test_new_orders_bounds() {
        assert_eq!(StringRange::new(5, 1), StringRange::new(1, 5));
    }

    #[test]
    fn test_get_slices_input() {
        let range = StringRange::new(6, 9);
        assert_eq!(range.get("hello wor"), "wor");
        assert_eq!(range.len(), 3);
        assert!(StringRange::at(3).is_empty());
    }

    #[test]
    fn test_get_out_of_range_is_clamped() {
        assert_eq!(StringRange::new(3, 40).get("hello"), "lo");
        assert_eq!(StringRange::new(30, 40).get("hello"), "");
    }
}
