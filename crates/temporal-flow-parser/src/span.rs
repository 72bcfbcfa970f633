//! Byte ranges into the source document.

use std::ops::Range;

/// A byte range into the JSON source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Locate `slice` inside `source`.
    ///
    /// Returns `None` if `slice` does not point into `source`'s buffer.
    pub fn of_slice(source: &str, slice: &str) -> Option<Self> {
        let base = source.as_ptr() as usize;
        let ptr = slice.as_ptr() as usize;
        let start = ptr.checked_sub(base)?;
        let end = start + slice.len();
        (end <= source.len()).then(|| Self::new(start..end))
    }

    /// Build a single-character span from a 1-based line/column position.
    ///
    /// `column` counts bytes. A position inside a multibyte character moves
    /// back to the start of that character. Positions past the end of
    /// `source` are clamped to an empty span at the end of the input.
    pub fn from_line_column(source: &str, line: usize, column: usize) -> Self {
        let line_start = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum::<usize>();
        let mut offset = (line_start + column.saturating_sub(1)).min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let end = source[offset..]
            .chars()
            .next()
            .map_or(offset, |c| offset + c.len_utf8());
        Self::new(offset..end)
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
}
