//! Offset and line index over an immutable source snapshot.
//!
//! The Markdown parser reports byte ranges while decorations and selections
//! are expressed in chars; `SourceText` converts between the two and maps char
//! offsets to lines for the filter's active-line rule.

use std::ops::{Range, RangeInclusive};

use smol_str::{SmolStr, ToSmolStr};

/// Ropey-backed index over a document snapshot.
///
/// All public offsets are in Unicode scalar values (chars), not bytes or UTF-16.
/// Out-of-range inputs are clamped to the end of the text.
#[derive(Clone, Debug, Default)]
pub struct SourceText {
    rope: ropey::Rope,
}

impl SourceText {
    /// Build the index from string.
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
        }
    }

    /// Total length in chars (Unicode scalar values).
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Convert byte offset to char offset.
    pub fn byte_to_char(&self, byte_offset: usize) -> usize {
        self.rope.byte_to_char(byte_offset.min(self.rope.len_bytes()))
    }

    /// Convert a byte range to the equivalent char range.
    pub fn byte_range_to_chars(&self, byte_range: Range<usize>) -> Range<usize> {
        self.byte_to_char(byte_range.start)..self.byte_to_char(byte_range.end)
    }

    /// Zero-based line containing a char offset.
    pub fn char_to_line(&self, char_offset: usize) -> usize {
        self.rope.char_to_line(char_offset.min(self.rope.len_chars()))
    }

    /// Lines touched by the half-open char range `start..end`.
    ///
    /// An empty range occupies the line of its start. A range ending exactly
    /// after a newline does not reach into the next line.
    pub fn line_span(&self, start: usize, end: usize) -> RangeInclusive<usize> {
        let first = self.char_to_line(start);
        let last = if end > start {
            self.char_to_line(end - 1)
        } else {
            first
        };
        first..=last.max(first)
    }

    /// Lines touched by a selection, inclusive of both ends.
    pub fn selection_line_span(&self, start: usize, end: usize) -> RangeInclusive<usize> {
        let first = self.char_to_line(start);
        let last = self.char_to_line(end);
        first..=last.max(first)
    }

    /// Get a slice as SmolStr. Returns None if range is invalid.
    pub fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        if char_range.start > char_range.end || char_range.end > self.len_chars() {
            return None;
        }
        Some(self.rope.slice(char_range).to_smolstr())
    }
}

impl From<&str> for SourceText {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}
