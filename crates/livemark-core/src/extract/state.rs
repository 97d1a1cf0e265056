//! State structures for DecorationWriter, grouped by concern.

use std::ops::Range;

/// An open link or image whose text extent is still being discovered.
///
/// The parser reports the whole `[text](url)` range up front; where the text
/// ends (and the `](url)` tail begins) is learned from the child events.
#[derive(Debug, Clone)]
pub struct LinkFrame {
    /// Byte range of the whole construct
    pub byte_range: Range<usize>,
    /// Furthest byte reached by a child event
    pub content_end: usize,
    /// `![alt](src)` rather than `[text](href)`
    pub is_image: bool,
}

impl LinkFrame {
    pub fn new(byte_range: Range<usize>, is_image: bool) -> Self {
        let opener = if is_image { 2 } else { 1 };
        let content_end = (byte_range.start + opener).min(byte_range.end);
        Self {
            byte_range,
            content_end,
            is_image,
        }
    }

    /// Extend the text extent to cover a child event.
    pub fn observe(&mut self, child: &Range<usize>) {
        if child.end <= self.byte_range.end {
            self.content_end = self.content_end.max(child.end);
        }
    }
}

/// Blockquote nesting. Markers are emitted once, for the outermost quote,
/// covering the whole `> > ` run of each line.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockquoteContext {
    pub depth: usize,
}

impl BlockquoteContext {
    /// Enter a quote; returns true for the outermost one.
    pub fn enter(&mut self) -> bool {
        self.depth += 1;
        self.depth == 1
    }

    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Byte ranges where raw `\[...\]` must not be recognised as math:
/// code spans, code blocks and math the parser already found.
#[derive(Debug, Clone, Default)]
pub struct ExcludedSpans {
    ranges: Vec<Range<usize>>,
}

impl ExcludedSpans {
    pub fn add(&mut self, range: Range<usize>) {
        if range.start < range.end {
            self.ranges.push(range);
        }
    }

    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        self.ranges
            .iter()
            .any(|r| r.start < range.end && range.start < r.end)
    }

    /// End of the excluded span holding `pos`, if any.
    pub fn end_of_span_at(&self, pos: usize) -> Option<usize> {
        self.ranges
            .iter()
            .filter(|r| r.contains(&pos))
            .map(|r| r.end)
            .max()
    }
}
