//! DecorationWriter - decoration extraction from a Markdown event stream.
//!
//! Walks `pulldown-cmark` events with their byte ranges and records, for each
//! construct, which source spans are syntax to hide and which are content to
//! style. Syntax positions are recovered from the source slice of each
//! construct (see [`syntax`]); output ranges are char offsets.

mod events;
mod state;
mod syntax;
mod tags;


pub use state::*;

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser};
use serde::{Deserialize, Serialize};

use crate::decoration::{DecorationRange, DecorationType};
use crate::latex;
use crate::text::SourceText;

/// Markdown dialect and math handling toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Tables, strikethrough, task lists and footnotes
    pub gfm: bool,
    /// `$...$` and `$$...$$`
    pub math: bool,
    /// `\[...\]` display math
    pub latex_brackets: bool,
    /// Emit `mathSymbol` decorations for LaTeX commands inside math
    pub substitute_latex: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            math: true,
            latex_brackets: true,
            substitute_latex: true,
        }
    }
}

impl ExtractOptions {
    /// Parser extensions these options turn on.
    pub fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.gfm {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_STRIKETHROUGH);
            options.insert(Options::ENABLE_TASKLISTS);
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.math {
            options.insert(Options::ENABLE_MATH);
        }
        options
    }
}

/// Extracts decorations from Markdown source.
///
/// Holds only configuration; every call parses from scratch.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Decorations for `source`, sorted by start position.
    pub fn extract(&self, source: &str) -> Vec<DecorationRange> {
        let text = SourceText::from_str(source);
        self.extract_indexed(source, &text)
    }

    /// Like [`Extractor::extract`], reusing an index the caller already built.
    pub fn extract_indexed(&self, source: &str, text: &SourceText) -> Vec<DecorationRange> {
        let events = Parser::new_ext(source, self.options.parser_options()).into_offset_iter();
        DecorationWriter::new(source, text, events, &self.options).run()
    }
}

/// Decorations for `source` with every extension enabled.
pub fn extract_decorations(source: &str) -> Vec<DecorationRange> {
    Extractor::default().extract(source)
}

/// Collects decorations while consuming parser events.
///
/// `I` is any iterator of events with their source byte ranges, normally
/// `Parser::into_offset_iter()`.
pub struct DecorationWriter<'a, I>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    // === Input ===
    source: &'a str,
    text: &'a SourceText,
    events: I,
    options: &'a ExtractOptions,

    // === Grouped state ===
    pub(crate) links: Vec<LinkFrame>,
    pub(crate) blockquote: BlockquoteContext,
    pub(crate) excluded: ExcludedSpans,

    // === Output ===
    decorations: Vec<DecorationRange>,
}

impl<'a, I> DecorationWriter<'a, I>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    /// `source` must be the text `text` was built from and the events parsed from.
    pub fn new(
        source: &'a str,
        text: &'a SourceText,
        events: I,
        options: &'a ExtractOptions,
    ) -> Self {
        Self {
            source,
            text,
            events,
            options,
            links: Vec::new(),
            blockquote: BlockquoteContext::default(),
            excluded: ExcludedSpans::default(),
            decorations: Vec::new(),
        }
    }

    /// Raw source for a byte range, empty if the range is not on char boundaries.
    pub(crate) fn raw(&self, range: &Range<usize>) -> &'a str {
        self.source.get(range.clone()).unwrap_or_default()
    }

    /// Record a decoration over a byte range. Empty ranges are skipped.
    pub(crate) fn emit(&mut self, byte_range: Range<usize>, kind: DecorationType) {
        if byte_range.start >= byte_range.end {
            return;
        }
        let chars = self.text.byte_range_to_chars(byte_range.clone());
        tracing::trace!(
            target: "livemark::extract",
            %kind,
            byte_range = ?byte_range,
            char_range = ?chars,
            syntax = %self.raw(&byte_range).escape_debug(),
            "emit"
        );
        self.decorations
            .push(DecorationRange::new(chars.start, chars.end, kind));
    }

    /// Record a decoration over `base + relative` for a range found in a slice.
    pub(crate) fn emit_relative(
        &mut self,
        base: usize,
        relative: Range<usize>,
        kind: DecorationType,
    ) {
        self.emit(base + relative.start..base + relative.end, kind);
    }

    /// Delimited math: hide both delimiters, style the content, substitute symbols.
    pub(crate) fn emit_math(
        &mut self,
        range: Range<usize>,
        open: usize,
        close: usize,
        kind: DecorationType,
    ) {
        if range.end.saturating_sub(range.start) < open + close {
            return;
        }
        let content = range.start + open..range.end - close;
        self.excluded.add(range.clone());
        self.emit(range.start..content.start, DecorationType::Hide);
        self.emit(content.clone(), kind);
        self.emit(content.end..range.end, DecorationType::Hide);
        self.emit_math_symbols(content);
    }

    /// `mathSymbol` decorations for the LaTeX inside a math span.
    fn emit_math_symbols(&mut self, content: Range<usize>) {
        if !self.options.substitute_latex {
            return;
        }
        let math = self.raw(&content);
        let offset = self.text.byte_to_char(content.start);
        for sub in latex::non_overlapping(latex::find_latex_commands(math, offset)) {
            tracing::trace!(
                target: "livemark::extract",
                source = %sub.source,
                display = %sub.display,
                "math symbol"
            );
            self.decorations.push(DecorationRange::with_replacement(
                sub.start_pos,
                sub.end_pos,
                DecorationType::MathSymbol,
                sub.display,
            ));
        }
    }

    /// Consume the event stream and return the sorted decorations.
    pub fn run(mut self) -> Vec<DecorationRange> {
        while let Some((event, range)) = self.events.next() {
            if !matches!(event, Event::End(_)) {
                if let Some(frame) = self.links.last_mut() {
                    frame.observe(&range);
                }
            }

            match event {
                Event::Start(tag) => self.start_tag(tag, range),
                Event::End(tag) => self.end_tag(tag, range),
                other => self.leaf_event(other, range),
            }
        }

        if self.options.latex_brackets {
            self.bracket_math();
        }

        // Stable: ties keep emission order.
        self.decorations.sort_by_key(|d| d.start_pos);

        tracing::debug!(
            target: "livemark::extract",
            bytes = self.source.len(),
            decorations = self.decorations.len(),
            "extracted decorations"
        );
        self.decorations
    }
}
