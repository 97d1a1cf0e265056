//! Leaf events (code spans, math, rules, task markers) and the `\[...\]` scan.

use std::ops::Range;

use pulldown_cmark::Event;

use crate::decoration::DecorationType;

use super::DecorationWriter;
use super::syntax;

impl<'a, I> DecorationWriter<'a, I>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    pub(crate) fn leaf_event(&mut self, event: Event<'a>, range: Range<usize>) {
        match event {
            Event::Code(_) => self.inline_code(range),
            Event::InlineMath(_) => self.dollar_math(range, 1, DecorationType::InlineMath),
            Event::DisplayMath(_) => {
                // `$$x$$` on one line renders inline
                let kind = if self.raw(&range).contains('\n') {
                    DecorationType::DisplayMath
                } else {
                    DecorationType::InlineMath
                };
                self.dollar_math(range, 2, kind);
            }
            Event::Rule => {
                let len = syntax::without_line_ending(self.raw(&range)).len();
                let start = range.start - syntax::line_indent_before(self.source, range.start);
                self.emit(start..range.start + len, DecorationType::HorizontalRule);
            }
            Event::TaskListMarker(checked) => {
                let kind = if checked {
                    DecorationType::CheckboxChecked
                } else {
                    DecorationType::CheckboxUnchecked
                };
                if let Some(checkbox) = syntax::task_checkbox(self.raw(&range)) {
                    self.emit_relative(range.start, checkbox, kind);
                }
            }
            _ => {}
        }
    }

    fn inline_code(&mut self, range: Range<usize>) {
        self.excluded.add(range.clone());
        let raw = self.raw(&range);
        let open = syntax::code_span_ticks(raw);
        let close = raw
            .bytes()
            .rev()
            .take_while(|b| *b == b'`')
            .take(open)
            .count();

        self.emit(range.clone(), DecorationType::Code);
        if open == 0 || open + close > raw.len() {
            return;
        }
        self.emit(range.start..range.start + open, DecorationType::Transparent);
        self.emit(range.end - close..range.end, DecorationType::Transparent);
    }

    fn dollar_math(&mut self, range: Range<usize>, max: usize, kind: DecorationType) {
        let raw = self.raw(&range);
        let open = syntax::delimiter_run(raw, b"$", max);
        let close = raw
            .bytes()
            .rev()
            .take_while(|b| *b == b'$')
            .take(max)
            .count();
        self.emit_math(range, open, close, kind);
    }

    /// `\[ ... \]` spans outside code and parsed math. Whatever the Markdown
    /// grammar made of their content (emphasis from `*`, links from `[`) is
    /// discarded.
    pub(crate) fn bracket_math(&mut self) {
        let re = syntax::bracket_math_regex();
        let mut found: Vec<Range<usize>> = Vec::new();
        let mut pos = 0;
        while let Some(caps) = re.captures_at(self.source, pos) {
            let Some(m) = caps.get(0) else { break };
            let range = m.range();
            if let Some(end) = self.excluded.end_of_span_at(range.start) {
                // opener belongs to code or math; a real `\[` may follow it
                pos = end.max(range.start + 2);
                continue;
            }
            let body = caps.name("body").map_or("", |b| b.as_str());
            if self.excluded.overlaps(&range) || syntax::spans_blank_line(body) {
                pos = range.start + 2;
                continue;
            }
            pos = range.end;
            found.push(range);
        }

        for range in found {
            let chars = self.text.byte_range_to_chars(range.clone());
            let before = self.decorations.len();
            self.decorations
                .retain(|d| !(chars.start <= d.start_pos && d.end_pos <= chars.end));
            if self.decorations.len() < before {
                tracing::debug!(
                    target: "livemark::extract",
                    dropped = before - self.decorations.len(),
                    char_range = ?chars,
                    "discarded markdown inside bracket math"
                );
            }
            self.emit_math(range, 2, 2, DecorationType::DisplayMath);
        }
    }
}
