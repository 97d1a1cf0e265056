//! Container tags: emphasis, headings, lists, quotes, code blocks, links.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Tag, TagEnd};

use crate::decoration::DecorationType;

use super::syntax;
use super::{DecorationWriter, LinkFrame};

impl<'a, I> DecorationWriter<'a, I>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    pub(crate) fn start_tag(&mut self, tag: Tag<'a>, range: Range<usize>) {
        match tag {
            Tag::Emphasis => self.delimited(range, b"*_", 1, DecorationType::Italic),
            Tag::Strong => self.delimited(range, b"*_", 2, DecorationType::Bold),
            Tag::Strikethrough => self.delimited(range, b"~", 2, DecorationType::Strikethrough),
            Tag::Heading { level, .. } => self.heading(level, range),
            Tag::Item => self.list_item(range),
            Tag::BlockQuote(_) => {
                if self.blockquote.enter() {
                    self.blockquote_markers(range);
                }
            }
            Tag::CodeBlock(kind) => self.code_block(kind, range),
            Tag::Link { .. } => self.links.push(LinkFrame::new(range, false)),
            Tag::Image { .. } => self.links.push(LinkFrame::new(range, true)),
            _ => {}
        }
    }

    pub(crate) fn end_tag(&mut self, tag: TagEnd, _range: Range<usize>) {
        match tag {
            TagEnd::BlockQuote(_) => self.blockquote.exit(),
            TagEnd::Link | TagEnd::Image => {
                if let Some(frame) = self.links.pop() {
                    self.finish_link(frame);
                }
            }
            _ => {}
        }
    }

    /// Symmetric delimiter runs around styled content (`**bold**`, `~~gone~~`).
    fn delimited(&mut self, range: Range<usize>, delimiters: &[u8], max: usize, kind: DecorationType) {
        let raw = self.raw(&range);
        let open = syntax::delimiter_run(raw, delimiters, max);
        let close = raw
            .bytes()
            .rev()
            .take_while(|b| delimiters.contains(b))
            .take(open)
            .count();

        if open == 0 || open + close > raw.len() {
            self.emit(range, kind);
            return;
        }
        self.emit(range.start..range.start + open, DecorationType::Hide);
        self.emit(range.start + open..range.end - close, kind);
        self.emit(range.end - close..range.end, DecorationType::Hide);
    }

    fn heading(&mut self, level: HeadingLevel, range: Range<usize>) {
        let raw = self.raw(&range);
        let start = range.start;

        let content = if syntax::without_line_ending(raw).contains('\n') {
            let Some(setext) = syntax::setext_heading(raw) else {
                return;
            };
            self.emit_relative(start, setext.underline, DecorationType::Hide);
            setext.content
        } else {
            let Some(atx) = syntax::atx_heading(raw) else {
                return;
            };
            self.emit_relative(start, atx.marker, DecorationType::Hide);
            if let Some(closing) = atx.closing {
                self.emit_relative(start, closing, DecorationType::Hide);
            }
            atx.content
        };

        self.emit_relative(start, content.clone(), DecorationType::Heading);
        if let Some(kind) = DecorationType::heading_level(level as u8) {
            self.emit_relative(start, content, kind);
        }
    }

    fn list_item(&mut self, range: Range<usize>) {
        if let Some(marker) = syntax::list_marker(self.raw(&range)) {
            self.emit_relative(range.start, marker, DecorationType::ListItem);
        }
    }

    fn blockquote_markers(&mut self, range: Range<usize>) {
        for marker in syntax::blockquote_markers(self.raw(&range)) {
            self.emit_relative(range.start, marker, DecorationType::Blockquote);
        }
    }

    fn code_block(&mut self, kind: CodeBlockKind<'a>, range: Range<usize>) {
        self.excluded.add(range.clone());
        let raw = self.raw(&range);
        let start = range.start;

        match kind {
            CodeBlockKind::Fenced(_) => {
                let Some(code) = syntax::fenced_code(raw) else {
                    self.emit(range, DecorationType::CodeBlock);
                    return;
                };
                self.emit_relative(start, code.open, DecorationType::Hide);
                if let Some(language) = code.language {
                    self.emit_relative(start, language, DecorationType::CodeBlockLanguage);
                }
                self.emit_relative(start, code.open_rest, DecorationType::Hide);
                self.emit_relative(start, code.body, DecorationType::CodeBlock);
                if let Some(close) = code.close {
                    self.emit_relative(start, close, DecorationType::Hide);
                }
            }
            CodeBlockKind::Indented => {
                let len = syntax::without_line_ending(raw).len();
                self.emit(start..start + len, DecorationType::CodeBlock);
            }
        }
    }

    /// `[text](url)`, `![alt](src)`, reference forms and `<autolinks>`.
    fn finish_link(&mut self, frame: LinkFrame) {
        let range = frame.byte_range.clone();
        let raw = self.raw(&range);
        let kind = if frame.is_image {
            DecorationType::Image
        } else {
            DecorationType::Link
        };

        if raw.len() >= 2 && raw.starts_with('<') && raw.ends_with('>') {
            self.emit(range.start..range.start + 1, DecorationType::Hide);
            self.emit(range.start + 1..range.end - 1, kind);
            self.emit(range.end - 1..range.end, DecorationType::Hide);
            return;
        }

        let opener = if frame.is_image { "![" } else { "[" };
        if !raw.starts_with(opener) {
            self.emit(range, kind);
            return;
        }

        let text_start = range.start + opener.len();
        let text_end = frame.content_end.clamp(text_start, range.end);
        self.emit(range.start..text_start, DecorationType::Hide);
        self.emit(text_start..text_end, kind);
        self.emit(text_end..range.end, DecorationType::Hide);
    }
}
