//! Locating syntax markers inside the source slice of a construct.
//!
//! The parser reports where a construct starts and ends, not where its
//! delimiters are. These helpers scan the raw slice and return byte ranges
//! relative to its start.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// Indentation and blockquote prefixes that may precede a marker on a line.
const LINE_PREFIX: [char; 3] = [' ', '\t', '>'];

/// Strip a trailing `\n` / `\r\n` (or several).
pub fn without_line_ending(raw: &str) -> &str {
    raw.trim_end_matches(['\n', '\r'])
}

fn leading(raw: &str, pattern: &[char]) -> usize {
    raw.len() - raw.trim_start_matches(pattern).len()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtxHeading {
    /// `#` run plus the whitespace after it
    pub marker: Range<usize>,
    pub content: Range<usize>,
    /// Optional closing `#` sequence, with the whitespace before it
    pub closing: Option<Range<usize>>,
}

/// Parse an ATX heading line (`## Title ##`).
pub fn atx_heading(line: &str) -> Option<AtxHeading> {
    let line = without_line_ending(line);
    let indent = leading(line, &[' ', '\t']);
    let hashes = line[indent..].bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }

    let after = indent + hashes;
    let gap = leading(&line[after..], &[' ', '\t']);
    if gap == 0 && after < line.len() {
        return None;
    }

    let content_start = after + gap;
    let mut content_end = content_start + line[content_start..].trim_end().len();
    let mut closing = None;

    let tail = &line[content_start..content_end];
    let without_hashes = tail.trim_end_matches('#');
    if without_hashes.len() < tail.len()
        && (without_hashes.is_empty() || without_hashes.ends_with([' ', '\t']))
    {
        let close_start = content_start + without_hashes.trim_end().len();
        closing = Some(close_start..content_end);
        content_end = close_start;
    }

    Some(AtxHeading {
        marker: indent..content_start,
        content: content_start..content_end,
        closing,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetextHeading {
    pub content: Range<usize>,
    /// `===` / `---` run, without indentation or quote prefix
    pub underline: Range<usize>,
}

/// Split a setext heading into its content lines and underline.
pub fn setext_heading(raw: &str) -> Option<SetextHeading> {
    let body = without_line_ending(raw);
    let split = body.rfind('\n')?;

    let content_start = leading(body, &[' ', '\t']);
    let content_end = body[..split].trim_end().len();

    let line = &body[split + 1..];
    let lead = leading(line, &LINE_PREFIX);
    let underline_end = line.trim_end().len();
    if lead >= underline_end {
        return None;
    }

    Some(SetextHeading {
        content: content_start..content_end.max(content_start),
        underline: split + 1 + lead..split + 1 + underline_end,
    })
}

/// Bullet (`-`, `*`, `+`) or ordinal (`1.`, `1)`) marker of a list item,
/// with one following space if present.
pub fn list_marker(raw: &str) -> Option<Range<usize>> {
    let indent = leading(raw, &[' ', '\t']);
    let bytes = raw.as_bytes();
    let mut end = indent;

    match bytes.get(indent)? {
        b'-' | b'*' | b'+' => end += 1,
        b'0'..=b'9' => {
            let digits = bytes[indent..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            if digits > 9 {
                return None;
            }
            end += digits;
            if !matches!(bytes.get(end), Some(b'.' | b')')) {
                return None;
            }
            end += 1;
        }
        _ => return None,
    }

    if matches!(bytes.get(end), Some(b' ' | b'\t')) {
        end += 1;
    }
    Some(indent..end)
}

/// `[ ]` / `[x]` token inside a task list marker range.
pub fn task_checkbox(raw: &str) -> Option<Range<usize>> {
    let open = raw.find('[')?;
    let close = raw[open..].find(']')?;
    Some(open..open + close + 1)
}

/// The `>` run at the start of every quoted line, nested markers and one
/// trailing space included. Lazy continuation lines have none.
pub fn blockquote_markers(raw: &str) -> Vec<Range<usize>> {
    let mut markers = Vec::new();
    let mut line_start = 0;

    for line in raw.split_inclusive('\n') {
        let bytes = line.as_bytes();
        let mut i = leading(line, &[' ', '\t']);
        if bytes.get(i) == Some(&b'>') {
            let start = i;
            while bytes.get(i) == Some(&b'>') {
                i += 1;
                if matches!(bytes.get(i), Some(b' ' | b'\t')) {
                    i += 1;
                }
            }
            markers.push(line_start + start..line_start + i);
        }
        line_start += line.len();
    }
    markers
}

/// Length of the opening backtick run of an inline code span.
pub fn code_span_ticks(raw: &str) -> usize {
    raw.bytes().take_while(|b| *b == b'`').count()
}

/// Length of the delimiter run opening an emphasis-like span, capped at `max`.
pub fn delimiter_run(raw: &str, delimiter: &[u8], max: usize) -> usize {
    raw.bytes()
        .take_while(|b| delimiter.contains(b))
        .take(max)
        .count()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedCode {
    /// Opening fence run
    pub open: Range<usize>,
    /// First word of the info string
    pub language: Option<Range<usize>>,
    /// Rest of the opening line, newline included
    pub open_rest: Range<usize>,
    pub body: Range<usize>,
    /// Closing fence run, absent for unclosed blocks
    pub close: Option<Range<usize>>,
}

/// Dissect a fenced code block.
pub fn fenced_code(raw: &str) -> Option<FencedCode> {
    let fence_start = raw.find(['`', '~'])?;
    let fence_char = raw.as_bytes()[fence_start];
    let fence_len = raw[fence_start..]
        .bytes()
        .take_while(|b| *b == fence_char)
        .count();
    if fence_len < 3 {
        return None;
    }

    let open_end = fence_start + fence_len;
    let line_end = raw[open_end..].find('\n').map(|p| open_end + p);
    let after_line = line_end.map_or(raw.len(), |p| p + 1);

    let info = &raw[open_end..line_end.unwrap_or(raw.len())];
    let info_lead = leading(info, &[' ', '\t']);
    let word_len = info[info_lead..]
        .find(char::is_whitespace)
        .unwrap_or(info.len() - info_lead);
    let (language, rest_start) = if word_len > 0 {
        let start = open_end + info_lead;
        (Some(start..start + word_len), start + word_len)
    } else {
        (None, open_end)
    };

    let body_start = after_line;
    let mut body_end = raw.len();
    let mut close = None;

    let trimmed_end = without_line_ending(raw).len();
    if trimmed_end > body_start {
        let last_start = raw[..trimmed_end].rfind('\n').map_or(0, |p| p + 1);
        if last_start >= body_start {
            let last = &raw[last_start..trimmed_end];
            let lead = leading(last, &LINE_PREFIX);
            let run = last[lead..]
                .bytes()
                .take_while(|b| *b == fence_char)
                .count();
            if run >= fence_len && last[lead + run..].trim().is_empty() {
                close = Some(last_start + lead..last_start + lead + run);
                body_end = last_start;
            }
        }
    }

    Some(FencedCode {
        open: fence_start..open_end,
        language,
        open_rest: rest_start..after_line,
        body: body_start..body_end.max(body_start),
        close,
    })
}

/// Width of the run of spaces between the start of the line and `pos`, or 0
/// when something other than spaces precedes `pos` on its line.
pub fn line_indent_before(source: &str, pos: usize) -> usize {
    let before = &source.as_bytes()[..pos];
    let indent = before.iter().rev().take_while(|b| **b == b' ').count();
    match before.len().checked_sub(indent + 1).map(|i| before[i]) {
        None | Some(b'\n') => indent,
        Some(_) => 0,
    }
}

/// `\[ ... \]` display math. The parser treats `\[` as an escaped bracket, so
/// these are found by scanning the source.
pub fn bracket_math_regex() -> &'static Regex {
    static RE_BRACKET_MATH: OnceLock<Regex> = OnceLock::new();
    RE_BRACKET_MATH.get_or_init(|| Regex::new(r"(?s)\\\[(?P<body>.+?)\\\]").unwrap())
}

/// Whether `body` contains a blank line, which ends a paragraph and so
/// cannot sit inside one math span.
pub fn spans_blank_line(body: &str) -> bool {
    let lines: Vec<&str> = body.split('\n').collect();
    lines.len() > 2 && lines[1..lines.len() - 1].iter().any(|l| l.trim().is_empty())
}
