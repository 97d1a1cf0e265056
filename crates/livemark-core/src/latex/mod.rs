//! LaTeX → Unicode substitution for math spans.
//!
//! Scans math content for commands (`\alpha`, `\mathbb{R}`, `\hat{x}`),
//! sub/superscripts (`x_1`, `e^{2i}`) and fractions (`\frac{a}{b}`), and
//! reports each as a [`Substitution`] of source chars by display text.
//! Anything unrecognized is left alone; malformed braces simply make a
//! command argument-less.

pub mod symbols;

use std::sync::OnceLock;

use regex::{Captures, Match, Regex};
use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, ToSmolStr, format_smolstr};

/// Replacement of a LaTeX fragment by its Unicode rendering.
///
/// Offsets are char offsets, shifted by the `start_offset` given to
/// [`find_latex_commands`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitution {
    pub start_pos: usize,
    pub end_pos: usize,
    /// Source fragment, e.g. `\alpha`
    pub source: SmolStr,
    /// What to draw instead, e.g. `α`
    pub display: SmolStr,
}

impl Substitution {
    fn from_match(text: &str, start_offset: usize, whole: Match<'_>, display: SmolStr) -> Self {
        let start_pos = start_offset + text[..whole.start()].chars().count();
        let end_pos = start_pos + whole.as_str().chars().count();
        Self {
            start_pos,
            end_pos,
            source: whole.as_str().to_smolstr(),
            display,
        }
    }

    fn overlaps(&self, other: &Substitution) -> bool {
        self.start_pos < other.end_pos && other.start_pos < self.end_pos
    }
}

fn command_regex() -> &'static Regex {
    static RE_COMMAND: OnceLock<Regex> = OnceLock::new();
    RE_COMMAND.get_or_init(|| {
        Regex::new(r"\\(?:(?P<name>[a-zA-Z]+)(?:\{(?P<arg>[^}]*)\})?|(?P<punct>[,;:!]))").unwrap()
    })
}

fn script_regex() -> &'static Regex {
    static RE_SCRIPT: OnceLock<Regex> = OnceLock::new();
    RE_SCRIPT.get_or_init(|| {
        Regex::new(r"(?P<marker>[_^])(?:\{(?P<braced>[^}]+)\}|(?P<single>[a-zA-Z0-9]))").unwrap()
    })
}

fn fraction_regex() -> &'static Regex {
    static RE_FRACTION: OnceLock<Regex> = OnceLock::new();
    RE_FRACTION.get_or_init(|| Regex::new(r"\\frac\{(?P<num>[^}]*)\}\{(?P<den>[^}]*)\}").unwrap())
}

/// Find every LaTeX construct in `text` that has a Unicode rendering.
///
/// The three scans (commands, scripts, fractions) run independently and
/// their results are concatenated in that order; within a scan results are
/// in source order. Overlaps between scans are possible (`\text{x_1}`), use
/// [`non_overlapping`] when a consistent rendering is needed.
pub fn find_latex_commands(
    text: &str,
    start_offset: usize,
) -> impl Iterator<Item = Substitution> + '_ {
    commands(text, start_offset)
        .chain(scripts(text, start_offset))
        .chain(fractions(text, start_offset))
}

fn commands(text: &str, start_offset: usize) -> impl Iterator<Item = Substitution> + '_ {
    command_regex()
        .captures_iter(text)
        .filter_map(move |caps| {
            let whole = caps.get(0)?;
            let display = command_display(&caps)?;
            Some(Substitution::from_match(text, start_offset, whole, display))
        })
}

fn command_display(caps: &Captures<'_>) -> Option<SmolStr> {
    if let Some(punct) = caps.name("punct") {
        return symbols::lookup(punct.as_str()).map(SmolStr::new_static);
    }

    let name = caps.name("name")?.as_str();
    let arg = caps.name("arg").map(|m| m.as_str());

    match (name, arg) {
        ("mathcal", Some(arg)) if !arg.is_empty() => {
            Some(symbols::restyle(arg, symbols::mathcal).into())
        }
        ("mathbb", Some(arg)) if !arg.is_empty() => {
            Some(symbols::restyle(arg, symbols::mathbb).into())
        }
        ("text", Some(arg)) if !arg.is_empty() => Some(arg.to_smolstr()),
        ("sqrt", Some(arg)) if !arg.is_empty() => Some(format_smolstr!("√{arg}")),
        _ => {
            let unicode = symbols::lookup(name)?;
            match arg {
                None => Some(SmolStr::new_static(unicode)),
                Some(arg) if symbols::is_accent(name) => Some(format_smolstr!("{arg}{unicode}")),
                // Known command with an argument it doesn't take: leave it literal.
                Some(_) => None,
            }
        }
    }
}

fn scripts(text: &str, start_offset: usize) -> impl Iterator<Item = Substitution> + '_ {
    script_regex().captures_iter(text).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let content = caps.name("braced").or_else(|| caps.name("single"))?.as_str();
        let table: fn(char) -> Option<char> = match caps.name("marker")?.as_str() {
            "_" => symbols::subscript,
            _ => symbols::superscript,
        };
        let converted = symbols::restyle(content, table);
        if converted == content {
            return None;
        }
        Some(Substitution::from_match(
            text,
            start_offset,
            whole,
            converted.into(),
        ))
    })
}

fn fractions(text: &str, start_offset: usize) -> impl Iterator<Item = Substitution> + '_ {
    fraction_regex().captures_iter(text).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let num = caps.name("num")?.as_str();
        let den = caps.name("den")?.as_str();
        Some(Substitution::from_match(
            text,
            start_offset,
            whole,
            format_smolstr!("{num}/{den}"),
        ))
    })
}

/// Resolve overlaps between substitutions: sorted by start, the earliest
/// (and on ties, the longest) wins and anything overlapping it is dropped.
pub fn non_overlapping(substitutions: impl IntoIterator<Item = Substitution>) -> Vec<Substitution> {
    let mut all: Vec<Substitution> = substitutions.into_iter().collect();
    all.sort_by(|a, b| {
        a.start_pos
            .cmp(&b.start_pos)
            .then(b.end_pos.cmp(&a.end_pos))
    });

    let mut kept: Vec<Substitution> = Vec::with_capacity(all.len());
    for sub in all {
        if kept.last().is_some_and(|last| last.overlaps(&sub)) {
            tracing::trace!(
                target: "livemark::latex",
                source = %sub.source,
                "dropping overlapping substitution"
            );
            continue;
        }
        kept.push(sub);
    }
    kept
}

/// Render `text` with every non-overlapping substitution applied.
pub fn render_unicode(text: &str) -> String {
    let substitutions = non_overlapping(find_latex_commands(text, 0));
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().enumerate().peekable();
    let mut subs = substitutions.iter().peekable();

    while let Some((idx, c)) = chars.next() {
        match subs.peek() {
            Some(sub) if sub.start_pos == idx => {
                out.push_str(&sub.display);
                while chars.peek().is_some_and(|(next, _)| *next < sub.end_pos) {
                    chars.next();
                }
                subs.next();
            }
            _ => out.push(c),
        }
    }
    out
}
