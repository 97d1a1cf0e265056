//! Decoration kinds and ranges.
//!
//! A decoration tags a span of the source with a rendering intent. Marker
//! decorations hide raw Markdown syntax (`**`, `#`, `>`) and are revealed
//! again when a selection comes near them; semantic decorations style content
//! and are always rendered.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Rendering intent of a decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecorationType {
    /// Raw syntax hidden entirely: emphasis delimiters, fences, `$`, `[`/`](url)`.
    Hide,
    /// Delimiters drawn invisible but still occupying space (inline code backticks).
    Transparent,
    /// Leading `>` run of a blockquote line.
    Blockquote,
    /// Generic heading style, emitted alongside a level-specific one.
    Heading,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    /// Bullet or ordinal marker of a list item.
    ListItem,
    CheckboxUnchecked,
    CheckboxChecked,
    HorizontalRule,
    /// LaTeX source replaced by a Unicode rendering (see `DecorationRange::replacement`).
    MathSymbol,
    Bold,
    Italic,
    Strikethrough,
    Link,
    Image,
    /// Inline code, including its backtick delimiters.
    Code,
    CodeBlock,
    CodeBlockLanguage,
    InlineMath,
    DisplayMath,
}

/// How a marker decoration is revealed by a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealScope {
    /// Revealed when a selection touches any line the decoration spans.
    Line,
    /// Revealed when a selection intersects the decoration (or the construct
    /// that owns it), boundaries included.
    Span,
    /// Marker that stays rendered regardless of the selection.
    Pinned,
    /// Semantic decoration; never suppressed.
    Never,
}

impl DecorationType {
    /// Every decoration type, in declaration order.
    pub const ALL: [DecorationType; 25] = [
        DecorationType::Hide,
        DecorationType::Transparent,
        DecorationType::Blockquote,
        DecorationType::Heading,
        DecorationType::Heading1,
        DecorationType::Heading2,
        DecorationType::Heading3,
        DecorationType::Heading4,
        DecorationType::Heading5,
        DecorationType::Heading6,
        DecorationType::ListItem,
        DecorationType::CheckboxUnchecked,
        DecorationType::CheckboxChecked,
        DecorationType::HorizontalRule,
        DecorationType::MathSymbol,
        DecorationType::Bold,
        DecorationType::Italic,
        DecorationType::Strikethrough,
        DecorationType::Link,
        DecorationType::Image,
        DecorationType::Code,
        DecorationType::CodeBlock,
        DecorationType::CodeBlockLanguage,
        DecorationType::InlineMath,
        DecorationType::DisplayMath,
    ];

    /// Whether this type hides or replaces raw syntax.
    pub fn is_marker(self) -> bool {
        match self {
            DecorationType::Hide
            | DecorationType::Transparent
            | DecorationType::Blockquote
            | DecorationType::Heading
            | DecorationType::Heading1
            | DecorationType::Heading2
            | DecorationType::Heading3
            | DecorationType::Heading4
            | DecorationType::Heading5
            | DecorationType::Heading6
            | DecorationType::ListItem
            | DecorationType::CheckboxUnchecked
            | DecorationType::CheckboxChecked
            | DecorationType::HorizontalRule
            | DecorationType::MathSymbol => true,
            DecorationType::Bold
            | DecorationType::Italic
            | DecorationType::Strikethrough
            | DecorationType::Link
            | DecorationType::Image
            | DecorationType::Code
            | DecorationType::CodeBlock
            | DecorationType::CodeBlockLanguage
            | DecorationType::InlineMath
            | DecorationType::DisplayMath => false,
        }
    }

    /// Which selection proximity reveals this decoration.
    pub fn reveal_scope(self) -> RevealScope {
        match self {
            DecorationType::Hide
            | DecorationType::Blockquote
            | DecorationType::Heading
            | DecorationType::Heading1
            | DecorationType::Heading2
            | DecorationType::Heading3
            | DecorationType::Heading4
            | DecorationType::Heading5
            | DecorationType::Heading6
            | DecorationType::ListItem => RevealScope::Line,
            DecorationType::Transparent
            | DecorationType::HorizontalRule
            | DecorationType::MathSymbol => RevealScope::Span,
            DecorationType::CheckboxUnchecked | DecorationType::CheckboxChecked => {
                RevealScope::Pinned
            }
            DecorationType::Bold
            | DecorationType::Italic
            | DecorationType::Strikethrough
            | DecorationType::Link
            | DecorationType::Image
            | DecorationType::Code
            | DecorationType::CodeBlock
            | DecorationType::CodeBlockLanguage
            | DecorationType::InlineMath
            | DecorationType::DisplayMath => RevealScope::Never,
        }
    }

    /// Semantic types whose range encloses, and therefore owns, a span-scoped
    /// marker of this type. A selection anywhere in the owner reveals the marker.
    pub fn owner_types(self) -> &'static [DecorationType] {
        match self {
            DecorationType::Transparent => &[DecorationType::Code],
            DecorationType::MathSymbol => {
                &[DecorationType::InlineMath, DecorationType::DisplayMath]
            }
            _ => &[],
        }
    }

    /// Level-specific heading type for an ATX/setext level (1-6).
    pub fn heading_level(level: u8) -> Option<DecorationType> {
        match level {
            1 => Some(DecorationType::Heading1),
            2 => Some(DecorationType::Heading2),
            3 => Some(DecorationType::Heading3),
            4 => Some(DecorationType::Heading4),
            5 => Some(DecorationType::Heading5),
            6 => Some(DecorationType::Heading6),
            _ => None,
        }
    }

    /// Name as used by hosts (camelCase, matching the serialized form).
    pub fn as_str(self) -> &'static str {
        match self {
            DecorationType::Hide => "hide",
            DecorationType::Transparent => "transparent",
            DecorationType::Blockquote => "blockquote",
            DecorationType::Heading => "heading",
            DecorationType::Heading1 => "heading1",
            DecorationType::Heading2 => "heading2",
            DecorationType::Heading3 => "heading3",
            DecorationType::Heading4 => "heading4",
            DecorationType::Heading5 => "heading5",
            DecorationType::Heading6 => "heading6",
            DecorationType::ListItem => "listItem",
            DecorationType::CheckboxUnchecked => "checkboxUnchecked",
            DecorationType::CheckboxChecked => "checkboxChecked",
            DecorationType::HorizontalRule => "horizontalRule",
            DecorationType::MathSymbol => "mathSymbol",
            DecorationType::Bold => "bold",
            DecorationType::Italic => "italic",
            DecorationType::Strikethrough => "strikethrough",
            DecorationType::Link => "link",
            DecorationType::Image => "image",
            DecorationType::Code => "code",
            DecorationType::CodeBlock => "codeBlock",
            DecorationType::CodeBlockLanguage => "codeBlockLanguage",
            DecorationType::InlineMath => "inlineMath",
            DecorationType::DisplayMath => "displayMath",
        }
    }
}

impl fmt::Display for DecorationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a decoration type hides or replaces raw syntax.
pub fn is_marker_decoration_type(kind: DecorationType) -> bool {
    kind.is_marker()
}

/// A typed, half-open span `[start_pos, end_pos)` of char offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationRange {
    pub start_pos: usize,
    pub end_pos: usize,
    #[serde(rename = "type")]
    pub kind: DecorationType,
    /// Text drawn in place of the source span (math symbols only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<SmolStr>,
}

impl DecorationRange {
    pub fn new(start_pos: usize, end_pos: usize, kind: DecorationType) -> Self {
        Self {
            start_pos,
            end_pos,
            kind,
            replacement: None,
        }
    }

    /// A span rendered as `replacement` instead of its source text.
    pub fn with_replacement(
        start_pos: usize,
        end_pos: usize,
        kind: DecorationType,
        replacement: impl Into<SmolStr>,
    ) -> Self {
        Self {
            start_pos,
            end_pos,
            kind,
            replacement: Some(replacement.into()),
        }
    }

    pub fn char_range(&self) -> Range<usize> {
        self.start_pos..self.end_pos
    }

    pub fn len(&self) -> usize {
        self.end_pos.saturating_sub(self.start_pos)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `other` lies entirely within this range.
    pub fn encloses(&self, other: &DecorationRange) -> bool {
        self.start_pos <= other.start_pos && other.end_pos <= self.end_pos
    }
}

impl fmt::Display for DecorationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}..{}", self.kind, self.start_pos, self.end_pos)?;
        if let Some(replacement) = &self.replacement {
            write!(f, " => {replacement:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_partition() {
        let markers = [
            DecorationType::Hide,
            DecorationType::Transparent,
            DecorationType::Blockquote,
            DecorationType::Heading,
            DecorationType::Heading1,
            DecorationType::Heading2,
            DecorationType::Heading3,
            DecorationType::Heading4,
            DecorationType::Heading5,
            DecorationType::Heading6,
            DecorationType::ListItem,
            DecorationType::CheckboxUnchecked,
            DecorationType::CheckboxChecked,
            DecorationType::HorizontalRule,
        ];
        for kind in markers {
            assert!(is_marker_decoration_type(kind), "{kind} should be a marker");
        }

        assert!(!is_marker_decoration_type(DecorationType::Bold));
        assert!(!is_marker_decoration_type(DecorationType::Link));
        assert!(!is_marker_decoration_type(DecorationType::Code));
    }

    #[test]
    fn test_scope_agrees_with_partition() {
        for kind in DecorationType::ALL {
            let semantic = kind.reveal_scope() == RevealScope::Never;
            assert_eq!(kind.is_marker(), !semantic, "{kind}");
        }
    }

    #[test]
    fn test_serialized_names_match_as_str() {
        for kind in DecorationType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_range_serialization() {
        let range = DecorationRange::new(0, 3, DecorationType::HorizontalRule);
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"startPos":0,"endPos":3,"type":"horizontalRule"}"#);

        let symbol = DecorationRange::with_replacement(1, 7, DecorationType::MathSymbol, "α");
        assert_eq!(symbol.to_string(), "mathSymbol 1..7 => \"α\"");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(DecorationType::heading_level(1), Some(DecorationType::Heading1));
        assert_eq!(DecorationType::heading_level(6), Some(DecorationType::Heading6));
        assert_eq!(DecorationType::heading_level(7), None);
    }

    #[test]
    fn test_encloses() {
        let code = DecorationRange::new(0, 13, DecorationType::Code);
        let tick = DecorationRange::new(12, 13, DecorationType::Transparent);
        assert!(code.encloses(&tick));
        assert!(!tick.encloses(&code));
    }
}
