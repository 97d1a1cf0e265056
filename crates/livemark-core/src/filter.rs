//! Selection-aware filtering of extracted decorations.
//!
//! Marker decorations near a selection are dropped so the raw Markdown shows
//! through; everything else is grouped by type for the renderer. How "near" is
//! decided per type by [`RevealScope`].

use std::collections::BTreeMap;
use std::ops::{Range, RangeInclusive};

use crate::decoration::{DecorationRange, DecorationType, RevealScope};
use crate::text::SourceText;
use crate::types::Selection;

/// Surviving decorations grouped by type. Types with nothing left are absent.
pub type DecorationMap = BTreeMap<DecorationType, Vec<DecorationRange>>;

/// Filter `decorations` against the current selections of `source`.
pub fn filter_decorations(
    decorations: &[DecorationRange],
    source: &str,
    selections: &[Selection],
) -> DecorationMap {
    let text = SourceText::from_str(source);
    filter_decorations_indexed(decorations, &text, selections)
}

/// Like [`filter_decorations`], reusing an index the caller already built.
pub fn filter_decorations_indexed(
    decorations: &[DecorationRange],
    text: &SourceText,
    selections: &[Selection],
) -> DecorationMap {
    let len = text.len_chars();
    let selections: Vec<Selection> = selections.iter().map(|s| s.clamped(len)).collect();
    let active_lines: Vec<RangeInclusive<usize>> = selections
        .iter()
        .map(|s| text.selection_line_span(s.start(), s.end()))
        .collect();

    let decorations: Vec<DecorationRange> = decorations
        .iter()
        .filter_map(|d| clamp(d, len))
        .collect();
    let owners: Vec<&DecorationRange> = decorations
        .iter()
        .filter(|d| is_owner(d.kind))
        .collect();

    let mut map = DecorationMap::new();
    let mut revealed = 0usize;

    for decoration in &decorations {
        let reveal = match decoration.kind.reveal_scope() {
            RevealScope::Never | RevealScope::Pinned => false,
            RevealScope::Line => {
                let lines = text.line_span(decoration.start_pos, decoration.end_pos);
                active_lines.iter().any(|active| overlaps(active, &lines))
            }
            RevealScope::Span => {
                let extent = reveal_extent(decoration, &owners);
                selections
                    .iter()
                    .any(|s| s.touches(extent.start, extent.end))
            }
        };

        if reveal {
            revealed += 1;
            tracing::trace!(target: "livemark::filter", %decoration, "revealed");
            continue;
        }
        map.entry(decoration.kind)
            .or_insert_with(Vec::new)
            .push(decoration.clone());
    }

    tracing::debug!(
        target: "livemark::filter",
        selections = selections.len(),
        total = decorations.len(),
        revealed,
        "filtered decorations"
    );
    map
}

/// Pull a decoration into `0..=len`. Inverted ranges are dropped.
fn clamp(decoration: &DecorationRange, len: usize) -> Option<DecorationRange> {
    if decoration.start_pos > decoration.end_pos {
        tracing::warn!(
            target: "livemark::filter",
            %decoration,
            len,
            "dropping decoration with inverted range"
        );
        return None;
    }
    let mut clamped = decoration.clone();
    clamped.start_pos = decoration.start_pos.min(len);
    clamped.end_pos = decoration.end_pos.min(len);
    Some(clamped)
}

fn is_owner(kind: DecorationType) -> bool {
    DecorationType::ALL
        .iter()
        .any(|marker| marker.owner_types().contains(&kind))
}

/// The span a selection has to touch to reveal `decoration`: its own range, or
/// the smallest enclosing construct that owns it (code span around a backtick,
/// math span around a symbol).
fn reveal_extent(decoration: &DecorationRange, owners: &[&DecorationRange]) -> Range<usize> {
    let owner_types = decoration.kind.owner_types();
    owners
        .iter()
        .filter(|owner| owner_types.contains(&owner.kind) && owner.encloses(decoration))
        .min_by_key(|owner| owner.len())
        .map_or_else(|| decoration.char_range(), |owner| owner.char_range())
}

fn overlaps(a: &RangeInclusive<usize>, b: &RangeInclusive<usize>) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    use DecorationType::*;

    fn range(start: usize, end: usize, kind: DecorationType) -> DecorationRange {
        DecorationRange::new(start, end, kind)
    }

    fn kinds(map: &DecorationMap) -> Vec<DecorationType> {
        map.keys().copied().collect()
    }

    #[test]
    fn test_caret_inside_bold_reveals_delimiters() {
        let decorations = [range(0, 2, Hide), range(2, 6, Bold), range(6, 8, Hide)];
        let map = filter_decorations(&decorations, "**bold**", &[Selection::collapsed(3)]);
        assert_eq!(map.get(&Bold).map(Vec::len), Some(1));
        assert!(!map.contains_key(&Hide));
    }

    #[test]
    fn test_heading_reveal_clears_both_styles() {
        let decorations = [range(0, 2, Hide), range(2, 9, Heading1), range(2, 9, Heading)];
        let map = filter_decorations(&decorations, "# Heading", &[Selection::collapsed(1)]);
        assert!(map.is_empty(), "{map:?}");
    }

    #[test]
    fn test_markers_on_other_lines_survive() {
        let decorations = [range(0, 2, ListItem)];
        let map = filter_decorations(&decorations, "- item\nnext", &[Selection::collapsed(7)]);
        assert_eq!(kinds(&map), vec![ListItem]);
    }

    #[test]
    fn test_horizontal_rule_is_span_scoped() {
        let decorations = [range(0, 3, HorizontalRule)];

        let map = filter_decorations(&decorations, "---", &[Selection::collapsed(1)]);
        assert!(map.is_empty());

        let map = filter_decorations(&decorations, "---", &[Selection::new(0, 3)]);
        assert!(map.is_empty());

        let map = filter_decorations(&decorations, "---\nabc", &[Selection::collapsed(5)]);
        assert_eq!(kinds(&map), vec![HorizontalRule]);
    }

    #[test]
    fn test_inline_code_boundaries_reveal_backticks() {
        let source = "Some text `code` more";
        let decorations = [
            range(10, 16, Code),
            range(10, 11, Transparent),
            range(15, 16, Transparent),
        ];
        for caret in [10, 13, 16] {
            let map = filter_decorations(&decorations, source, &[Selection::collapsed(caret)]);
            assert!(!map.contains_key(&Transparent), "caret {caret}");
            assert_eq!(map.get(&Code).map(Vec::len), Some(1), "caret {caret}");
        }

        // same line, away from the span
        let map = filter_decorations(&decorations, source, &[Selection::collapsed(19)]);
        assert_eq!(map.get(&Transparent).map(Vec::len), Some(2));
    }

    #[test]
    fn test_checkbox_stays_while_list_marker_reveals() {
        let decorations = [range(0, 2, ListItem), range(2, 5, CheckboxUnchecked)];
        let map = filter_decorations(&decorations, "- [ ] task", &[Selection::collapsed(3)]);
        assert_eq!(kinds(&map), vec![CheckboxUnchecked]);
    }

    #[test]
    fn test_math_symbols_reveal_with_their_math_span() {
        let source = r"$\alpha$ and more";
        let decorations = [
            range(0, 1, Hide),
            range(1, 7, InlineMath),
            DecorationRange::with_replacement(1, 7, MathSymbol, "α"),
            range(7, 8, Hide),
        ];

        let map = filter_decorations(&decorations, source, &[Selection::collapsed(12)]);
        assert!(map.contains_key(&MathSymbol));
        assert!(!map.contains_key(&Hide));

        let map = filter_decorations(&decorations, source, &[Selection::collapsed(4)]);
        assert!(!map.contains_key(&MathSymbol));
        assert!(map.contains_key(&InlineMath));
    }

    #[test]
    fn test_multiple_cursors_reveal_independently() {
        let source = "# A\n# B\n# C";
        let decorations = [range(0, 2, Hide), range(4, 6, Hide), range(8, 10, Hide)];
        let map = filter_decorations(
            &decorations,
            source,
            &[Selection::collapsed(1), Selection::collapsed(9)],
        );
        assert_eq!(map.get(&Hide), Some(&vec![range(4, 6, Hide)]));
    }

    #[test]
    fn test_range_selection_covers_every_line() {
        let source = "a\n**b**\nc";
        let decorations = [range(2, 4, Hide), range(4, 5, Bold), range(5, 7, Hide)];
        let map = filter_decorations(&decorations, source, &[Selection::new(0, 9)]);
        assert_eq!(kinds(&map), vec![Bold]);
    }

    #[test]
    fn test_no_selection_keeps_everything() {
        let decorations = [range(0, 2, Hide), range(2, 6, Bold), range(6, 8, Hide)];
        let map = filter_decorations(&decorations, "**bold**", &[]);
        assert_eq!(map.get(&Hide).map(Vec::len), Some(2));
        assert_eq!(map.get(&Bold).map(Vec::len), Some(1));
    }

    #[test]
    fn test_out_of_bounds_input_is_clamped() {
        let decorations = [range(0, 2, Hide), range(2, 40, Bold), range(30, 20, Italic)];
        let map = filter_decorations(&decorations, "**b**", &[Selection::collapsed(999)]);
        assert_eq!(map.get(&Bold), Some(&vec![range(2, 5, Bold)]));
        assert!(!map.contains_key(&Italic));
        assert!(!map.contains_key(&Hide));
    }

    #[test]
    fn test_semantic_types_always_survive() {
        let decorations = [
            range(0, 4, Link),
            range(0, 4, Italic),
            range(0, 4, CodeBlock),
            range(0, 4, DisplayMath),
        ];
        let map = filter_decorations(&decorations, "text", &[Selection::new(0, 4)]);
        assert_eq!(map.len(), 4);
    }
}
