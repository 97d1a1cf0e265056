// Integration tests for the extract → filter pipeline
//
// Each test extracts decorations from real Markdown and filters them against
// a cursor or selection, checking what the renderer would end up drawing.

use livemark_core::{
    DecorationMap, DecorationType, Selection, decorate, extract_decorations, filter_decorations,
    is_marker_decoration_type,
};

fn count(map: &DecorationMap, kind: DecorationType) -> usize {
    map.get(&kind).map_or(0, Vec::len)
}

#[test]
fn test_bold_reveals_on_active_line() {
    let map = decorate("**bold** text", &[Selection::collapsed(3)]);
    assert_eq!(count(&map, DecorationType::Bold), 1);
    assert_eq!(count(&map, DecorationType::Hide), 0);

    let map = decorate("**bold** text\nnext line", &[Selection::collapsed(16)]);
    assert_eq!(count(&map, DecorationType::Hide), 2);
}

#[test]
fn test_heading_reveals_whole_line() {
    let map = decorate("# Heading\n\nbody", &[Selection::collapsed(1)]);
    assert_eq!(count(&map, DecorationType::Heading), 0);
    assert_eq!(count(&map, DecorationType::Heading1), 0);
    assert_eq!(count(&map, DecorationType::Hide), 0);

    let map = decorate("# Heading\n\nbody", &[Selection::collapsed(12)]);
    assert_eq!(count(&map, DecorationType::Heading), 1);
    assert_eq!(count(&map, DecorationType::Heading1), 1);
}

#[test]
fn test_task_item_keeps_checkbox() {
    let map = decorate("- [ ] task", &[Selection::collapsed(3)]);
    assert_eq!(count(&map, DecorationType::CheckboxUnchecked), 1);
    assert_eq!(count(&map, DecorationType::ListItem), 0);
}

#[test]
fn test_inline_code_reveals_at_boundaries() {
    let source = "Some text `code` more";
    for caret in [10, 12, 16] {
        let map = decorate(source, &[Selection::collapsed(caret)]);
        assert_eq!(count(&map, DecorationType::Transparent), 0, "caret {caret}");
        assert_eq!(count(&map, DecorationType::Code), 1, "caret {caret}");
    }
}

#[test]
fn test_horizontal_rule_reveal() {
    let source = "---\n\nafter";
    assert_eq!(
        count(&decorate(source, &[Selection::collapsed(1)]), DecorationType::HorizontalRule),
        0
    );
    assert_eq!(
        count(&decorate(source, &[Selection::new(0, 3)]), DecorationType::HorizontalRule),
        0
    );
    assert_eq!(
        count(&decorate(source, &[Selection::collapsed(7)]), DecorationType::HorizontalRule),
        1
    );
}

#[test]
fn test_math_symbols_render_until_touched() {
    let source = r"Let $\alpha \in \mathbb{R}$ be given.";
    let decorations = extract_decorations(source);
    let symbols: Vec<_> = decorations
        .iter()
        .filter(|d| d.kind == DecorationType::MathSymbol)
        .filter_map(|d| d.replacement.as_deref())
        .collect();
    assert_eq!(symbols, vec!["α", "∈", "ℝ"]);

    let far = filter_decorations(&decorations, source, &[Selection::collapsed(33)]);
    assert_eq!(count(&far, DecorationType::MathSymbol), 3);

    let inside = filter_decorations(&decorations, source, &[Selection::collapsed(8)]);
    assert_eq!(count(&inside, DecorationType::MathSymbol), 0);
    assert_eq!(count(&inside, DecorationType::InlineMath), 1);
}

#[test]
fn test_unselected_document_hides_all_markup() {
    let source = "# Title\n\n> quote\n\n- item\n\n**b** and `c`\n";
    let all = extract_decorations(source);
    let map = filter_decorations(&all, source, &[]);
    let kept: usize = map.values().map(Vec::len).sum();
    assert_eq!(kept, all.len());
}

#[test]
fn test_semantic_decorations_survive_any_selection() {
    let source = "# T\n\n**b** [l](u) `c`\n\n```rs\nx\n```\n\n$y$";
    let all = extract_decorations(source);
    let everything = Selection::new(0, source.chars().count());
    let map = filter_decorations(&all, source, &[everything]);

    let semantic = all.iter().filter(|d| !is_marker_decoration_type(d.kind)).count();
    let kept: usize = map.values().map(Vec::len).sum();
    assert_eq!(kept, semantic);
    assert!(map.keys().all(|kind| {
        !kind.is_marker() || kind.reveal_scope() == livemark_core::RevealScope::Pinned
    }));
}

#[test]
fn test_map_serializes_for_hosts() {
    let map = decorate("---", &[]);
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"horizontalRule":[{"startPos":0,"endPos":3,"type":"horizontalRule"}]}"#);
}
