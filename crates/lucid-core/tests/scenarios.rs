use lucid_core::{
    EntryLayout, Format, JsonEntry, JsonTree, JsonValue, PlainKind, RenderNode, Span, parse_blocks,
    parse_spans, render, render_json,
};
use pretty_assertions::assert_eq;

#[test]
fn markdown_heading_paragraph_and_tags() {
    let nodes = render(
        "# Title\n\nSome *x* and **y**.\nTags: a, b",
        Format::Markdown,
    );
    assert_eq!(
        nodes,
        vec![
            RenderNode::Heading {
                level: 1,
                spans: vec![Span::text("Title")],
            },
            RenderNode::Paragraph {
                spans: vec![
                    Span::text("Some "),
                    Span::Italic("x".to_string()),
                    Span::text(" and "),
                    Span::Bold("y".to_string()),
                    Span::text("."),
                ],
            },
            RenderNode::TagList {
                tags: vec!["a".to_string(), "b".to_string()],
            },
        ]
    );
}

#[test]
fn markdown_fenced_code_keeps_language() {
    let nodes = render("```js\nconsole.log(1)\n```", Format::Markdown);
    assert_eq!(
        nodes,
        vec![RenderNode::CodeBlock {
            language: "js".to_string(),
            lines: vec!["console.log(1)".to_string()],
        }]
    );
}

#[test]
fn json_fenced_object_lays_out_inline_values() {
    let nodes = render("```json\n{\"a\":1,\"b\":[1,2,3]}\n```", Format::Json);
    let [RenderNode::Json { tree }] = nodes.as_slice() else {
        panic!("expected a single JSON node, got {nodes:?}");
    };
    let JsonTree::Object { depth, entries } = tree else {
        panic!("expected an object, got {tree:?}");
    };
    assert_eq!(*depth, 0);
    assert_eq!(
        entries,
        &vec![
            JsonEntry {
                key: "a".to_string(),
                layout: EntryLayout::Inline,
                value: JsonTree::Number {
                    value: "1".to_string()
                },
            },
            JsonEntry {
                key: "b".to_string(),
                layout: EntryLayout::Inline,
                value: JsonTree::InlineArray {
                    items: ["1", "2", "3"]
                        .iter()
                        .map(|n| JsonValue::Number(n.to_string()))
                        .collect(),
                },
            },
        ]
    );
}

#[test]
fn plain_lines_are_classified() {
    let nodes = render("HELLO WORLD\n\n- item", Format::Plain);
    assert_eq!(
        nodes,
        vec![
            RenderNode::PlainLine {
                kind: PlainKind::Heading,
                text: "HELLO WORLD".to_string(),
            },
            RenderNode::PlainLine {
                kind: PlainKind::Spacer,
                text: String::new(),
            },
            RenderNode::PlainLine {
                kind: PlainKind::ListLike,
                text: "- item".to_string(),
            },
        ]
    );
}

#[test]
fn unknown_format_uses_markdown() {
    let text = "# Heading\n- item";
    assert_eq!(render(text, Format::from_name("yaml")), parse_blocks(text));
}

#[test]
fn paragraph_count_matches_non_blank_lines() {
    let text = "alpha\n\nbeta gamma\n   \ndelta\nepsilon";
    let nodes = parse_blocks(text);
    assert_eq!(nodes.len(), 4);
    assert!(
        nodes
            .iter()
            .all(|node| matches!(node, RenderNode::Paragraph { .. }))
    );
}

#[test]
fn open_fence_flushes_exactly_one_code_block() {
    let nodes = parse_blocks("before\n```rust\nfn main() {}\n- not a list\n# nor a heading");
    let code_blocks: Vec<&RenderNode> = nodes
        .iter()
        .filter(|node| matches!(node, RenderNode::CodeBlock { .. }))
        .collect();
    assert_eq!(
        code_blocks,
        vec![&RenderNode::CodeBlock {
            language: "rust".to_string(),
            lines: vec![
                "fn main() {}".to_string(),
                "- not a list".to_string(),
                "# nor a heading".to_string(),
            ],
        }]
    );
}

#[test]
fn unordered_then_ordered_flushes_two_lists() {
    let nodes = parse_blocks("- one\n- two\n1. three");
    assert_eq!(
        nodes,
        vec![
            RenderNode::List {
                ordered: false,
                items: vec![vec![Span::text("one")], vec![Span::text("two")]],
            },
            RenderNode::List {
                ordered: true,
                items: vec![vec![Span::text("three")]],
            },
        ]
    );
}

#[test]
fn json_fallback_echoes_input() {
    assert_eq!(
        render_json("not json"),
        RenderNode::Preformatted {
            text: "not json".to_string()
        }
    );
}

#[test]
fn inline_priority_is_fixed() {
    assert_eq!(
        parse_spans("*a **b** c*"),
        vec![
            Span::text("*a "),
            Span::Bold("b".to_string()),
            Span::text(" c*"),
        ]
    );
}

#[test]
fn rendering_is_deterministic() {
    let text = "# T\n> q\n- a\n1. b\n```\ncode";
    for format in [Format::Markdown, Format::Html, Format::Json, Format::Plain] {
        assert_eq!(render(text, format), render(text, format));
    }
}
