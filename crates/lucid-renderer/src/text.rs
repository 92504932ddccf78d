use lucid_core::{EntryLayout, JsonTree, JsonValue, RenderNode, Span};

use crate::Presenter;

const RULE_WIDTH: usize = 40;
const CODE_INDENT: &str = "    ";

/// Renders nodes as unstyled text for terminals and logs.
///
/// Blocks are separated by a blank line; consecutive plain-text lines are
/// kept on adjacent lines so the original layout survives.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextPresenter;

impl Presenter for TextPresenter {
    fn present(&self, nodes: &[RenderNode]) -> String {
        let mut out = String::new();
        let mut previous_plain = false;
        for (idx, node) in nodes.iter().enumerate() {
            let plain = matches!(node, RenderNode::PlainLine { .. });
            if idx > 0 {
                out.push_str(if plain && previous_plain { "\n" } else { "\n\n" });
            }
            out.push_str(&render_node(node));
            previous_plain = plain;
        }
        out
    }
}

fn render_node(node: &RenderNode) -> String {
    match node {
        RenderNode::Heading { level, spans } => {
            let title = flatten_spans(spans);
            let underline = if *level == 1 { '=' } else { '-' };
            let width = title.chars().count().max(1);
            format!("{}\n{}", title, underline.to_string().repeat(width))
        }
        RenderNode::Paragraph { spans } => flatten_spans(spans),
        RenderNode::List { ordered, items } => items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                if *ordered {
                    format!("{}. {}", idx + 1, flatten_spans(item))
                } else {
                    format!("- {}", flatten_spans(item))
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        RenderNode::CodeBlock { lines, .. } => lines
            .iter()
            .map(|line| format!("{}{}", CODE_INDENT, line))
            .collect::<Vec<_>>()
            .join("\n"),
        RenderNode::Blockquote { lines } => lines
            .iter()
            .map(|line| format!("> {}", flatten_spans(line)))
            .collect::<Vec<_>>()
            .join("\n"),
        RenderNode::HorizontalRule => "-".repeat(RULE_WIDTH),
        RenderNode::TagList { tags } => format!("Tags: {}", tags.join(", ")),
        RenderNode::Raw { html } => html.clone(),
        RenderNode::Json { tree } => {
            let mut out = Vec::new();
            json_lines(tree, 0, "", "", &mut out);
            out.join("\n")
        }
        RenderNode::Preformatted { text } => text.clone(),
        RenderNode::PlainLine { text, .. } => text.clone(),
    }
}

/// Joins span text, writing links as `label (url)`.
pub fn flatten_spans(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Link { label, url } => {
                out.push_str(label);
                out.push_str(" (");
                out.push_str(url);
                out.push(')');
            }
            other => out.push_str(other.as_str()),
        }
    }
    out
}

fn json_lines(tree: &JsonTree, indent: usize, prefix: &str, suffix: &str, out: &mut Vec<String>) {
    let pad = "  ".repeat(indent);
    match tree {
        JsonTree::BlockArray { items, .. } => {
            out.push(format!("{}{}[", pad, prefix));
            for (idx, item) in items.iter().enumerate() {
                json_lines(item, indent + 1, "", comma(idx, items.len()), out);
            }
            out.push(format!("{}]{}", pad, suffix));
        }
        JsonTree::Object { entries, .. } => {
            out.push(format!("{}{}{{", pad, prefix));
            for (idx, entry) in entries.iter().enumerate() {
                let key = format!("{}: ", quote_json(&entry.key));
                let entry_suffix = comma(idx, entries.len());
                match entry.layout {
                    EntryLayout::Inline => {
                        json_lines(&entry.value, indent + 1, &key, entry_suffix, out)
                    }
                    EntryLayout::Nested => {
                        out.push(format!("{}  {}", pad, key.trim_end()));
                        json_lines(&entry.value, indent + 2, "", entry_suffix, out);
                    }
                }
            }
            out.push(format!("{}}}{}", pad, suffix));
        }
        leaf => out.push(format!("{}{}{}{}", pad, prefix, json_leaf(leaf), suffix)),
    }
}

fn json_leaf(tree: &JsonTree) -> String {
    match tree {
        JsonTree::Null => "null".to_string(),
        JsonTree::Bool { value } => value.to_string(),
        JsonTree::Number { value } => value.clone(),
        JsonTree::String { value } => quote_json(value),
        JsonTree::EmptyArray => "[]".to_string(),
        JsonTree::EmptyObject => "{}".to_string(),
        JsonTree::InlineArray { items } => {
            let rendered: Vec<String> = items.iter().map(json_primitive).collect();
            format!("[{}]", rendered.join(", "))
        }
        JsonTree::BlockArray { .. } | JsonTree::Object { .. } => String::new(),
    }
}

fn json_primitive(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(flag) => flag.to_string(),
        JsonValue::Number(number) => number.clone(),
        JsonValue::String(string) => quote_json(string),
        JsonValue::Array(_) | JsonValue::Object(_) => String::new(),
    }
}

/// Writes a string as a JSON literal, escaping quotes, backslashes and line breaks.
pub(crate) fn quote_json(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn comma(idx: usize, len: usize) -> &'static str {
    if idx + 1 < len { "," } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucid_core::{Format, render};
    use pretty_assertions::assert_eq;

    fn present(text: &str, format: Format) -> String {
        TextPresenter.present(&render(text, format))
    }

    #[test]
    fn markdown_as_text() {
        let text = present(
            "# Title\nSee [docs](https://d.test) and **this**.\n1. a\n2. b\n---",
            Format::Markdown,
        );
        assert_eq!(
            text,
            "Title\n=====\n\nSee docs (https://d.test) and this.\n\n1. a\n2. b\n\n----------------------------------------"
        );
    }

    #[test]
    fn json_layout_follows_tree() {
        let text = present(
            r#"{"name":"x","tags":[1,2],"items":[{"id":1}],"empty":[]}"#,
            Format::Json,
        );
        let expected = r#"{
  "name": "x",
  "tags": [1, 2],
  "items":
    [
      {
        "id": 1
      }
    ],
  "empty": []
}"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn json_strings_are_re_escaped() {
        let text = present(
            r#"{"say \"hi\"": "a\"b", "path": ["C:\\tmp", "x\ny"]}"#,
            Format::Json,
        );
        let expected = r#"{
  "say \"hi\"": "a\"b",
  "path": ["C:\\tmp", "x\ny"]
}"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn plain_lines_stay_adjacent() {
        assert_eq!(present("ONE LINE\n\n- two", Format::Plain), "ONE LINE\n\n- two");
    }
}
