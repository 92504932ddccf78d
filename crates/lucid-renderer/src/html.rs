use lucid_core::{EntryLayout, JsonTree, JsonValue, PlainKind, RenderNode, Span};

use crate::Presenter;
use crate::text::quote_json;
#[cfg(feature = "highlight")]
use crate::Theme;

/// Emits an HTML fragment for a node sequence.
///
/// Output is deterministic: 2-space indentation and LF newlines. Text is
/// escaped, `Raw` nodes are written as-is, and links open in a new browsing
/// context.
#[derive(Clone, Debug, Default)]
pub struct HtmlPresenter {
    #[cfg(feature = "highlight")]
    highlight: Option<Theme>,
}

impl HtmlPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors fenced code with syntect, picking syntax themes for `theme`.
    #[cfg(feature = "highlight")]
    pub fn with_highlighting(mut self, theme: Theme) -> Self {
        self.highlight = Some(theme);
        self
    }

    #[cfg(feature = "highlight")]
    fn code_lines(&self, language: &str, lines: &[String]) -> Vec<String> {
        match self.highlight {
            Some(theme) => crate::highlight::highlight_lines(language, lines, theme),
            None => escape_lines(lines),
        }
    }

    #[cfg(not(feature = "highlight"))]
    fn code_lines(&self, _language: &str, lines: &[String]) -> Vec<String> {
        escape_lines(lines)
    }

    fn emit_node(&self, writer: &mut HtmlWriter, node: &RenderNode) {
        match node {
            RenderNode::Heading { level, spans } => {
                writer.line(&format!("<h{}>{}</h{}>", level, render_spans(spans), level));
            }
            RenderNode::Paragraph { spans } => {
                writer.line(&format!("<p>{}</p>", render_spans(spans)));
            }
            RenderNode::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                writer.line(&format!("<{}>", tag));
                writer.indent += 1;
                for item in items {
                    writer.line(&format!("<li>{}</li>", render_spans(item)));
                }
                writer.indent -= 1;
                writer.line(&format!("</{}>", tag));
            }
            RenderNode::CodeBlock { language, lines } => {
                let lang_attr = if language.is_empty() {
                    String::new()
                } else {
                    format!(" data-lang=\"{}\"", escape_attr(language))
                };
                let code_class = if language.is_empty() {
                    String::new()
                } else {
                    format!(" class=\"language-{}\"", escape_attr(language))
                };
                // Code is written without indentation so the <pre> keeps its text.
                writer.out.push_str(&format!(
                    "<pre class=\"lucid-code\"{}><code{}>",
                    lang_attr, code_class
                ));
                writer.out.push_str(&self.code_lines(language, lines).join("\n"));
                writer.out.push_str("</code></pre>\n");
            }
            RenderNode::Blockquote { lines } => {
                writer.line("<blockquote>");
                writer.indent += 1;
                for line in lines {
                    writer.line(&format!("<p>{}</p>", render_spans(line)));
                }
                writer.indent -= 1;
                writer.line("</blockquote>");
            }
            RenderNode::HorizontalRule => writer.line("<hr />"),
            RenderNode::TagList { tags } => {
                writer.line("<ul class=\"lucid-tags\">");
                writer.indent += 1;
                for tag in tags {
                    writer.line(&format!("<li class=\"lucid-tag\">{}</li>", escape_html(tag)));
                }
                writer.indent -= 1;
                writer.line("</ul>");
            }
            RenderNode::Raw { html } => writer.line(html),
            RenderNode::Json { tree } => {
                writer.line("<div class=\"lucid-json\">");
                writer.indent += 1;
                emit_json(writer, tree, "", "");
                writer.indent -= 1;
                writer.line("</div>");
            }
            RenderNode::Preformatted { text } => {
                writer.out.push_str("<pre class=\"lucid-preformatted\">");
                writer.out.push_str(&escape_html(text));
                writer.out.push_str("</pre>\n");
            }
            RenderNode::PlainLine { kind, text } => {
                let class = match kind {
                    PlainKind::Heading => "lucid-plain-heading",
                    PlainKind::ListLike => "lucid-plain-list",
                    PlainKind::Spacer => "lucid-plain-spacer",
                    PlainKind::Text => "lucid-plain-text",
                };
                writer.line(&format!("<div class=\"{}\">{}</div>", class, escape_html(text)));
            }
        }
    }
}

impl Presenter for HtmlPresenter {
    fn present(&self, nodes: &[RenderNode]) -> String {
        let mut writer = HtmlWriter::new();
        for node in nodes {
            self.emit_node(&mut writer, node);
        }
        writer.finish()
    }
}

struct HtmlWriter {
    out: String,
    indent: usize,
}

impl HtmlWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    fn line(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
        self.out.push_str(line);
        self.out.push('\n');
    }

    fn finish(mut self) -> String {
        if self.out.ends_with('\n') {
            self.out.pop();
        }
        self.out
    }
}

/// Renders a span sequence as inline HTML.
pub fn render_spans(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(text) => out.push_str(&escape_html(text)),
            Span::Bold(text) => {
                out.push_str("<strong>");
                out.push_str(&escape_html(text));
                out.push_str("</strong>");
            }
            Span::Italic(text) => {
                out.push_str("<em>");
                out.push_str(&escape_html(text));
                out.push_str("</em>");
            }
            Span::Code(text) => {
                out.push_str("<code>");
                out.push_str(&escape_html(text));
                out.push_str("</code>");
            }
            Span::Link { label, url } => {
                out.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                    escape_url_attr(url),
                    escape_html(label)
                ));
            }
        }
    }
    out
}

fn emit_json(writer: &mut HtmlWriter, tree: &JsonTree, prefix: &str, suffix: &str) {
    match tree {
        JsonTree::BlockArray { depth, items } => {
            writer.line(&json_line(&format!("{}{}", prefix, punct("["))));
            writer.line(&format!(
                "<div class=\"lucid-json-block\" data-depth=\"{}\">",
                depth
            ));
            writer.indent += 1;
            for (idx, item) in items.iter().enumerate() {
                emit_json(writer, item, "", comma(idx, items.len()));
            }
            writer.indent -= 1;
            writer.line("</div>");
            writer.line(&json_line(&format!("{}{}", punct("]"), suffix)));
        }
        JsonTree::Object { depth, entries } => {
            writer.line(&json_line(&format!("{}{}", prefix, punct("{"))));
            writer.line(&format!(
                "<div class=\"lucid-json-block\" data-depth=\"{}\">",
                depth
            ));
            writer.indent += 1;
            for (idx, entry) in entries.iter().enumerate() {
                let key = format!(
                    "<span class=\"lucid-json-key\">{}</span>: ",
                    escape_html(&quote_json(&entry.key))
                );
                let entry_suffix = comma(idx, entries.len());
                match entry.layout {
                    EntryLayout::Inline => emit_json(writer, &entry.value, &key, entry_suffix),
                    EntryLayout::Nested => {
                        writer.line(&json_line(key.trim_end()));
                        writer.line("<div class=\"lucid-json-nested\">");
                        writer.indent += 1;
                        emit_json(writer, &entry.value, "", entry_suffix);
                        writer.indent -= 1;
                        writer.line("</div>");
                    }
                }
            }
            writer.indent -= 1;
            writer.line("</div>");
            writer.line(&json_line(&format!("{}{}", punct("}"), suffix)));
        }
        leaf => writer.line(&json_line(&format!(
            "{}{}{}",
            prefix,
            render_json_leaf(leaf),
            suffix
        ))),
    }
}

fn render_json_leaf(tree: &JsonTree) -> String {
    match tree {
        JsonTree::Null => json_span("null", "null"),
        JsonTree::Bool { value } => json_span("boolean", &value.to_string()),
        JsonTree::Number { value } => json_span("number", &escape_html(value)),
        JsonTree::String { value } => json_span("string", &escape_html(&quote_json(value))),
        JsonTree::EmptyArray => punct("[]"),
        JsonTree::EmptyObject => punct("{}"),
        JsonTree::InlineArray { items } => {
            let rendered: Vec<String> = items.iter().map(render_json_primitive).collect();
            format!("{}{}{}", punct("["), rendered.join(", "), punct("]"))
        }
        JsonTree::BlockArray { .. } | JsonTree::Object { .. } => String::new(),
    }
}

fn render_json_primitive(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => json_span("null", "null"),
        JsonValue::Bool(flag) => json_span("boolean", &flag.to_string()),
        JsonValue::Number(number) => json_span("number", &escape_html(number)),
        JsonValue::String(string) => json_span("string", &escape_html(&quote_json(string))),
        JsonValue::Array(_) | JsonValue::Object(_) => String::new(),
    }
}

fn json_span(kind: &str, content: &str) -> String {
    format!("<span class=\"lucid-json-{}\">{}</span>", kind, content)
}

fn json_line(content: &str) -> String {
    format!("<div class=\"lucid-json-line\">{}</div>", content)
}

fn punct(text: &str) -> String {
    format!("<span class=\"lucid-json-punct\">{}</span>", escape_html(text))
}

fn comma(idx: usize, len: usize) -> &'static str {
    if idx + 1 < len { "," } else { "" }
}

fn escape_lines(lines: &[String]) -> Vec<String> {
    lines.iter().map(|line| escape_html(line)).collect()
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_url_attr(text: &str) -> String {
    let mut encoded = String::new();
    for ch in text.chars() {
        match ch {
            ' ' => encoded.push_str("%20"),
            '\\' => encoded.push_str("%5C"),
            ch if ch.is_control() => {
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).bytes() {
                    encoded.push_str(&format!("%{:02X}", byte));
                }
            }
            _ => encoded.push(ch),
        }
    }
    escape_attr(&encoded)
}
