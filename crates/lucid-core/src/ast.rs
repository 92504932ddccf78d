use serde::Serialize;

pub type SpanSeq = Vec<Span>;

/// The closed set of nodes a renderer may produce.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderNode {
    Heading {
        level: u8,
        spans: SpanSeq,
    },
    Paragraph {
        spans: SpanSeq,
    },
    List {
        ordered: bool,
        items: Vec<SpanSeq>,
    },
    CodeBlock {
        // Empty when the fence carried no info string.
        language: String,
        lines: Vec<String>,
    },
    Blockquote {
        lines: Vec<SpanSeq>,
    },
    HorizontalRule,
    TagList {
        tags: Vec<String>,
    },
    /// Sanitized HTML, emitted only by the HTML path.
    Raw {
        html: String,
    },
    Json {
        tree: JsonTree,
    },
    /// Verbatim text shown when JSON input cannot be parsed.
    Preformatted {
        text: String,
    },
    PlainLine {
        kind: PlainKind,
        text: String,
    },
}

/// Flat inline formatting unit; spans never nest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { label: String, url: String },
}

impl Span {
    pub fn text(value: impl Into<String>) -> Self {
        Span::Text(value.into())
    }

    /// The visible characters of the span, without markers or link targets.
    pub fn as_str(&self) -> &str {
        match self {
            Span::Text(value) | Span::Bold(value) | Span::Italic(value) | Span::Code(value) => {
                value
            }
            Span::Link { label, .. } => label,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlainKind {
    Heading,
    ListLike,
    Spacer,
    Text,
}

/// A parsed JSON document. Object entries keep source order and numbers keep
/// their source spelling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(String),
    String(String),
    Array(Vec<JsonValue>),
    Object(Vec<(String, JsonValue)>),
}

impl JsonValue {
    pub fn is_primitive(&self) -> bool {
        !matches!(self, JsonValue::Array(_) | JsonValue::Object(_))
    }

    pub fn is_empty_container(&self) -> bool {
        match self {
            JsonValue::Array(items) => items.is_empty(),
            JsonValue::Object(entries) => entries.is_empty(),
            _ => false,
        }
    }
}

/// Display layout of a [`JsonValue`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonTree {
    Null,
    Bool {
        value: bool,
    },
    Number {
        value: String,
    },
    String {
        value: String,
    },
    /// Rendered as the literal `[]`.
    EmptyArray,
    /// Rendered as the literal `{}`.
    EmptyObject,
    /// Short array of primitives, rendered on one line.
    InlineArray {
        items: Vec<JsonValue>,
    },
    /// One element per line.
    BlockArray {
        depth: usize,
        items: Vec<JsonTree>,
    },
    Object {
        depth: usize,
        entries: Vec<JsonEntry>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JsonEntry {
    pub key: String,
    pub layout: EntryLayout,
    pub value: JsonTree,
}

/// Whether an object entry's value follows the key on the same line or
/// opens an indented block below it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryLayout {
    Inline,
    Nested,
}
