//! JSON display tree.
//!
//! Layout rules differ from a generic pretty-printer: short arrays of
//! primitives stay on one line, and an object entry only opens a nested block
//! when its value is a non-empty object or a non-empty array whose first
//! element is an object.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::value::RawValue;
use tracing::{debug, warn};

use crate::ast::{EntryLayout, JsonEntry, JsonTree, JsonValue, RenderNode};
use crate::block::FENCE;
use crate::diagnostic::{Diagnostic, W_JSON_INVALID};

/// Arrays of primitives up to this length are laid out inline.
pub const INLINE_ARRAY_MAX: usize = 5;

/// Renders JSON text, optionally wrapped in a `json` or untagged fence.
///
/// Input that does not parse is returned verbatim as
/// [`RenderNode::Preformatted`].
pub fn render_json(text: &str) -> RenderNode {
    let mut diagnostics = Vec::new();
    render_json_with_diagnostics(text, &mut diagnostics)
}

pub(crate) fn render_json_with_diagnostics(
    text: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> RenderNode {
    let source = extract_candidate(text);
    match parse_json(source) {
        Ok(value) => RenderNode::Json {
            tree: layout(&value, 0),
        },
        Err(err) => {
            warn!(error = %err, "input is not valid JSON, showing it verbatim");
            diagnostics.push(Diagnostic::warning(
                Some(err.line()).filter(|line| *line > 0),
                W_JSON_INVALID,
                format!("invalid JSON: {err}"),
            ));
            RenderNode::Preformatted {
                text: text.to_string(),
            }
        }
    }
}

fn extract_candidate(text: &str) -> &str {
    match fenced_body(text) {
        Some(body) => {
            debug!("using fenced JSON block");
            body.trim()
        }
        None => text.trim(),
    }
}

/// Body of the first closed fence tagged `json` or untagged.
///
/// Fence lines are consumed in open/close pairs, so the closing line of an
/// earlier block is never mistaken for an opening one.
fn fenced_body(text: &str) -> Option<&str> {
    let mut offset = 0;
    // (body start, whether the open fence is a JSON candidate)
    let mut open: Option<(usize, bool)> = None;
    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let Some(info) = line.trim().strip_prefix(FENCE) else {
            continue;
        };
        match open.take() {
            None => {
                let info = info.trim();
                open = Some((offset, info.is_empty() || info.eq_ignore_ascii_case("json")));
            }
            Some((body_start, true)) => return Some(&text[body_start..line_start]),
            Some((_, false)) => {}
        }
    }
    None
}

/// Strictly parses JSON, keeping object key order and number spelling.
///
/// Nested values are read as raw source slices, so numbers come out exactly
/// as written (`1e3` stays `1e3`). A repeated key keeps its first position
/// and its last value.
pub fn parse_json(source: &str) -> Result<JsonValue, serde_json::Error> {
    let raw: &RawValue = serde_json::from_str(source)?;
    from_raw(raw)
}

fn from_raw(raw: &RawValue) -> Result<JsonValue, serde_json::Error> {
    let text = raw.get().trim();
    let value = match text.as_bytes().first() {
        Some(b'{') => {
            let RawEntries(entries) = serde_json::from_str(text)?;
            JsonValue::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| from_raw(value).map(|value| (key, value)))
                    .collect::<Result<_, _>>()?,
            )
        }
        Some(b'[') => {
            let items: Vec<&RawValue> = serde_json::from_str(text)?;
            JsonValue::Array(items.into_iter().map(from_raw).collect::<Result<_, _>>()?)
        }
        Some(b'"') => JsonValue::String(serde_json::from_str(text)?),
        Some(b't' | b'f') => JsonValue::Bool(serde_json::from_str(text)?),
        Some(b'n') => JsonValue::Null,
        _ => JsonValue::Number(text.to_string()),
    };
    Ok(value)
}

/// Object members in source order, values left unparsed.
struct RawEntries<'a>(Vec<(String, &'a RawValue)>);

impl<'de> Deserialize<'de> for RawEntries<'de> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries<'de>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, &'de RawValue)> = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, &'de RawValue>()? {
                    match entries.iter_mut().find(|(existing, _)| *existing == key) {
                        Some(entry) => entry.1 = value,
                        None => entries.push((key, value)),
                    }
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Lays out a parsed value starting at `depth`.
pub fn layout(value: &JsonValue, depth: usize) -> JsonTree {
    match value {
        JsonValue::Null => JsonTree::Null,
        JsonValue::Bool(flag) => JsonTree::Bool { value: *flag },
        JsonValue::Number(number) => JsonTree::Number {
            value: number.clone(),
        },
        JsonValue::String(string) => JsonTree::String {
            value: string.clone(),
        },
        JsonValue::Array(items) if items.is_empty() => JsonTree::EmptyArray,
        JsonValue::Object(entries) if entries.is_empty() => JsonTree::EmptyObject,
        JsonValue::Array(items) if is_simple_array(items) => JsonTree::InlineArray {
            items: items.clone(),
        },
        JsonValue::Array(items) => JsonTree::BlockArray {
            depth,
            items: items.iter().map(|item| layout(item, depth + 1)).collect(),
        },
        JsonValue::Object(entries) => JsonTree::Object {
            depth,
            entries: entries
                .iter()
                .map(|(key, value)| JsonEntry {
                    key: key.clone(),
                    layout: entry_layout(value),
                    value: layout(value, depth + 1),
                })
                .collect(),
        },
    }
}

fn is_simple_array(items: &[JsonValue]) -> bool {
    items.len() <= INLINE_ARRAY_MAX && items.iter().all(JsonValue::is_primitive)
}

// Only the first element decides whether an array of records nests.
fn entry_layout(value: &JsonValue) -> EntryLayout {
    match value {
        JsonValue::Object(entries) if !entries.is_empty() => EntryLayout::Nested,
        JsonValue::Array(items) if matches!(items.first(), Some(JsonValue::Object(_))) => {
            EntryLayout::Nested
        }
        _ => EntryLayout::Inline,
    }
}
