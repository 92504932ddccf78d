//! Turns free-form generated text into a document tree.
//!
//! [`render`] picks one of four renderers from a [`Format`] and returns the
//! resulting [`RenderNode`]s. Rendering is pure and never fails: malformed
//! input degrades to literal text, verbatim blocks, or a flushed code block.

mod ast;
mod block;
mod diagnostic;
mod dispatch;
mod inline;
mod json;
mod plain;
mod sanitize;

pub use ast::{
    EntryLayout, JsonEntry, JsonTree, JsonValue, PlainKind, RenderNode, Span, SpanSeq,
};
pub use block::parse_blocks;
pub use diagnostic::{
    Diagnostic, DiagnosticSeverity, W_FENCE_UNTERMINATED, W_HTML_HANDLER_REMOVED,
    W_HTML_SCRIPT_REMOVED, W_JSON_INVALID,
};
pub use dispatch::{
    Format, RenderOptions, RenderResult, render, render_with_diagnostics, render_with_options,
};
pub use inline::parse_spans;
pub use json::{INLINE_ARRAY_MAX, layout as layout_json, parse_json, render_json};
pub use plain::{classify as classify_plain_line, render_plain};
pub use sanitize::{SanitizePolicy, sanitize, sanitize_strict};
