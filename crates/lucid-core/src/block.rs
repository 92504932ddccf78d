//! Line-oriented block parser for the Markdown-like dialect.
//!
//! The parser is a fold over the input lines. Each step consumes one line and
//! the current [`BlockState`], may push finished nodes, and returns the next
//! state. Nodes are never revisited once pushed.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::ast::{RenderNode, SpanSeq};
use crate::diagnostic::{Diagnostic, W_FENCE_UNTERMINATED};
use crate::inline::parse_spans;

pub(crate) const FENCE: &str = "```";
const QUOTE_PREFIX: &str = "> ";
const TAGS_PREFIX: &str = "Tags:";

// Longest prefix first so "## " is never read as level 1.
const HEADINGS: [(&str, u8); 5] = [
    ("##### ", 5),
    ("#### ", 4),
    ("### ", 3),
    ("## ", 2),
    ("# ", 1),
];

const RULES: [&str; 3] = ["---", "***", "___"];

static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.\s").expect("ordered item pattern"));

/// Parses a document into block nodes.
pub fn parse_blocks(text: &str) -> Vec<RenderNode> {
    let mut diagnostics = Vec::new();
    parse_blocks_with_diagnostics(text, &mut diagnostics)
}

pub(crate) fn parse_blocks_with_diagnostics(
    text: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<RenderNode> {
    let (state, mut out) = text.lines().enumerate().fold(
        (BlockState::default(), Vec::new()),
        |(state, mut out), (index, line)| {
            let state = state.step(index + 1, line, &mut out);
            (state, out)
        },
    );
    state.finish(&mut out, diagnostics);
    out
}

#[derive(Debug, Default)]
struct BlockState {
    unordered: Vec<SpanSeq>,
    ordered: Vec<SpanSeq>,
    quote: Vec<SpanSeq>,
    code: Vec<String>,
    language: String,
    in_fence: bool,
    fence_line: usize,
}

impl BlockState {
    fn step(mut self, line_no: usize, line: &str, out: &mut Vec<RenderNode>) -> Self {
        let trimmed = line.trim();

        if let Some(info) = trimmed.strip_prefix(FENCE) {
            if self.in_fence {
                self.flush_code(out);
            } else {
                self.flush_lists(out);
                self.flush_quote(out);
                self.in_fence = true;
                self.fence_line = line_no;
                self.language = info.trim().to_string();
            }
            return self;
        }

        if self.in_fence {
            self.code.push(line.to_string());
            return self;
        }

        if let Some(rest) = trimmed.strip_prefix(QUOTE_PREFIX) {
            self.flush_lists(out);
            self.quote.push(parse_spans(rest));
            return self;
        }

        // Blank lines separate blocks but never flush a pending buffer.
        if trimmed.is_empty() {
            return self;
        }

        self.flush_quote(out);

        if let Some((level, rest)) = heading(trimmed) {
            self.flush_lists(out);
            out.push(RenderNode::Heading {
                level,
                spans: parse_spans(rest.trim()),
            });
        } else if RULES.contains(&trimmed) {
            self.flush_lists(out);
            out.push(RenderNode::HorizontalRule);
        } else if let Some(rest) = unordered_item(trimmed) {
            self.flush_ordered(out);
            self.unordered.push(parse_spans(rest.trim_start()));
        } else if let Some(found) = ORDERED_ITEM.find(trimmed) {
            self.flush_unordered(out);
            self.ordered
                .push(parse_spans(trimmed[found.end()..].trim_start()));
        } else if let Some(rest) = trimmed.strip_prefix(TAGS_PREFIX) {
            self.flush_lists(out);
            out.push(RenderNode::TagList {
                tags: split_tags(rest),
            });
        } else {
            self.flush_lists(out);
            out.push(RenderNode::Paragraph {
                spans: parse_spans(trimmed),
            });
        }
        self
    }

    fn finish(mut self, out: &mut Vec<RenderNode>, diagnostics: &mut Vec<Diagnostic>) {
        self.flush_unordered(out);
        self.flush_ordered(out);
        self.flush_quote(out);
        if self.in_fence {
            warn!(
                line = self.fence_line,
                lines = self.code.len(),
                "code fence left open at end of input"
            );
            diagnostics.push(Diagnostic::warning(
                Some(self.fence_line),
                W_FENCE_UNTERMINATED,
                "code fence is never closed; remaining lines kept as code",
            ));
            self.flush_code(out);
        }
    }

    fn flush_lists(&mut self, out: &mut Vec<RenderNode>) {
        self.flush_unordered(out);
        self.flush_ordered(out);
    }

    fn flush_unordered(&mut self, out: &mut Vec<RenderNode>) {
        if !self.unordered.is_empty() {
            out.push(RenderNode::List {
                ordered: false,
                items: std::mem::take(&mut self.unordered),
            });
        }
    }

    fn flush_ordered(&mut self, out: &mut Vec<RenderNode>) {
        if !self.ordered.is_empty() {
            out.push(RenderNode::List {
                ordered: true,
                items: std::mem::take(&mut self.ordered),
            });
        }
    }

    fn flush_quote(&mut self, out: &mut Vec<RenderNode>) {
        if !self.quote.is_empty() {
            out.push(RenderNode::Blockquote {
                lines: std::mem::take(&mut self.quote),
            });
        }
    }

    fn flush_code(&mut self, out: &mut Vec<RenderNode>) {
        out.push(RenderNode::CodeBlock {
            language: std::mem::take(&mut self.language),
            lines: std::mem::take(&mut self.code),
        });
        self.in_fence = false;
    }
}

fn heading(text: &str) -> Option<(u8, &str)> {
    HEADINGS
        .iter()
        .find_map(|(prefix, level)| text.strip_prefix(prefix).map(|rest| (*level, rest)))
}

fn unordered_item(text: &str) -> Option<&str> {
    text.strip_prefix("- ").or_else(|| text.strip_prefix("* "))
}

fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
