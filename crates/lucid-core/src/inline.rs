//! Inline span tokenizer.
//!
//! Patterns are tried in a fixed priority order (bold, italic, code, link).
//! The first pattern that matches anywhere in the remaining text wins, even
//! when a lower-priority pattern would match earlier in the line. The text in
//! front of the match is tokenized the same way, the matched span is emitted,
//! and scanning continues after it.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::ast::{Span, SpanSeq};

static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").expect("bold pattern"));
static ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*]+)\*|_([^_]+)_").expect("italic pattern"));
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("code pattern"));
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern"));

#[derive(Clone, Copy, Debug)]
enum Pattern {
    Bold,
    Italic,
    Code,
    Link,
}

const PRIORITY: [Pattern; 4] = [Pattern::Bold, Pattern::Italic, Pattern::Code, Pattern::Link];

struct Found {
    start: usize,
    end: usize,
    span: Span,
}

impl Pattern {
    fn regex(self) -> &'static Regex {
        match self {
            Pattern::Bold => &BOLD,
            Pattern::Italic => &ITALIC,
            Pattern::Code => &CODE,
            Pattern::Link => &LINK,
        }
    }

    fn find(self, text: &str) -> Option<Found> {
        let caps = self.regex().captures(text)?;
        let whole = caps.get(0)?;
        let span = match self {
            Pattern::Bold => Span::Bold(either_group(&caps)?),
            Pattern::Italic => Span::Italic(either_group(&caps)?),
            Pattern::Code => Span::Code(caps.get(1)?.as_str().to_string()),
            Pattern::Link => Span::Link {
                label: caps.get(1)?.as_str().to_string(),
                url: caps.get(2)?.as_str().to_string(),
            },
        };
        Some(Found {
            start: whole.start(),
            end: whole.end(),
            span,
        })
    }
}

// Bold and italic each have an asterisk and an underscore alternative.
fn either_group(caps: &Captures<'_>) -> Option<String> {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|group| group.as_str().to_string())
}

/// Tokenizes one line into a flat sequence of spans.
pub fn parse_spans(line: &str) -> SpanSeq {
    let mut out = Vec::new();
    push_spans(line, &mut out);
    out
}

fn push_spans(text: &str, out: &mut SpanSeq) {
    let mut rest = text;
    while !rest.is_empty() {
        let Some(found) = PRIORITY.iter().find_map(|pattern| pattern.find(rest)) else {
            out.push(Span::text(rest));
            return;
        };
        if found.start > 0 {
            push_spans(&rest[..found.start], out);
        }
        out.push(found.span);
        rest = &rest[found.end..];
    }
}
