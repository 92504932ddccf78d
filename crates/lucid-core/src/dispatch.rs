use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::ast::RenderNode;
use crate::block::parse_blocks_with_diagnostics;
use crate::diagnostic::Diagnostic;
use crate::json::render_json_with_diagnostics;
use crate::plain::render_plain;
use crate::sanitize::{SanitizePolicy, sanitize_with_diagnostics};

/// Selects which renderer handles the input text.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    #[default]
    Markdown,
    Html,
    Json,
    Plain,
}

impl Format {
    /// Maps a format name to a [`Format`]. Unknown names fall back to Markdown.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "html" => Format::Html,
            "json" => Format::Json,
            "plain" => Format::Plain,
            _ => Format::Markdown,
        }
    }

    /// Like [`Format::from_name`], treating a missing name as Markdown.
    pub fn from_optional(name: Option<&str>) -> Self {
        name.map(Format::from_name).unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Markdown => "markdown",
            Format::Html => "html",
            Format::Json => "json",
            Format::Plain => "plain",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RenderOptions {
    pub sanitize: SanitizePolicy,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderResult {
    pub nodes: Vec<RenderNode>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Renders `text` with the renderer selected by `format`.
pub fn render(text: &str, format: Format) -> Vec<RenderNode> {
    render_with_options(text, format, &RenderOptions::default()).nodes
}

/// Renders `text` and collects notes about any fallbacks taken.
pub fn render_with_diagnostics(text: &str, format: Format) -> RenderResult {
    render_with_options(text, format, &RenderOptions::default())
}

pub fn render_with_options(text: &str, format: Format, options: &RenderOptions) -> RenderResult {
    debug!(%format, bytes = text.len(), "rendering");
    let mut diagnostics = Vec::new();
    let nodes = match format {
        Format::Markdown => parse_blocks_with_diagnostics(text, &mut diagnostics),
        Format::Html => vec![RenderNode::Raw {
            html: sanitize_with_diagnostics(text, options.sanitize, &mut diagnostics),
        }],
        Format::Json => vec![render_json_with_diagnostics(text, &mut diagnostics)],
        Format::Plain => render_plain(text),
    };
    RenderResult { nodes, diagnostics }
}
