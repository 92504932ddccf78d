//! Presentation adapters for lucid document trees.
//!
//! A [`Presenter`] turns the nodes produced by `lucid_core::render` into
//! something a surface can show. The parser never depends on this crate, so
//! presenters can be swapped without touching parsing.

#[cfg(feature = "highlight")]
mod highlight;
mod html;
mod text;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use lucid_core::RenderNode;
use tracing::debug;

pub use html::{HtmlPresenter, render_spans};
pub use text::{TextPresenter, flatten_spans};

const BASE_CSS: &str = include_str!("../assets/lucid.css");

pub trait Presenter {
    fn present(&self, nodes: &[RenderNode]) -> String;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Theme::Auto),
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Wraps presented fragments into standalone pages.
#[derive(Debug, Clone)]
pub struct Page {
    theme: Theme,
    custom_vars: BTreeMap<String, String>,
}

impl Page {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            custom_vars: BTreeMap::new(),
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_vars.insert(key.into(), value.into());
        self
    }

    pub fn stylesheet(&self) -> String {
        let mut out = String::new();
        let (light_vars, dark_vars) = default_theme_vars();

        match self.theme {
            Theme::Auto => {
                out.push_str(&root_block(&light_vars, 0));
                out.push_str("@media (prefers-color-scheme: dark) {\n");
                out.push_str(&root_block(&dark_vars, 1));
                out.push_str("}\n");
            }
            Theme::Light => out.push_str(&root_block(&light_vars, 0)),
            Theme::Dark => out.push_str(&root_block(&dark_vars, 0)),
        }

        if !self.custom_vars.is_empty() {
            out.push_str(&root_block(&self.custom_vars, 0));
        }

        out.push_str(BASE_CSS);
        out
    }

    pub fn embed_html(&self, html: &str, with_inline_css: bool) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n");
        out.push_str("<html lang=\"en\">\n");
        out.push_str("<head>\n");
        out.push_str("  <meta charset=\"utf-8\" />\n");
        out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
        if with_inline_css {
            out.push_str("  <style>\n");
            out.push_str(&self.stylesheet());
            out.push_str("\n  </style>\n");
        } else {
            out.push_str("  <link rel=\"stylesheet\" href=\"lucid.css\" />\n");
        }
        out.push_str("</head>\n");
        out.push_str("<body class=\"lucid-document\">\n");
        out.push_str(html);
        if !html.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("</body>\n");
        out.push_str("</html>\n");
        out
    }

    /// Writes `lucid.css` into `out_dir` for pages embedded without inline CSS.
    pub fn generate_files(&self, out_dir: &Path) -> io::Result<()> {
        fs::create_dir_all(out_dir)?;
        let path = out_dir.join("lucid.css");
        fs::write(&path, self.stylesheet())?;
        debug!(path = %path.display(), "wrote stylesheet");
        Ok(())
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Theme::Auto)
    }
}

fn default_theme_vars() -> (BTreeMap<String, String>, BTreeMap<String, String>) {
    let light = BTreeMap::from([
        ("--lucid-bg".to_string(), "#fbfbf8".to_string()),
        ("--lucid-fg".to_string(), "#1f2328".to_string()),
        ("--lucid-muted".to_string(), "#5f6b76".to_string()),
        ("--lucid-border".to_string(), "#d8dee4".to_string()),
        ("--lucid-accent".to_string(), "#2b6cb0".to_string()),
        ("--lucid-code-bg".to_string(), "#f4f6f8".to_string()),
        ("--lucid-code-fg".to_string(), "#1f2328".to_string()),
        ("--lucid-json-string".to_string(), "#0a7d32".to_string()),
        ("--lucid-json-number".to_string(), "#b35900".to_string()),
        ("--lucid-json-literal".to_string(), "#8250df".to_string()),
    ]);

    let dark = BTreeMap::from([
        ("--lucid-bg".to_string(), "#0e1116".to_string()),
        ("--lucid-fg".to_string(), "#e6edf3".to_string()),
        ("--lucid-muted".to_string(), "#9aa4af".to_string()),
        ("--lucid-border".to_string(), "#2a313b".to_string()),
        ("--lucid-accent".to_string(), "#63b3ed".to_string()),
        ("--lucid-code-bg".to_string(), "#202634".to_string()),
        ("--lucid-code-fg".to_string(), "#f0f6fc".to_string()),
        ("--lucid-json-string".to_string(), "#7ee787".to_string()),
        ("--lucid-json-number".to_string(), "#ffa657".to_string()),
        ("--lucid-json-literal".to_string(), "#d2a8ff".to_string()),
    ]);

    (light, dark)
}

fn root_block(vars: &BTreeMap<String, String>, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let mut out = String::new();
    out.push_str(&format!("{}:root {{\n", pad));
    out.push_str(&format!("{}  color-scheme: light dark;\n", pad));
    for (key, value) in vars {
        out.push_str(&format!("{}  {}: {};\n", pad, key, value));
    }
    out.push_str(&format!("{}}}\n", pad));
    out
}
