use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme as SyntectTheme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;
use tracing::debug;

use crate::Theme;
use crate::html::escape_html;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_nonewlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Highlights code lines, one HTML string per input line.
///
/// Unknown languages are treated as plain text; a line that fails to
/// highlight falls back to escaped text.
pub(crate) fn highlight_lines(language: &str, lines: &[String], theme: Theme) -> Vec<String> {
    let syntax = SYNTAX_SET
        .find_syntax_by_token(language)
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());
    let Some(theme) = pick_theme(theme, &THEME_SET) else {
        return lines.iter().map(|line| escape_html(line)).collect();
    };
    debug!(language, syntax = %syntax.name, "highlighting code block");

    let mut highlighter = HighlightLines::new(syntax, theme);
    lines
        .iter()
        .map(|line| highlight_line(line, &mut highlighter))
        .collect()
}

fn highlight_line(line: &str, highlighter: &mut HighlightLines) -> String {
    match highlighter.highlight_line(line, &SYNTAX_SET) {
        Ok(ranges) => styled_line_to_highlighted_html(&ranges, IncludeBackground::No)
            .unwrap_or_else(|_| escape_html(line)),
        Err(_) => escape_html(line),
    }
}

fn pick_theme(theme: Theme, theme_set: &ThemeSet) -> Option<&SyntectTheme> {
    let candidates = match theme {
        Theme::Dark => ["Monokai Extended Bright", "Monokai Extended", "base16-ocean.dark"],
        Theme::Light | Theme::Auto => ["InspiredGitHub", "Solarized (light)", "base16-ocean.light"],
    };
    candidates
        .iter()
        .find_map(|name| theme_set.themes.get(*name))
        .or_else(|| theme_set.themes.values().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_language_gets_inline_styles() {
        let lines = vec!["let x = 1;".to_string(), "x + 1".to_string()];
        let out = highlight_lines("rust", &lines, Theme::Light);
        assert_eq!(out.len(), 2);
        assert!(out[0].contains("style=\""));
        assert!(!out[0].contains('\n'));
    }

    #[test]
    fn unknown_language_still_escapes() {
        let lines = vec!["<tag>".to_string()];
        let out = highlight_lines("no-such-language", &lines, Theme::Dark);
        assert!(out[0].contains("&lt;tag&gt;"));
    }
}
