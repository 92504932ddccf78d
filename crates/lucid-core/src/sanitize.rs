//! HTML sanitization.
//!
//! [`sanitize`] is a textual filter: it drops `<script>` elements and quoted
//! `on*` event-handler attributes and nothing else. It is not a security
//! boundary. Unquoted handlers, `javascript:` URLs, `<iframe>`, `<style>` and
//! other injection vectors pass through untouched. Callers that mount the
//! output with page privileges should use [`sanitize_strict`], which runs an
//! allow-list sanitizer over a parsed document.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::diagnostic::{Diagnostic, W_HTML_HANDLER_REMOVED, W_HTML_SCRIPT_REMOVED};

static SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script element pattern")
});
static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\s*\bon\w+\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("event handler pattern")
});

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SanitizePolicy {
    /// Regex filter for script elements and inline handlers.
    #[default]
    Textual,
    /// Allow-list sanitizer backed by `ammonia`.
    Strict,
}

impl SanitizePolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "textual" => Some(SanitizePolicy::Textual),
            "strict" => Some(SanitizePolicy::Strict),
            _ => None,
        }
    }
}

/// Removes `<script>…</script>` elements and quoted `on*="…"` attributes.
pub fn sanitize(html: &str) -> String {
    let mut diagnostics = Vec::new();
    sanitize_with_diagnostics(html, SanitizePolicy::Textual, &mut diagnostics)
}

/// Cleans `html` against ammonia's default allow-list of tags and attributes.
pub fn sanitize_strict(html: &str) -> String {
    ammonia::Builder::default().clean(html).to_string()
}

pub(crate) fn sanitize_with_diagnostics(
    html: &str,
    policy: SanitizePolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    match policy {
        SanitizePolicy::Strict => sanitize_strict(html),
        SanitizePolicy::Textual => {
            let scripts = SCRIPT.find_iter(html).count();
            let without_scripts = SCRIPT.replace_all(html, "");
            let handlers = EVENT_HANDLER.find_iter(&without_scripts).count();
            let cleaned = EVENT_HANDLER.replace_all(&without_scripts, "").into_owned();

            if scripts > 0 {
                diagnostics.push(Diagnostic::warning(
                    None,
                    W_HTML_SCRIPT_REMOVED,
                    format!("removed {scripts} script element(s)"),
                ));
            }
            if handlers > 0 {
                diagnostics.push(Diagnostic::warning(
                    None,
                    W_HTML_HANDLER_REMOVED,
                    format!("removed {handlers} inline event handler(s)"),
                ));
            }
            debug!(scripts, handlers, "sanitized html");
            cleaned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_script_elements_across_lines() {
        let html = "<p>a</p><SCRIPT type=\"text/javascript\">\nalert(1)\n</Script ><p>b</p>";
        assert_eq!(sanitize(html), "<p>a</p><p>b</p>");
    }

    #[test]
    fn script_match_is_not_greedy() {
        let html = "<script>x()</script><em>keep</em><script>y()</script>";
        assert_eq!(sanitize(html), "<em>keep</em>");
    }

    #[test]
    fn strips_quoted_event_handlers() {
        let html = r#"<img src="a.png" onerror="steal()"><a href="/" onClick='go()'>x</a>"#;
        assert_eq!(sanitize(html), r#"<img src="a.png"><a href="/">x</a>"#);
    }

    #[test]
    fn leaves_unquoted_handlers_alone() {
        let html = "<img src=x onerror=alert(1)>";
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn reports_what_was_removed() {
        let mut diagnostics = Vec::new();
        sanitize_with_diagnostics(
            r#"<script>a</script><b onload="x">t</b>"#,
            SanitizePolicy::Textual,
            &mut diagnostics,
        );
        let codes: Vec<&str> = diagnostics.iter().map(|diag| diag.code).collect();
        assert_eq!(codes, vec![W_HTML_SCRIPT_REMOVED, W_HTML_HANDLER_REMOVED]);
    }

    #[test]
    fn strict_policy_drops_unquoted_handlers_too() {
        let cleaned = sanitize_strict("<img src=\"a.png\" onerror=alert(1)><iframe src=x></iframe>");
        assert!(!cleaned.contains("onerror"));
        assert!(!cleaned.contains("iframe"));
        assert!(cleaned.contains("a.png"));
    }

    #[test]
    fn policy_names() {
        assert_eq!(SanitizePolicy::from_name("Strict"), Some(SanitizePolicy::Strict));
        assert_eq!(SanitizePolicy::from_name("textual"), Some(SanitizePolicy::Textual));
        assert_eq!(SanitizePolicy::from_name("none"), None);
    }
}
