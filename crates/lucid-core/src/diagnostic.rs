use serde::Serialize;

pub const W_FENCE_UNTERMINATED: &str = "W_FENCE_UNTERMINATED";
pub const W_JSON_INVALID: &str = "W_JSON_INVALID";
pub const W_HTML_SCRIPT_REMOVED: &str = "W_HTML_SCRIPT_REMOVED";
pub const W_HTML_HANDLER_REMOVED: &str = "W_HTML_HANDLER_REMOVED";

/// A non-fatal note about input that was rendered through a fallback.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    /// 1-based source line, when the condition is tied to one.
    pub line: Option<usize>,
    pub severity: DiagnosticSeverity,
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        line: Option<usize>,
        severity: DiagnosticSeverity,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line,
            severity,
            code,
            message: message.into(),
        }
    }

    pub fn warning(line: Option<usize>, code: &'static str, message: impl Into<String>) -> Self {
        Self::new(line, DiagnosticSeverity::Warning, code, message)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Warning,
}

impl DiagnosticSeverity {
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticSeverity::Warning => "warning",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fallback_is_reported_as_a_warning() {
        let diagnostic = Diagnostic::warning(Some(2), W_FENCE_UNTERMINATED, "open fence");
        assert_eq!(diagnostic.severity, DiagnosticSeverity::Warning);
        assert_eq!(diagnostic.severity.label(), "warning");

        let value = serde_json::to_value(&diagnostic).expect("serializable");
        assert_eq!(value["severity"], "warning");
        assert_eq!(value["code"], W_FENCE_UNTERMINATED);
        assert_eq!(value["line"], 2);
    }
}
