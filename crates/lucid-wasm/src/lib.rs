use lucid_core::{Diagnostic, Format, RenderOptions, RenderResult, SanitizePolicy};
use lucid_renderer::{HtmlPresenter, Page, Presenter, Theme};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct HtmlOptions {
    theme: Option<String>,
    strict: Option<bool>,
    standalone: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HtmlResult {
    html: String,
    diagnostics: Vec<JsDiagnostic>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsDiagnostic {
    code: String,
    message: String,
    severity: String,
    line: Option<usize>,
}

impl From<Diagnostic> for JsDiagnostic {
    fn from(diag: Diagnostic) -> Self {
        Self {
            code: diag.code.to_string(),
            message: diag.message,
            severity: diag.severity.label().to_string(),
            line: diag.line,
        }
    }
}

/// Renders `text` and returns `{ nodes, diagnostics }`.
#[wasm_bindgen]
pub fn render_tree(text: &str, format: Option<String>) -> Result<JsValue, JsValue> {
    let result = render(text, format.as_deref(), SanitizePolicy::Textual);
    serde_wasm_bindgen::to_value(&result).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Renders `text` to HTML and returns `{ html, diagnostics }`.
#[wasm_bindgen]
pub fn render_html(text: &str, format: Option<String>, options: JsValue) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    let sanitize = if options.strict.unwrap_or(false) {
        SanitizePolicy::Strict
    } else {
        SanitizePolicy::Textual
    };
    let theme = options
        .theme
        .as_deref()
        .and_then(Theme::from_name)
        .unwrap_or_default();

    let result = render(text, format.as_deref(), sanitize);
    let fragment = HtmlPresenter::new().present(&result.nodes);
    let html = if options.standalone.unwrap_or(false) {
        Page::new(theme).embed_html(&fragment, true)
    } else {
        fragment
    };

    let result = HtmlResult {
        html,
        diagnostics: result.diagnostics.into_iter().map(JsDiagnostic::from).collect(),
    };
    serde_wasm_bindgen::to_value(&result).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn render(text: &str, format: Option<&str>, sanitize: SanitizePolicy) -> RenderResult {
    lucid_core::render_with_options(text, Format::from_optional(format), &RenderOptions { sanitize })
}

fn options_from_js(value: JsValue) -> Result<HtmlOptions, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(HtmlOptions::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
