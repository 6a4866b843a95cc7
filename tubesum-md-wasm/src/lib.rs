//! WASM bindings for `tubesum-md`.
//!
//! Exposes the summary renderer to JavaScript via wasm-bindgen. The browser
//! UI calls `render()` to get structured blocks for its own components, or
//! `render_html()` when it just wants a ready-made fragment.

use wasm_bindgen::prelude::*;

/// Render a summary and return the blocks as a JS value.
///
/// Each block is an object tagged by `kind` (`Table` or `TextRun`); lines are
/// tagged by `kind` and inline spans by `type`.
#[wasm_bindgen]
pub fn render(input: &str) -> Result<JsValue, JsValue> {
    let blocks = tubesum_md::render(input);
    serde_wasm_bindgen::to_value(&blocks).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render a summary and return the blocks as a JSON string.
#[wasm_bindgen]
pub fn render_json(input: &str) -> String {
    tubesum_md::render_json(input)
}

/// Render a summary and return an HTML fragment.
///
/// The output uses `tubesum-*` CSS classes. Wrap it in an element with class
/// `tubesum` and include the default stylesheet.
#[wasm_bindgen]
pub fn render_html(input: &str) -> String {
    tubesum_md::to_html(input)
}

/// Render a summary and return a complete styled HTML page.
///
/// The result is standalone and can be shown in an iframe or saved to disk.
#[wasm_bindgen]
pub fn render_html_page(input: &str, title: Option<String>) -> String {
    let blocks = tubesum_md::render(input);
    let config = tubesum_md::PageConfig {
        title,
        ..Default::default()
    };
    tubesum_md::render_html::to_html_page(&blocks, &config)
}
