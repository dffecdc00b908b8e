//! Formats a raw article `content` value for display.
//!
//! Stored content is either a JSON-encoded block tree or a legacy
//! plain-text dialect; the two are told apart structurally, by whether
//! the value parses as JSON. Formatting is a pure function of its
//! input: no I/O, no state, same HTML for the same raw value.

mod block;
mod escape;
mod legacy;
mod render;
mod richtext;

pub use block::{Block, RawBlock};
pub use escape::escape_html;
pub use richtext::{Annotations, RichTextSpan};

use serde_json::Value;

/// Classified content, decided once at the boundary. Render paths never
/// re-probe the raw value.
pub enum RawContent {
    /// A block tree (or a single block, wrapped).
    Blocks(Vec<Block>),
    /// A bare rich-text sequence, rendered inline with no block wrapper.
    Inline(Vec<RichTextSpan>),
    /// Not valid JSON: the legacy text dialect.
    Legacy(String),
    /// Valid JSON of no recognized shape; stringified as a last resort.
    ///
    /// A legacy string that happens to be valid JSON (a bare number,
    /// say) lands here rather than in the legacy path. Known edge case
    /// of shape-based classification.
    Opaque(String),
}

pub fn classify(raw: &str) -> RawContent {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => return RawContent::Legacy(raw.to_owned()),
    };

    match parsed {
        Value::Array(items) => {
            if leads_with_text_span(&items) {
                let spans = items
                    .into_iter()
                    .map(|item| serde_json::from_value(item).unwrap_or_default())
                    .collect();
                RawContent::Inline(spans)
            } else {
                RawContent::Blocks(decode_blocks(items))
            }
        }
        Value::Object(map) => {
            if map.contains_key("type") {
                RawContent::Blocks(decode_blocks(vec![Value::Object(map)]))
            } else {
                RawContent::Opaque(Value::Object(map).to_string())
            }
        }
        Value::String(s) => RawContent::Opaque(s),
        Value::Null => RawContent::Opaque(String::new()),
        other => RawContent::Opaque(other.to_string()),
    }
}

/// Renders a raw content value to display-ready HTML. Never fails:
/// malformed pieces degrade to nothing rather than erroring.
pub fn format_for_display(raw: &str) -> String {
    match classify(raw) {
        RawContent::Legacy(text) => legacy::render_legacy(&text),
        RawContent::Blocks(blocks) => render::render_blocks(&blocks),
        RawContent::Inline(spans) => richtext::render_inline(&spans),
        RawContent::Opaque(text) => escape_html(&text),
    }
}

fn leads_with_text_span(items: &[Value]) -> bool {
    items
        .first()
        .and_then(|first| first.get("type"))
        .and_then(Value::as_str)
        == Some("text")
}

fn decode_blocks(items: Vec<Value>) -> Vec<Block> {
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawBlock>(item).ok())
        .map(Block::from)
        .collect()
}
