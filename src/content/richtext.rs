use serde::Deserialize;

use super::escape::escape_html;

pub const CODE_SPAN_CLASS: &str = "bg-gray-100 px-1 py-0.5 rounded text-sm font-mono";
pub const LINK_CLASS: &str = "text-[#005953] hover:underline";

/// One styled run of inline text. Decoded leniently: imported payloads
/// routinely miss fields, and a missing field must never fail the whole
/// formatting call.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RichTextSpan {
    pub plain_text: Option<String>,
    pub text: Option<TextPayload>,
    pub annotations: Option<Annotations>,
    pub href: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TextPayload {
    pub content: Option<String>,
    pub link: Option<InlineLink>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct InlineLink {
    pub url: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    // accepted so payloads round-trip, but not rendered
    pub color: Option<String>,
}

impl RichTextSpan {
    /// Literal text of the span: `plain_text`, falling back to the
    /// nested `text.content`, falling back to empty.
    pub fn literal(&self) -> &str {
        self.plain_text
            .as_deref()
            .or_else(|| self.text.as_ref().and_then(|t| t.content.as_deref()))
            .unwrap_or("")
    }

    /// Link target, looked up at `text.link.url` first, then `href`.
    pub fn link_target(&self) -> Option<&str> {
        self.text
            .as_ref()
            .and_then(|t| t.link.as_ref())
            .and_then(|l| l.url.as_deref())
            .or(self.href.as_deref())
    }
}

/// Renders a rich-text sequence to inline HTML.
///
/// Annotation wrappers nest in a fixed order: bold, italic,
/// strikethrough, underline, code — each around the previous result, so
/// code ends up outermost when several flags are set. The order is
/// observable in the output and must stay stable. A link, when present,
/// wraps the fully annotated text.
pub fn render_inline(spans: &[RichTextSpan]) -> String {
    spans.iter().map(render_span).collect()
}

fn render_span(span: &RichTextSpan) -> String {
    let mut content = escape_html(span.literal());

    if let Some(annotations) = &span.annotations {
        if annotations.bold {
            content = format!("<strong>{content}</strong>");
        }
        if annotations.italic {
            content = format!("<em>{content}</em>");
        }
        if annotations.strikethrough {
            content = format!("<del>{content}</del>");
        }
        if annotations.underline {
            content = format!("<u>{content}</u>");
        }
        if annotations.code {
            content = format!("<code class=\"{CODE_SPAN_CLASS}\">{content}</code>");
        }
    }

    if let Some(url) = span.link_target() {
        content = format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"{LINK_CLASS}\">{content}</a>",
            escape_html(url)
        );
    }

    content
}
