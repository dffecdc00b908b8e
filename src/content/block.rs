use serde::Deserialize;
use serde_json::{Map, Value};

use super::richtext::RichTextSpan;

/// Shape of a block as it sits in the stored JSON: a `type` tag next to
/// a payload keyed by that same type name.
#[derive(Deserialize, Debug)]
pub struct RawBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Closed union over the block kinds the renderer understands, plus an
/// explicit `Unknown` variant carrying the raw payload. Decoding happens
/// here, once, at the boundary — the renderer never probes loose JSON.
#[derive(Debug)]
pub enum Block {
    Paragraph(Vec<RichTextSpan>),
    Heading1(Vec<RichTextSpan>),
    Heading2(Vec<RichTextSpan>),
    Heading3(Vec<RichTextSpan>),
    BulletedListItem(Vec<RichTextSpan>),
    NumberedListItem(Vec<RichTextSpan>),
    Quote(Vec<RichTextSpan>),
    Code {
        spans: Vec<RichTextSpan>,
        language: String,
    },
    Divider,
    Unknown {
        kind: String,
        payload: Map<String, Value>,
    },
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let RawBlock { kind, payload } = raw;
        match kind.as_str() {
            "paragraph" => Block::Paragraph(rich_text(&payload, "paragraph")),
            "heading_1" => Block::Heading1(rich_text(&payload, "heading_1")),
            "heading_2" => Block::Heading2(rich_text(&payload, "heading_2")),
            "heading_3" => Block::Heading3(rich_text(&payload, "heading_3")),
            "bulleted_list_item" => {
                Block::BulletedListItem(rich_text(&payload, "bulleted_list_item"))
            }
            "numbered_list_item" => {
                Block::NumberedListItem(rich_text(&payload, "numbered_list_item"))
            }
            "quote" => Block::Quote(rich_text(&payload, "quote")),
            "code" => {
                let language = payload
                    .get("code")
                    .and_then(|code| code.get("language"))
                    .and_then(Value::as_str)
                    .unwrap_or("text")
                    .to_owned();
                Block::Code {
                    spans: rich_text(&payload, "code"),
                    language,
                }
            }
            "divider" => Block::Divider,
            _ => Block::Unknown { kind, payload },
        }
    }
}

impl Block {
    /// Rich text of an unknown block, looked up under the payload key
    /// equal to the unknown type name itself. Known kinds decoded their
    /// rich text up front and return nothing here.
    pub fn unknown_rich_text(&self) -> Vec<RichTextSpan> {
        match self {
            Block::Unknown { kind, payload } => rich_text(payload, kind),
            _ => Vec::new(),
        }
    }
}

fn rich_text(payload: &Map<String, Value>, key: &str) -> Vec<RichTextSpan> {
    payload
        .get(key)
        .and_then(|inner| inner.get("rich_text"))
        .cloned()
        .map(|spans| serde_json::from_value(spans).unwrap_or_default())
        .unwrap_or_default()
}
