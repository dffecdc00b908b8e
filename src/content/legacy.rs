//! Renderer for the legacy plain-text dialect: line-prefix headings,
//! asterisk emphasis, bare URLs and `[label](url)` links.

use itertools::Itertools;

use super::escape::escape_html;
use super::richtext::LINK_CLASS;

const PARAGRAPH_CLASS: &str = "mb-4 leading-relaxed";
const HEADING_CLASSES: [(&str, u8, &str); 3] = [
    ("### ", 3, "text-xl font-semibold mt-4 mb-2"),
    ("## ", 2, "text-2xl font-bold mt-6 mb-3"),
    ("# ", 1, "text-3xl font-bold mt-8 mb-4"),
];

// Trailing characters the bare-URL scanner refuses to swallow, so that
// "see https://e.example." links without the sentence period.
const URL_TRAILERS: &[char] = &['.', ',', ':', ';', '"', '\'', ')', ']'];

pub fn render_legacy(text: &str) -> String {
    split_sections(text)
        .iter()
        .map(|section| render_section(section))
        .filter(|html| !html.is_empty())
        .join("\n")
}

/// Splits at every line beginning with `# `, `## ` or `### `. The
/// marker line starts a new section; text before the first marker is
/// its own leading section.
fn split_sections(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();

    for line in text.split_inclusive('\n') {
        if heading_marker(line).is_some() && !current.is_empty() {
            sections.push(std::mem::take(&mut current));
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        sections.push(current);
    }

    sections
}

fn heading_marker(line: &str) -> Option<(&'static str, u8, &'static str)> {
    // longest marker first, so "### " is never read as "# "
    HEADING_CLASSES
        .iter()
        .copied()
        .find(|(marker, _, _)| line.starts_with(marker))
}

fn render_section(section: &str) -> String {
    if let Some((marker, level, class)) = heading_marker(section) {
        // The whole remainder of the section stays inside the heading,
        // with no further inline processing.
        let rest = escape_html(section[marker.len()..].trim_end());
        return format!("<h{level} class=\"{class}\">{rest}</h{level}>");
    }

    section
        .split("\n\n")
        .filter_map(render_paragraph)
        .join("\n")
}

fn render_paragraph(paragraph: &str) -> Option<String> {
    if paragraph.trim().is_empty() {
        return None;
    }
    Some(format!(
        "<p class=\"{PARAGRAPH_CLASS}\">{}</p>",
        render_markup(paragraph.trim_end_matches('\n'), Emphasis::All)
    ))
}

#[derive(Clone, Copy, PartialEq)]
enum Emphasis {
    All,
    ItalicOnly,
    None,
}

/// Single left-to-right pass over a paragraph. At each position the
/// scanner tries, in order: `**bold**`, `*italic*`, `[label](url)`,
/// bare `http(s)://` URL. Scanning means a URL sitting inside the
/// bracket form is consumed by the bracket token and never double
/// processed by the bare-URL rule.
fn render_markup(text: &str, emphasis: Emphasis) -> String {
    let mut out = String::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        match lex_token(rest, emphasis) {
            Some((consumed, rendered)) => {
                out.push_str(&escape_html(&plain));
                plain.clear();
                out.push_str(&rendered);
                rest = &rest[consumed..];
            }
            None => {
                let ch = rest.chars().next().unwrap();
                plain.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    out.push_str(&escape_html(&plain));
    out
}

fn lex_token(rest: &str, emphasis: Emphasis) -> Option<(usize, String)> {
    if emphasis == Emphasis::All {
        if let Some(token) = lex_bold(rest) {
            return Some(token);
        }
    }
    if emphasis != Emphasis::None {
        if let Some(token) = lex_italic(rest, emphasis) {
            return Some(token);
        }
    }
    if let Some(token) = lex_bracket_link(rest) {
        return Some(token);
    }
    lex_bare_url(rest)
}

fn lex_bold(rest: &str) -> Option<(usize, String)> {
    let inner = rest.strip_prefix("**")?;
    let end = inner.find("**")?;
    let rendered = format!(
        "<strong>{}</strong>",
        // bold was matched first; only italic and links remain inside
        render_markup(&inner[..end], Emphasis::ItalicOnly)
    );
    Some((2 + end + 2, rendered))
}

fn lex_italic(rest: &str, emphasis: Emphasis) -> Option<(usize, String)> {
    let inner = rest.strip_prefix('*')?;
    let end = closing_star(inner)?;
    if end == 0 {
        // an unterminated "**" is not an empty emphasis
        return None;
    }
    // the closer scan stepped over "**" pairs, so the interior may
    // still hold a bold span
    let nested = if emphasis == Emphasis::All {
        Emphasis::All
    } else {
        Emphasis::None
    };
    let rendered = format!("<em>{}</em>", render_markup(&inner[..end], nested));
    Some((1 + end + 1, rendered))
}

/// Offset of the `*` that closes an italic span. `**` pairs are opaque
/// to the scan: `*a **b** c*` closes at the final star, keeping the
/// bold span whole inside the emphasis.
fn closing_star(inner: &str) -> Option<usize> {
    let bytes = inner.as_bytes();
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] == b'*' {
            if bytes.get(index + 1) == Some(&b'*') {
                index += 2;
                continue;
            }
            return Some(index);
        }
        index += 1;
    }
    None
}

fn lex_bracket_link(rest: &str) -> Option<(usize, String)> {
    let after_open = rest.strip_prefix('[')?;
    let label_end = after_open.find(']')?;
    let label = &after_open[..label_end];
    if label.is_empty() {
        return None;
    }

    let after_label = &after_open[label_end + 1..];
    let after_paren = after_label.strip_prefix('(')?;
    let url_end = after_paren.find(')')?;
    let url = &after_paren[..url_end];
    if url.is_empty() {
        return None;
    }

    let consumed = 1 + label_end + 1 + 1 + url_end + 1;
    Some((consumed, anchor(url, &escape_html(label))))
}

fn lex_bare_url(rest: &str) -> Option<(usize, String)> {
    if !rest.starts_with("http://") && !rest.starts_with("https://") {
        return None;
    }

    let end = rest
        .find(|c: char| c.is_whitespace() || c == '<')
        .unwrap_or(rest.len());
    let url = rest[..end].trim_end_matches(URL_TRAILERS);
    if url.is_empty() {
        return None;
    }

    Some((url.len(), anchor(url, &escape_html(url))))
}

fn anchor(url: &str, label_html: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"{LINK_CLASS}\">{label_html}</a>",
        escape_html(url)
    )
}
