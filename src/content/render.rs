use super::block::Block;
use super::escape::escape_html;
use super::richtext::{render_inline, RichTextSpan};

const PARAGRAPH_CLASS: &str = "mb-4 leading-relaxed";
const H1_CLASS: &str = "text-3xl font-bold mt-8 mb-4";
const H2_CLASS: &str = "text-2xl font-bold mt-6 mb-3";
const H3_CLASS: &str = "text-xl font-semibold mt-4 mb-2";
const LIST_ITEM_CLASS: &str = "mb-2";
const QUOTE_CLASS: &str = "border-l-4 border-gray-300 pl-4 italic my-4";
const PRE_CLASS: &str = "bg-gray-100 p-4 rounded-lg overflow-x-auto my-4";
const DIVIDER: &str = "<hr class=\"my-8 border-gray-300\" />";
const LIST_CLASS: &str = "list-disc list-inside mb-4 space-y-1";

/// One rendered block. List items are kept apart so the wrapping pass
/// can collect maximal runs of them across block boundaries.
enum Fragment {
    ListItem(String),
    Flow(String),
}

/// Renders a block sequence to HTML. Blocks with no inline content
/// vanish without leaving blank artifacts; the surviving fragments join
/// with newlines, and every maximal run of consecutive list items is
/// wrapped in a single list container.
///
/// Bulleted and numbered items both wrap into one unordered container.
/// That matches the site's historical output; distinguishing the two
/// would change rendered pages.
pub fn render_blocks(blocks: &[Block]) -> String {
    let fragments: Vec<Fragment> = blocks.iter().filter_map(render_block).collect();
    wrap_list_items(fragments)
}

fn render_block(block: &Block) -> Option<Fragment> {
    match block {
        Block::Paragraph(spans) => paragraph(spans).map(Fragment::Flow),
        Block::Heading1(spans) => heading(spans, 1, H1_CLASS).map(Fragment::Flow),
        Block::Heading2(spans) => heading(spans, 2, H2_CLASS).map(Fragment::Flow),
        Block::Heading3(spans) => heading(spans, 3, H3_CLASS).map(Fragment::Flow),
        Block::BulletedListItem(spans) | Block::NumberedListItem(spans) => nonempty(spans)
            .map(|inner| format!("<li class=\"{LIST_ITEM_CLASS}\">{inner}</li>"))
            .map(Fragment::ListItem),
        Block::Quote(spans) => nonempty(spans)
            .map(|inner| format!("<blockquote class=\"{QUOTE_CLASS}\">{inner}</blockquote>"))
            .map(Fragment::Flow),
        Block::Code { spans, language } => nonempty(spans)
            .map(|inner| {
                format!(
                    "<pre class=\"{PRE_CLASS}\"><code class=\"language-{}\">{inner}</code></pre>",
                    escape_html(language)
                )
            })
            .map(Fragment::Flow),
        Block::Divider => Some(Fragment::Flow(DIVIDER.to_string())),
        Block::Unknown { .. } => paragraph(&block.unknown_rich_text()).map(Fragment::Flow),
    }
}

fn paragraph(spans: &[RichTextSpan]) -> Option<String> {
    nonempty(spans).map(|inner| format!("<p class=\"{PARAGRAPH_CLASS}\">{inner}</p>"))
}

fn heading(spans: &[RichTextSpan], level: u8, class: &str) -> Option<String> {
    nonempty(spans).map(|inner| format!("<h{level} class=\"{class}\">{inner}</h{level}>"))
}

fn nonempty(spans: &[RichTextSpan]) -> Option<String> {
    let inner = render_inline(spans);
    (!inner.is_empty()).then_some(inner)
}

fn wrap_list_items(fragments: Vec<Fragment>) -> String {
    let mut pieces: Vec<String> = Vec::new();
    let mut run: Vec<String> = Vec::new();

    for fragment in fragments {
        match fragment {
            Fragment::ListItem(item) => run.push(item),
            Fragment::Flow(html) => {
                flush_run(&mut pieces, &mut run);
                pieces.push(html);
            }
        }
    }
    flush_run(&mut pieces, &mut run);

    pieces.join("\n")
}

fn flush_run(pieces: &mut Vec<String>, run: &mut Vec<String>) {
    if run.is_empty() {
        return;
    }
    let items = run.join("\n");
    run.clear();
    pieces.push(format!("<ul class=\"{LIST_CLASS}\">{items}</ul>"));
}
