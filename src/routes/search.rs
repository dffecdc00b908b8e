use itertools::Itertools;

use crate::content::format_for_display;
use crate::routes::imports::*;
use crate::routes::pages;

#[derive(Deserialize, Debug, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Html<String> {
    let query = params.q.trim();

    let articles = if query.is_empty() {
        Vec::new()
    } else {
        state.store.search(query).await.unwrap_or_else(|e| {
            tracing::error!("Search failed: {e}");
            Vec::new()
        })
    };

    let results: Vec<(&Article, String)> = articles
        .iter()
        .map(|article| (article, content_preview(&article.content, query)))
        .collect();

    Html(pages::search_page(query, &results))
}

/// A short plain-text excerpt of the article around the first match of
/// the query: 50 characters of leading and 150 of trailing context, or
/// the first 200 characters when the query only matched the title.
fn content_preview(raw_content: &str, query: &str) -> String {
    let text = strip_tags(&format_for_display(raw_content));
    if text.is_empty() || query.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let needle: Vec<char> = query.to_lowercase().chars().collect();
    let haystack: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    let hit = (!needle.is_empty() && needle.len() <= haystack.len())
        .then(|| {
            haystack
                .windows(needle.len())
                .position(|window| window == needle.as_slice())
        })
        .flatten();

    match hit {
        None => {
            let head: String = chars.iter().take(200).collect();
            if chars.len() > 200 {
                format!("{head}...")
            } else {
                head
            }
        }
        Some(index) => {
            let start = index.saturating_sub(50);
            let end = (index + 150).min(chars.len());
            let excerpt: String = chars[start..end].iter().collect();
            format!("...{excerpt}...")
        }
    }
}

/// Drops tags from an HTML fragment and collapses whitespace, leaving
/// plain text for excerpting.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                text.push(' ');
            }
            c if !in_tag => text.push(c),
            _ => {}
        }
    }

    text.split_whitespace().join(" ")
}
