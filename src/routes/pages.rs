//! Shared HTML building for the server-rendered views. Purely
//! presentational: every dynamic value is escaped here, except the
//! formatter output, which is already a sanitized HTML fragment.

use chrono::{DateTime, Datelike, Utc};

use crate::content::escape_html;
use crate::likes::LikeState;
use crate::store::{Article, ArticleFilter};

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// `dd MMMM yyyy`, French month names.
pub fn format_date_fr(date: &DateTime<Utc>) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS_FR[date.month0() as usize],
        date.year()
    )
}

/// Absolute image URLs pass through; relative paths resolve against the
/// configured asset base.
pub fn resolve_image_url(raw: &str, assets_base: &str) -> String {
    if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("{}/{}", assets_base.trim_end_matches('/'), raw)
    }
}

pub fn shell(title: &str, main: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>{}</title>
</head>
<body class="bg-gray-50 text-gray-900">
<nav class="bg-white shadow-sm">
  <div class="container mx-auto px-4 py-3 flex items-center justify-between">
    <a href="/" class="text-xl font-bold text-[#005953]">Veille Practice Design</a>
    <form action="/search" method="get" class="flex items-center gap-2">
      <input type="text" name="q" placeholder="Rechercher des articles, tags..."
             class="px-4 py-2 bg-gray-100 rounded-lg" />
      <button type="submit" class="px-3 py-2 bg-[#005953] text-white rounded-md">Rechercher</button>
    </form>
  </div>
</nav>
<main class="container mx-auto px-4 py-8">
{}
</main>
</body>
</html>"#,
        escape_html(title),
        main
    )
}

pub fn article_card(article: &Article, assets_base: &str) -> String {
    let image = if article.image_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img src="{}" alt="{}" class="w-full h-48 object-cover" />"#,
            escape_html(&resolve_image_url(&article.image_url, assets_base)),
            escape_html(&article.title),
        )
    };

    format!(
        r#"<a href="/articles/{id}" class="block bg-white rounded-lg shadow-md overflow-hidden hover:shadow-lg">
{image}
<div class="p-4">
<div class="text-sm text-[#005953] font-medium">{category}</div>
<h2 class="text-lg font-semibold">{title}</h2>
<div class="text-sm text-gray-500">{date}</div>
<div class="text-sm text-gray-500">♥ {likes}</div>
</div>
</a>"#,
        id = escape_html(&article.id),
        image = image,
        category = escape_html(&article.category),
        title = escape_html(&article.title),
        date = format_date_fr(&article.created_at),
        likes = article.likes_count,
    )
}

pub fn home_page(
    articles: &[Article],
    categories: &[String],
    filter: &ArticleFilter,
    latest_update: Option<DateTime<Utc>>,
    assets_base: &str,
) -> String {
    let chips = categories
        .iter()
        .map(|category| {
            let active = if filter.categories.contains(category) {
                "bg-[#005953] text-white"
            } else {
                "bg-gray-100 text-gray-700"
            };
            format!(
                r#"<a href="/?categories={0}" class="px-4 py-2 rounded-full text-sm font-medium {1}">{0}</a>"#,
                escape_html(category),
                active,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let stamp = latest_update
        .map(|date| {
            format!(
                r#"<div class="text-sm text-gray-500">dernière mise à jour : <span class="font-medium">{}</span></div>"#,
                format_date_fr(&date)
            )
        })
        .unwrap_or_default();

    let date_filter = format!(
        r#"<form action="/" method="get" class="flex flex-wrap items-end gap-3 mb-8">
<input type="hidden" name="categories" value="{selected}" />
<label class="text-sm text-gray-600">Du
<input type="date" name="from" value="{from}" class="block px-3 py-2 bg-white border rounded-md" />
</label>
<label class="text-sm text-gray-600">Au
<input type="date" name="to" value="{to}" class="block px-3 py-2 bg-white border rounded-md" />
</label>
<button type="submit" class="px-4 py-2 bg-[#005953] text-white rounded-md">Filtrer</button>
<a href="/" class="px-4 py-2 text-gray-600">Réinitialiser</a>
</form>"#,
        selected = escape_html(&filter.categories.join(",")),
        from = filter
            .created_after
            .map(|date| date.to_string())
            .unwrap_or_default(),
        to = filter
            .created_before
            .map(|date| date.to_string())
            .unwrap_or_default(),
    );

    let cards = if articles.is_empty() {
        r#"<p class="text-xl text-gray-600">Aucun article disponible</p>"#.to_string()
    } else {
        articles
            .iter()
            .map(|article| article_card(article, assets_base))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let main = format!(
        r#"{stamp}
<div class="flex flex-wrap gap-2 mb-8">{chips}</div>
{date_filter}
<div class="grid gap-6 sm:grid-cols-2 lg:grid-cols-3">{cards}</div>"#,
    );

    shell("Veille Practice Design", &main)
}

pub fn article_page(
    article: &Article,
    content_html: &str,
    similar: &[Article],
    like_state: LikeState,
    assets_base: &str,
) -> String {
    let image = if article.image_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<img src="{}" alt="{}" class="w-full h-64 object-cover rounded-lg mb-8" />"#,
            escape_html(&resolve_image_url(&article.image_url, assets_base)),
            escape_html(&article.title),
        )
    };

    let external_link = article
        .link
        .as_deref()
        .filter(|link| !link.is_empty())
        .map(|link| {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="inline-block px-6 py-2 bg-[#005953] text-white rounded-md">Découvrir la ressource</a>"#,
                escape_html(link)
            )
        })
        .unwrap_or_default();

    let liked_mark = if like_state.liked { "♥" } else { "♡" };
    let like_button = format!(
        r#"<form action="/articles/{}/like" method="post" class="inline">
<button type="submit" class="like-button text-[#005953]">{} {}</button>
</form>"#,
        escape_html(&article.id),
        liked_mark,
        like_state.likes_count,
    );

    let similar_section = if similar.is_empty() {
        String::new()
    } else {
        let cards = similar
            .iter()
            .map(|article| article_card(article, assets_base))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            r#"<div class="mt-16 border-t pt-8">
<h2 class="text-2xl font-bold mb-6">Articles similaires</h2>
<div class="space-y-6">{cards}</div>
</div>"#
        )
    };

    let main = format!(
        r#"<article class="max-w-3xl mx-auto">
<a href="/" class="inline-flex items-center gap-2 mb-6 text-gray-600">← Retour à l'accueil</a>
{image}
<div class="flex items-center justify-between">
<div class="text-[#005953] font-medium">{category}</div>
{like_button}
</div>
<h1 class="text-4xl font-bold text-gray-900">{title}</h1>
<div class="text-gray-500">{date}</div>
{external_link}
<div class="prose prose-lg max-w-none mt-8">
{content_html}
</div>
{similar_section}
</article>"#,
        category = escape_html(&article.category),
        title = escape_html(&article.title),
        date = format_date_fr(&article.created_at),
    );

    shell(&article.title, &main)
}

/// The article-unavailable state: rendered when the store cannot be
/// reached, in place of a hard failure.
pub fn article_unavailable() -> String {
    shell(
        "Veille Practice Design",
        r#"<div class="flex items-center justify-center min-h-[50vh]">
<p class="text-xl text-gray-600">Article momentanément indisponible</p>
</div>"#,
    )
}

pub fn search_page(query: &str, results: &[(&Article, String)]) -> String {
    let heading = format!(
        r#"<h1 class="text-3xl font-bold mb-6">Résultats pour "{}"</h1>"#,
        escape_html(query)
    );

    let body = if results.is_empty() {
        r#"<p class="text-xl text-gray-600">Aucun résultat trouvé</p>"#.to_string()
    } else {
        results
            .iter()
            .map(|(article, preview)| {
                format!(
                    r#"<a href="/articles/{id}" class="block bg-white rounded-lg shadow-md overflow-hidden hover:shadow-lg">
<div class="p-6">
<div class="text-sm text-[#005953] font-medium mb-2">{category}</div>
<h2 class="text-xl font-semibold text-gray-900 mb-2">{title}</h2>
<p class="text-gray-600 mb-4">{preview}</p>
<div class="text-sm text-gray-500">{date}</div>
</div>
</a>"#,
                    id = escape_html(&article.id),
                    category = escape_html(&article.category),
                    title = escape_html(&article.title),
                    preview = escape_html(preview),
                    date = format_date_fr(&article.created_at),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let main = format!("{heading}\n<div class=\"space-y-8\">{body}</div>");
    shell(&format!("Recherche : {query}"), &main)
}
