use crate::routes::imports::*;
use crate::routes::pages;

#[derive(Deserialize, Debug, Default)]
pub struct HomeQuery {
    /// Comma-separated category labels.
    pub categories: Option<String>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
}

pub async fn home(
    State(state): State<AppState>,
    Query(params): Query<HomeQuery>,
) -> Html<String> {
    let filter = ArticleFilter {
        categories: params
            .categories
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|category| !category.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
        created_after: params.from,
        created_before: params.to,
    };

    // store failures degrade to an empty page, never a hard error
    let articles = state.store.fetch_list(&filter).await.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch articles: {e}");
        Vec::new()
    });
    let categories = state.store.categories().await.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch categories: {e}");
        Vec::new()
    });
    let latest_update = state.store.latest_update().await.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch latest update: {e}");
        None
    });

    Html(pages::home_page(
        &articles,
        &categories,
        &filter,
        latest_update,
        &state.assets_base,
    ))
}
