use crate::content::format_for_display;
use crate::likes::LikeState;
use crate::routes::imports::*;
use crate::routes::pages;

const SIMILAR_LIMIT: usize = 3;

pub async fn article_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut session: WritableSession,
) -> Response {
    let article = match state.store.fetch_one(&id).await {
        Ok(Some(article)) => article,
        Ok(None) => return ApiError::EntryNotFound.into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch article {id}: {e}");
            return Html(pages::article_unavailable()).into_response();
        }
    };

    let content_html = format_for_display(&article.content);

    let similar = state
        .store
        .similar(&article, SIMILAR_LIMIT)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch similar articles: {e}");
            Vec::new()
        });

    let visitor = visitor_id(&mut session);
    let like_state = state
        .likes
        .status(&article.id, &visitor)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch like status: {e}");
            LikeState {
                liked: false,
                likes_count: article.likes_count,
            }
        });

    Html(pages::article_page(
        &article,
        &content_html,
        &similar,
        like_state,
        &state.assets_base,
    ))
    .into_response()
}
