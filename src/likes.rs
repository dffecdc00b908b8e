//! Per-article likes for anonymous visitors.
//!
//! The tracker is handed an explicit [`VisitorId`] by its caller; it
//! never reads identity from ambient state. After every mutation the
//! denormalized `likes_count` on the article row is recomputed from the
//! true like-row count and written back, so concurrent toggles cannot
//! leave the counter drifting from the rows.

use std::sync::Arc;

use serde::Serialize;

use crate::session::VisitorId;
use crate::store::{ArticleStore, StoreResult};

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LikeState {
    pub liked: bool,
    pub likes_count: i64,
}

#[derive(Clone)]
pub struct LikeTracker {
    store: Arc<ArticleStore>,
}

impl LikeTracker {
    pub fn new(store: Arc<ArticleStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "Like status", skip(self))]
    pub async fn status(&self, article_id: &str, visitor: &VisitorId) -> StoreResult<LikeState> {
        let liked = self.store.has_liked(article_id, visitor.as_str()).await?;
        let likes_count = self.store.count_likes(article_id).await?;
        Ok(LikeState { liked, likes_count })
    }

    /// Flips the visitor's like for an article. State only changes
    /// after the row mutation succeeds; a failed store call leaves
    /// everything as it was.
    #[tracing::instrument(name = "Toggle like", skip(self))]
    pub async fn toggle(&self, article_id: &str, visitor: &VisitorId) -> StoreResult<LikeState> {
        let liked = self.store.has_liked(article_id, visitor.as_str()).await?;

        if liked {
            self.store
                .delete_like(article_id, visitor.as_str())
                .await?;
        } else {
            self.store
                .insert_like(article_id, visitor.as_str())
                .await?;
        }

        let likes_count = self.store.count_likes(article_id).await?;
        self.store.set_likes_count(article_id, likes_count).await?;

        Ok(LikeState {
            liked: !liked,
            likes_count,
        })
    }
}
