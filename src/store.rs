//! Client for the external article store, a PostgREST-style query
//! interface: filters ride in the query string as `column=op.value`,
//! rows come back as JSON arrays. Articles are read-only here except
//! for the denormalized `likes_count`.

use chrono::{DateTime, NaiveDate, Utc};
use itertools::Itertools;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::conf::StoreConf;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub likes_count: i64,
}

#[derive(Debug, Default, Clone)]
pub struct ArticleFilter {
    pub categories: Vec<String>,
    pub created_after: Option<NaiveDate>,
    pub created_before: Option<NaiveDate>,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid store base url: {0}")]
    BaseUrl(#[from] url::ParseError),
}

pub type StoreResult<T> = Result<T, StoreError>;

// words too common to say anything about similarity
const STOP_WORDS: &[&str] = &[
    "le", "la", "les", "un", "une", "des", "et", "ou", "mais", "donc", "car", "ni", "or", "de",
    "à", "pour", "dans", "par", "sur", "en",
];

pub struct ArticleStore {
    http: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
}

impl ArticleStore {
    pub fn new(conf: &StoreConf) -> StoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(conf.timeout())
            .build()?;
        // a trailing slash keeps Url::join from clobbering the last path segment
        let base_url = Url::parse(&format!("{}/", conf.base_url.trim_end_matches('/')))?;

        Ok(Self {
            http,
            base_url,
            api_key: conf.api_key.clone(),
        })
    }

    #[tracing::instrument(name = "Fetch one article", skip(self))]
    pub async fn fetch_one(&self, id: &str) -> StoreResult<Option<Article>> {
        let rows: Vec<Article> = self
            .get_rows(
                "articles",
                &[
                    ("select", "*".into()),
                    ("id", format!("eq.{id}")),
                    ("limit", "1".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    #[tracing::instrument(name = "Fetch article list", skip(self))]
    pub async fn fetch_list(&self, filter: &ArticleFilter) -> StoreResult<Vec<Article>> {
        let mut query: Vec<(&str, String)> = vec![
            ("select", "*".into()),
            ("order", "created_at.desc".into()),
        ];
        if !filter.categories.is_empty() {
            let quoted = filter
                .categories
                .iter()
                .map(|c| format!("\"{c}\""))
                .join(",");
            query.push(("category", format!("in.({quoted})")));
        }
        if let Some(after) = filter.created_after {
            query.push(("created_at", format!("gte.{after}")));
        }
        if let Some(before) = filter.created_before {
            query.push(("created_at", format!("lte.{before}")));
        }

        self.get_rows("articles", &query).await
    }

    /// Distinct category labels, in recency order. The store has no
    /// distinct operator, so rows are deduplicated client side.
    #[tracing::instrument(name = "Fetch categories", skip(self))]
    pub async fn categories(&self) -> StoreResult<Vec<String>> {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default)]
            category: String,
        }

        let rows: Vec<Row> = self
            .get_rows(
                "articles",
                &[
                    ("select", "category".into()),
                    ("order", "created_at.desc".into()),
                ],
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| row.category)
            .filter(|category| !category.is_empty())
            .unique()
            .collect())
    }

    /// Case-insensitive substring search over title and content.
    #[tracing::instrument(name = "Search articles", skip(self))]
    pub async fn search(&self, query: &str) -> StoreResult<Vec<Article>> {
        self.get_rows(
            "articles",
            &[
                ("select", "*".into()),
                (
                    "or",
                    format!("(title.ilike.*{query}*,content.ilike.*{query}*)"),
                ),
            ],
        )
        .await
    }

    #[tracing::instrument(name = "Fetch latest update", skip(self))]
    pub async fn latest_update(&self) -> StoreResult<Option<DateTime<Utc>>> {
        #[derive(Deserialize)]
        struct Row {
            updated_at: DateTime<Utc>,
        }

        let rows: Vec<Row> = self
            .get_rows(
                "articles",
                &[
                    ("select", "updated_at".into()),
                    ("order", "updated_at.desc".into()),
                    ("limit", "1".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next().map(|row| row.updated_at))
    }

    /// Articles resembling the given one: same category, or content
    /// matching its significant keywords. Never includes the article
    /// itself.
    #[tracing::instrument(name = "Fetch similar articles", skip(self, article), fields(id = %article.id))]
    pub async fn similar(&self, article: &Article, limit: usize) -> StoreResult<Vec<Article>> {
        let mut conditions = vec![format!("category.eq.{}", article.category)];
        conditions.extend(
            significant_keywords(&format!("{} {}", article.title, article.content))
                .into_iter()
                .map(|word| format!("content.ilike.*{word}*")),
        );

        self.get_rows(
            "articles",
            &[
                ("select", "*".into()),
                ("or", format!("({})", conditions.join(","))),
                ("id", format!("neq.{}", article.id)),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    #[tracing::instrument(name = "Check like row", skip(self))]
    pub async fn has_liked(&self, article_id: &str, session_id: &str) -> StoreResult<bool> {
        let rows: Vec<LikeRow> = self
            .get_rows(
                "article_likes",
                &[
                    ("select", "id".into()),
                    ("article_id", format!("eq.{article_id}")),
                    ("user_session", format!("eq.{session_id}")),
                    ("limit", "1".into()),
                ],
            )
            .await?;
        Ok(!rows.is_empty())
    }

    #[tracing::instrument(name = "Insert like row", skip(self))]
    pub async fn insert_like(&self, article_id: &str, session_id: &str) -> StoreResult<()> {
        let url = self.endpoint("article_likes")?;
        self.authorized(self.http.post(url))
            .json(&json!({
                "article_id": article_id,
                "user_session": session_id,
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    #[tracing::instrument(name = "Delete like row", skip(self))]
    pub async fn delete_like(&self, article_id: &str, session_id: &str) -> StoreResult<()> {
        let url = self.endpoint("article_likes")?;
        self.authorized(self.http.delete(url))
            .query(&[
                ("article_id", format!("eq.{article_id}")),
                ("user_session", format!("eq.{session_id}")),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// True row count for an article's likes, the source of truth the
    /// denormalized counter is recomputed from.
    #[tracing::instrument(name = "Count like rows", skip(self))]
    pub async fn count_likes(&self, article_id: &str) -> StoreResult<i64> {
        let rows: Vec<LikeRow> = self
            .get_rows(
                "article_likes",
                &[
                    ("select", "id".into()),
                    ("article_id", format!("eq.{article_id}")),
                ],
            )
            .await?;
        Ok(rows.len() as i64)
    }

    #[tracing::instrument(name = "Write likes_count", skip(self))]
    pub async fn set_likes_count(&self, article_id: &str, count: i64) -> StoreResult<()> {
        let url = self.endpoint("articles")?;
        self.authorized(self.http.patch(url))
            .query(&[("id", format!("eq.{article_id}"))])
            .json(&json!({ "likes_count": count }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn get_rows<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> StoreResult<Vec<T>> {
        let url = self.endpoint(table)?;
        let response = self
            .authorized(self.http.get(url))
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    fn endpoint(&self, table: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(table)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
    }
}

#[derive(Deserialize)]
struct LikeRow {
    #[allow(dead_code)]
    id: String,
}

/// Keywords worth matching on: longer than three characters, not stop
/// words, first five distinct ones in order of appearance.
fn significant_keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() > 3 && !STOP_WORDS.contains(word))
        .map(str::to_owned)
        .unique()
        .take(5)
        .collect()
}
