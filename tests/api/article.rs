use crate::helpers::{article_row, spawn_app, QueryContains};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn article_page_renders_block_content() {
    let app = spawn_app().await;

    let content = json!([
        { "type": "heading_1",
          "heading_1": { "rich_text": [{ "plain_text": "Chapitre" }] } },
        { "type": "paragraph",
          "paragraph": { "rich_text": [{
              "plain_text": "important",
              "annotations": { "bold": true }
          }] } },
        { "type": "bulleted_list_item",
          "bulleted_list_item": { "rich_text": [{ "plain_text": "un" }] } },
        { "type": "bulleted_list_item",
          "bulleted_list_item": { "rich_text": [{ "plain_text": "deux" }] } },
    ])
    .to_string();

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(QueryContains("id=eq.a1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([article_row("a1", "Un article", &content)])),
        )
        .mount(&app.store_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/article_likes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.store_server)
        .await;

    let response = app.get_page("/articles/a1").await;
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();

    assert!(body.contains("Un article"));
    assert!(body.contains(">Chapitre</h1>"));
    assert!(body.contains("<strong>important</strong>"));
    assert_eq!(body.matches("<ul").count(), 1);
    assert!(body.contains("<li class=\"mb-2\">un</li>"));
    assert!(body.contains("03 août 2024"));
}

#[tokio::test]
async fn article_page_renders_legacy_content() {
    let app = spawn_app().await;

    let content = "Corps **gras** et https://example.com\n\n# Titre\nsuite";

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(QueryContains("id=eq.a2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([article_row("a2", "Legacy", content)])),
        )
        .mount(&app.store_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/article_likes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.store_server)
        .await;

    let body = app.get_page("/articles/a2").await.text().await.unwrap();

    assert!(body.contains("<h1 class=\"text-3xl font-bold mt-8 mb-4\">Titre"));
    assert!(body.contains("<strong>gras</strong>"));
    assert!(body.contains("href=\"https://example.com\""));
}

#[tokio::test]
async fn similar_articles_appear_on_the_page() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(QueryContains("id=eq.a1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([article_row("a1", "Un article", "corps design")])),
        )
        .mount(&app.store_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(QueryContains("id=neq.a1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([article_row("a9", "Article proche", "corps")])),
        )
        .expect(1)
        .mount(&app.store_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/article_likes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.store_server)
        .await;

    let body = app.get_page("/articles/a1").await.text().await.unwrap();

    assert!(body.contains("Articles similaires"));
    assert!(body.contains("Article proche"));
}

#[tokio::test]
async fn unknown_article_returns_404() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.store_server)
        .await;

    let response = app.get_page("/articles/missing").await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn store_failure_shows_the_unavailable_state() {
    let app = spawn_app().await;
    // no mocks mounted

    let response = app.get_page("/articles/a1").await;

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("indisponible"));
}

#[tokio::test]
async fn titles_from_the_store_are_escaped() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(QueryContains("id=eq.a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([article_row(
            "a1",
            "<script>alert(1)</script>",
            "corps"
        )])))
        .mount(&app.store_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/article_likes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.store_server)
        .await;

    let body = app.get_page("/articles/a1").await.text().await.unwrap();

    assert!(!body.contains("<script>alert(1)</script>"));
    assert!(body.contains("&lt;script&gt;"));
}
