use crate::helpers::{article_row, spawn_app};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn search_renders_results_with_a_content_preview() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(query_param(
            "or",
            "(title.ilike.*design*,content.ilike.*design*)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([article_row(
            "a1",
            "Le Design System",
            "Un guide du design system moderne"
        )])))
        .expect(1)
        .mount(&app.store_server)
        .await;

    let response = app.get_page("/search?q=design").await;
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();

    assert!(body.contains("Résultats pour"));
    assert!(body.contains("Le Design System"));
    assert!(body.contains("du design system moderne"));
}

#[tokio::test]
async fn blank_query_renders_no_results() {
    let app = spawn_app().await;
    // the store must not be consulted for a blank query

    let response = app.get_page("/search?q=%20%20").await;

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Aucun résultat trouvé"));
    assert!(app
        .store_server
        .received_requests()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn search_store_failure_degrades_to_empty_results() {
    let app = spawn_app().await;
    // no mocks mounted

    let response = app.get_page("/search?q=design").await;

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Aucun résultat trouvé"));
}
