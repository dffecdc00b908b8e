use crate::helpers::{article_row, spawn_app, QueryContains};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn home_renders_articles_categories_and_update_stamp() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(QueryContains("select=updated_at"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "updated_at": "2024-08-04T10:00:00Z" }])),
        )
        .mount(&app.store_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(QueryContains("select=category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "category": "Design" },
            { "category": "IA" },
            { "category": "Design" },
        ])))
        .mount(&app.store_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(QueryContains("select=*"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            article_row("a1", "Premier article", "corps"),
            article_row("a2", "Deuxième article", "corps"),
        ])))
        .mount(&app.store_server)
        .await;

    let response = app.get_page("/").await;
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();

    assert!(body.contains("Premier article"));
    assert!(body.contains("Deuxième article"));
    assert!(body.contains("dernière mise à jour"));
    assert!(body.contains("04 août 2024"));
    assert!(body.contains("IA"));
    // relative image paths resolve against the asset base
    assert!(body.contains("/assets.veille.5d/cover.jpg"));
}

#[tokio::test]
async fn category_and_date_filters_reach_the_store_query() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(query_param("category", "in.(\"Design\",\"IA\")"))
        .and(query_param("created_at", "gte.2024-01-01"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([article_row("a1", "Filtré", "corps")])),
        )
        .expect(1)
        .mount(&app.store_server)
        .await;

    let response = app
        .get_page("/?categories=Design,IA&from=2024-01-01")
        .await;

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Filtré"));
    // the filter form reflects the active range
    assert!(body.contains(r#"name="from" value="2024-01-01""#));
}

#[tokio::test]
async fn store_failure_renders_the_empty_state() {
    let app = spawn_app().await;
    // no mocks mounted: every store call fails

    let response = app.get_page("/").await;

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Aucun article disponible"));
}
