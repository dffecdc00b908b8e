use once_cell::sync::Lazy;
use secrecy::Secret;
use veille::conf::{EnvConf, StoreConf};
use veille::startup::Application;
use veille::trace::init_tracing;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_tracing();
    }
});

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let store_server = MockServer::start().await;

    let conf = EnvConf {
        session_secret: None,
        port: 0,
        host: "127.0.0.1".into(),
        base_url: "http://127.0.0.1".into(),
        assets_base: "/assets.veille.5d".into(),
        store: StoreConf {
            base_url: store_server.uri(),
            api_key: Secret::new("test-key".into()),
            timeout_milliseconds: 2000,
        },
    };

    let application = Application::build(&conf).await;
    let address = format!("http://{}:{}", application.host(), application.port());
    let _ = tokio::spawn(application.server());

    let api_client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build api client");

    TestApp {
        address,
        store_server,
        api_client,
    }
}

pub struct TestApp {
    pub address: String,
    pub store_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get_page(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_like(&self, article_id: &str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/articles/{}/like", self.address, article_id))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// Matches when the request's raw query string contains the given
/// needle. Lets mocks tell apart store queries that share a path but
/// differ in one parameter.
pub struct QueryContains(pub &'static str);

impl wiremock::Match for QueryContains {
    fn matches(&self, request: &wiremock::Request) -> bool {
        request.url.query().unwrap_or("").contains(self.0)
    }
}

/// An article row as the external store would return it.
pub fn article_row(id: &str, title: &str, content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "content": content,
        "category": "Design",
        "image_url": "cover.jpg",
        "link": null,
        "created_at": "2024-08-03T10:00:00Z",
        "updated_at": "2024-08-04T10:00:00Z",
        "likes_count": 0,
    })
}
