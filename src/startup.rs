use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use axum_sessions::{async_session::MemoryStore, SessionLayer};
use tower_http::{
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit, ServiceBuilderExt,
};

use crate::conf::EnvConf;
use crate::likes::LikeTracker;
use crate::store::ArticleStore;
use crate::trace::RequestIdProducer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArticleStore>,
    pub likes: LikeTracker,
    pub assets_base: String,
}

pub fn router(conf: &EnvConf, state: AppState) -> Router {
    use crate::routes::*;

    let request_tracing_layer = tower::ServiceBuilder::new()
        .set_x_request_id(RequestIdProducer::default())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &hyper::http::Request<hyper::Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                        request_id = %request
                            .headers()
                            .get("x-request-id")
                            .and_then(|id| id.to_str().ok())
                            .unwrap_or("-"),
                    )
                })
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(tracing::Level::INFO)
                        .latency_unit(LatencyUnit::Seconds),
                ),
        )
        .propagate_x_request_id();

    let session_layer = {
        let store = MemoryStore::new();
        match &conf.session_secret {
            // must be at least 64 bytes
            Some(secret) => SessionLayer::new(store, secret.as_bytes()).with_secure(false),
            None => {
                use rand::Rng;
                let mut secret = [0_u8; 128];
                rand::thread_rng().fill(&mut secret);
                SessionLayer::new(store, &secret).with_secure(false)
            }
        }
    };

    Router::new()
        .route("/health_check", get(health_check))
        .route("/", get(home))
        .route("/articles/:id", get(article_page))
        .route("/articles/:id/like", post(toggle_like))
        .route("/search", get(search_page))
        .with_state(state)
        .layer(request_tracing_layer)
        .layer(session_layer)
}

pub struct Application {
    port: u16,
    host: String,
    server: std::pin::Pin<Box<dyn std::future::Future<Output = hyper::Result<()>> + Send>>,
}

impl Application {
    pub async fn build(conf: &EnvConf) -> Self {
        let address = format!("{}:{}", conf.host, conf.port);
        let listener = std::net::TcpListener::bind(&address).expect("Failed to bind address");
        let host = conf.host.clone();
        let port = listener
            .local_addr()
            .expect("Failed to read bound address")
            .port();
        tracing::info!("Listening on http://{}:{}", host, port);

        let store = Arc::new(
            ArticleStore::new(&conf.store).expect("Failed to construct the store client"),
        );
        let state = AppState {
            store: store.clone(),
            likes: LikeTracker::new(store),
            assets_base: conf.assets_base.clone(),
        };

        let app = router(conf, state);
        let server = axum::Server::from_tcp(listener)
            .expect("Failed to create server from listener")
            .serve(app.into_make_service());

        Self {
            port,
            host,
            server: Box::pin(server),
        }
    }

    // consumes, to produce 1 server max
    pub fn server(self) -> impl std::future::Future<Output = hyper::Result<()>> + Send {
        self.server
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}
