//! Telemetry: the global tracing subscriber and the request-id source
//! for the request-tracing layer.

use tracing::subscriber::set_global_default;
use tracing_log::LogTracer;
use tracing_subscriber::{
    filter,
    layer::{Layer, SubscriberExt},
    EnvFilter, Registry,
};

/// Installs the global subscriber. `RUST_LOG` drives the level when
/// set, `debug` otherwise; hyper is capped at INFO either way.
pub fn init_tracing() {
    LogTracer::init().expect("Failed to set logger");

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let target_filter = filter::Targets::new()
        .with_target("veille", tracing::Level::DEBUG)
        .with_target("hyper", tracing::Level::INFO)
        .with_default(tracing::Level::TRACE);

    let subscriber = Registry::default().with(
        tracing_subscriber::fmt::layer()
            .with_filter(env_filter)
            .with_filter(target_filter),
    );
    set_global_default(subscriber).expect("Failed to set subscriber");
}

/// Monotonically increasing `x-request-id` values.
#[derive(Clone, Default)]
pub struct RequestIdProducer {
    counter: std::sync::Arc<std::sync::atomic::AtomicU64>,
}

impl tower_http::request_id::MakeRequestId for RequestIdProducer {
    fn make_request_id<B>(
        &mut self,
        _request: &hyper::http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let request_id = self
            .counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            .to_string()
            .parse()
            .ok()?;

        Some(tower_http::request_id::RequestId::new(request_id))
    }
}
