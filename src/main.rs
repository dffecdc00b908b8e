use veille::conf::{env_conf, get_env};
use veille::startup::Application;
use veille::trace::init_tracing;

#[tokio::main]
async fn main() -> hyper::Result<()> {
    init_tracing();

    tracing::info!("APP_ENVIRONMENT={}", get_env().as_str());
    let conf = env_conf();

    let application = Application::build(&conf).await;

    application.server().await
}
