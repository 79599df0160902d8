use roadside::config::Config;
use roadside::engine::Engine;
use roadside::error::Error;
use roadside::server::serve;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roadside=info")),
        )
        .init();

    let config = Config::from_env()?;
    let engine = Engine::from_config(&config)?;

    serve(engine, config.listen_addr).await
}
