//! Rentfolio server entrypoint

use rentfolio::config::AppConfig;
use rentfolio::server::ServerBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut config = match std::env::var("RENTFOLIO_CONFIG") {
        Ok(path) => AppConfig::from_yaml_file(&path)?,
        Err(_) => AppConfig::default(),
    };
    config.apply_env();

    let addr = config.bind_addr();
    let app = ServerBuilder::new(config).build();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "rentfolio listening");
    axum::serve(listener, app).await?;

    Ok(())
}
