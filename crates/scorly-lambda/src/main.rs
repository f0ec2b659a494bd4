use tracing::info;
use tracing_subscriber::EnvFilter;

use scorly_lambda::config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    info!(backend = ?config.backend, local_jwt = config.jwt_secret.is_some(), "starting scorly-lambda");

    let state = config.build_state()?;
    let app = scorly_lambda::router(state);

    match config.listen_addr {
        Some(addr) => {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!(%addr, "serving HTTP");
            axum::serve(listener, app).await?;
            Ok(())
        }
        None => lambda_http::run(app).await.map_err(|e| eyre::eyre!(e)),
    }
}
