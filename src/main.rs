//! sales-agent server binary.
//!
//! Configuration comes from `sales-agent.yaml` and `SALES_AGENT__*`
//! environment variables (see [`sales_agent::config`]).

use tokio::net::TcpListener;

use sales_agent::adapters::http::app_router;
use sales_agent::config::AppConfig;
use sales_agent::startup::{build_state, init_tracing, StartupError};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate().map_err(sales_agent::config::ConfigError::from)?;

    let state = build_state(&config).await?;
    let app = app_router(state, &config.server);

    let addr = config.server.listen_addr().map_err(sales_agent::config::ConfigError::from)?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "sales-agent listening");

    axum::serve(listener, app).await?;
    Ok(())
}
