//! Nimbus weather tool backend
//!
//! Loads configuration, checks the orchestrator credential, wires the
//! geocoding and weather clients into the tool registry, and serves the tool
//! provider endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nimbus::config::{self, LoggingConfig, NimbusConfig};
use nimbus::tools::{GeocodeLocationTool, GetAlertsTool, GetForecastTool};
use nimbus::web::AppState;
use nimbus::{AgentProfile, GeocodingClient, NwsClient, ToolRegistry, UpstreamClient, web};

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.format == "compact" {
        builder.compact().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = NimbusConfig::load()?;
    init_logging(&config.logging);

    // The orchestrator cannot run without its credential; fail before
    // binding anything.
    config::require_credential()?;

    let timeout = Duration::from_secs(u64::from(config.upstream.timeout_seconds));
    let http = UpstreamClient::new(&config.upstream.user_agent, timeout)?;

    let geocoding = GeocodingClient::new(http.clone(), &config.upstream.nominatim_base_url);
    let nws = NwsClient::new(http, &config.upstream.nws_base_url);

    let mut registry = ToolRegistry::new();
    registry.register(Box::new(GeocodeLocationTool::new(geocoding)));
    registry.register(Box::new(GetForecastTool::new(nws.clone())));
    registry.register(Box::new(GetAlertsTool::new(nws)));

    let registry = Arc::new(registry);
    let profile = Arc::new(AgentProfile::new(config.agent.model.clone(), &registry));

    info!(
        "Starting nimbus v{} with {} tools, model {}",
        nimbus::VERSION,
        profile.tools.len(),
        config.agent.model
    );

    web::run(config.server.port, AppState::new(registry, profile)).await
}
