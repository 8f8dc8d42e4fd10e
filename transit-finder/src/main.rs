use std::error::Error;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_finder::cache::{CacheConfig, CachedProvider};
use transit_finder::engine::{EngineConfig, SearchRadius};
use transit_finder::provider::{AmapClient, AmapConfig};
use transit_finder::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info,transit_finder=debug";

/// Address to listen on when `TRANSIT_BIND` is not set.
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    // Get credentials from environment
    let api_key = std::env::var("AMAP_KEY").map_err(|_| "AMAP_KEY must be set")?;

    // City has no default; every provider call is scoped to it
    let city = std::env::var("TRANSIT_CITY")
        .map_err(|_| "TRANSIT_CITY must be set (e.g. 杭州 or 330100)")?;

    let mut engine_config = EngineConfig::new(city);
    if let Ok(radius) = std::env::var("TRANSIT_RADIUS") {
        engine_config = engine_config.with_radius(radius.parse::<SearchRadius>()?);
    }

    let addr: SocketAddr = std::env::var("TRANSIT_BIND")
        .unwrap_or_else(|_| DEFAULT_BIND.to_string())
        .parse()?;

    // Create AMap client; a blank key is rejected here rather than per request
    let amap = AmapClient::new(AmapConfig::new(api_key))?;

    // Create cached provider
    let provider = CachedProvider::new(amap, &CacheConfig::default());

    info!(
        city = %engine_config.city,
        radius = %engine_config.radius,
        "Engine configured"
    );

    // Build app state and router
    let state = AppState::new(provider, engine_config);
    let app = create_router(state);

    info!("Transit finder listening on http://{addr}");
    info!("  GET /health                    - Health check");
    info!("  GET /api/search?address=...    - Stations and lines near an address");
    info!("  GET /api/lines/:id             - Path, stops and hours of one line");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
