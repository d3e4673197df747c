//! Runs the catalog HTTP server.
//!
//! Reads `.env` when present, then `CATALOG_DIR` (data directory) and
//! `CATALOG_BIND` (listen address). Logging follows `RUST_LOG`.

use catalog::config::{catalog_dir_from_env, load_or_create_catalog_config};
use catalog::server::Server;
use catalog::Catalog;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = catalog_dir_from_env();
    let config = load_or_create_catalog_config(&dir)?.with_env_overrides();
    let bind_addr = config.bind_addr.clone();
    let catalog = Catalog::open_with_config(&dir, config)?;

    let server = Server::start(catalog, &bind_addr).await?;
    tracing::info!("serving catalog from {} on http://{}", dir.display(), server.addr());

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.stop().await?;
    Ok(())
}
