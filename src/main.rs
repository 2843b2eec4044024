// Composition root.
//
// Responsibilities
// - Read config from environment, once.
// - Connect to MongoDB; a failed connection is fatal and HTTP never starts.
// - Wire the schema and router, then serve until terminated.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use tracing_subscriber::{EnvFilter, fmt};

use devroster::config::Config;
use devroster::graphql::build_schema;
use devroster::http;
use devroster::store::ProgrammerStore;
use devroster::store::mongo::MongoStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    tracing::info!(profile = ?config.profile, "starting devroster");

    let store = MongoStore::connect(&config)
        .await
        .with_context(|| format!("failed to connect to MongoDB at {}", config.mongo_uri()))?;
    let store: Arc<dyn ProgrammerStore> = Arc::new(store);

    let app = http::router(build_schema(store), config.profile, &config.static_dir);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to listen on {addr}"))?;
    tracing::info!(%addr, "GraphQL endpoint at /query, playground at /playground");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;
    Ok(())
}
