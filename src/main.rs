//! Food Log
//!
//! An MCP server for FoodData Central search and running nutrient totals.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use foodlog::build_info;
use foodlog::config::Config;
use foodlog::keystore::ApiKeyStore;
use foodlog::mcp::FoodLogService;
use foodlog::search::FdcClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr so it never interferes with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("foodlog=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env()?;
    let key_store = ApiKeyStore::new(&config.key_path);
    eprintln!("API key path: {}", key_store.path().display());

    // An explicit environment key wins over the stored one
    let api_key = match config.api_key.clone() {
        Some(key) => Some(key),
        None => key_store.load()?,
    };
    if api_key.is_none() {
        warn!("No FoodData Central API key configured; call set_api_key before searching");
    }

    let client = FdcClient::new(config.fdc_base_url.clone(), api_key);
    info!(
        base_url = client.base_url(),
        debounce_ms = config.search.debounce.as_millis() as u64,
        min_query_len = config.search.min_query_len,
        duplicate_policy = config.duplicate_policy.as_str(),
        "Configured search"
    );

    let service = FoodLogService::new(&config, key_store, client);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
