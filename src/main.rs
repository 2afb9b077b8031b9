//! Cocktail MCP Server - Rust Implementation
//!
//! A Model Context Protocol (MCP) server that searches CocktailDB for recipes.

use std::sync::Arc;

use clap::Parser;

use cocktail_mcp_server::cocktaildb::client::CocktailDbClient;
use cocktail_mcp_server::config::Config;
use cocktail_mcp_server::error::Result;
use cocktail_mcp_server::mcp::server::McpServer;

/// Cocktail MCP Server
#[derive(Parser)]
#[command(name = "cocktail-mcp-server")]
#[command(author, version, about = "Cocktail MCP Server - A Model Context Protocol server for CocktailDB")]
struct Cli {
    /// CocktailDB API base URL (overrides COCKTAILDB_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Upstream request timeout in seconds (overrides COCKTAILDB_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() {
    // Initialize logging; stdout belongs to the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run_server(cli).await {
        tracing::error!(error = %e, "Fatal error");
        std::process::exit(1);
    }
}

async fn run_server(cli: Cli) -> Result<()> {
    // Load configuration
    let mut config = Config::new()?;
    if let Some(url) = cli.api_url {
        config = config.with_api_base_url(url)?;
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout_secs(secs)?;
    }

    tracing::debug!(?config, "Loaded configuration");

    // Create CocktailDB client
    let cocktail_client = Arc::new(CocktailDbClient::new(&config)?);

    // Create and run MCP server
    let mut server = McpServer::new(cocktail_client);
    tracing::info!("Cocktail API server running on stdio");
    server.run_stdio().await?;

    Ok(())
}
