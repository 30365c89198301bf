mod card;
mod config;
mod dataset;
mod error;
mod explorer;
mod server;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use dataset::Dataset;
use server::VisionExplorerServer;
use ternary_common::source::JsonFetcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting vision-explorer MCP server");

    let config = Config::from_env()?;
    info!(
        visions = %config.visions,
        seeds = %config.seeds,
        stories = %config.stories,
        lang = %config.lang,
        side = config.canvas.side(),
        "configuration loaded"
    );

    let fetcher = JsonFetcher::new(config.fetch_timeout)?;
    let dataset = Dataset::load(&fetcher, &config).await.inspect_err(|e| {
        tracing::error!(error = %e, "failed to load visions");
    })?;

    let server = VisionExplorerServer::new(dataset, fetcher, config);

    if let Ok(addr) = std::env::var("MCP_TCP_LISTEN_ADDR") {
        let listener = TcpListener::bind(&addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
