use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::info;

use timedtext::TimedTextClient;

mod app;

#[derive(Parser)]
#[command(
    name = "timedtext-server",
    about = "Serve normalized YouTube caption transcripts as JSON"
)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Override the upstream timedtext endpoint (testing only).
    #[arg(long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timedtext=info,timedtext_server=info".into()),
        )
        .init();

    let client = match &cli.upstream {
        Some(base_url) => TimedTextClient::with_base_url(base_url),
        None => TimedTextClient::new(),
    };

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app::router(client))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("running server")?;

    Ok(())
}

async fn shutdown_signal() {
    // Failure here only affects graceful shutdown; the process still
    // terminates when Ctrl+C fires.
    if let Err(err) = signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to install Ctrl+C handler");
    }
}
