use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gentle_reflect::{
    app,
    config::{AppConfig, CREDENTIAL_VAR},
    reflection::ReflectionService,
    upstream::HttpTransport,
    AppState,
};

#[derive(Parser)]
#[command(name = "gentle-reflect")]
#[command(about = "Gentle reflection service - proxies journal content to a chat-completion gateway")]
#[command(version)]
struct Args {
    #[arg(long, help = "Interface to bind (overrides GENTLE_AI_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides GENTLE_AI_PORT / PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up LOVABLE_API_KEY etc.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.logging.filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting gentle-reflect in {:?} mode", config.environment);
    tracing::debug!(upstream = ?config.upstream, "Upstream configuration");

    if config.upstream.api_key.is_none() {
        tracing::error!(
            "{} is not configured; every reflection request will fail until it is set",
            CREDENTIAL_VAR
        );
    }

    let transport = HttpTransport::from_config(&config.upstream)?;
    let service = ReflectionService::new(&config.upstream, Arc::new(transport));
    let router = app(AppState::new(service), config.server.max_request_size_bytes);

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("gentle-reflect listening on http://{}", bind_addr);

    axum::serve(listener, router).await?;
    Ok(())
}
