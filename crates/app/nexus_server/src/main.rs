//! Nexus chat relay server binary.
//!
//! Serves `POST /api/chat` and `GET /health`, forwarding chat turns to the
//! Gemini API. Every option can also come from the environment or a `.env`
//! file.

use std::time::Duration;

use clap::Parser;
use nexus_api::config::{
    AllowedOrigin, ApiConfig, DEFAULT_ALLOWED_ORIGIN, DEFAULT_GEMINI_BASE_URL,
    DEFAULT_GEMINI_MODEL, GeminiConfig,
};
use tracing::{info, warn};

/// CLI arguments for the relay.
#[derive(Parser, Debug)]
#[command(name = "nexus_server", about = "Nexus chat relay server")]
struct Args {
    /// Host interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Gemini API key.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: String,

    /// Gemini model id.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    /// Gemini API root.
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    gemini_base_url: String,

    /// Browser origin allowed to call the API (`*` for any).
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = DEFAULT_ALLOWED_ORIGIN)]
    allowed_origin: String,

    /// Upper bound on each provider call, in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    request_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "info,nexus_api=debug,nexus_core=debug,tower_http=debug",
                )
            }),
        )
        .init();

    let args = Args::parse();

    let allowed_origin = AllowedOrigin::parse(&args.allowed_origin)?;
    if allowed_origin == AllowedOrigin::Any {
        warn!("CORS allows any origin");
    }

    let config = ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        allowed_origin,
        gemini: GeminiConfig {
            api_key: args.gemini_api_key,
            model: args.gemini_model,
            base_url: args.gemini_base_url,
            timeout: Duration::from_secs(args.request_timeout_secs),
        },
    };

    info!(
        bind_addr = %config.bind_addr,
        model = %config.gemini.model,
        origin = %args.allowed_origin,
        timeout_secs = args.request_timeout_secs,
        "starting nexus_server"
    );

    let state = nexus_api::AppState::new(config.clone())?;
    let app = nexus_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "chat relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("chat relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
