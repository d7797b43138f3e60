use anyhow::Result;
use book_actions_api::models::Config;
use book_actions_api::startup::Application;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "book-actions-api")]
#[command(about = "HTTP API that turns books into concrete action plans")]
struct CliArgs {
    /// Override the listen port from configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_actions_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting book-actions-api");

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(port) = args.port {
        config.port = port;
    }
    if config.groq_api_key.is_none() {
        warn!("GROQ_API_KEY is not set; API requests will return a configuration error");
    }

    match Application::build(config).await {
        Ok(app) => {
            app.run_until_stopped().await?;
            Ok(())
        }
        Err(e) => {
            error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    }
}
