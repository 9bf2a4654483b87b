//! Portfolio API - GitHub data proxy for the portfolio site
//!
//! # Usage
//! ```bash
//! GITHUB_PAT=ghp_... portfolio-api                  # Serve on 127.0.0.1:3001
//! portfolio-api --host 0.0.0.0 --port 8080          # Listen elsewhere
//! portfolio-api --github-user octocat               # Different history owner
//! ```

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_api::config::{DEFAULT_API_URL, DEFAULT_GITHUB_USER, DEFAULT_GRAPHQL_URL};
use portfolio_api::{AppConfig, AppState, build_app};

/// Portfolio API - commit history and contribution data from GitHub
#[derive(Parser)]
#[command(name = "portfolio-api")]
#[command(about = "GitHub data proxy for the portfolio site", long_about = None)]
struct Cli {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// GitHub account whose push history is served
    #[arg(long, env = "GITHUB_USER", default_value = DEFAULT_GITHUB_USER)]
    github_user: String,

    /// GitHub personal access token
    #[arg(long, env = "GITHUB_PAT", hide_env_values = true)]
    github_token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    github_api_url: String,

    /// GitHub GraphQL endpoint
    #[arg(long, default_value = DEFAULT_GRAPHQL_URL)]
    github_graphql_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hyper=warn,reqwest=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new(cli.github_token)
        .with_github_user(cli.github_user)
        .with_api_urls(cli.github_api_url, cli.github_graphql_url);

    if config.github_token.is_none() {
        tracing::warn!(
            "GITHUB_PAT is not set; GitHub routes will answer with a configuration error"
        );
    }

    let state = Arc::new(AppState::new(config)?);
    let app = build_app(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to {}: {}", addr, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    tracing::info!("listening on http://{}", addr);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
        }
        tracing::info!("shutting down");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
