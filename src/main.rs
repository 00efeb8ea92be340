use anyhow::Context;
use clap::Parser; // for cli
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use contact_gateway::app;
use contact_gateway::config::Args;
use contact_gateway::rate_limit::{RateLimiter, sweeper};
use contact_gateway::state::AppState;
use contact_gateway::store::{InquiryStore, MemoryStore, RestStore};

// this is main async function with tokio
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contact_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // parse cli arguments
    let args = Args::parse();

    let store = build_store(&args)?;
    let rate_limiter = Arc::new(RateLimiter::new(args.rate_limit, args.rate_window()));

    if let Some(every) = args.sweep_interval() {
        tokio::spawn(sweeper(Arc::clone(&rate_limiter), every));
    }

    let state = Arc::new(AppState::new(store, rate_limiter).with_max_body_bytes(args.max_body_bytes));
    let app = app(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(port = args.port, "Contact gateway running");
    info!(
        rate_limit = args.rate_limit,
        rate_window_secs = args.rate_window,
        "Rate limit: {} submissions per {} seconds",
        args.rate_limit,
        args.rate_window
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Contact gateway stopped");
    Ok(())
}

fn build_store(args: &Args) -> anyhow::Result<Arc<dyn InquiryStore>> {
    if args.dry_run {
        warn!("Dry run: inquiries are kept in memory only");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let (Some(url), Some(key)) = (args.supabase_url.as_deref(), args.service_role_key.as_deref())
    else {
        anyhow::bail!("SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY are required without --dry-run");
    };

    let store = RestStore::new(url, key, &args.table, args.store_timeout())
        .context("failed to build store client")?;
    info!(endpoint = store.endpoint(), "Inserting inquiries via REST");

    Ok(Arc::new(store))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
