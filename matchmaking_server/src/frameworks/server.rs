// Framework bootstrap for the matchmaking server runtime.

use crate::frameworks::config::Settings;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::spawn_matchmaker;
use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, settings: Settings) -> Result<()> {
    let address = listener.local_addr()?;

    // The matchmaker task is the single owner of the waiting pool.
    let matchmaker = spawn_matchmaker(settings.matchmaker_settings(), SystemClock);
    tracing::debug!(
        skill_tolerance = settings.skill_tolerance,
        long_wait_secs = settings.long_wait_secs,
        both_must_wait_long = settings.both_must_wait_long,
        retry_interval_ms = settings.retry_interval_ms,
        "matchmaker configured"
    );
    let state = Arc::new(AppState {
        matchmaker: matchmaker.clone(),
    });

    // Wire the HTTP routes for the matchmaking API.
    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    let served = axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    });
    matchmaker.shutdown();
    served
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let settings = Settings::load().map_err(|e| {
        tracing::error!(error = %e, "failed to load configuration");
        std::io::Error::other(e)
    })?;

    let address = SocketAddr::from(([127, 0, 0, 1], settings.port));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, settings).await
}
