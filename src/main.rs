//! Career counselor
//!
//! A quiz-driven career recommendation service: students pick a stream,
//! answer its questions, get a recommendation from an LLM and can keep
//! chatting with the counselor.

mod api;
mod config;
mod counselor;
mod llm;
mod quiz;
mod runtime;
mod state_machine;

use api::{create_router, AppState};
use config::AppConfig;
use counselor::Counselor;
use llm::{LlmService, LoggingService, OpenAIService};
use runtime::SessionManager;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "career_counselor=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration; a missing credential stops us before binding
    let config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    // Completion backend
    let backend = OpenAIService::new(
        config.api_key.clone(),
        config.model.clone(),
        &config.base_url,
        config.counselor.timeout,
    )?;
    let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(backend)));
    tracing::info!(
        model = %llm.model_id(),
        base_url = %config.base_url,
        chat_context = ?config.counselor.chat_context,
        "Counselor initialized"
    );

    let counselor = Counselor::new(llm, config.counselor.clone());
    let bank = quiz::default_bank();
    tracing::info!(streams = ?bank.stream_names().collect::<Vec<_>>(), "Question bank loaded");

    // Sessions, with idle ones swept out in the background
    let sessions = Arc::new(SessionManager::new(
        Arc::new(bank),
        Arc::new(counselor),
        config.session_ttl,
    ));
    let _sweeper = sessions.spawn_sweeper(config.session_ttl.min(SWEEP_PERIOD));
    tracing::info!(idle_ttl_secs = sessions.idle_ttl().as_secs(), "Session sweeper started");

    // Create application state
    let state = AppState::new(sessions);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Career counselor listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
