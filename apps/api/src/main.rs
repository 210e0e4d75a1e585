mod config;
mod errors;
mod learning_path;
mod resume;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::resume::parser::{ParserSettings, ResumeParser};
use crate::resume::vocabulary::VocabularySource;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillBridge API v{}", env!("CARGO_PKG_VERSION"));

    // The vocabulary file is read on the first parse, not here
    let settings = ParserSettings {
        fuzzy_threshold: config.skill_match_threshold,
        ..ParserSettings::default()
    };
    info!(
        skills_path = %config.skills_path().display(),
        threshold = settings.fuzzy_threshold,
        "Resume parser configured"
    );
    let parser = ResumeParser::heuristic(VocabularySource::from_path(config.skills_path()), settings);

    let state = AppState {
        config: config.clone(),
        parser: Arc::new(parser),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
