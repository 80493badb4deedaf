// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! WildStride API Server
//!
//! Imports Strava activities and generates AI coaching feedback for them.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wildstride::{
    config::Config,
    db::FirestoreDb,
    services::{CoachService, LlmClient, StravaService},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting WildStride API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id).await?;

    // Shared token cache and refresh locks for all StravaService clones
    let token_cache = Arc::new(dashmap::DashMap::new());
    let refresh_locks = Arc::new(dashmap::DashMap::new());

    let strava_service = StravaService::new(
        config.strava_client_id.clone(),
        config.strava_client_secret.clone(),
        db.clone(),
        token_cache,
        refresh_locks,
    );

    let llm = LlmClient::new(
        config.llm_base_url.clone(),
        config.openai_api_key.clone(),
        config.llm_model.clone(),
        config.llm_temperature,
    )?;
    tracing::info!(model = %config.llm_model, "LLM client initialized");

    let coach_service = CoachService::new(strava_service.clone(), llm, db.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        strava_service,
        coach_service,
    });

    // Build router
    let app = wildstride::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wildstride=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
