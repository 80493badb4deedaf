// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;
use wildstride::config::Config;
use wildstride::db::FirestoreDb;
use wildstride::middleware::auth::create_jwt;
use wildstride::routes::create_router;
use wildstride::services::{CoachService, LlmClient, StravaService};
use wildstride::AppState;

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a session JWT for tests.
#[allow(dead_code)]
pub fn create_test_jwt(athlete_id: u64, signing_key: &[u8]) -> String {
    create_jwt(athlete_id, signing_key).expect("Failed to create JWT")
}

/// Load a JSON fixture from `tests/fixtures/`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> serde_json::Value {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{path}: {e}"));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("{path}: {e}"))
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

/// Same as [`create_test_app`] but with a custom frontend URL.
#[allow(dead_code)]
pub fn create_test_app_with_frontend_url(frontend_url: &str) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        frontend_url: frontend_url.to_string(),
        ..Config::test_default()
    };
    create_test_app_with_config(config)
}

#[allow(dead_code)]
fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let db = test_db_offline();

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
    )
    .expect("Failed to build LLM client");

    let coach_service = CoachService::new(strava_service.clone(), llm, db.clone());

    let state = Arc::new(AppState {
        config,
        db,
        strava_service,
        coach_service,
    });

    (create_router(state.clone()), state)
}
