// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated athletes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ActivityListItem, Athlete, AthleteStats, Preferences};
use crate::services::referral::validate_redemption;
use crate::services::{CoachResult, ImportedActivity};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest goal text accepted from the preferences form.
const MAX_GOAL_CHARS: usize = 500;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/activities", get(get_activities))
        .route("/api/activities/{id}/import", post(import_activity))
        .route("/api/activities/{id}/coach", post(coach_activity))
        .route("/api/activities/{id}/comment", post(comment_activity))
        .route("/api/preferences", get(get_preferences).put(put_preferences))
        .route("/api/referral", post(redeem_referral))
        .route("/api/stats", get(get_stats))
}

// ─── Athlete Profile ─────────────────────────────────────────

/// Current athlete response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub athlete_id: u64,
    pub firstname: String,
    pub lastname: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub profile_picture: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub credits: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub used_credits: i64,
    pub ref_code: Option<String>,
    pub used_ref_code: Option<String>,
}

impl From<Athlete> for MeResponse {
    fn from(athlete: Athlete) -> Self {
        Self {
            athlete_id: athlete.strava_athlete_id,
            firstname: athlete.firstname,
            lastname: athlete.lastname,
            city: athlete.city,
            country: athlete.country,
            profile_picture: athlete.profile_picture,
            credits: athlete.credits,
            used_credits: athlete.used_credits,
            ref_code: athlete.ref_code,
            used_ref_code: athlete.used_ref_code,
        }
    }
}

async fn load_athlete(state: &AppState, athlete_id: u64) -> Result<Athlete> {
    state
        .db
        .get_athlete(athlete_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Athlete {} not found", athlete_id)))
}

/// Get current athlete profile and credit balance.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let athlete = load_athlete(&state, user.athlete_id).await?;
    Ok(Json(athlete.into()))
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: u32,
    /// Pagination: items per page
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    30
}

const MAX_PER_PAGE: u32 = 100;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "Array<unknown>"))]
    pub activities: Vec<ActivityListItem>,
    pub page: u32,
    pub per_page: u32,
}

/// List the athlete's recent Strava activities.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<ActivitiesResponse>> {
    if params.page < 1 {
        return Err(AppError::BadRequest(
            "Page must be greater than 0".to_string(),
        ));
    }
    let per_page = params.per_page.clamp(1, MAX_PER_PAGE);

    tracing::debug!(
        athlete_id = user.athlete_id,
        page = params.page,
        per_page,
        "Fetching activities"
    );

    let activities = state
        .strava_service
        .list_activities(user.athlete_id, params.page, per_page)
        .await?;

    Ok(Json(ActivitiesResponse {
        activities,
        page: params.page,
        per_page,
    }))
}

/// Import one activity: fetch it from Strava and store its summary.
async fn import_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<u64>,
) -> Result<Json<ImportedActivity>> {
    let imported = state
        .coach_service
        .import_activity(user.athlete_id, activity_id)
        .await?;
    Ok(Json(imported))
}

#[derive(Debug, Default, Deserialize)]
pub struct CoachRequest {
    /// Also write the feedback to the Strava activity description
    #[serde(default)]
    pub publish: bool,
}

/// Generate coaching feedback for one activity (costs one credit).
async fn coach_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<u64>,
    body: Bytes,
) -> Result<Json<CoachResult>> {
    // An empty body means "don't publish"
    let request: CoachRequest = if body.is_empty() {
        CoachRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid coach request: {}", e)))?
    };

    let result = state
        .coach_service
        .coach_activity(user.athlete_id, activity_id, request.publish)
        .await?;
    Ok(Json(result))
}

/// Post the stored coaching feedback as a comment on the Strava activity.
async fn comment_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<u64>,
) -> Result<StatusCode> {
    state
        .coach_service
        .comment_feedback(user.athlete_id, activity_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Preferences ─────────────────────────────────────────────

async fn get_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Preferences>> {
    let preferences = state
        .db
        .get_preferences(user.athlete_id)
        .await?
        .unwrap_or_default();
    Ok(Json(preferences))
}

async fn put_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(mut preferences): Json<Preferences>,
) -> Result<Json<Preferences>> {
    validate_preferences(&preferences)?;

    preferences.goal = preferences.goal.trim().to_string();
    preferences.updated_at = now_rfc3339();

    state
        .db
        .set_preferences(user.athlete_id, &preferences)
        .await?;

    tracing::info!(athlete_id = user.athlete_id, "Preferences updated");
    Ok(Json(preferences))
}

fn validate_preferences(preferences: &Preferences) -> Result<()> {
    if preferences.goal.chars().count() > MAX_GOAL_CHARS {
        return Err(AppError::BadRequest(format!(
            "Goal must be at most {} characters",
            MAX_GOAL_CHARS
        )));
    }
    for (name, value) in [
        ("target_distance_km", preferences.target_distance_km),
        ("target_elevation_m", preferences.target_elevation_m),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(AppError::BadRequest(format!(
                    "{} must be a non-negative number",
                    name
                )));
            }
        }
    }
    if let Some(date) = &preferences.target_date {
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            AppError::BadRequest(format!("Invalid target_date '{}'. Expected YYYY-MM-DD", date))
        })?;
    }
    Ok(())
}

// ─── Referral ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ReferralRequest {
    pub code: String,
}

/// Redeem a friend's referral code (once per athlete).
async fn redeem_referral(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<ReferralRequest>,
) -> Result<Json<MeResponse>> {
    let athlete = load_athlete(&state, user.athlete_id).await?;
    let code = validate_redemption(&athlete, &request.code)?;

    let athlete = state.db.set_used_ref_code(user.athlete_id, &code).await?;

    tracing::info!(athlete_id = user.athlete_id, "Referral code redeemed");
    Ok(Json(athlete.into()))
}

// ─── Stats ───────────────────────────────────────────────────

/// Athlete totals, refreshed from Strava.
///
/// If Strava is unavailable the last stored totals are returned.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AthleteStats>> {
    match state.strava_service.get_athlete_stats(user.athlete_id).await {
        Ok(raw) => {
            let stats = AthleteStats::from_strava(&raw, &now_rfc3339());
            state.db.set_stats(user.athlete_id, &stats).await?;
            Ok(Json(stats))
        }
        Err(e) => {
            tracing::warn!(athlete_id = user.athlete_id, error = %e, "Stats refresh failed, using stored stats");
            state
                .db
                .get_stats(user.athlete_id)
                .await?
                .map(Json)
                .ok_or(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_preferences() {
        assert!(validate_preferences(&Preferences::default()).is_ok());

        let valid = Preferences {
            goal: "Sub-4h marathon".to_string(),
            target_distance_km: Some(42.2),
            target_elevation_m: Some(0.0),
            target_date: Some("2026-10-04".to_string()),
            updated_at: String::new(),
        };
        assert!(validate_preferences(&valid).is_ok());

        let negative = Preferences {
            target_distance_km: Some(-5.0),
            ..Preferences::default()
        };
        assert!(matches!(
            validate_preferences(&negative),
            Err(AppError::BadRequest(_))
        ));

        let bad_date = Preferences {
            target_date: Some("next spring".to_string()),
            ..Preferences::default()
        };
        assert!(matches!(
            validate_preferences(&bad_date),
            Err(AppError::BadRequest(_))
        ));

        let long_goal = Preferences {
            goal: "x".repeat(MAX_GOAL_CHARS + 1),
            ..Preferences::default()
        };
        assert!(matches!(
            validate_preferences(&long_goal),
            Err(AppError::BadRequest(_))
        ));
    }
}
