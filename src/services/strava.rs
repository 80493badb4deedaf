// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for fetching and updating activities.
//!
//! Handles:
//! - OAuth authorization, code exchange and token refresh
//! - Detailed activity fetching (with all segment efforts)
//! - Activity name/description updates and comments
//! - Athlete profile and stats
//! - Rate limit and token error detection

use crate::error::AppError;
use crate::models::ActivityListItem;
use serde::Deserialize;

const STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
const STRAVA_AUTHORIZE_URL: &str = "https://www.strava.com/oauth/authorize";
const STRAVA_TOKEN_URL: &str = "https://www.strava.com/oauth/token";

/// Scopes requested at authorization time.
pub const STRAVA_SCOPES: &str = "activity:read_all,activity:write";

/// Strava limits on writable activity fields (characters).
pub const MAX_DESCRIPTION_CHARS: usize = 1024;
pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_COMMENT_CHARS: usize = 512;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: STRAVA_API_URL.to_string(),
            client_id,
            client_secret,
        }
    }

    /// Build the URL that sends the athlete to Strava's consent screen.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&approval_prompt=auto&scope={}&state={}",
            STRAVA_AUTHORIZE_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(STRAVA_SCOPES),
            urlencoding::encode(state),
        )
    }

    /// Exchange an authorization code for tokens and the athlete profile.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchangeResponse, AppError> {
        let response = self
            .http
            .post(STRAVA_TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Strava token exchange failed");
            return Err(AppError::StravaApi(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("Failed to parse token response: {}", e)))
    }

    /// Refresh an expired access token.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenRefreshResponse, AppError> {
        let response = self
            .http
            .post(STRAVA_TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(format!("Token refresh request failed: {}", e)))?;

        self.check_response_json(response).await
    }

    /// Get a detailed activity by ID as raw JSON.
    ///
    /// Requested with `include_all_efforts=true` so every segment effort is
    /// present, not only the highlighted ones.
    pub async fn get_activity(
        &self,
        access_token: &str,
        activity_id: u64,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/activities/{}", self.base_url, activity_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("include_all_efforts", "true")])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// List the athlete's activities (paginated, newest first).
    pub async fn list_activities(
        &self,
        access_token: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ActivityListItem>, AppError> {
        let url = format!("{}/athlete/activities", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("page", page.to_string()), ("per_page", per_page.to_string())])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Get authenticated athlete profile.
    pub async fn get_athlete(&self, access_token: &str) -> Result<StravaAthlete, AppError> {
        let url = format!("{}/athlete", self.base_url);
        self.get_json(&url, access_token).await
    }

    /// Get the athlete's run/ride/swim totals as raw JSON.
    pub async fn get_athlete_stats(
        &self,
        access_token: &str,
        athlete_id: u64,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/athletes/{}/stats", self.base_url, athlete_id);
        self.get_json(&url, access_token).await
    }

    /// Update an activity's name and/or description.
    pub async fn update_activity(
        &self,
        access_token: &str,
        activity_id: u64,
        update: &ActivityUpdate,
    ) -> Result<(), AppError> {
        let url = format!("{}/activities/{}", self.base_url, activity_id);

        let response = self
            .http
            .put(&url)
            .bearer_auth(access_token)
            .json(&update.to_body())
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response(response).await?;
        Ok(())
    }

    /// Post a comment on an activity.
    pub async fn post_comment(
        &self,
        access_token: &str,
        activity_id: u64,
        text: &str,
    ) -> Result<(), AppError> {
        let url = format!("{}/activities/{}/comments", self.base_url, activity_id);

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .form(&[("text", truncate_chars(text, MAX_COMMENT_CHARS))])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        let status = response.status();
        self.check_response(response).await?;

        // Strava answers 201 Created for a new comment
        if status != reqwest::StatusCode::CREATED {
            return Err(AppError::StravaApi(format!(
                "Unexpected status posting comment: {}",
                status
            )));
        }
        Ok(())
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<(), AppError> {
        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
    }
}

/// Map a non-2xx Strava status to an error.
fn status_error(status: reqwest::StatusCode, body: &str) -> AppError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!("Strava rate limit hit (429)");
        return AppError::StravaApi(AppError::STRAVA_RATE_LIMIT.to_string());
    }

    // Unauthorized - token may be expired or revoked
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return AppError::StravaApi(AppError::STRAVA_TOKEN_ERROR.to_string());
    }

    AppError::StravaApi(format!("HTTP {}: {}", status, body))
}

/// Whether a Strava error came from an HTTP 400 answer.
fn is_bad_request(err: &AppError) -> bool {
    matches!(err, AppError::StravaApi(msg) if msg.starts_with("HTTP 400 "))
}

/// Cut `text` to at most `max` characters (not bytes).
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Writable fields of an activity.
#[derive(Debug, Clone, Default)]
pub struct ActivityUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ActivityUpdate {
    /// Description-only update.
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            name: None,
            description: Some(description.into()),
        }
    }

    /// JSON body for the update call. Empty fields are left out and the
    /// rest are cut to Strava's limits.
    fn to_body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            body.insert(
                "description".to_string(),
                truncate_chars(description, MAX_DESCRIPTION_CHARS).into(),
            );
        }
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            body.insert(
                "name".to_string(),
                truncate_chars(name, MAX_NAME_CHARS).into(),
            );
        }
        serde_json::Value::Object(body)
    }
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Token exchange response from Strava OAuth (includes athlete info).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub athlete: StravaAthlete,
}

/// Athlete profile as returned by Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct StravaAthlete {
    pub id: u64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub profile: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// StravaService - High-level service with token management
// ─────────────────────────────────────────────────────────────────────────────

use crate::db::FirestoreDb;
use crate::models::{Athlete, UserTokens, INITIAL_CREDITS};
use crate::services::referral::referral_code;
use crate::time_utils::{format_utc_rfc3339, now_rfc3339};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Margin before token expiration when we proactively refresh (5 minutes).
const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Cached access token with expiry information.
#[derive(Clone)]
pub struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Shared token cache type.
pub type TokenCache = Arc<DashMap<u64, CachedToken>>;

/// Shared refresh locks type.
pub type RefreshLocks = Arc<DashMap<u64, Arc<Mutex<()>>>>;

/// High-level Strava service that manages token lifecycle and API calls.
///
/// This service encapsulates:
/// - Token retrieval from Firestore
/// - Automatic token refresh when expiring (with 5-minute margin)
/// - Storage of refreshed tokens
/// - In-memory token caching
/// - Per-athlete locking to prevent duplicate refresh calls
#[derive(Clone)]
pub struct StravaService {
    client: StravaClient,
    db: FirestoreDb,
    /// In-memory cache of access tokens (shared across requests).
    token_cache: TokenCache,
    /// Per-athlete mutex to serialize token refresh operations.
    refresh_locks: RefreshLocks,
}

impl StravaService {
    /// Create a new Strava service with shared token cache.
    pub fn new(
        client_id: String,
        client_secret: String,
        db: FirestoreDb,
        token_cache: TokenCache,
        refresh_locks: RefreshLocks,
    ) -> Self {
        Self {
            client: StravaClient::new(client_id, client_secret),
            db,
            token_cache,
            refresh_locks,
        }
    }

    /// The underlying API client.
    pub fn client(&self) -> &StravaClient {
        &self.client
    }

    // ─── Token Management ────────────────────────────────────────────────────

    /// Get a valid (non-expired) access token for the given athlete.
    ///
    /// 1. Check in-memory cache (no I/O)
    /// 2. Acquire per-athlete lock
    /// 3. Re-check cache (another task may have refreshed)
    /// 4. Read stored tokens; use them if still valid
    /// 5. Otherwise refresh with Strava and store the result
    pub async fn get_valid_access_token(&self, athlete_id: u64) -> Result<String, AppError> {
        let now = Utc::now();
        let margin = Duration::seconds(TOKEN_REFRESH_MARGIN_SECS);

        if let Some(cached) = self.token_cache.get(&athlete_id) {
            if now + margin < cached.expires_at {
                return Ok(cached.access_token.clone());
            }
        }

        let lock = self
            .refresh_locks
            .entry(athlete_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let _guard = lock.lock().await;

        // Double-check after acquiring the lock
        if let Some(cached) = self.token_cache.get(&athlete_id) {
            if now + margin < cached.expires_at {
                return Ok(cached.access_token.clone());
            }
        }

        let tokens = self
            .db
            .get_tokens(athlete_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tokens for athlete {}", athlete_id)))?;

        let expires_at = parse_expiry(&tokens.expires_at)?;

        if now + margin < expires_at {
            self.cache_token(athlete_id, &tokens.access_token, expires_at);
            return Ok(tokens.access_token);
        }

        tracing::info!(athlete_id, "Access token expired, refreshing");

        // If another instance already refreshed, Strava rejects the old
        // refresh token with a 400; the winner's tokens are in Firestore.
        let new_tokens = match self.client.refresh_token(&tokens.refresh_token).await {
            Ok(t) => t,
            Err(ref e) if is_bad_request(e) => {
                tracing::info!(
                    athlete_id,
                    "Refresh token race detected, reading stored tokens"
                );
                return self.fetch_and_cache_from_db(athlete_id).await;
            }
            Err(e) if e.is_strava_token_error() => {
                // 401 on refresh: access revoked, the stored tokens are useless
                tracing::warn!(athlete_id, error = %e, "Refresh rejected, dropping stored tokens");
                self.db.delete_tokens(athlete_id).await?;
                self.invalidate_cached_token(athlete_id);
                return Err(AppError::Unauthorized);
            }
            Err(e) => return Err(e),
        };

        let new_expires_at = DateTime::from_timestamp(new_tokens.expires_at, 0).unwrap_or_default();

        let updated_tokens = UserTokens {
            access_token: new_tokens.access_token.clone(),
            refresh_token: new_tokens.refresh_token,
            expires_at: format_utc_rfc3339(new_expires_at),
            scopes: tokens.scopes,
        };

        self.db.set_tokens(athlete_id, &updated_tokens).await?;
        self.cache_token(athlete_id, &new_tokens.access_token, new_expires_at);

        tracing::info!(athlete_id, "Token refreshed and cached");
        Ok(new_tokens.access_token)
    }

    /// Re-read tokens from Firestore after losing a refresh race.
    async fn fetch_and_cache_from_db(&self, athlete_id: u64) -> Result<String, AppError> {
        let tokens = self
            .db
            .get_tokens(athlete_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tokens for athlete {}", athlete_id)))?;

        let expires_at = parse_expiry(&tokens.expires_at)?;
        self.cache_token(athlete_id, &tokens.access_token, expires_at);

        Ok(tokens.access_token)
    }

    fn cache_token(&self, athlete_id: u64, access_token: &str, expires_at: DateTime<Utc>) {
        self.token_cache.insert(
            athlete_id,
            CachedToken {
                access_token: access_token.to_string(),
                expires_at,
            },
        );
    }

    /// Drop any cached token for the athlete.
    pub fn invalidate_cached_token(&self, athlete_id: u64) {
        self.token_cache.remove(&athlete_id);
    }

    // ─── OAuth Callback Handling ─────────────────────────────────────────────

    /// Handle OAuth callback: exchange code for tokens, store athlete and tokens.
    ///
    /// A first-time athlete is created with the starting credit balance and
    /// a referral code. A returning athlete keeps credits and codes; only the
    /// profile fields are refreshed.
    pub async fn handle_oauth_callback(&self, code: &str) -> Result<OAuthResult, AppError> {
        let token_response = self.client.exchange_code(code).await?;

        // The exchange only carries a summary athlete; prefer the full profile
        let profile = match self.client.get_athlete(&token_response.access_token).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(athlete_id = token_response.athlete.id, error = %e, "Athlete profile fetch failed, using token response");
                token_response.athlete.clone()
            }
        };
        let athlete_id = profile.id;
        let now = now_rfc3339();

        let athlete = match self.db.get_athlete(athlete_id).await? {
            Some(existing) => Athlete {
                firstname: profile.firstname.clone(),
                lastname: profile.lastname.clone(),
                city: profile.city.clone(),
                country: profile.country.clone(),
                profile_picture: profile.profile.clone(),
                updated_at: now.clone(),
                ..existing
            },
            None => {
                let ref_code = match referral_code(&profile.firstname, &profile.lastname, athlete_id)
                {
                    Ok(code) => Some(code),
                    Err(e) => {
                        tracing::warn!(athlete_id, error = %e, "No referral code for athlete");
                        None
                    }
                };
                Athlete {
                    strava_athlete_id: athlete_id,
                    firstname: profile.firstname.clone(),
                    lastname: profile.lastname.clone(),
                    city: profile.city.clone(),
                    country: profile.country.clone(),
                    profile_picture: profile.profile.clone(),
                    credits: INITIAL_CREDITS,
                    used_credits: 0,
                    ref_code,
                    used_ref_code: None,
                    created_at: now.clone(),
                    updated_at: now.clone(),
                }
            }
        };

        self.db.upsert_athlete(&athlete).await?;

        let expires_at = DateTime::from_timestamp(token_response.expires_at, 0)
            .map(format_utc_rfc3339)
            .unwrap_or_else(|| now.clone());

        let tokens = UserTokens {
            access_token: token_response.access_token.clone(),
            refresh_token: token_response.refresh_token.clone(),
            expires_at,
            scopes: STRAVA_SCOPES.split(',').map(str::to_string).collect(),
        };

        self.db.set_tokens(athlete_id, &tokens).await?;
        self.invalidate_cached_token(athlete_id);

        tracing::info!(
            athlete_id,
            firstname = %athlete.firstname,
            credits = athlete.credits,
            "OAuth callback handled, athlete and tokens stored"
        );

        Ok(OAuthResult {
            athlete_id,
            firstname: athlete.firstname,
            lastname: athlete.lastname,
        })
    }

    // ─── API Wrappers ────────────────────────────────────────────────────────

    /// Get a detailed activity by ID as raw JSON.
    pub async fn get_activity(
        &self,
        athlete_id: u64,
        activity_id: u64,
    ) -> Result<serde_json::Value, AppError> {
        let access_token = self.get_valid_access_token(athlete_id).await?;
        self.client.get_activity(&access_token, activity_id).await
    }

    /// List the athlete's activities (paginated).
    pub async fn list_activities(
        &self,
        athlete_id: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<ActivityListItem>, AppError> {
        let access_token = self.get_valid_access_token(athlete_id).await?;
        self.client
            .list_activities(&access_token, page, per_page)
            .await
    }

    /// Get the athlete's Strava totals as raw JSON.
    pub async fn get_athlete_stats(&self, athlete_id: u64) -> Result<serde_json::Value, AppError> {
        let access_token = self.get_valid_access_token(athlete_id).await?;
        self.client
            .get_athlete_stats(&access_token, athlete_id)
            .await
    }

    /// Update an activity's name and/or description.
    pub async fn update_activity(
        &self,
        athlete_id: u64,
        activity_id: u64,
        update: &ActivityUpdate,
    ) -> Result<(), AppError> {
        let access_token = self.get_valid_access_token(athlete_id).await?;
        self.client
            .update_activity(&access_token, activity_id, update)
            .await
    }

    /// Post a comment on one of the athlete's activities.
    pub async fn post_comment(
        &self,
        athlete_id: u64,
        activity_id: u64,
        text: &str,
    ) -> Result<(), AppError> {
        let access_token = self.get_valid_access_token(athlete_id).await?;
        self.client
            .post_comment(&access_token, activity_id, text)
            .await
    }
}

fn parse_expiry(expires_at: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(expires_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to parse expiry: {}", e)))
}

/// Result of handling OAuth callback.
#[derive(Debug, Clone)]
pub struct OAuthResult {
    pub athlete_id: u64,
    pub firstname: String,
    pub lastname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // Multi-byte characters must not be split
        assert_eq!(truncate_chars("💪💪💪", 2), "💪💪");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_update_body_skips_empty_fields() {
        let update = ActivityUpdate {
            name: Some(String::new()),
            description: Some("Great tempo run".to_string()),
        };
        assert_eq!(
            update.to_body(),
            serde_json::json!({ "description": "Great tempo run" })
        );

        assert_eq!(ActivityUpdate::default().to_body(), serde_json::json!({}));
    }

    #[test]
    fn test_update_body_truncates_to_strava_limits() {
        let update = ActivityUpdate {
            name: Some("n".repeat(150)),
            description: Some("d".repeat(2000)),
        };
        let body = update.to_body();
        assert_eq!(body["name"].as_str().map(str::len), Some(MAX_NAME_CHARS));
        assert_eq!(
            body["description"].as_str().map(str::len),
            Some(MAX_DESCRIPTION_CHARS)
        );
    }

    #[test]
    fn test_authorize_url() {
        let client = StravaClient::new("12345".to_string(), "secret".to_string());
        let url = client.authorize_url("http://localhost:8080/auth/strava/callback", "abc");
        assert!(url.starts_with("https://www.strava.com/oauth/authorize?client_id=12345&"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fauth%2Fstrava%2Fcallback"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("approval_prompt=auto"));
        assert!(url.contains("scope=activity%3Aread_all%2Cactivity%3Awrite"));
        assert!(url.ends_with("state=abc"));
    }

    #[test]
    fn test_status_error_mapping() {
        let err = status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "");
        assert!(err.is_strava_rate_limit());

        let err = status_error(reqwest::StatusCode::UNAUTHORIZED, "");
        assert!(err.is_strava_token_error());

        let err = status_error(reqwest::StatusCode::NOT_FOUND, "Record Not Found");
        assert_eq!(
            err.to_string(),
            "Strava API error: HTTP 404 Not Found: Record Not Found"
        );
    }

    #[test]
    fn test_stale_refresh_token_is_not_a_token_error() {
        // Strava's answer to a refresh token already rotated by another instance
        let body = r#"{"message":"Bad Request","errors":[{"resource":"RefreshToken","field":"refresh_token","code":"invalid"}]}"#;
        let err = status_error(reqwest::StatusCode::BAD_REQUEST, body);
        assert!(is_bad_request(&err));
        assert!(!err.is_strava_token_error());

        let err = status_error(reqwest::StatusCode::UNAUTHORIZED, "");
        assert!(!is_bad_request(&err));
        assert!(err.is_strava_token_error());

        let err = status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "");
        assert!(!is_bad_request(&err));
        assert!(!err.is_strava_token_error());
    }

    #[test]
    fn test_parse_expiry() {
        let parsed = parse_expiry("2024-05-01T06:30:00Z").unwrap();
        assert_eq!(parsed.timestamp(), 1_714_545_000);
        assert!(parse_expiry("not a date").is_err());
    }
}
