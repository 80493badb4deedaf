// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Athletes (profile, credits, referral codes)
//! - Tokens (Strava OAuth tokens)
//! - Activities (summaries and coaching feedback)
//! - Preferences (training goals)
//! - Athlete stats (Strava totals)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Activity, Athlete, AthleteStats, Preferences, UserTokens};
use crate::time_utils::now_rfc3339;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Athlete Operations ──────────────────────────────────────

    /// Get an athlete by their Strava athlete ID.
    pub async fn get_athlete(&self, athlete_id: u64) -> Result<Option<Athlete>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ATHLETES)
            .obj()
            .one(&athlete_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update an athlete.
    pub async fn upsert_athlete(&self, athlete: &Athlete) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ATHLETES)
            .document_id(athlete.strava_athlete_id.to_string())
            .object(athlete)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Atomically spend one coaching credit.
    ///
    /// Fails with `InsufficientCredits` when the athlete has none left.
    /// Returns the updated athlete.
    pub async fn consume_credit(&self, athlete_id: u64) -> Result<Athlete, AppError> {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // Plain read outside the transaction; only the write below is transactional
        let athlete: Option<Athlete> = client
            .fluent()
            .select()
            .by_id_in(collections::ATHLETES)
            .obj()
            .one(&athlete_id.to_string())
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read athlete in transaction: {}", e))
            })?;

        let Some(mut athlete) = athlete else {
            let _ = transaction.rollback().await;
            return Err(AppError::NotFound(format!("Athlete {}", athlete_id)));
        };

        if athlete.credits <= 0 {
            let _ = transaction.rollback().await;
            return Err(AppError::InsufficientCredits);
        }

        athlete.credits -= 1;
        athlete.used_credits += 1;
        athlete.updated_at = now_rfc3339();

        client
            .fluent()
            .update()
            .in_col(collections::ATHLETES)
            .document_id(athlete_id.to_string())
            .object(&athlete)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add athlete to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            athlete_id,
            credits = athlete.credits,
            used_credits = athlete.used_credits,
            "Coaching credit consumed"
        );

        Ok(athlete)
    }

    /// Record the referral code an athlete redeemed.
    ///
    /// Returns the updated athlete.
    pub async fn set_used_ref_code(
        &self,
        athlete_id: u64,
        code: &str,
    ) -> Result<Athlete, AppError> {
        let mut athlete = self
            .get_athlete(athlete_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Athlete {}", athlete_id)))?;

        athlete.used_ref_code = Some(code.to_string());
        athlete.updated_at = now_rfc3339();

        self.upsert_athlete(&athlete).await?;
        Ok(athlete)
    }

    // ─── Token Operations ────────────────────────────────────────

    /// Get tokens for an athlete.
    pub async fn get_tokens(&self, athlete_id: u64) -> Result<Option<UserTokens>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TOKENS)
            .obj()
            .one(&athlete_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store tokens for an athlete.
    pub async fn set_tokens(&self, athlete_id: u64, tokens: &UserTokens) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::TOKENS)
            .document_id(athlete_id.to_string())
            .object(tokens)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete tokens (for deauthorization).
    pub async fn delete_tokens(&self, athlete_id: u64) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::TOKENS)
            .document_id(athlete_id.to_string())
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Get one of an athlete's activities.
    pub async fn get_activity(
        &self,
        athlete_id: u64,
        activity_id: u64,
    ) -> Result<Option<Activity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ACTIVITIES)
            .obj()
            .one(&Activity::document_id(athlete_id, activity_id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Most recent activities for an athlete, newest first.
    pub async fn get_recent_activities(
        &self,
        athlete_id: u64,
        limit: u32,
    ) -> Result<Vec<Activity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| q.field("athlete_id").eq(athlete_id))
            .order_by([(
                "start_date_local",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update an activity.
    pub async fn upsert_activity(&self, activity: &Activity) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ACTIVITIES)
            .document_id(Activity::document_id(
                activity.athlete_id,
                activity.activity_id,
            ))
            .object(activity)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Attach coaching feedback to a stored activity.
    pub async fn set_coach_feedback(
        &self,
        athlete_id: u64,
        activity_id: u64,
        feedback: &str,
    ) -> Result<(), AppError> {
        let mut activity = self
            .get_activity(athlete_id, activity_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Activity {}", activity_id)))?;

        activity.coach_feedback = Some(feedback.to_string());
        activity.is_coached = true;
        activity.updated_at = now_rfc3339();

        self.upsert_activity(&activity).await
    }

    // ─── Preferences ─────────────────────────────────────────────

    pub async fn get_preferences(&self, athlete_id: u64) -> Result<Option<Preferences>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PREFERENCES)
            .obj()
            .one(&athlete_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn set_preferences(
        &self,
        athlete_id: u64,
        preferences: &Preferences,
    ) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PREFERENCES)
            .document_id(athlete_id.to_string())
            .object(preferences)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Athlete Stats ───────────────────────────────────────────

    pub async fn get_stats(&self, athlete_id: u64) -> Result<Option<AthleteStats>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ATHLETE_STATS)
            .obj()
            .one(&athlete_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn set_stats(&self, athlete_id: u64, stats: &AthleteStats) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ATHLETE_STATS)
            .document_id(athlete_id.to_string())
            .object(stats)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
