// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coaching orchestration.
//!
//! Imports a Strava activity into a stored summary and, on request, asks
//! the language model for feedback on it. Feedback costs one credit and
//! can be published back to the activity description on Strava.

use serde::Serialize;

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Activity, ActivitySummary};
use crate::services::llm::LlmClient;
use crate::services::strava::{ActivityUpdate, StravaService};
use crate::summary::{parse_activity, render_history, render_prompt, summarize_activity};
use crate::time_utils::now_rfc3339;

/// How many earlier activities are given to the model as context.
pub const HISTORY_LIMIT: usize = 10;

/// Appended to feedback published on Strava.
pub const SIGNATURE: &str = "\n\n\n💪Powered by WildStride💪";

/// Fixed coaching brief, placed after the athlete context.
pub const COACHING_INSTRUCTIONS: &str = "\
You are an elite trail running coach and sport scientist.

You will receive detailed activity data from a single session (distance, pace, splits, elevation, HR, cadence, etc.). Based on this, provide structured feedback organized by the following categories.

You will also receive the athlete's past activities and goals. Adjust your feedback based on them.

Respond using **Markdown formatting** with clear section headers. Keep the feedback very short and precise, in note form rather than full sentences.

###GUIDELINES###
Give a recommendation only at the end, in the last category 'Progression'. Do not add a recommendation to every field.

1. **Analysis** (brief comparison to previous efforts and relevance to goal)
2. **2 concise recommendations** (next workouts or adjustments)
3. **Warnings or advice if relevant** (e.g., signs of fatigue, overtraining)
4. **Progression** (what does this workout tell us about current fitness? what can the athlete improve on in future sessions?)
Keep it short and valuable. Avoid generic motivation or repetition of data.

Use a **supportive and coaching tone**. Be specific and actionable.";

/// Result of importing an activity.
#[derive(Debug, Clone, Serialize)]
pub struct ImportedActivity {
    pub summary: ActivitySummary,
    pub summary_text: String,
}

/// Result of coaching an activity.
#[derive(Debug, Clone, Serialize)]
pub struct CoachResult {
    pub activity_id: u64,
    pub feedback: String,
    pub credits_remaining: i64,
    /// Whether the feedback was written to the Strava description
    pub published: bool,
}

/// Build the model instructions from the athlete's context.
pub fn build_instructions(history: &[ActivitySummary], goal: &str) -> String {
    let history_text = if history.is_empty() {
        "No previous activities".to_string()
    } else {
        render_history(history)
    };

    format!(
        "###ATHLETE PREVIOUS ACTIVITIES###\n\
         Based on the previous activities, tell the athlete what matters about their progression.\n\
         {}\n\n\
         ###ATHLETE GOAL###\n\
         Distance is in kilometers and elevation is in meters.\n\
         {}\n\n\
         {}",
        history_text, goal, COACHING_INSTRUCTIONS
    )
}

/// Feedback text as published on Strava.
pub fn with_signature(feedback: &str) -> String {
    format!("{}{}", feedback, SIGNATURE)
}

/// Coordinates Strava, the summary pipeline, the LLM and storage.
#[derive(Clone)]
pub struct CoachService {
    strava: StravaService,
    llm: LlmClient,
    db: FirestoreDb,
}

impl CoachService {
    pub fn new(strava: StravaService, llm: LlmClient, db: FirestoreDb) -> Self {
        Self { strava, llm, db }
    }

    /// Fetch an activity from Strava, summarize it and store the result.
    ///
    /// Feedback already stored for the activity is kept.
    pub async fn import_activity(
        &self,
        athlete_id: u64,
        activity_id: u64,
    ) -> Result<ImportedActivity, AppError> {
        let raw_json = self.strava.get_activity(athlete_id, activity_id).await?;
        let raw = parse_activity(&raw_json)?;
        let summary = summarize_activity(&raw)?;
        let summary_text = render_prompt(&summary);

        let existing = self.db.get_activity(athlete_id, activity_id).await?;
        let (coach_feedback, is_coached) = existing
            .map(|a| (a.coach_feedback, a.is_coached))
            .unwrap_or((None, false));

        let activity = Activity {
            athlete_id,
            activity_id,
            start_date_local: raw.start_date_local.clone().unwrap_or_default(),
            summary: summary.clone(),
            summary_text: summary_text.clone(),
            coach_feedback,
            is_coached,
            updated_at: now_rfc3339(),
        };
        self.db.upsert_activity(&activity).await?;

        tracing::info!(
            athlete_id,
            activity_id,
            splits = summary.splits.len(),
            segments = summary.segments.len(),
            "Activity imported"
        );

        Ok(ImportedActivity {
            summary,
            summary_text,
        })
    }

    /// Generate coaching feedback for an activity.
    ///
    /// The credit balance is checked before any paid call and one credit is
    /// spent only once the model has answered.
    pub async fn coach_activity(
        &self,
        athlete_id: u64,
        activity_id: u64,
        publish: bool,
    ) -> Result<CoachResult, AppError> {
        let athlete = self
            .db
            .get_athlete(athlete_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Athlete {}", athlete_id)))?;

        if athlete.credits <= 0 {
            tracing::info!(athlete_id, "Coaching refused, no credits left");
            return Err(AppError::InsufficientCredits);
        }

        let imported = self.import_activity(athlete_id, activity_id).await?;

        let history: Vec<ActivitySummary> = self
            .db
            .get_recent_activities(athlete_id, HISTORY_LIMIT as u32 + 1)
            .await?
            .into_iter()
            .filter(|a| a.activity_id != activity_id)
            .take(HISTORY_LIMIT)
            .map(|a| a.summary)
            .collect();

        let goal = self
            .db
            .get_preferences(athlete_id)
            .await?
            .unwrap_or_default()
            .describe();

        let instructions = build_instructions(&history, &goal);
        let feedback = self
            .llm
            .generate(&instructions, &imported.summary_text)
            .await?;

        let athlete = self.db.consume_credit(athlete_id).await?;
        self.db
            .set_coach_feedback(athlete_id, activity_id, &feedback)
            .await?;

        let published = if publish {
            match self
                .strava
                .update_activity(
                    athlete_id,
                    activity_id,
                    &ActivityUpdate::description(with_signature(&feedback)),
                )
                .await
            {
                Ok(()) => true,
                Err(e) => {
                    // Feedback is stored and paid for; report instead of failing
                    tracing::warn!(athlete_id, activity_id, error = %e, "Failed to publish feedback to Strava");
                    false
                }
            }
        } else {
            false
        };

        tracing::info!(
            athlete_id,
            activity_id,
            history = history.len(),
            model = self.llm.model(),
            published,
            "Coaching feedback generated"
        );

        Ok(CoachResult {
            activity_id,
            feedback,
            credits_remaining: athlete.credits,
            published,
        })
    }

    /// Post the stored feedback for an activity as a Strava comment.
    ///
    /// The activity must have been coached already. No credit is spent.
    pub async fn comment_feedback(
        &self,
        athlete_id: u64,
        activity_id: u64,
    ) -> Result<(), AppError> {
        let feedback = self
            .db
            .get_activity(athlete_id, activity_id)
            .await?
            .and_then(|a| a.coach_feedback)
            .ok_or_else(|| {
                AppError::NotFound(format!("Coaching feedback for activity {}", activity_id))
            })?;

        self.strava
            .post_comment(athlete_id, activity_id, &feedback)
            .await?;

        tracing::info!(athlete_id, activity_id, "Feedback posted as comment");
        Ok(())
    }
}
