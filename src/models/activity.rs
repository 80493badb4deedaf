// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity records: the detailed-activity wire format and the
//! stored activity document.
//!
//! Every wire field is optional here. Which fields are actually required
//! is decided by the summarizer, so a missing key surfaces as a named
//! `SummaryError::MissingField` instead of an opaque serde error.

use serde::{Deserialize, Serialize};

use crate::models::summary::ActivitySummary;

/// Detailed activity as returned by `GET /activities/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawActivity {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub sport_type: Option<String>,
    pub start_date_local: Option<String>,
    pub description: Option<String>,
    /// Meters
    pub distance: Option<f64>,
    /// Seconds
    pub moving_time: Option<f64>,
    /// Meters
    pub total_elevation_gain: Option<f64>,
    /// Meters per second
    pub average_speed: Option<f64>,
    pub average_heartrate: Option<f64>,
    pub max_heartrate: Option<f64>,
    /// Per-foot cadence for runs
    pub average_cadence: Option<f64>,
    pub average_watts: Option<f64>,
    pub suffer_score: Option<f64>,
    pub calories: Option<f64>,
    pub splits_metric: Option<Vec<RawSplit>>,
    pub segment_efforts: Option<Vec<RawSegmentEffort>>,
    pub device_name: Option<String>,
}

/// One metric split (usually 1 km).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSplit {
    pub split: Option<u32>,
    pub distance: Option<f64>,
    pub moving_time: Option<f64>,
    pub average_speed: Option<f64>,
    pub elevation_difference: Option<f64>,
    pub average_heartrate: Option<f64>,
}

/// Effort on a named segment within the activity.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSegmentEffort {
    pub name: Option<String>,
    pub distance: Option<f64>,
    pub segment: Option<RawSegment>,
    pub average_heartrate: Option<f64>,
    pub average_watts: Option<f64>,
    pub average_speed: Option<f64>,
}

/// The segment definition nested in an effort.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSegment {
    pub average_grade: Option<f64>,
}

/// Stored activity document in Firestore.
///
/// Document ID is `{athlete_id}_{activity_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Strava athlete ID (owner)
    pub athlete_id: u64,
    /// Strava activity ID
    pub activity_id: u64,
    /// Local start date/time as reported by Strava (used for ordering)
    pub start_date_local: String,
    /// Normalized summary
    pub summary: ActivitySummary,
    /// Rendered prompt text for the summary
    pub summary_text: String,
    /// Coaching feedback, once generated
    #[serde(default)]
    pub coach_feedback: Option<String>,
    #[serde(default)]
    pub is_coached: bool,
    /// Last write (ISO 8601)
    pub updated_at: String,
}

impl Activity {
    /// Firestore document ID for an athlete's activity.
    pub fn document_id(athlete_id: u64, activity_id: u64) -> String {
        format!("{}_{}", athlete_id, activity_id)
    }
}

/// Summary activity from the athlete activity list endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActivityListItem {
    pub id: u64,
    pub name: String,
    pub sport_type: String,
    pub start_date_local: String,
    pub distance: f64,
}
