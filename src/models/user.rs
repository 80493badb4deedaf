// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Athlete model for storage and API.

use serde::{Deserialize, Serialize};

/// Credits granted to a newly connected athlete.
pub const INITIAL_CREDITS: i64 = 3;

/// Athlete profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Athlete {
    /// Strava athlete ID (also used as document ID)
    pub strava_athlete_id: u64,
    pub firstname: String,
    pub lastname: String,
    pub city: Option<String>,
    pub country: Option<String>,
    /// Profile picture URL
    pub profile_picture: Option<String>,
    /// Remaining coaching credits
    #[serde(default)]
    pub credits: i64,
    /// Coaching credits spent so far
    #[serde(default)]
    pub used_credits: i64,
    /// This athlete's own referral code
    pub ref_code: Option<String>,
    /// Referral code redeemed by this athlete, if any
    #[serde(default)]
    pub used_ref_code: Option<String>,
    /// When the athlete first connected
    pub created_at: String,
    pub updated_at: String,
}

/// Athlete's OAuth tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// When the access token expires (ISO 8601)
    pub expires_at: String,
    /// Granted OAuth scopes
    pub scopes: Vec<String>,
}

/// Free-form training goals used as coaching context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Goal description, e.g. "50 km trail race in June, 2500 m D+"
    pub goal: String,
    /// Target race distance in kilometers
    pub target_distance_km: Option<f64>,
    /// Target race elevation gain in meters
    pub target_elevation_m: Option<f64>,
    /// Target race date (YYYY-MM-DD)
    pub target_date: Option<String>,
    pub updated_at: String,
}

impl Preferences {
    /// Plain-text description of the goal for the coaching prompt.
    pub fn describe(&self) -> String {
        let mut lines = Vec::new();
        if !self.goal.is_empty() {
            lines.push(format!("Goal: {}", self.goal));
        }
        if let Some(distance) = self.target_distance_km {
            lines.push(format!("Target distance: {} km", distance));
        }
        if let Some(elevation) = self.target_elevation_m {
            lines.push(format!("Target elevation: {} m", elevation));
        }
        if let Some(date) = &self.target_date {
            lines.push(format!("Target date: {}", date));
        }
        if lines.is_empty() {
            "No goal set".to_string()
        } else {
            lines.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_athlete_starting_credits() {
        assert_eq!(crate::models::INITIAL_CREDITS, 3);

        let athlete: Athlete = serde_json::from_value(serde_json::json!({
            "strava_athlete_id": 42,
            "firstname": "Jane",
            "lastname": "Doe",
            "city": null,
            "country": null,
            "profile_picture": null,
            "ref_code": null,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(athlete.credits, 0);
        assert_eq!(athlete.used_credits, 0);
        assert_eq!(athlete.used_ref_code, None);
    }

    #[test]
    fn test_describe_empty_preferences() {
        assert_eq!(Preferences::default().describe(), "No goal set");
    }

    #[test]
    fn test_describe_full_preferences() {
        let prefs = Preferences {
            goal: "Finish my first ultra".to_string(),
            target_distance_km: Some(50.0),
            target_elevation_m: Some(2500.0),
            target_date: Some("2026-06-14".to_string()),
            updated_at: String::new(),
        };
        assert_eq!(
            prefs.describe(),
            "Goal: Finish my first ultra\nTarget distance: 50 km\nTarget elevation: 2500 m\nTarget date: 2026-06-14"
        );
    }
}
