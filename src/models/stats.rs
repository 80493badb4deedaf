// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Athlete totals reduced from the Strava stats endpoint.
//!
//! Strava reports totals as `{all,ytd,recent}_{run,ride,swim}_totals`.
//! Only all-time and year-to-date totals for runs and rides are kept.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sport types whose totals are tracked.
const TRACKED_ACTIVITY_TYPES: [&str; 2] = ["run", "ride"];

/// Totals block as returned by Strava (`ActivityTotal`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StravaTotals {
    pub count: u32,
    /// Meters
    pub distance: f64,
    /// Meters
    pub elevation_gain: f64,
}

/// Reduced totals for one period and sport type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_activities: u32,
    pub total_distance: f64,
    pub total_elevation: f64,
}

impl From<&StravaTotals> for Totals {
    fn from(totals: &StravaTotals) -> Self {
        Self {
            total_activities: totals.count,
            total_distance: totals.distance,
            total_elevation: totals.elevation_gain,
        }
    }
}

/// Stored athlete stats, keyed by period then activity type:
/// `{"all_time": {"run": {...}}, "ytd": {"ride": {...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AthleteStats {
    #[serde(default)]
    pub all_time: HashMap<String, Totals>,
    #[serde(default)]
    pub ytd: HashMap<String, Totals>,
    /// Last update timestamp (ISO 8601)
    #[serde(default)]
    pub updated_at: String,
}

impl AthleteStats {
    /// Build stats from the raw Strava stats payload.
    ///
    /// Missing or malformed totals blocks are skipped.
    pub fn from_strava(raw: &serde_json::Value, now: &str) -> Self {
        let mut stats = Self {
            updated_at: now.to_string(),
            ..Self::default()
        };

        for activity_type in TRACKED_ACTIVITY_TYPES {
            if let Some(totals) = totals_block(raw, &format!("all_{}_totals", activity_type)) {
                stats
                    .all_time
                    .insert(activity_type.to_string(), Totals::from(&totals));
            }
            if let Some(totals) = totals_block(raw, &format!("ytd_{}_totals", activity_type)) {
                stats
                    .ytd
                    .insert(activity_type.to_string(), Totals::from(&totals));
            }
        }

        stats
    }
}

fn totals_block(raw: &serde_json::Value, key: &str) -> Option<StravaTotals> {
    raw.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}
