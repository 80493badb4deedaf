// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Normalized activity summaries.
//!
//! Values are rounded once, when the summary is built. Field names are the
//! persisted names, so the serialized form can be stored as-is.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Normalized view of one activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitySummary {
    pub name: String,
    pub sport_type: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub description: String,
    pub distance_km: f64,
    pub duration_min: f64,
    pub elevation_gain_m: f64,
    pub average_speed_mps: f64,
    pub pace: String,
    pub average_heart_rate: f64,
    pub max_heart_rate: f64,
    /// Steps per minute (both feet)
    pub average_cadence: f64,
    pub average_watts: f64,
    pub suffer_score: Option<f64>,
    pub calories: Option<f64>,
    pub splits: Vec<SplitSummary>,
    pub segments: Vec<SegmentSummary>,
    pub device_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SplitSummary {
    pub split: u32,
    pub distance_km: f64,
    pub time_min: f64,
    pub elevation_gain_m: f64,
    pub avg_hr: f64,
    pub avg_speed: f64,
    pub pace: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SegmentSummary {
    pub name: String,
    pub distance_m: f64,
    pub average_grade: Option<f64>,
    pub avg_hr: f64,
    pub avg_watts: f64,
    pub pace: String,
}
