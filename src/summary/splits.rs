// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Metric split formatting.

use super::{format_pace, require, round_to, RecordKind, SummaryError};
use crate::models::{RawSplit, SplitSummary};

/// Normalize splits, preserving order.
pub fn format_splits(splits: &[RawSplit]) -> Result<Vec<SplitSummary>, SummaryError> {
    splits.iter().map(summarize_split).collect()
}

fn summarize_split(split: &RawSplit) -> Result<SplitSummary, SummaryError> {
    let kind = RecordKind::Split;
    let ordinal = *require(split.split.as_ref(), kind, "split")?;
    let distance = *require(split.distance.as_ref(), kind, "distance")?;
    let moving_time = *require(split.moving_time.as_ref(), kind, "moving_time")?;
    let average_speed = *require(split.average_speed.as_ref(), kind, "average_speed")?;

    Ok(SplitSummary {
        split: ordinal,
        distance_km: round_to(distance / 1000.0, 2),
        time_min: round_to(moving_time / 60.0, 2),
        elevation_gain_m: split.elevation_difference.unwrap_or(0.0),
        avg_hr: round_to(split.average_heartrate.unwrap_or(0.0), 1),
        avg_speed: round_to(average_speed, 2),
        pace: format_pace(Some(average_speed)),
    })
}
