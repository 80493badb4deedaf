// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Segment effort formatting.

use super::{format_pace, require, round_to, RecordKind, SummaryError};
use crate::models::{RawSegmentEffort, SegmentSummary};

/// Normalize segment efforts, preserving order.
pub fn format_segments(
    efforts: &[RawSegmentEffort],
) -> Result<Vec<SegmentSummary>, SummaryError> {
    efforts.iter().map(summarize_effort).collect()
}

fn summarize_effort(effort: &RawSegmentEffort) -> Result<SegmentSummary, SummaryError> {
    let kind = RecordKind::SegmentEffort;
    let name = require(effort.name.as_ref(), kind, "name")?;
    let distance = *require(effort.distance.as_ref(), kind, "distance")?;
    let segment = require(effort.segment.as_ref(), kind, "segment")?;

    Ok(SegmentSummary {
        name: name.clone(),
        distance_m: round_to(distance, 1),
        average_grade: segment.average_grade,
        avg_hr: round_to(effort.average_heartrate.unwrap_or(0.0), 1),
        avg_watts: round_to(effort.average_watts.unwrap_or(0.0), 1),
        pace: format_pace(effort.average_speed),
    })
}
