// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pace formatting.

/// Pace shown when there is no speed to derive it from.
pub const NO_PACE: &str = "N/A";

/// Format a speed in m/s as `"M:SS min/km"`.
///
/// Zero or absent speed yields `"N/A"`. Minutes are truncated, not rounded.
/// Negative or non-finite speeds saturate to `"0:00 min/km"`.
pub fn format_pace(speed_mps: Option<f64>) -> String {
    match speed_mps {
        Some(speed) if speed != 0.0 => {
            let pace_seconds = (1000.0 / speed) as u64;
            format!("{}:{:02} min/km", pace_seconds / 60, pace_seconds % 60)
        }
        _ => NO_PACE.to_string(),
    }
}
