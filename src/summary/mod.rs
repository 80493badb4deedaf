// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity summary pipeline.
//!
//! Turns a detailed Strava activity into a normalized [`ActivitySummary`]
//! and renders that summary as the plain-text block sent to the coaching
//! model:
//!
//! ```text
//! RawActivity ──summarize_activity──▶ ActivitySummary ──render_prompt──▶ String
//!                 ├─ format_pace
//!                 ├─ format_splits
//!                 └─ format_segments
//! ```
//!
//! Everything here is pure and synchronous. Required fields that are
//! missing fail with [`SummaryError::MissingField`]; optional fields fall
//! back to fixed defaults; malformed-but-present values pass through.
//!
//! [`ActivitySummary`]: crate::models::ActivitySummary

pub mod activity;
pub mod pace;
pub mod prompt;
pub mod segments;
pub mod splits;

pub use activity::{parse_activity, steps_per_minute_from_per_foot_cadence, summarize_activity};
pub use pace::format_pace;
pub use prompt::{render_history, render_prompt};
pub use segments::format_segments;
pub use splits::format_splits;

use std::fmt;

/// Kind of raw record a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Activity,
    Split,
    SegmentEffort,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Activity => "activity",
            RecordKind::Split => "split",
            RecordKind::SegmentEffort => "segment effort",
        };
        f.write_str(name)
    }
}

/// Errors from building a summary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SummaryError {
    #[error("Missing required field `{field}` in {record}")]
    MissingField {
        record: RecordKind,
        field: &'static str,
    },

    #[error("Invalid activity record: {0}")]
    InvalidRecord(String),
}

/// Unwrap a required field. Absent and `null` are both missing.
pub(crate) fn require<'a, T>(
    value: Option<&'a T>,
    record: RecordKind,
    field: &'static str,
) -> Result<&'a T, SummaryError> {
    value.ok_or(SummaryError::MissingField { record, field })
}

/// Round to `places` decimal places, half-to-even on the exact value.
pub(crate) fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// Display wrapper for rounded floats: shortest round-trip form, always
/// with a fractional digit (`10.0`, `12.35`).
#[derive(Debug, Clone, Copy)]
pub struct Decimal(pub f64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
            write!(f, "{:.1}", value)
        } else {
            write!(f, "{}", value)
        }
    }
}

/// Token printed for an absent optional value. Distinct from the `N/A`
/// used for a missing pace.
pub const ABSENT_VALUE: &str = "None";

/// Display wrapper for optional values; absent renders as [`ABSENT_VALUE`].
#[derive(Debug, Clone, Copy)]
pub struct OrNone(pub Option<f64>);

impl fmt::Display for OrNone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => Decimal(value).fmt(f),
            None => f.write_str(ABSENT_VALUE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.345, 2), 12.35);
        assert_eq!(round_to(25.0, 1), 25.0);
        assert_eq!(round_to(182.36, 1), 182.4);
        assert_eq!(round_to(3.333, 2), 3.33);
        assert_eq!(round_to(0.0, 1), 0.0);
    }

    #[test]
    fn test_decimal_display() {
        assert_eq!(Decimal(10.0).to_string(), "10.0");
        assert_eq!(Decimal(12.35).to_string(), "12.35");
        assert_eq!(Decimal(120.4).to_string(), "120.4");
        assert_eq!(Decimal(0.0).to_string(), "0.0");
        assert_eq!(Decimal(-3.0).to_string(), "-3.0");
    }

    #[test]
    fn test_or_none_display() {
        assert_eq!(OrNone(None).to_string(), "None");
        assert_eq!(OrNone(Some(87.0)).to_string(), "87.0");
        assert_eq!(OrNone(Some(-2.5)).to_string(), "-2.5");
    }

    #[test]
    fn test_require() {
        let distance = Some(1000.0);
        assert_eq!(
            require(distance.as_ref(), RecordKind::Split, "distance"),
            Ok(&1000.0)
        );
        assert_eq!(
            require::<f64>(None, RecordKind::Split, "moving_time"),
            Err(SummaryError::MissingField {
                record: RecordKind::Split,
                field: "moving_time",
            })
        );
    }

    #[test]
    fn test_missing_field_message() {
        let err = SummaryError::MissingField {
            record: RecordKind::SegmentEffort,
            field: "segment",
        };
        assert_eq!(
            err.to_string(),
            "Missing required field `segment` in segment effort"
        );
    }
}
