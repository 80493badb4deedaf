// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity summarizer.

use serde::Deserialize;

use super::{format_pace, format_segments, format_splits, require, round_to, RecordKind, SummaryError};
use crate::models::{ActivitySummary, RawActivity};

/// Device label used when the activity does not name one.
pub const UNKNOWN_DEVICE: &str = "Unknown";

/// Length of the `YYYY-MM-DD` prefix of an ISO 8601 timestamp.
const DATE_PREFIX_LEN: usize = 10;

/// Decode a detailed-activity JSON payload into a typed record.
///
/// Absent keys are fine here; they are checked by [`summarize_activity`].
/// A value of the wrong JSON type is [`SummaryError::InvalidRecord`].
pub fn parse_activity(value: &serde_json::Value) -> Result<RawActivity, SummaryError> {
    RawActivity::deserialize(value).map_err(|e| SummaryError::InvalidRecord(e.to_string()))
}

/// Build the normalized summary of one activity.
pub fn summarize_activity(raw: &RawActivity) -> Result<ActivitySummary, SummaryError> {
    let kind = RecordKind::Activity;
    let name = require(raw.name.as_ref(), kind, "name")?;
    let sport_type = require(raw.sport_type.as_ref(), kind, "sport_type")?;
    let start_date_local = require(raw.start_date_local.as_ref(), kind, "start_date_local")?;
    let distance = *require(raw.distance.as_ref(), kind, "distance")?;
    let moving_time = *require(raw.moving_time.as_ref(), kind, "moving_time")?;
    let elevation_gain = *require(
        raw.total_elevation_gain.as_ref(),
        kind,
        "total_elevation_gain",
    )?;
    let average_speed = *require(raw.average_speed.as_ref(), kind, "average_speed")?;

    let splits = format_splits(raw.splits_metric.as_deref().unwrap_or_default())?;
    let segments = format_segments(raw.segment_efforts.as_deref().unwrap_or_default())?;

    Ok(ActivitySummary {
        name: name.clone(),
        sport_type: sport_type.clone(),
        date: calendar_date(start_date_local),
        description: raw.description.clone().unwrap_or_default(),
        distance_km: round_to(distance / 1000.0, 2),
        duration_min: round_to(moving_time / 60.0, 1),
        elevation_gain_m: round_to(elevation_gain, 1),
        average_speed_mps: round_to(average_speed, 2),
        pace: format_pace(Some(average_speed)),
        average_heart_rate: round_to(raw.average_heartrate.unwrap_or(0.0), 1),
        max_heart_rate: round_to(raw.max_heartrate.unwrap_or(0.0), 1),
        average_cadence: raw
            .average_cadence
            .map(steps_per_minute_from_per_foot_cadence)
            .unwrap_or(0.0),
        average_watts: round_to(raw.average_watts.unwrap_or(0.0), 1),
        suffer_score: raw.suffer_score,
        calories: raw.calories,
        splits,
        segments,
        device_name: raw
            .device_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_DEVICE.to_string()),
    })
}

impl TryFrom<&RawActivity> for ActivitySummary {
    type Error = SummaryError;

    fn try_from(raw: &RawActivity) -> Result<Self, Self::Error> {
        summarize_activity(raw)
    }
}

/// Convert Strava's per-foot running cadence to steps per minute.
///
/// Unit conversion: Strava reports one foot's cadence for runs, so the
/// value is rounded to 1 dp and then doubled.
pub fn steps_per_minute_from_per_foot_cadence(per_foot: f64) -> f64 {
    round_to(per_foot, 1) * 2.0
}

/// Calendar date label: the first ten characters of the local start time.
///
/// Not validated. A timestamp in an unexpected format yields whatever its
/// first ten characters are.
fn calendar_date(start_date_local: &str) -> String {
    start_date_local.chars().take(DATE_PREFIX_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawSegment, RawSegmentEffort, RawSplit};
    use serde_json::json;

    fn morning_run() -> RawActivity {
        RawActivity {
            name: Some("Morning Run".to_string()),
            sport_type: Some("Run".to_string()),
            start_date_local: Some("2024-05-01T06:30:00Z".to_string()),
            distance: Some(10000.0),
            moving_time: Some(3000.0),
            total_elevation_gain: Some(120.4),
            average_speed: Some(3.333),
            splits_metric: Some(vec![]),
            segment_efforts: Some(vec![]),
            ..RawActivity::default()
        }
    }

    #[test]
    fn test_morning_run_summary() {
        let summary = summarize_activity(&morning_run()).unwrap();

        assert_eq!(summary.name, "Morning Run");
        assert_eq!(summary.sport_type, "Run");
        assert_eq!(summary.date, "2024-05-01");
        assert_eq!(summary.description, "");
        assert_eq!(summary.distance_km, 10.0);
        assert_eq!(summary.duration_min, 50.0);
        assert_eq!(summary.elevation_gain_m, 120.4);
        assert_eq!(summary.average_speed_mps, 3.33);
        assert_eq!(summary.pace, "5:00 min/km");
        assert_eq!(summary.average_heart_rate, 0.0);
        assert_eq!(summary.max_heart_rate, 0.0);
        assert_eq!(summary.average_cadence, 0.0);
        assert_eq!(summary.average_watts, 0.0);
        assert_eq!(summary.suffer_score, None);
        assert_eq!(summary.calories, None);
        assert!(summary.splits.is_empty());
        assert!(summary.segments.is_empty());
        assert_eq!(summary.device_name, UNKNOWN_DEVICE);
    }

    #[test]
    fn test_rounding_rules() {
        let mut raw = morning_run();
        raw.distance = Some(12345.0);
        raw.moving_time = Some(1500.0);
        raw.max_heartrate = Some(182.36);
        raw.average_heartrate = Some(151.44);
        raw.average_watts = Some(243.25);

        let summary = summarize_activity(&raw).unwrap();
        assert_eq!(summary.distance_km, 12.35);
        assert_eq!(summary.duration_min, 25.0);
        assert_eq!(summary.max_heart_rate, 182.4);
        assert_eq!(summary.average_heart_rate, 151.4);
        assert_eq!(summary.average_watts, 243.2);
    }

    #[test]
    fn test_cadence_is_doubled_after_rounding() {
        let mut raw = morning_run();
        raw.average_cadence = Some(85.3);
        assert_eq!(summarize_activity(&raw).unwrap().average_cadence, 170.6);

        raw.average_cadence = Some(84.96);
        assert_eq!(summarize_activity(&raw).unwrap().average_cadence, 170.0);
    }

    #[test]
    fn test_score_and_calories_pass_through() {
        let mut raw = morning_run();
        raw.suffer_score = Some(0.0);
        raw.calories = Some(712.4);

        let summary = summarize_activity(&raw).unwrap();
        assert_eq!(summary.suffer_score, Some(0.0));
        assert_eq!(summary.calories, Some(712.4));
    }

    #[test]
    fn test_absent_sequences_yield_empty() {
        let mut raw = morning_run();
        raw.splits_metric = None;
        raw.segment_efforts = None;

        let summary = summarize_activity(&raw).unwrap();
        assert!(summary.splits.is_empty());
        assert!(summary.segments.is_empty());
    }

    #[test]
    fn test_nested_records_are_summarized() {
        let mut raw = morning_run();
        raw.splits_metric = Some(vec![RawSplit {
            split: Some(1),
            distance: Some(1000.0),
            moving_time: Some(300.0),
            average_speed: Some(3.333),
            ..RawSplit::default()
        }]);
        raw.segment_efforts = Some(vec![RawSegmentEffort {
            name: Some("Bridge Sprint".to_string()),
            distance: Some(400.0),
            segment: Some(RawSegment::default()),
            ..RawSegmentEffort::default()
        }]);

        let summary = summarize_activity(&raw).unwrap();
        assert_eq!(summary.splits.len(), 1);
        assert_eq!(summary.splits[0].time_min, 5.0);
        assert_eq!(summary.segments[0].name, "Bridge Sprint");
        assert_eq!(summary.segments[0].pace, "N/A");
    }

    #[test]
    fn test_nested_missing_field_propagates() {
        let mut raw = morning_run();
        raw.splits_metric = Some(vec![RawSplit::default()]);

        assert_eq!(
            summarize_activity(&raw).unwrap_err(),
            SummaryError::MissingField {
                record: RecordKind::Split,
                field: "split",
            }
        );
    }

    #[test]
    fn test_missing_average_speed_fails() {
        let mut raw = morning_run();
        raw.average_speed = None;

        assert_eq!(
            summarize_activity(&raw).unwrap_err(),
            SummaryError::MissingField {
                record: RecordKind::Activity,
                field: "average_speed",
            }
        );
    }

    #[test]
    fn test_malformed_date_is_sliced_not_rejected() {
        let mut raw = morning_run();
        raw.start_date_local = Some("May 1st, 2024 6:30".to_string());
        assert_eq!(summarize_activity(&raw).unwrap().date, "May 1st, 2");

        raw.start_date_local = Some("2024".to_string());
        assert_eq!(summarize_activity(&raw).unwrap().date, "2024");
    }

    #[test]
    fn test_try_from() {
        let summary = ActivitySummary::try_from(&morning_run()).unwrap();
        assert_eq!(summary.distance_km, 10.0);
    }

    #[test]
    fn test_parse_activity_null_and_absent_are_equivalent() {
        let value = json!({
            "name": "Lunch Ride",
            "sport_type": "Ride",
            "start_date_local": "2024-06-02T12:00:00Z",
            "distance": 40000,
            "moving_time": 4800,
            "total_elevation_gain": 350,
            "average_speed": 8.33,
            "max_heartrate": null,
            "average_cadence": null,
            "average_watts": null,
            "suffer_score": null,
            "device_name": null,
            "splits_metric": null
        });

        let raw = parse_activity(&value).unwrap();
        let summary = summarize_activity(&raw).unwrap();

        assert_eq!(summary.max_heart_rate, 0.0);
        assert_eq!(summary.average_cadence, 0.0);
        assert_eq!(summary.average_watts, 0.0);
        assert_eq!(summary.suffer_score, None);
        assert_eq!(summary.device_name, UNKNOWN_DEVICE);
        assert!(summary.splits.is_empty());
        assert_eq!(summary.pace, "2:00 min/km");
    }

    #[test]
    fn test_parse_activity_wrong_type() {
        let value = json!({"name": "Run", "distance": "ten kilometers"});
        assert!(matches!(
            parse_activity(&value),
            Err(SummaryError::InvalidRecord(_))
        ));
    }
}
