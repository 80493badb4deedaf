// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt rendering for the coaching model.
//!
//! The output is plain text with Markdown-style emphasis. Nothing is
//! escaped, so it must not be embedded in HTML without sanitizing it first.

use super::{Decimal, OrNone};
use crate::models::ActivitySummary;

/// Render one summary as a fixed-layout text block.
pub fn render_prompt(summary: &ActivitySummary) -> String {
    let mut lines = Vec::new();

    lines.push(format!("🏃 **Activity Name:** {}", summary.name));
    lines.push(format!("📅 **Date:** {}", summary.date));
    lines.push(format!("🏷️ **Type:** {}", summary.sport_type));
    lines.push(format!("📝 **Description:** {}\n", summary.description));

    lines.push(format!("📏 **Distance:** {} km", Decimal(summary.distance_km)));
    lines.push(format!("⏱️ **Duration:** {} min", Decimal(summary.duration_min)));
    lines.push(format!(
        "⛰️ **Elevation Gain:** {} m",
        Decimal(summary.elevation_gain_m)
    ));
    lines.push(format!("🚀 **Pace:** {}", summary.pace));
    lines.push(format!(
        "❤️ **Avg HR:** {} bpm | **Max HR:** {} bpm",
        Decimal(summary.average_heart_rate),
        Decimal(summary.max_heart_rate)
    ));
    lines.push(format!("⚙️ **Cadence:** {} spm", Decimal(summary.average_cadence)));
    lines.push(format!("⚡ **Avg Watts:** {}", Decimal(summary.average_watts)));
    lines.push(format!("🔥 **Suffer Score:** {}", OrNone(summary.suffer_score)));
    lines.push(format!("🔋 **Calories:** {}", OrNone(summary.calories)));
    lines.push(format!("📟 **Device:** {}\n", summary.device_name));

    if !summary.splits.is_empty() {
        lines.push("📊 **Splits:**".to_string());
        for split in &summary.splits {
            lines.push(format!(
                " - Split {}: {} km in {} min (Pace: {}, HR: {} bpm, Elev: {} m)",
                split.split,
                Decimal(split.distance_km),
                Decimal(split.time_min),
                split.pace,
                Decimal(split.avg_hr),
                Decimal(split.elevation_gain_m)
            ));
        }
    }

    if !summary.segments.is_empty() {
        lines.push("\n📍 **Segment Efforts:**".to_string());
        for segment in &summary.segments {
            lines.push(format!(
                " - {}: {} m @ {}% (HR: {} bpm, Watts: {}, Pace: {})",
                segment.name,
                Decimal(segment.distance_m),
                OrNone(segment.average_grade),
                Decimal(segment.avg_hr),
                Decimal(segment.avg_watts),
                segment.pace
            ));
        }
    }

    lines.join("\n")
}

/// Render several summaries, separated by a blank line.
pub fn render_history(summaries: &[ActivitySummary]) -> String {
    summaries
        .iter()
        .map(render_prompt)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SegmentSummary, SplitSummary};

    fn summary() -> ActivitySummary {
        ActivitySummary {
            name: "Morning Run".to_string(),
            sport_type: "Run".to_string(),
            date: "2024-05-01".to_string(),
            description: "Easy loop".to_string(),
            distance_km: 10.0,
            duration_min: 50.0,
            elevation_gain_m: 120.4,
            average_speed_mps: 3.33,
            pace: "5:00 min/km".to_string(),
            average_heart_rate: 148.2,
            max_heart_rate: 171.0,
            average_cadence: 170.6,
            average_watts: 0.0,
            suffer_score: Some(42.0),
            calories: None,
            splits: vec![],
            segments: vec![],
            device_name: "Unknown".to_string(),
        }
    }

    #[test]
    fn test_header_and_metrics_layout() {
        let expected = "🏃 **Activity Name:** Morning Run\n\
                        📅 **Date:** 2024-05-01\n\
                        🏷️ **Type:** Run\n\
                        📝 **Description:** Easy loop\n\n\
                        📏 **Distance:** 10.0 km\n\
                        ⏱️ **Duration:** 50.0 min\n\
                        ⛰️ **Elevation Gain:** 120.4 m\n\
                        🚀 **Pace:** 5:00 min/km\n\
                        ❤️ **Avg HR:** 148.2 bpm | **Max HR:** 171.0 bpm\n\
                        ⚙️ **Cadence:** 170.6 spm\n\
                        ⚡ **Avg Watts:** 0.0\n\
                        🔥 **Suffer Score:** 42.0\n\
                        🔋 **Calories:** None\n\
                        📟 **Device:** Unknown\n";
        assert_eq!(render_prompt(&summary()), expected);
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let text = render_prompt(&summary());
        assert!(!text.contains("Splits"));
        assert!(!text.contains("Segment Efforts"));
    }

    #[test]
    fn test_split_and_segment_lines() {
        let mut s = summary();
        s.splits = vec![
            SplitSummary {
                split: 1,
                distance_km: 1.0,
                time_min: 5.02,
                elevation_gain_m: -4.2,
                avg_hr: 151.3,
                avg_speed: 3.33,
                pace: "5:00 min/km".to_string(),
            },
            SplitSummary {
                split: 2,
                distance_km: 1.0,
                time_min: 4.85,
                elevation_gain_m: 0.0,
                avg_hr: 0.0,
                avg_speed: 3.44,
                pace: "4:50 min/km".to_string(),
            },
        ];
        s.segments = vec![SegmentSummary {
            name: "Hill Climb".to_string(),
            distance_m: 842.7,
            average_grade: Some(6.3),
            avg_hr: 164.0,
            avg_watts: 251.6,
            pace: "6:40 min/km".to_string(),
        }];

        let text = render_prompt(&s);
        let tail: Vec<&str> = text.lines().skip(16).collect();
        assert_eq!(
            tail,
            vec![
                "📊 **Splits:**",
                " - Split 1: 1.0 km in 5.02 min (Pace: 5:00 min/km, HR: 151.3 bpm, Elev: -4.2 m)",
                " - Split 2: 1.0 km in 4.85 min (Pace: 4:50 min/km, HR: 0.0 bpm, Elev: 0.0 m)",
                "",
                "📍 **Segment Efforts:**",
                " - Hill Climb: 842.7 m @ 6.3% (HR: 164.0 bpm, Watts: 251.6, Pace: 6:40 min/km)",
            ]
        );
    }

    #[test]
    fn test_null_grade_renders_none() {
        let mut s = summary();
        s.segments = vec![SegmentSummary {
            name: "Flat".to_string(),
            distance_m: 100.0,
            average_grade: None,
            avg_hr: 0.0,
            avg_watts: 0.0,
            pace: "N/A".to_string(),
        }];
        let text = render_prompt(&s);
        assert_eq!(
            text.lines().last(),
            Some(" - Flat: 100.0 m @ None% (HR: 0.0 bpm, Watts: 0.0, Pace: N/A)")
        );
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let s = summary();
        assert_eq!(render_prompt(&s), render_prompt(&s));
    }

    #[test]
    fn test_render_history() {
        let mut second = summary();
        second.name = "Evening Run".to_string();

        let text = render_history(&[summary(), second.clone()]);
        let expected = format!("{}\n\n{}", render_prompt(&summary()), render_prompt(&second));
        assert_eq!(text, expected);
        assert_eq!(render_history(&[]), "");
    }
}
