// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod stats;
pub mod summary;
pub mod user;

pub use activity::{
    Activity, ActivityListItem, RawActivity, RawSegment, RawSegmentEffort, RawSplit,
};
pub use stats::AthleteStats;
pub use summary::{ActivitySummary, SegmentSummary, SplitSummary};
pub use user::{Athlete, Preferences, UserTokens, INITIAL_CREDITS};
