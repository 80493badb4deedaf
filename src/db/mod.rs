// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const ATHLETES: &str = "athletes";
    pub const TOKENS: &str = "tokens";
    /// Activity documents keyed by `{athlete_id}_{activity_id}`
    pub const ACTIVITIES: &str = "activities";
    pub const PREFERENCES: &str = "preferences";
    /// Strava totals per athlete (keyed by athlete_id)
    pub const ATHLETE_STATS: &str = "athlete_stats";
}
