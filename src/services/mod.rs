// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod coach;
pub mod llm;
pub mod referral;
pub mod strava;

pub use coach::{CoachResult, CoachService, ImportedActivity};
pub use llm::LlmClient;
pub use referral::{referral_code, ReferralError};
pub use strava::{ActivityUpdate, OAuthResult, StravaService};
