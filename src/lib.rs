// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! WildStride: AI coaching feedback for Strava activities
//!
//! This crate provides the backend API that imports Strava activities,
//! condenses them into normalized summaries, and asks a language model
//! for coaching feedback on each one.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod summary;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{CoachService, StravaService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub strava_service: StravaService,
    pub coach_service: CoachService,
}
