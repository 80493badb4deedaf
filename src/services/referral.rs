// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Referral codes.
//!
//! Every athlete gets a short code built from their name and Strava ID,
//! e.g. Jane Doe (athlete 1234567) gets `JeDe67`. Another athlete can
//! redeem it once.

use crate::error::AppError;
use crate::models::Athlete;

/// Errors from building a referral code.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReferralError {
    #[error("{0} must be at least two characters long")]
    TooShort(&'static str),
}

/// Build the referral code for an athlete.
///
/// First and last letter of the first name, first and last letter of the
/// last name, then the last two digits of the athlete ID.
pub fn referral_code(
    firstname: &str,
    lastname: &str,
    athlete_id: u64,
) -> Result<String, ReferralError> {
    let id = athlete_id.to_string();
    let (first_head, first_tail) = ends(firstname).ok_or(ReferralError::TooShort("firstname"))?;
    let (last_head, last_tail) = ends(lastname).ok_or(ReferralError::TooShort("lastname"))?;
    if id.len() < 2 {
        return Err(ReferralError::TooShort("athlete_id"));
    }

    Ok(format!(
        "{}{}{}{}{}",
        first_head,
        first_tail,
        last_head,
        last_tail,
        &id[id.len() - 2..]
    ))
}

/// First and last character of a string of at least two characters.
fn ends(s: &str) -> Option<(char, char)> {
    let mut chars = s.chars();
    let head = chars.next()?;
    let tail = chars.next_back()?;
    Some((head, tail))
}

/// Check that `athlete` may redeem `code`, returning the normalized code.
pub fn validate_redemption(athlete: &Athlete, code: &str) -> Result<String, AppError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::BadRequest("Referral code is empty".to_string()));
    }
    if athlete.used_ref_code.is_some() {
        return Err(AppError::BadRequest(
            "A referral code was already redeemed".to_string(),
        ));
    }
    if athlete.ref_code.as_deref() == Some(code) {
        return Err(AppError::BadRequest(
            "Cannot redeem your own referral code".to_string(),
        ));
    }
    Ok(code.to_string())
}
