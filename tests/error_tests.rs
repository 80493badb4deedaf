// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use wildstride::error::AppError;
use wildstride::summary::{RecordKind, SummaryError};

#[test]
fn test_is_strava_token_error_matches() {
    let err = AppError::StravaApi(AppError::STRAVA_TOKEN_ERROR.to_string());
    assert!(err.is_strava_token_error());
}

#[test]
fn test_is_strava_token_error_ignores_body_text() {
    // Only a 401 is a token error; words in other error bodies are not
    for msg in [
        "Invalid access token",
        "Token expired",
        r#"HTTP 400 Bad Request: {"errors":[{"resource":"RefreshToken","code":"invalid"}]}"#,
        r#"HTTP 400 Bad Request: {"errors":[{"field":"client_secret","code":"invalid"}]}"#,
    ] {
        let err = AppError::StravaApi(msg.to_string());
        assert!(!err.is_strava_token_error(), "{}", msg);
    }
}

#[test]
fn test_is_strava_token_error_no_match() {
    let err = AppError::StravaApi(AppError::STRAVA_RATE_LIMIT.to_string());
    assert!(!err.is_strava_token_error());
    assert!(err.is_strava_rate_limit());

    let err = AppError::StravaApi("Internal Server Error".to_string());
    assert!(!err.is_strava_token_error());

    let err = AppError::BadRequest("Bad Request".to_string());
    assert!(!err.is_strava_token_error());
}

#[test]
fn test_status_codes() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
        (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
        (AppError::InsufficientCredits, StatusCode::PAYMENT_REQUIRED),
        (AppError::StravaApi("x".into()), StatusCode::BAD_GATEWAY),
        (AppError::Llm("x".into()), StatusCode::BAD_GATEWAY),
        (AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        (
            AppError::Summary(SummaryError::MissingField {
                record: RecordKind::Split,
                field: "moving_time",
            }),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            AppError::Summary(SummaryError::InvalidRecord("bad".into())),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
    ];

    for (err, expected) in cases {
        let label = err.to_string();
        assert_eq!(err.into_response().status(), expected, "{}", label);
    }
}

#[tokio::test]
async fn test_missing_field_details_in_body() {
    let err: AppError = SummaryError::MissingField {
        record: RecordKind::Activity,
        field: "distance",
    }
    .into();

    let body = axum::body::to_bytes(err.into_response().into_body(), 4096)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], "invalid_activity");
    assert_eq!(
        json["details"],
        "Missing required field `distance` in activity"
    );
}
