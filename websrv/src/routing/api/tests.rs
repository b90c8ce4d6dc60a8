// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde_json::{Value, json};
use warp::http::StatusCode;

use trackrater_repo_memory::InMemoryRatingRepo;
use trackrater_websrv_warp::handle_rejection;

use super::*;

const REQUEST_BODY_LIMIT_BYTES: u64 = 1024;

fn api_filters() -> impl Filter<Extract = (impl Reply,), Error = std::convert::Infallible> + Clone
{
    let shared_repo = Arc::new(InMemoryRatingRepo::new());
    warp::path("api")
        .and(create_filters(shared_repo, REQUEST_BODY_LIMIT_BYTES))
        .recover(handle_rejection)
}

async fn get_rating(
    filter: &(impl Filter<Extract = (impl Reply,), Error = std::convert::Infallible> + 'static),
    path: &str,
) -> (StatusCode, Value) {
    let response = warp::test::request()
        .method("GET")
        .path(path)
        .reply(filter)
        .await;
    (
        response.status(),
        serde_json::from_slice(response.body()).unwrap(),
    )
}

async fn post_rating(
    filter: &(impl Filter<Extract = (impl Reply,), Error = std::convert::Infallible> + 'static),
    body: impl AsRef<[u8]>,
) -> (StatusCode, Value) {
    let response = warp::test::request()
        .method("POST")
        .path("/api/rating")
        .header("content-type", "application/json")
        .body(body)
        .reply(filter)
        .await;
    (
        response.status(),
        serde_json::from_slice(response.body()).unwrap(),
    )
}

#[tokio::test]
async fn example_scenarios() {
    let filter = api_filters();

    assert_eq!(
        (
            StatusCode::OK,
            json!({ "averageRating": 5.0, "totalRatings": 1 })
        ),
        post_rating(&filter, r#"{"trackId":"abc","rating":5}"#).await
    );
    assert_eq!(
        (
            StatusCode::OK,
            json!({ "averageRating": 4.0, "totalRatings": 2 })
        ),
        post_rating(&filter, r#"{"trackId":"abc","rating":3}"#).await
    );
    assert_eq!(
        (
            StatusCode::OK,
            json!({ "averageRating": 4.0, "totalRatings": 2 })
        ),
        get_rating(&filter, "/api/rating?trackId=abc").await
    );
    assert_eq!(
        (
            StatusCode::OK,
            json!({ "averageRating": 0.0, "totalRatings": 0 })
        ),
        get_rating(&filter, "/api/rating?trackId=unknown").await
    );
    assert_eq!(
        (
            StatusCode::BAD_REQUEST,
            json!({ "error": "Invalid track ID or rating" })
        ),
        post_rating(&filter, r#"{"trackId":"abc","rating":7}"#).await
    );
    assert_eq!(
        (
            StatusCode::OK,
            json!({ "averageRating": 4.0, "totalRatings": 2 })
        ),
        get_rating(&filter, "/api/rating?trackId=abc").await
    );
    assert_eq!(
        (
            StatusCode::BAD_REQUEST,
            json!({ "error": "Track ID is required" })
        ),
        get_rating(&filter, "/api/rating").await
    );
}

#[tokio::test]
async fn query_with_empty_track_id() {
    let filter = api_filters();
    assert_eq!(
        (
            StatusCode::BAD_REQUEST,
            json!({ "error": "Track ID is required" })
        ),
        get_rating(&filter, "/api/rating?trackId=").await
    );
}

#[tokio::test]
async fn query_with_repeated_track_id() {
    let filter = api_filters();
    post_rating(&filter, r#"{"trackId":"abc","rating":4}"#).await;
    assert_eq!(
        (
            StatusCode::OK,
            json!({ "averageRating": 4.0, "totalRatings": 1 })
        ),
        get_rating(&filter, "/api/rating?trackId=abc&trackId=abc").await
    );
    assert_eq!(
        (
            StatusCode::OK,
            json!({ "averageRating": 4.0, "totalRatings": 1 })
        ),
        get_rating(&filter, "/api/rating?trackId=abc&trackId=xyz&other=1").await
    );
}

#[tokio::test]
async fn query_with_percent_encoded_track_id() {
    let filter = api_filters();
    post_rating(&filter, r#"{"trackId":"a b/c","rating":2}"#).await;
    assert_eq!(
        (
            StatusCode::OK,
            json!({ "averageRating": 2.0, "totalRatings": 1 })
        ),
        get_rating(&filter, "/api/rating?trackId=a%20b%2Fc").await
    );
}

#[tokio::test]
async fn submit_without_track_id() {
    let filter = api_filters();
    assert_eq!(
        (
            StatusCode::BAD_REQUEST,
            json!({ "error": "Invalid track ID or rating" })
        ),
        post_rating(&filter, r#"{"rating":3}"#).await
    );
}

#[tokio::test]
async fn submit_non_numeric_rating() {
    let filter = api_filters();
    assert_eq!(
        StatusCode::BAD_REQUEST,
        post_rating(&filter, r#"{"trackId":"abc","rating":"five"}"#)
            .await
            .0
    );
    assert_eq!(
        json!({ "averageRating": 0.0, "totalRatings": 0 }),
        get_rating(&filter, "/api/rating?trackId=abc").await.1
    );
}

#[tokio::test]
async fn submit_rating_beyond_floating_point_range() {
    let filter = api_filters();
    assert_eq!(
        (
            StatusCode::BAD_REQUEST,
            json!({ "error": "Invalid track ID or rating" })
        ),
        post_rating(&filter, r#"{"trackId":"abc","rating":1e400}"#).await
    );
}

#[tokio::test]
async fn submit_malformed_payload() {
    let filter = api_filters();
    assert_eq!(
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "Failed to process rating" })
        ),
        post_rating(&filter, "{\"trackId\":").await
    );
}

#[tokio::test]
async fn submit_oversized_payload() {
    let filter = api_filters();
    let body = format!(
        r#"{{"trackId":"{}","rating":3}}"#,
        "x".repeat(REQUEST_BODY_LIMIT_BYTES as usize)
    );
    assert_eq!(
        StatusCode::PAYLOAD_TOO_LARGE,
        post_rating(&filter, body).await.0
    );
}

#[tokio::test]
async fn tracks_are_independent() {
    let filter = api_filters();
    post_rating(&filter, r#"{"trackId":"abc","rating":1}"#).await;
    post_rating(&filter, r#"{"trackId":"xyz","rating":5}"#).await;
    post_rating(&filter, r#"{"trackId":"xyz","rating":4}"#).await;
    assert_eq!(
        json!({ "averageRating": 1.0, "totalRatings": 1 }),
        get_rating(&filter, "/api/rating?trackId=abc").await.1
    );
    assert_eq!(
        json!({ "averageRating": 4.5, "totalRatings": 2 }),
        get_rating(&filter, "/api/rating?trackId=xyz").await.1
    );
}

#[tokio::test]
async fn unsupported_method() {
    let filter = api_filters();
    let response = warp::test::request()
        .method("DELETE")
        .path("/api/rating?trackId=abc")
        .reply(&filter)
        .await;
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED, response.status());
}
